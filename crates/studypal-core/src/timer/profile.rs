//! Timer profiles and the mode catalog.
//!
//! A profile bundles the three phase durations with the long-break cadence.
//! The catalog holds the three fixed profiles plus one user-editable
//! `CUSTOM` profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// One of the three alternating intervals of a focus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "WORK",
            Phase::ShortBreak => "SHORT_BREAK",
            Phase::LongBreak => "LONG_BREAK",
        }
    }

    /// Human-readable heading used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "FOCUS TIME",
            Phase::ShortBreak => "SHORT BREAK",
            Phase::LongBreak => "LONG BREAK",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names of the catalog entries.
///
/// Serialized upper-case; deserialized through [`FromStr`], so config files
/// accept any casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum ProfileName {
    Beginner,
    Intermediate,
    Pro,
    Custom,
}

impl ProfileName {
    /// Catalog order.
    pub const ALL: [ProfileName; 4] = [
        ProfileName::Beginner,
        ProfileName::Intermediate,
        ProfileName::Pro,
        ProfileName::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileName::Beginner => "BEGINNER",
            ProfileName::Intermediate => "INTERMEDIATE",
            ProfileName::Pro => "PRO",
            ProfileName::Custom => "CUSTOM",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProfileName::Beginner => "Beginner",
            ProfileName::Intermediate => "Intermediate",
            ProfileName::Pro => "Pro",
            ProfileName::Custom => "Custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProfileName::Beginner => "Perfect for getting started",
            ProfileName::Intermediate => "Balanced productivity mode",
            ProfileName::Pro => "Maximum focus sessions",
            ProfileName::Custom => "Your personalized settings",
        }
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileName {
    type Err = TimerError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ProfileName::ALL
            .into_iter()
            .find(|name| name.as_str() == normalized)
            .ok_or_else(|| TimerError::UnknownProfile(s.to_string()))
    }
}

impl TryFrom<String> for ProfileName {
    type Error = TimerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Durations (in seconds) and long-break cadence for one profile.
///
/// Invariant: every duration is positive and `cycles_per_long_break >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeProfile {
    pub name: ProfileName,
    pub work_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
    pub cycles_per_long_break: u32,
}

impl ModeProfile {
    const fn minutes(
        name: ProfileName,
        work_min: u64,
        short_break_min: u64,
        long_break_min: u64,
        cycles_per_long_break: u32,
    ) -> Self {
        Self {
            name,
            work_secs: work_min * 60,
            short_break_secs: short_break_min * 60,
            long_break_secs: long_break_min * 60,
            cycles_per_long_break,
        }
    }

    pub const BEGINNER: ModeProfile = ModeProfile::minutes(ProfileName::Beginner, 10, 5, 20, 3);
    pub const INTERMEDIATE: ModeProfile =
        ModeProfile::minutes(ProfileName::Intermediate, 25, 8, 25, 4);
    pub const PRO: ModeProfile = ModeProfile::minutes(ProfileName::Pro, 60, 8, 30, 4);
    pub const CUSTOM_DEFAULT: ModeProfile =
        ModeProfile::minutes(ProfileName::Custom, 25, 5, 15, 4);

    /// Configured length of `phase` in seconds.
    pub fn duration_secs(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }

    /// Break that follows the `completed_cycles`-th work phase.
    pub fn break_after(&self, completed_cycles: u64) -> Phase {
        let cadence = u64::from(self.cycles_per_long_break.max(1));
        if completed_cycles % cadence == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }

    /// Check the profile invariant.
    pub fn validate(&self) -> Result<(), TimerError> {
        let durations = [
            ("work_min", self.work_secs),
            ("short_break_min", self.short_break_secs),
            ("long_break_min", self.long_break_secs),
        ];
        for (field, secs) in durations {
            if secs == 0 {
                return Err(TimerError::InvalidProfile {
                    field,
                    message: "duration must be positive".into(),
                });
            }
        }
        if self.cycles_per_long_break == 0 {
            return Err(TimerError::InvalidProfile {
                field: "cycles_per_long_break",
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Partial update for the custom profile. Durations are whole minutes;
/// `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProfileUpdate {
    #[serde(default)]
    pub work_min: Option<u64>,
    #[serde(default)]
    pub short_break_min: Option<u64>,
    #[serde(default)]
    pub long_break_min: Option<u64>,
    #[serde(default)]
    pub cycles_per_long_break: Option<u32>,
}

impl CustomProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.work_min.is_none()
            && self.short_break_min.is_none()
            && self.long_break_min.is_none()
            && self.cycles_per_long_break.is_none()
    }
}

/// Upper bound for a single phase; keeps second arithmetic far from overflow.
const MAX_PHASE_MINUTES: u64 = 24 * 60;

fn minutes_to_secs(field: &'static str, minutes: u64) -> Result<u64, TimerError> {
    if minutes == 0 {
        return Err(TimerError::InvalidProfile {
            field,
            message: "must be a positive number of minutes".into(),
        });
    }
    if minutes > MAX_PHASE_MINUTES {
        return Err(TimerError::InvalidProfile {
            field,
            message: format!("must not exceed {MAX_PHASE_MINUTES} minutes"),
        });
    }
    Ok(minutes * 60)
}

/// The fixed profiles plus the editable custom one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCatalog {
    custom: ModeProfile,
}

impl Default for ModeCatalog {
    fn default() -> Self {
        Self {
            custom: ModeProfile::CUSTOM_DEFAULT,
        }
    }
}

impl ModeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with a previously saved custom profile.
    pub fn with_custom(update: &CustomProfileUpdate) -> Result<Self, TimerError> {
        let mut catalog = Self::default();
        catalog.set_custom_profile(update)?;
        Ok(catalog)
    }

    pub fn profile(&self, name: ProfileName) -> ModeProfile {
        match name {
            ProfileName::Beginner => ModeProfile::BEGINNER,
            ProfileName::Intermediate => ModeProfile::INTERMEDIATE,
            ProfileName::Pro => ModeProfile::PRO,
            ProfileName::Custom => self.custom.clone(),
        }
    }

    /// Look up a profile by (case-insensitive) name.
    pub fn get_profile(&self, name: &str) -> Result<ModeProfile, TimerError> {
        let name: ProfileName = name.parse()?;
        Ok(self.profile(name))
    }

    /// All profiles in catalog order.
    pub fn profiles(&self) -> Vec<ModeProfile> {
        ProfileName::ALL.iter().map(|n| self.profile(*n)).collect()
    }

    pub fn custom(&self) -> &ModeProfile {
        &self.custom
    }

    /// Merge `update` into the custom profile.
    ///
    /// Validation happens before anything is written, so a rejected update
    /// leaves the previous custom profile in place.
    pub fn set_custom_profile(
        &mut self,
        update: &CustomProfileUpdate,
    ) -> Result<ModeProfile, TimerError> {
        let mut merged = self.custom.clone();
        if let Some(min) = update.work_min {
            merged.work_secs = minutes_to_secs("work_min", min)?;
        }
        if let Some(min) = update.short_break_min {
            merged.short_break_secs = minutes_to_secs("short_break_min", min)?;
        }
        if let Some(min) = update.long_break_min {
            merged.long_break_secs = minutes_to_secs("long_break_min", min)?;
        }
        if let Some(cycles) = update.cycles_per_long_break {
            merged.cycles_per_long_break = cycles;
        }
        merged.validate()?;

        self.custom = merged;
        Ok(self.custom.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_profiles_match_catalog_table() {
        let catalog = ModeCatalog::new();
        let beginner = catalog.get_profile("BEGINNER").unwrap();
        assert_eq!(beginner.work_secs, 600);
        assert_eq!(beginner.short_break_secs, 300);
        assert_eq!(beginner.long_break_secs, 1200);
        assert_eq!(beginner.cycles_per_long_break, 3);

        let intermediate = catalog.get_profile("INTERMEDIATE").unwrap();
        assert_eq!(intermediate.work_secs, 1500);
        assert_eq!(intermediate.short_break_secs, 480);
        assert_eq!(intermediate.long_break_secs, 1500);
        assert_eq!(intermediate.cycles_per_long_break, 4);

        let pro = catalog.get_profile("PRO").unwrap();
        assert_eq!(pro.work_secs, 3600);
        assert_eq!(pro.long_break_secs, 1800);
    }

    #[test]
    fn profile_lookup_is_case_insensitive() {
        let catalog = ModeCatalog::new();
        assert_eq!(catalog.get_profile("pro").unwrap().name, ProfileName::Pro);
        assert_eq!(
            catalog.get_profile(" Intermediate ").unwrap().name,
            ProfileName::Intermediate
        );
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let catalog = ModeCatalog::new();
        assert_eq!(
            catalog.get_profile("EXPERT"),
            Err(TimerError::UnknownProfile("EXPERT".into()))
        );
    }

    #[test]
    fn custom_update_merges_partial_fields() {
        let mut catalog = ModeCatalog::new();
        let updated = catalog
            .set_custom_profile(&CustomProfileUpdate {
                work_min: Some(50),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.work_secs, 3000);
        assert_eq!(updated.short_break_secs, 300);
        assert_eq!(updated.long_break_secs, 900);
        assert_eq!(updated.cycles_per_long_break, 4);

        let again = catalog
            .set_custom_profile(&CustomProfileUpdate {
                cycles_per_long_break: Some(2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(again.work_secs, 3000);
        assert_eq!(again.cycles_per_long_break, 2);
    }

    #[test]
    fn rejected_custom_update_keeps_previous_values() {
        let mut catalog = ModeCatalog::new();
        let err = catalog
            .set_custom_profile(&CustomProfileUpdate {
                work_min: Some(30),
                short_break_min: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            TimerError::InvalidProfile {
                field: "short_break_min",
                ..
            }
        ));
        assert_eq!(catalog.custom(), &ModeProfile::CUSTOM_DEFAULT);
    }

    #[test]
    fn zero_cycles_is_invalid() {
        let mut catalog = ModeCatalog::new();
        let err = catalog
            .set_custom_profile(&CustomProfileUpdate {
                cycles_per_long_break: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            TimerError::InvalidProfile {
                field: "cycles_per_long_break",
                ..
            }
        ));
    }

    #[test]
    fn oversized_duration_is_invalid() {
        let mut catalog = ModeCatalog::new();
        assert!(catalog
            .set_custom_profile(&CustomProfileUpdate {
                long_break_min: Some(u64::MAX),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn break_after_follows_cadence() {
        let p = ModeProfile::INTERMEDIATE;
        assert_eq!(p.break_after(1), Phase::ShortBreak);
        assert_eq!(p.break_after(3), Phase::ShortBreak);
        assert_eq!(p.break_after(4), Phase::LongBreak);
        assert_eq!(p.break_after(8), Phase::LongBreak);
    }

    #[test]
    fn profiles_are_listed_in_catalog_order() {
        let names: Vec<_> = ModeCatalog::new()
            .profiles()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ProfileName::ALL.to_vec());
    }

    #[test]
    fn phase_serializes_screaming_case() {
        let json = serde_json::to_string(&Phase::ShortBreak).unwrap();
        assert_eq!(json, "\"SHORT_BREAK\"");
    }
}
