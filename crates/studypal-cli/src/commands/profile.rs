//! Timer profile commands.
//!
//! Lists the catalog and edits the CUSTOM profile stored in the config.

use clap::Subcommand;
use studypal_core::timer::format_clock;
use studypal_core::{Config, CustomProfileUpdate, ModeProfile};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// List all timer profiles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one profile
    Show {
        /// Profile name (BEGINNER, INTERMEDIATE, PRO, CUSTOM)
        name: String,
    },

    /// Edit the CUSTOM profile; omitted values keep their current setting
    SetCustom {
        /// Work phase length in minutes
        #[arg(long)]
        work: Option<u64>,
        /// Short break length in minutes
        #[arg(long)]
        short_break: Option<u64>,
        /// Long break length in minutes
        #[arg(long)]
        long_break: Option<u64>,
        /// Work phases between long breaks
        #[arg(long)]
        cycles: Option<u32>,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::List { json } => list_profiles(json),
        ProfileAction::Show { name } => show_profile(&name),
        ProfileAction::SetCustom {
            work,
            short_break,
            long_break,
            cycles,
        } => set_custom(CustomProfileUpdate {
            work_min: work,
            short_break_min: short_break,
            long_break_min: long_break,
            cycles_per_long_break: cycles,
        }),
    }
}

fn list_profiles(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = config.catalog()?;
    let profiles = catalog.profiles();

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    println!("Timer profiles:");
    println!();
    for profile in &profiles {
        let marker = if profile.name == config.timer.default_profile {
            "*"
        } else {
            " "
        };
        println!("{marker} {}", describe(profile));
    }
    Ok(())
}

fn show_profile(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Config::load()?.catalog()?;
    let profile = catalog.get_profile(name)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn set_custom(update: CustomProfileUpdate) -> Result<(), Box<dyn std::error::Error>> {
    if update.is_empty() {
        return Err("nothing to change: pass --work, --short-break, --long-break or --cycles".into());
    }
    let mut config = Config::load()?;
    let mut catalog = config.catalog()?;
    let merged = catalog.set_custom_profile(&update)?;

    config.custom.work_min = merged.work_secs / 60;
    config.custom.short_break_min = merged.short_break_secs / 60;
    config.custom.long_break_min = merged.long_break_secs / 60;
    config.custom.cycles_per_long_break = merged.cycles_per_long_break;
    config.save()?;

    println!("{}", describe(&merged));
    Ok(())
}

fn describe(profile: &ModeProfile) -> String {
    format!(
        "{:<13} work {}  short {}  long {}  long break every {} ({}: {})",
        profile.name.as_str(),
        format_clock(profile.work_secs),
        format_clock(profile.short_break_secs),
        format_clock(profile.long_break_secs),
        profile.cycles_per_long_break,
        profile.name.display_name(),
        profile.name.description(),
    )
}
