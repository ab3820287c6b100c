pub mod config;
pub mod profile;
pub mod tasks;
pub mod timer;
