//! Command-line argument parsing.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use herdbook_reproduction::Species;

/// Breeding reminders for a herd export.
#[derive(Debug, Parser)]
#[command(name = "herdbook")]
#[command(about = "Reproductive status and heat/birth forecasts for a herd", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Herd export: JSON array of animals with their reproduction records
    #[arg(long, global = true, default_value = "herd.json")]
    pub herd: PathBuf,

    /// Calibration file (JSON); takes precedence over --species
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Built-in calibration preset
    #[arg(long, global = true, default_value = "sheep")]
    pub species: Species,

    /// Reference day (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    pub now: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Current reproductive status of every animal
    Status,

    /// Heats whose surveillance window opens within the horizon
    UpcomingHeats {
        #[arg(long, default_value_t = 21)]
        horizon: u32,
    },

    /// Births whose surveillance window opens within the horizon
    UpcomingBirths {
        #[arg(long, default_value_t = 30)]
        horizon: u32,
    },

    /// Active females per reproductive status
    Summary,

    /// Records whose date cannot be read (the engine skips them)
    Check,
}
