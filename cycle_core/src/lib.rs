#![forbid(unsafe_code)]

//! Core domain model and business logic for the cycle tracker.
//!
//! This crate provides:
//! - Domain types (settings, phases, projected days, journal entries)
//! - The cycle projection engine and hormone curves
//! - Static phase recommendations and day content
//! - Persistence (profile, journal log, CSV export)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod projector;
pub mod hormones;
pub mod catalog;
pub mod profile;
pub mod journal;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, SettingsBounds};
pub use projector::{
    days_since_last_period, days_until_next_period, find_cycle_day, phase_for_day,
    phase_lengths, project_cycle_days, project_cycle_days_default, summarize,
    DEFAULT_CYCLES_TO_GENERATE,
};
pub use hormones::hormone_levels;
pub use catalog::{day_content, get_default_catalog, phase_info, recommendations};
pub use profile::UserProfile;
pub use journal::{JournalSink, JsonlJournal};
pub use export::{export_journal_csv, export_timeline_csv};
