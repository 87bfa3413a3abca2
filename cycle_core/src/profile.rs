//! User profile persistence with file locking.
//!
//! The profile owns the user's cycle settings and the projection cached
//! alongside them. Callers hold the profile explicitly and pass it where it
//! is needed; the projection is rebuilt whenever the settings change.

use crate::{CycleSettings, CycleSummary, Error, Result, UserCycle};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// A user's profile and cached cycle projection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cycle: Option<UserCycle>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            email: None,
            cycle: None,
        }
    }
}

impl UserProfile {
    /// True once cycle settings have been provided
    pub fn is_configured(&self) -> bool {
        self.cycle.is_some()
    }

    /// The cached cycle, or `NotConfigured`
    pub fn cycle(&self) -> Result<&UserCycle> {
        self.cycle.as_ref().ok_or(Error::NotConfigured)
    }

    /// Replace the cycle settings and rebuild the projection
    pub fn setup_cycle(&mut self, settings: CycleSettings, today: NaiveDate, cycles_to_generate: u32) {
        tracing::info!(
            "Setting up cycle: length {}, period {}, last start {}",
            settings.average_cycle_length,
            settings.period_length,
            settings.last_period_start_date
        );
        self.cycle = Some(UserCycle::from_settings(settings, today, cycles_to_generate));
    }

    /// Update the cached current phase/day for a new `today`
    pub fn refresh(&mut self, today: NaiveDate) -> Result<CycleSummary> {
        let cycle = self.cycle.as_mut().ok_or(Error::NotConfigured)?;
        let summary = cycle.summary(today);
        cycle.current_phase = summary.current_phase;
        cycle.current_cycle_day = summary.current_cycle_day;
        Ok(summary)
    }

    /// Load a profile from a file with shared locking
    ///
    /// Returns a default (unconfigured) profile if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns a default profile.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No profile file found, using default profile");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open profile {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock profile {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read profile {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<UserProfile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", path);
                Ok(profile)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse profile {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save the profile with exclusive locking
    ///
    /// Atomically writes the profile by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", path);
        Ok(())
    }

    /// Load the profile, modify it, and save it back
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut UserProfile) -> Result<()>,
    {
        let mut profile = Self::load(path)?;
        f(&mut profile)?;
        profile.save(path)?;
        Ok(profile)
    }

    /// Remove the profile file, returning whether one existed
    pub fn remove(path: &Path) -> Result<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::info!("Removed profile {:?}", path);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
