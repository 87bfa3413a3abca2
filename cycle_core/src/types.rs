//! Core domain types for the cycle tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Cycle settings and the phases a cycle is partitioned into
//! - Projected cycle days and the cached per-user projection
//! - Journal entries (mood, symptoms, notes)
//! - Phase recommendations and per-day content

use crate::config::SettingsBounds;
use crate::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Cycle Types
// ============================================================================

/// One of the four contiguous segments of a cycle, in cyclic order
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
}

impl CyclePhase {
    /// All phases in cycle order
    pub const ALL: [CyclePhase; 4] = [
        CyclePhase::Menstrual,
        CyclePhase::Follicular,
        CyclePhase::Ovulatory,
        CyclePhase::Luteal,
    ];

    /// The phase that follows this one (luteal wraps to the next cycle's menstrual)
    pub fn next(self) -> Self {
        match self {
            CyclePhase::Menstrual => CyclePhase::Follicular,
            CyclePhase::Follicular => CyclePhase::Ovulatory,
            CyclePhase::Ovulatory => CyclePhase::Luteal,
            CyclePhase::Luteal => CyclePhase::Menstrual,
        }
    }

    /// Lowercase identifier, matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "menstrual",
            CyclePhase::Follicular => "follicular",
            CyclePhase::Ovulatory => "ovulatory",
            CyclePhase::Luteal => "luteal",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CyclePhase::Menstrual => "Menstrual",
            CyclePhase::Follicular => "Follicular",
            CyclePhase::Ovulatory => "Ovulatory",
            CyclePhase::Luteal => "Luteal",
        };
        f.write_str(name)
    }
}

impl FromStr for CyclePhase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "menstrual" => Ok(CyclePhase::Menstrual),
            "follicular" => Ok(CyclePhase::Follicular),
            "ovulatory" => Ok(CyclePhase::Ovulatory),
            "luteal" => Ok(CyclePhase::Luteal),
            other => Err(Error::Other(format!("Unknown phase: {}", other))),
        }
    }
}

/// User-provided cycle parameters, the sole input to the projector
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CycleSettings {
    pub average_cycle_length: u32,
    pub period_length: u32,
    pub last_period_start_date: NaiveDate,
}

impl CycleSettings {
    pub fn new(average_cycle_length: u32, period_length: u32, last_period_start_date: NaiveDate) -> Self {
        Self {
            average_cycle_length,
            period_length,
            last_period_start_date,
        }
    }

    /// Check the settings against input bounds
    ///
    /// The projector accepts anything; this is the gate callers use before
    /// saving settings. Returns a list of problems, empty when valid.
    pub fn validate(&self, bounds: &SettingsBounds) -> Vec<String> {
        let mut errors = Vec::new();

        if self.average_cycle_length < bounds.min_cycle_length
            || self.average_cycle_length > bounds.max_cycle_length
        {
            errors.push(format!(
                "cycle length {} outside {}..={}",
                self.average_cycle_length, bounds.min_cycle_length, bounds.max_cycle_length
            ));
        }

        if self.period_length < bounds.min_period_length
            || self.period_length > bounds.max_period_length
        {
            errors.push(format!(
                "period length {} outside {}..={}",
                self.period_length, bounds.min_period_length, bounds.max_period_length
            ));
        }

        if self.period_length >= self.average_cycle_length {
            errors.push(format!(
                "period length {} must be shorter than cycle length {}",
                self.period_length, self.average_cycle_length
            ));
        }

        errors
    }
}

/// One projected calendar day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CycleDay {
    pub day_of_cycle: u32,
    pub date: NaiveDate,
    pub phase: CyclePhase,
}

/// Lengths of the four phase segments of one cycle
///
/// Luteal absorbs the rounding remainder and goes negative when the
/// settings leave no room for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseLengths {
    pub menstrual: i64,
    pub follicular: i64,
    pub ovulatory: i64,
    pub luteal: i64,
}

impl PhaseLengths {
    /// Length of a given phase segment
    pub fn of(&self, phase: CyclePhase) -> i64 {
        match phase {
            CyclePhase::Menstrual => self.menstrual,
            CyclePhase::Follicular => self.follicular,
            CyclePhase::Ovulatory => self.ovulatory,
            CyclePhase::Luteal => self.luteal,
        }
    }

    /// True when every segment has a non-negative length
    pub fn is_well_formed(&self) -> bool {
        CyclePhase::ALL.iter().all(|p| self.of(*p) >= 0)
    }
}

/// Illustrative hormone levels for a day of the cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct HormoneLevels {
    pub estrogen: f64,
    pub progesterone: f64,
    pub testosterone: f64,
}

/// Headline numbers for "today"
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub current_phase: CyclePhase,
    pub current_cycle_day: u32,
    pub days_until_next_period: u32,
}

/// The projection cached alongside a user's settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserCycle {
    pub settings: CycleSettings,
    pub current_cycle_start_date: NaiveDate,
    pub current_phase: CyclePhase,
    pub current_cycle_day: u32,
    pub predicted_cycle_days: Vec<CycleDay>,
}

// ============================================================================
// Journal Types
// ============================================================================

/// Self-reported mood
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Content,
    Neutral,
    Sad,
    Irritated,
    Anxious,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Content => "content",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Irritated => "irritated",
            Mood::Anxious => "anxious",
        }
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "content" => Ok(Mood::Content),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            "irritated" => Ok(Mood::Irritated),
            "anxious" => Ok(Mood::Anxious),
            other => Err(Error::Journal(format!("Unknown mood: {}", other))),
        }
    }
}

/// Intensity rating on a 1..=5 scale
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity(3)
    }
}

impl TryFrom<u8> for Intensity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Intensity(value))
        } else {
            Err(Error::Journal(format!(
                "intensity {} outside {}..={}",
                value,
                Self::MIN,
                Self::MAX
            )))
        }
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub mood: Mood,
    pub intensity: Intensity,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub intensity: Intensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A single day's journal entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub mood: Option<MoodEntry>,
    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,
    #[serde(default)]
    pub notes: String,
}

impl JournalEntry {
    /// Create an empty entry for a date with a fresh id
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            mood: None,
            symptoms: Vec::new(),
            notes: String::new(),
        }
    }
}

// ============================================================================
// Recommendation Types
// ============================================================================

/// Reference information about a phase
#[derive(Clone, Debug, Serialize)]
pub struct PhaseInfo {
    pub phase: CyclePhase,
    pub display_name: &'static str,
    pub description: &'static str,
    /// Typical length in days (min, max)
    pub duration_range: (u32, u32),
    pub color: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct FoodRecommendation {
    pub name: &'static str,
    pub description: &'static str,
    pub benefits: Vec<&'static str>,
    pub image_url: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseIntensity {
    Light,
    Moderate,
    Intense,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExerciseRecommendation {
    pub name: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub intensity: ExerciseIntensity,
    pub instructions: Vec<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MeditationRecommendation {
    pub name: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub instructions: &'static str,
}

/// Everything recommended for one phase
#[derive(Clone, Debug, Serialize)]
pub struct PhaseRecommendations {
    pub phase: CyclePhase,
    pub foods: Vec<FoodRecommendation>,
    pub exercises: Vec<ExerciseRecommendation>,
    pub meditations: Vec<MeditationRecommendation>,
}

/// Horoscope content for a single day of the cycle
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DayContent {
    pub day: u32,
    pub notes: Option<String>,
    pub hormone_horoscope: String,
    pub make_today_better: String,
    pub fun_fact: String,
}
