//! Static reference tables: phase info, recommendations and day content.
//!
//! All tables are immutable and built once on first use.

use crate::projector::phase_for_day;
use crate::types::*;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Number of days covered by the built-in horoscope content
pub const MAX_CONTENT_DAYS: u32 = 28;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// The complete set of phase-keyed and day-keyed reference tables
#[derive(Clone, Debug)]
pub struct Catalog {
    pub phases: HashMap<CyclePhase, PhaseInfo>,
    pub recommendations: HashMap<CyclePhase, PhaseRecommendations>,
    pub day_contents: Vec<DayContent>,
}

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Reference information for a phase
pub fn phase_info(phase: CyclePhase) -> &'static PhaseInfo {
    &DEFAULT_CATALOG.phases[&phase]
}

/// Food, exercise and meditation recommendations for a phase
pub fn recommendations(phase: CyclePhase) -> &'static PhaseRecommendations {
    &DEFAULT_CATALOG.recommendations[&phase]
}

/// Horoscope content for a day of the cycle, or the generic fallback
pub fn day_content(day: u32) -> DayContent {
    DEFAULT_CATALOG
        .day_contents
        .iter()
        .find(|c| c.day == day)
        .cloned()
        .unwrap_or_else(|| default_day_content(day))
}

/// Generic content used when no entry exists for a day
pub fn default_day_content(day: u32) -> DayContent {
    DayContent {
        day,
        notes: None,
        hormone_horoscope: format!(
            "Content for day {} is currently unavailable. Please check back later.",
            day
        ),
        make_today_better:
            "Focus on general well-being today. Stay hydrated and listen to your body.".into(),
        fun_fact: "Did you know? Understanding your cycle can be empowering!".into(),
    }
}

/// Cycle length the day content can be browsed over
///
/// Lengths the content table cannot cover fall back to the 28-day reference.
pub fn content_cycle_length(average_cycle_length: u32) -> u32 {
    if average_cycle_length > 0 && average_cycle_length <= MAX_CONTENT_DAYS {
        average_cycle_length
    } else {
        MAX_CONTENT_DAYS
    }
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> Catalog {
    let mut phases = HashMap::new();
    let mut recommendations = HashMap::new();

    // ========================================================================
    // Phase Info
    // ========================================================================

    phases.insert(
        CyclePhase::Menstrual,
        PhaseInfo {
            phase: CyclePhase::Menstrual,
            display_name: "Menstrual Phase",
            description: "Period begins. Hormone levels are at their lowest.",
            duration_range: (3, 7),
            color: "#FDA4AF",
        },
    );

    phases.insert(
        CyclePhase::Follicular,
        PhaseInfo {
            phase: CyclePhase::Follicular,
            display_name: "Follicular Phase",
            description: "Estrogen rises as follicles develop in the ovaries.",
            duration_range: (7, 10),
            color: "#C4B5FD",
        },
    );

    phases.insert(
        CyclePhase::Ovulatory,
        PhaseInfo {
            phase: CyclePhase::Ovulatory,
            display_name: "Ovulatory Phase",
            description: "Egg is released. Energy and mood typically peak.",
            duration_range: (3, 5),
            color: "#A7F3D0",
        },
    );

    phases.insert(
        CyclePhase::Luteal,
        PhaseInfo {
            phase: CyclePhase::Luteal,
            display_name: "Luteal Phase",
            description: "Progesterone rises. Body prepares for potential pregnancy.",
            duration_range: (10, 14),
            color: "#FCD34D",
        },
    );

    // ========================================================================
    // Recommendations
    // ========================================================================

    recommendations.insert(
        CyclePhase::Menstrual,
        PhaseRecommendations {
            phase: CyclePhase::Menstrual,
            foods: vec![
                FoodRecommendation {
                    name: "Iron-Rich Foods",
                    description: "Replenish iron lost during menstruation",
                    benefits: vec!["Prevents anemia", "Boosts energy levels", "Supports oxygen transport"],
                    image_url: Some("https://images.pexels.com/photos/1640774/pexels-photo-1640774.jpeg"),
                },
                FoodRecommendation {
                    name: "Anti-Inflammatory Foods",
                    description: "Help reduce inflammation and cramping",
                    benefits: vec!["Reduces pain", "Decreases bloating", "Supports comfort"],
                    image_url: Some("https://images.pexels.com/photos/1028598/pexels-photo-1028598.jpeg"),
                },
                FoodRecommendation {
                    name: "Magnesium-Rich Foods",
                    description: "Helps relax muscles and reduce cramps",
                    benefits: vec!["Eases muscle tension", "Improves sleep", "Reduces pain"],
                    image_url: Some("https://images.pexels.com/photos/1295572/pexels-photo-1295572.jpeg"),
                },
            ],
            exercises: vec![
                ExerciseRecommendation {
                    name: "Gentle Yoga",
                    description: "Slow, restorative movements to ease cramps and tension",
                    duration: "15-20 minutes",
                    intensity: ExerciseIntensity::Light,
                    instructions: vec![
                        "Focus on hip-opening poses",
                        "Incorporate deep breathing",
                        "Include child's pose and gentle twists",
                    ],
                },
                ExerciseRecommendation {
                    name: "Walking",
                    description: "Light cardio to improve circulation without strain",
                    duration: "20-30 minutes",
                    intensity: ExerciseIntensity::Light,
                    instructions: vec![
                        "Walk at a comfortable pace",
                        "Focus on deep breathing",
                        "Choose flat terrain",
                    ],
                },
            ],
            meditations: vec![MeditationRecommendation {
                name: "Body Scan Meditation",
                description: "Release tension and connect with your body",
                duration: "10 minutes",
                instructions: "Find a comfortable position, close your eyes, and slowly scan your attention from head to toe, noticing any sensations without judgment.",
            }],
        },
    );

    recommendations.insert(
        CyclePhase::Follicular,
        PhaseRecommendations {
            phase: CyclePhase::Follicular,
            foods: vec![
                FoodRecommendation {
                    name: "Fermented Foods",
                    description: "Support gut health and hormone balance",
                    benefits: vec!["Improves digestion", "Supports detoxification", "Balances hormones"],
                    image_url: Some("https://images.pexels.com/photos/5323173/pexels-photo-5323173.jpeg"),
                },
                FoodRecommendation {
                    name: "Antioxidant-Rich Foods",
                    description: "Support cellular health and egg quality",
                    benefits: vec!["Reduces oxidative stress", "Supports fertility", "Improves skin health"],
                    image_url: Some("https://images.pexels.com/photos/1092730/pexels-photo-1092730.jpeg"),
                },
            ],
            exercises: vec![
                ExerciseRecommendation {
                    name: "Strength Training",
                    description: "Build muscle and boost metabolism",
                    duration: "30-45 minutes",
                    intensity: ExerciseIntensity::Moderate,
                    instructions: vec![
                        "Focus on compound movements",
                        "Include both upper and lower body",
                        "Use moderate weights with 10-12 repetitions",
                    ],
                },
                ExerciseRecommendation {
                    name: "HIIT Workouts",
                    description: "Boost energy and metabolism",
                    duration: "20 minutes",
                    intensity: ExerciseIntensity::Intense,
                    instructions: vec![
                        "Alternate between 30 seconds of intense work and 30 seconds of rest",
                        "Include both cardio and strength exercises",
                        "Modify as needed based on energy levels",
                    ],
                },
            ],
            meditations: vec![MeditationRecommendation {
                name: "Visualization Meditation",
                description: "Set intentions and visualize growth",
                duration: "15 minutes",
                instructions: "Close your eyes and visualize your goals. See yourself achieving them with clarity and confidence.",
            }],
        },
    );

    recommendations.insert(
        CyclePhase::Ovulatory,
        PhaseRecommendations {
            phase: CyclePhase::Ovulatory,
            foods: vec![
                FoodRecommendation {
                    name: "Fiber-Rich Foods",
                    description: "Support estrogen metabolism and detoxification",
                    benefits: vec!["Balances hormones", "Improves digestion", "Supports detoxification"],
                    image_url: Some("https://images.pexels.com/photos/1435904/pexels-photo-1435904.jpeg"),
                },
                FoodRecommendation {
                    name: "Zinc-Rich Foods",
                    description: "Support ovulation and hormone production",
                    benefits: vec!["Supports egg health", "Balances hormones", "Boosts immune function"],
                    image_url: Some("https://images.pexels.com/photos/566566/pexels-photo-566566.jpeg"),
                },
            ],
            exercises: vec![
                ExerciseRecommendation {
                    name: "Circuit Training",
                    description: "Take advantage of peak energy levels",
                    duration: "40-45 minutes",
                    intensity: ExerciseIntensity::Intense,
                    instructions: vec![
                        "Combine strength and cardio exercises",
                        "Move quickly between stations",
                        "Include plyometric movements for power",
                    ],
                },
                ExerciseRecommendation {
                    name: "Dance Workouts",
                    description: "Express energy and boost mood",
                    duration: "30 minutes",
                    intensity: ExerciseIntensity::Moderate,
                    instructions: vec![
                        "Follow along with choreographed routines",
                        "Focus on having fun and expressing yourself",
                        "Allow yourself to be playful and energetic",
                    ],
                },
            ],
            meditations: vec![MeditationRecommendation {
                name: "Loving-Kindness Meditation",
                description: "Cultivate compassion and connection",
                duration: "15 minutes",
                instructions: "Focus on sending love and positive wishes to yourself, loved ones, neutral people, and even those you find difficult.",
            }],
        },
    );

    recommendations.insert(
        CyclePhase::Luteal,
        PhaseRecommendations {
            phase: CyclePhase::Luteal,
            foods: vec![
                FoodRecommendation {
                    name: "Complex Carbohydrates",
                    description: "Stabilize blood sugar and mood",
                    benefits: vec!["Reduces cravings", "Stabilizes mood", "Provides sustained energy"],
                    image_url: Some("https://images.pexels.com/photos/1660030/pexels-photo-1660030.jpeg"),
                },
                FoodRecommendation {
                    name: "Calcium-Rich Foods",
                    description: "Help reduce PMS symptoms",
                    benefits: vec!["Reduces mood swings", "Decreases cramping", "Supports bone health"],
                    image_url: Some("https://images.pexels.com/photos/373882/pexels-photo-373882.jpeg"),
                },
                FoodRecommendation {
                    name: "B-Vitamin Rich Foods",
                    description: "Support energy and mood",
                    benefits: vec!["Reduces fatigue", "Supports neurotransmitter production", "Improves mood"],
                    image_url: Some("https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg"),
                },
            ],
            exercises: vec![
                ExerciseRecommendation {
                    name: "Pilates",
                    description: "Focus on core strength and mindful movement",
                    duration: "30 minutes",
                    intensity: ExerciseIntensity::Moderate,
                    instructions: vec![
                        "Focus on controlled, precise movements",
                        "Engage your core throughout",
                        "Pay attention to proper form and alignment",
                    ],
                },
                ExerciseRecommendation {
                    name: "Yin Yoga",
                    description: "Deep stretching and relaxation",
                    duration: "45 minutes",
                    intensity: ExerciseIntensity::Light,
                    instructions: vec![
                        "Hold poses for 3-5 minutes each",
                        "Focus on deep breathing",
                        "Allow yourself to fully relax into each pose",
                    ],
                },
            ],
            meditations: vec![MeditationRecommendation {
                name: "Self-Compassion Meditation",
                description: "Practice kindness toward yourself during potentially challenging days",
                duration: "10 minutes",
                instructions: "Place your hands on your heart, acknowledge any difficulties, and offer yourself kind and supportive words.",
            }],
        },
    );

    Catalog {
        phases,
        recommendations,
        day_contents: build_day_contents(),
    }
}

/// Per-day horoscope text for the 28-day reference cycle
fn build_day_contents() -> Vec<DayContent> {
    // Any anchor date works; only day numbers matter
    let reference = CycleSettings::new(
        MAX_CONTENT_DAYS,
        5,
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
    );

    (1..=MAX_CONTENT_DAYS)
        .map(|day| {
            let phase = phase_for_day(&reference, day).unwrap_or(CyclePhase::Luteal);
            let (horoscope, tips, facts) = phase_texts(phase);
            DayContent {
                day,
                notes: day_note(day).map(str::to_owned),
                hormone_horoscope: horoscope.to_owned(),
                make_today_better: tips.to_owned(),
                fun_fact: facts[day as usize % facts.len()].to_owned(),
            }
        })
        .collect()
}

fn day_note(day: u32) -> Option<&'static str> {
    match day {
        1 => Some("Period starts"),
        6 => Some("Energy starts to return"),
        14 => Some("Ovulation window approaching"),
        15 => Some("Peak fertility"),
        22 => Some("Pre-menstrual week begins"),
        28 => Some("Last day of the cycle"),
        _ => None,
    }
}

fn phase_texts(phase: CyclePhase) -> (&'static str, &'static str, &'static [&'static str]) {
    match phase {
        CyclePhase::Menstrual => (
            "Your hormone levels are at their lowest. This is a good time for reflection and self-care. You may feel more introspective and need extra rest.",
            "Focus on gentle activities and prioritize rest. Iron-rich foods can help replenish what's lost during menstruation.",
            &[
                "The average person loses only about 2-3 tablespoons of blood during their period, though it can often feel like much more!",
                "Magnesium can ease cramps by relaxing smooth muscle.",
            ],
        ),
        CyclePhase::Follicular => (
            "Estrogen is rising, boosting your energy and mood. You may feel more creative and outgoing as your body prepares for ovulation.",
            "This is a great time to start new projects, exercise, and socialize. Your body is naturally more energetic now.",
            &[
                "Rising estrogen improves verbal fluency - you might notice you're more articulate during this phase!",
                "Estrogen helps your muscles recover faster, so strength work pays off now.",
            ],
        ),
        CyclePhase::Ovulatory => (
            "Estrogen peaks and testosterone rises slightly. You likely feel your most confident and energetic. Communication skills and social confidence are enhanced.",
            "Take advantage of your peak energy for important meetings or social events. Your natural charisma is at its highest.",
            &[
                "Studies show people tend to dress more attractively and feel more confident during ovulation - it's your body's natural way of highlighting fertility.",
            ],
        ),
        CyclePhase::Luteal => (
            "Progesterone is rising, which can make you feel more mellow and introspective. You may notice changes in energy levels and food cravings as your body prepares for potential menstruation.",
            "Practice self-care and be mindful of potential mood changes. Complex carbohydrates can help stabilize mood and energy.",
            &[
                "Progesterone triggers water retention in the second half of the cycle. Natural mild diuretics such as asparagus, cucumber, ginger, parsley, watercress and watermelon can help.",
                "Your resting body temperature rises slightly after ovulation.",
                "Cravings are common now: your metabolism runs a little faster in this phase.",
            ],
        ),
    }
}

impl Catalog {
    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for phase in CyclePhase::ALL {
            match self.phases.get(&phase) {
                Some(info) => {
                    if info.phase != phase {
                        errors.push(format!("Phase info for {} is keyed under {}", info.phase, phase));
                    }
                    let (min, max) = info.duration_range;
                    if min > max {
                        errors.push(format!(
                            "Phase {}: duration range {}..{} is inverted",
                            phase, min, max
                        ));
                    }
                }
                None => errors.push(format!("Missing phase info for {}", phase)),
            }

            match self.recommendations.get(&phase) {
                Some(recs) => {
                    if recs.foods.is_empty() {
                        errors.push(format!("Phase {} has no food recommendations", phase));
                    }
                    if recs.exercises.is_empty() {
                        errors.push(format!("Phase {} has no exercise recommendations", phase));
                    }
                    if recs.meditations.is_empty() {
                        errors.push(format!("Phase {} has no meditation recommendations", phase));
                    }
                }
                None => errors.push(format!("Missing recommendations for {}", phase)),
            }
        }

        for (idx, content) in self.day_contents.iter().enumerate() {
            if content.day as usize != idx + 1 {
                errors.push(format!(
                    "Day content at position {} is numbered {}",
                    idx + 1,
                    content.day
                ));
            }
        }

        errors
    }
}
