use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use cycle_core::catalog::content_cycle_length;
use cycle_core::journal::{load_journal, remove_journal};
use cycle_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cycle")]
#[command(about = "Menstrual cycle phase tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Load configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save cycle settings and project the phase timeline
    Setup {
        /// Average cycle length in days
        #[arg(long)]
        cycle_length: Option<u32>,

        /// Period length in days
        #[arg(long)]
        period_length: Option<u32>,

        /// First day of the last period (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        last_period: NaiveDate,

        /// Display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Show today's phase, cycle day and next-period countdown (default)
    Status,

    /// Show the projected phase of a date
    Day {
        /// Date to look up (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Print a month calendar colour-coded by phase
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },

    /// Show illustrative hormone levels for a cycle day
    Hormones {
        /// Cycle day, defaults to today's
        #[arg(long)]
        day: Option<u32>,
    },

    /// Show food, exercise and meditation recommendations for a phase
    Recommend {
        /// Phase (menstrual, follicular, ovulatory, luteal), defaults to today's
        #[arg(long)]
        phase: Option<String>,
    },

    /// Show the hormone horoscope for a cycle day
    Horoscope {
        /// Cycle day, defaults to today's
        #[arg(long)]
        day: Option<u32>,
    },

    /// Record or list journal entries
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// Export the projected timeline (or the journal) to CSV
    Export {
        /// Output path
        #[arg(long)]
        out: PathBuf,

        /// Export journal entries instead of the timeline
        #[arg(long)]
        journal: bool,
    },

    /// Delete the saved profile and journal
    Reset,
}

#[derive(Subcommand)]
enum JournalAction {
    /// Record an entry (re-recording a date updates it)
    Add {
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Mood (happy, content, neutral, sad, irritated, anxious)
        #[arg(long)]
        mood: Option<String>,

        /// Mood intensity 1-5 (default 3)
        #[arg(long, requires = "mood")]
        mood_intensity: Option<u8>,

        /// Symptom as NAME or NAME:INTENSITY, repeatable
        #[arg(long = "symptom")]
        symptoms: Vec<String>,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List recorded entries, newest last
    List {
        /// Only show the most recent N days
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(s.into()).to_string())
}

struct Paths {
    profile: PathBuf,
    journal: PathBuf,
}

impl Paths {
    fn new(data_dir: &Path) -> Self {
        Self {
            profile: data_dir.join("profile.json"),
            journal: data_dir.join("journal.jsonl"),
        }
    }
}

fn main() -> Result<()> {
    cycle_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = Paths::new(&data_dir);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    tracing::debug!("Using data directory {:?}, today {}", data_dir, today);

    match cli.command {
        Some(Commands::Setup {
            cycle_length,
            period_length,
            last_period,
            name,
        }) => cmd_setup(
            &paths,
            &config,
            today,
            CycleSettings::new(
                cycle_length.unwrap_or(config.cycle.default_cycle_length),
                period_length.unwrap_or(config.cycle.default_period_length),
                last_period,
            ),
            name,
        ),
        Some(Commands::Status) | None => cmd_status(&paths, today),
        Some(Commands::Day { date }) => cmd_day(&paths, date),
        Some(Commands::Calendar { month }) => cmd_calendar(&paths, today, month),
        Some(Commands::Hormones { day }) => cmd_hormones(&paths, today, day),
        Some(Commands::Recommend { phase }) => cmd_recommend(&paths, today, phase),
        Some(Commands::Horoscope { day }) => cmd_horoscope(&paths, today, day),
        Some(Commands::Journal { action }) => match action {
            JournalAction::Add {
                date,
                mood,
                mood_intensity,
                symptoms,
                notes,
            } => cmd_journal_add(
                &paths,
                date.unwrap_or(today),
                mood,
                mood_intensity,
                symptoms,
                notes,
            ),
            JournalAction::List { limit } => cmd_journal_list(&paths, limit),
        },
        Some(Commands::Export { out, journal }) => cmd_export(&paths, &out, journal),
        Some(Commands::Reset) => cmd_reset(&paths),
    }
}

fn load_cycle(paths: &Paths) -> Result<UserCycle> {
    let profile = UserProfile::load(&paths.profile)?;
    profile.cycle().cloned()
}

fn cmd_setup(
    paths: &Paths,
    config: &Config,
    today: NaiveDate,
    settings: CycleSettings,
    name: Option<String>,
) -> Result<()> {
    let problems = settings.validate(&config.bounds);
    if !problems.is_empty() {
        return Err(Error::InvalidSettings(problems.join("; ")));
    }

    let profile = UserProfile::update(&paths.profile, |profile| {
        if let Some(name) = name {
            profile.name = name;
        }
        profile.setup_cycle(settings, today, config.cycle.cycles_to_generate);
        Ok(())
    })?;

    let cycle = profile.cycle()?;
    println!("✓ Cycle saved");
    println!(
        "  Projected {} days from {}",
        cycle.predicted_cycle_days.len(),
        cycle.settings.last_period_start_date
    );
    print_summary(&cycle.summary(today));
    Ok(())
}

fn cmd_status(paths: &Paths, today: NaiveDate) -> Result<()> {
    // Read-only: the refreshed summary is not persisted
    let mut profile = UserProfile::load(&paths.profile)?;
    let summary = profile.refresh(today)?;

    if !profile.name.is_empty() {
        println!("Hello, {}!", profile.name);
    }
    println!("Today is {}", today);
    print_summary(&summary);

    let cycle = profile.cycle()?;
    if find_cycle_day(&cycle.predicted_cycle_days, today).is_none() {
        println!();
        println!("  Today is outside the projected timeline.");
        println!("  Run `cycle setup` with your latest period to refresh it.");
    }
    Ok(())
}

fn print_summary(summary: &CycleSummary) {
    let info = phase_info(summary.current_phase);
    println!();
    println!("  {} - day {}", info.display_name, summary.current_cycle_day);
    println!("  {}", info.description);
    println!(
        "  Next period in {} day{}",
        summary.days_until_next_period,
        if summary.days_until_next_period == 1 { "" } else { "s" }
    );
}

fn cmd_day(paths: &Paths, date: NaiveDate) -> Result<()> {
    let cycle = load_cycle(paths)?;
    match find_cycle_day(&cycle.predicted_cycle_days, date) {
        Some(day) => println!("{}: day {} ({})", day.date, day.day_of_cycle, day.phase),
        None => println!("{}: outside the projected timeline", date),
    }
    Ok(())
}

fn phase_symbol(phase: Option<CyclePhase>) -> char {
    match phase {
        Some(CyclePhase::Menstrual) => 'M',
        Some(CyclePhase::Follicular) => 'F',
        Some(CyclePhase::Ovulatory) => 'O',
        Some(CyclePhase::Luteal) => 'L',
        None => '.',
    }
}

fn parse_month(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(month.into()))
}

fn cmd_calendar(paths: &Paths, today: NaiveDate, month: Option<String>) -> Result<()> {
    let cycle = load_cycle(paths)?;
    let first = match month {
        Some(m) => parse_month(&m)?,
        None => today.with_day(1).unwrap_or(today),
    };

    println!("{}", first.format("%B %Y"));
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");

    let mut line = "    ".repeat(first.weekday().num_days_from_sunday() as usize);
    for date in first.iter_days().take_while(|d| d.month() == first.month()) {
        let phase = find_cycle_day(&cycle.predicted_cycle_days, date).map(|d| d.phase);
        line.push_str(&format!("{:>2}{} ", date.day(), phase_symbol(phase)));
        if date.weekday().num_days_from_sunday() == 6 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    println!();
    println!("M menstrual  F follicular  O ovulatory  L luteal  . not projected");
    Ok(())
}

fn bar(level: f64) -> String {
    let filled = (level * 20.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(20usize.saturating_sub(filled)))
}

fn print_hormones(levels: &HormoneLevels) {
    println!("Hormone levels (illustrative):");
    println!("  Estrogen      {} {:.2}", bar(levels.estrogen), levels.estrogen);
    println!("  Progesterone  {} {:.2}", bar(levels.progesterone), levels.progesterone);
    println!("  Testosterone  {} {:.2}", bar(levels.testosterone), levels.testosterone);
}

fn check_cycle_day(day: u32, cycle_length: u32) -> Result<u32> {
    if day == 0 || day > cycle_length {
        return Err(Error::Other(format!(
            "Cycle day must be between 1 and {}",
            cycle_length
        )));
    }
    Ok(day)
}

fn cmd_hormones(paths: &Paths, today: NaiveDate, day: Option<u32>) -> Result<()> {
    let cycle = load_cycle(paths)?;
    let cycle_length = cycle.settings.average_cycle_length;
    let day = match day {
        Some(day) => check_cycle_day(day, cycle_length)?,
        None => cycle.summary(today).current_cycle_day,
    };

    println!("Day {} of {}", day, cycle_length);
    print_hormones(&hormone_levels(day, cycle_length));
    Ok(())
}

fn cmd_recommend(paths: &Paths, today: NaiveDate, phase: Option<String>) -> Result<()> {
    let phase = match phase {
        Some(p) => p.parse::<CyclePhase>()?,
        None => load_cycle(paths)?.summary(today).current_phase,
    };

    let recs = recommendations(phase);
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", phase_info(phase).display_name.to_uppercase());
    println!("╰─────────────────────────────────────────╯");

    println!("\nFoods:");
    for food in &recs.foods {
        println!("  • {} - {}", food.name, food.description);
        println!("    {}", food.benefits.join(", "));
    }

    println!("\nExercise:");
    for exercise in &recs.exercises {
        println!(
            "  • {} ({}, {:?}) - {}",
            exercise.name, exercise.duration, exercise.intensity, exercise.description
        );
        for step in &exercise.instructions {
            println!("    → {}", step);
        }
    }

    println!("\nMeditation:");
    for meditation in &recs.meditations {
        println!(
            "  • {} ({}) - {}",
            meditation.name, meditation.duration, meditation.description
        );
        println!("    {}", meditation.instructions);
    }
    println!();
    Ok(())
}

fn cmd_horoscope(paths: &Paths, today: NaiveDate, day: Option<u32>) -> Result<()> {
    let cycle = load_cycle(paths)?;
    let cycle_length = content_cycle_length(cycle.settings.average_cycle_length);
    let day = match day {
        Some(day) => check_cycle_day(day, cycle.settings.average_cycle_length)?,
        None => cycle.summary(today).current_cycle_day,
    };

    let phase = cycle
        .predicted_cycle_days
        .iter()
        .find(|d| d.day_of_cycle == day)
        .map(|d| d.phase)
        .or_else(|| phase_for_day(&cycle.settings, day))
        .unwrap_or(CyclePhase::Luteal);

    let content = day_content(day);
    println!("Day {} of Your Cycle", content.day);
    if let Some(notes) = &content.notes {
        println!("  {}", notes);
    }
    println!("  {} Phase", phase);
    println!();
    print_hormones(&hormone_levels(day, cycle_length));

    println!("\nToday's Hormone Horoscope\n  {}", content.hormone_horoscope);
    println!("\nMake Today Better\n  {}", content.make_today_better);
    println!("\nFun Fact\n  {}", content.fun_fact);
    Ok(())
}

fn parse_symptom(raw: &str) -> Result<SymptomEntry> {
    let (kind, intensity) = match raw.rsplit_once(':') {
        Some((kind, level)) => {
            let level: u8 = level
                .trim()
                .parse()
                .map_err(|_| Error::Journal(format!("Invalid symptom intensity in '{}'", raw)))?;
            (kind, Intensity::try_from(level)?)
        }
        None => (raw, Intensity::default()),
    };

    let kind = kind.trim();
    if kind.is_empty() {
        return Err(Error::Journal("Symptom name cannot be empty".into()));
    }

    Ok(SymptomEntry {
        kind: kind.to_string(),
        intensity,
        notes: None,
    })
}

fn cmd_journal_add(
    paths: &Paths,
    date: NaiveDate,
    mood: Option<String>,
    mood_intensity: Option<u8>,
    symptoms: Vec<String>,
    notes: String,
) -> Result<()> {
    let mut entry = JournalEntry::new(date);

    if let Some(mood) = mood {
        entry.mood = Some(MoodEntry {
            mood: mood.parse()?,
            intensity: match mood_intensity {
                Some(level) => Intensity::try_from(level)?,
                None => Intensity::default(),
            },
        });
    }

    for raw in &symptoms {
        let symptom = parse_symptom(raw)?;
        // first mention of a symptom wins
        if !entry.symptoms.iter().any(|s| s.kind == symptom.kind) {
            entry.symptoms.push(symptom);
        }
    }
    entry.notes = notes;

    let mut journal = JsonlJournal::new(&paths.journal);
    journal.append(&entry)?;

    println!("✓ Journal entry saved for {}", date);
    Ok(())
}

fn cmd_journal_list(paths: &Paths, limit: Option<usize>) -> Result<()> {
    let entries = load_journal(&paths.journal)?;
    if entries.is_empty() {
        println!("No journal entries yet.");
        return Ok(());
    }

    let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));
    let cycle = UserProfile::load(&paths.profile)?.cycle;

    for entry in entries.iter().skip(skip) {
        let phase = cycle
            .as_ref()
            .and_then(|c| find_cycle_day(&c.predicted_cycle_days, entry.date))
            .map(|d| format!(" [{}]", d.phase))
            .unwrap_or_default();
        println!("{}{}", entry.date, phase);

        if let Some(mood) = entry.mood {
            println!("  Mood: {} ({}/5)", mood.mood.as_str(), mood.intensity.value());
        }
        if !entry.symptoms.is_empty() {
            let list: Vec<String> = entry
                .symptoms
                .iter()
                .map(|s| format!("{} ({}/5)", s.kind, s.intensity.value()))
                .collect();
            println!("  Symptoms: {}", list.join(", "));
        }
        if !entry.notes.is_empty() {
            println!("  Notes: {}", entry.notes);
        }
    }
    Ok(())
}

fn cmd_export(paths: &Paths, out: &Path, journal: bool) -> Result<()> {
    let count = if journal {
        export_journal_csv(&load_journal(&paths.journal)?, out)?
    } else {
        export_timeline_csv(&load_cycle(paths)?.predicted_cycle_days, out)?
    };

    println!("✓ Exported {} rows", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn cmd_reset(paths: &Paths) -> Result<()> {
    let removed_profile = UserProfile::remove(&paths.profile)?;
    let removed_journal = remove_journal(&paths.journal)?;

    if removed_profile || removed_journal {
        println!("✓ Profile and journal removed");
    } else {
        println!("Nothing to remove.");
    }
    Ok(())
}
