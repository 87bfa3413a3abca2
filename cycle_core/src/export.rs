//! CSV export of the projected timeline and the journal.

use crate::{CycleDay, JournalEntry, Result};
use std::fs::File;
use std::path::Path;

/// A row of the timeline CSV
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct TimelineRow {
    date: String,
    day_of_cycle: u32,
    phase: String,
}

impl From<&CycleDay> for TimelineRow {
    fn from(day: &CycleDay) -> Self {
        TimelineRow {
            date: day.date.to_string(),
            day_of_cycle: day.day_of_cycle,
            phase: day.phase.as_str().to_string(),
        }
    }
}

/// A row of the journal CSV
#[derive(Debug, serde::Serialize)]
struct JournalRow {
    id: String,
    date: String,
    mood: Option<String>,
    mood_intensity: Option<u8>,
    symptoms: String,
    notes: String,
}

impl From<&JournalEntry> for JournalRow {
    fn from(entry: &JournalEntry) -> Self {
        let symptoms = entry
            .symptoms
            .iter()
            .map(|s| format!("{}:{}", s.kind, s.intensity.value()))
            .collect::<Vec<_>>()
            .join(";");

        JournalRow {
            id: entry.id.to_string(),
            date: entry.date.to_string(),
            mood: entry.mood.map(|m| m.mood.as_str().to_string()),
            mood_intensity: entry.mood.map(|m| m.intensity.value()),
            symptoms,
            notes: entry.notes.clone(),
        }
    }
}

/// Write rows to a fresh CSV file with headers, synced to disk
fn write_rows<T, I>(path: &Path, rows: I) -> Result<usize>
where
    T: serde::Serialize,
    I: IntoIterator<Item = T>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(file);

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    Ok(count)
}

/// Export the projected timeline as `date,day_of_cycle,phase`
pub fn export_timeline_csv(days: &[CycleDay], path: &Path) -> Result<usize> {
    let count = write_rows(path, days.iter().map(TimelineRow::from))?;
    tracing::info!("Exported {} timeline days to {:?}", count, path);
    Ok(count)
}

/// Export journal entries, one row per entry
pub fn export_journal_csv(entries: &[JournalEntry], path: &Path) -> Result<usize> {
    let count = write_rows(path, entries.iter().map(JournalRow::from))?;
    tracing::info!("Exported {} journal entries to {:?}", count, path);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::project_cycle_days;
    use crate::{CycleSettings, Intensity, Mood, MoodEntry, SymptomEntry};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_timeline_export() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("timeline.csv");

        let days = project_cycle_days(&CycleSettings::new(28, 5, date(2024, 1, 1)), 2);
        let count = export_timeline_csv(&days, &path).unwrap();
        assert_eq!(count, 56);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<TimelineRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 56);
        assert_eq!(rows[0].date, "2024-01-01");
        assert_eq!(rows[0].phase, "menstrual");
        assert_eq!(rows[14].day_of_cycle, 15);
        assert_eq!(rows[14].phase, "ovulatory");
    }

    #[test]
    fn test_export_overwrites_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("timeline.csv");

        let days = project_cycle_days(&CycleSettings::new(28, 5, date(2024, 1, 1)), 2);
        export_timeline_csv(&days, &path).unwrap();
        export_timeline_csv(&days[..10], &path).unwrap();

        let reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.into_records().count(), 10);
    }

    #[test]
    fn test_journal_export() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("journal.csv");

        let mut entry = JournalEntry::new(date(2024, 1, 2));
        entry.mood = Some(MoodEntry {
            mood: Mood::Irritated,
            intensity: Intensity::try_from(4).unwrap(),
        });
        entry.symptoms.push(SymptomEntry {
            kind: "Cramps".into(),
            intensity: Intensity::try_from(5).unwrap(),
            notes: None,
        });
        entry.symptoms.push(SymptomEntry {
            kind: "Fatigue".into(),
            intensity: Intensity::default(),
            notes: None,
        });

        assert_eq!(export_journal_csv(&[entry], &path).unwrap(), 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("id,date,mood,mood_intensity,symptoms,notes"));
        assert!(contents.contains("irritated,4,Cramps:5;Fatigue:3"));
    }
}
