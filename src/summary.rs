use std::fmt::Display;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::events::ProcessEvent;
use crate::tally::FrequencyMap;

pub const MAX_SUMMARY_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Occupation,
    State,
}

impl Category {
    pub fn header(&self) -> [&'static str; 3] {
        match self {
            Self::Occupation => [
                "TOP_OCCUPATIONS",
                "NUMBER_CERTIFIED_APPLICATIONS",
                "PERCENTAGE",
            ],
            Self::State => ["TOP_STATES", "NUMBER_CERTIFIED_APPLICATIONS", "PERCENTAGE"],
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Occupation => write!(f, "occupation"),
            Self::State => write!(f, "state"),
        }
    }
}

/// A share held in tenths of a percent, so `625` displays as `62.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(u64);

impl Percentage {
    /// `count / total` rounded half away from zero to the nearest tenth.
    ///
    /// A zero total yields `0.0`.
    pub fn of(count: u64, total: u64) -> Self {
        if total == 0 {
            return Self(0);
        }
        // floor((count * 1000 / total) + 1/2) without leaving integers
        let numerator = 2 * 1000 * count as u128 + total as u128;
        let tenths = numerator / (2 * total as u128);
        Self(u64::try_from(tenths).unwrap_or(u64::MAX))
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SummaryRow<'a> {
    pub key: &'a str,
    pub count: u64,
    pub percentage: Percentage,
}

/// Rank by count descending then key ascending, keeping at most `limit` rows.
///
/// Keys tied at the cutoff count are dropped once the cap is reached.
pub fn rank(frequencies: &FrequencyMap, total: u64, limit: usize) -> Vec<SummaryRow<'_>> {
    let mut entries: Vec<(&str, u64)> = frequencies
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(key, count)| (key.as_str(), *count))
        .collect();

    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(limit);

    entries
        .into_iter()
        .map(|(key, count)| SummaryRow {
            key,
            count,
            percentage: Percentage::of(count, total),
        })
        .collect()
}

/// Write the header line and the ranked rows to `sink`.
///
/// Returns the number of data rows written.
pub fn write_summary<W: Write>(
    sink: W,
    category: Category,
    frequencies: &FrequencyMap,
    total: u64,
    limit: usize,
) -> Result<usize, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    writer.write_record(category.header())?;

    let rows = rank(frequencies, total, limit);
    for row in &rows {
        writer.write_record([
            row.key.to_owned(),
            row.count.to_string(),
            format!("{}%", row.percentage),
        ])?;
    }
    writer.flush()?;

    Ok(rows.len())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "summary".to_owned());
    path.with_file_name(format!(".{file_name}.tmp"))
}

/// Write a report to `path`.
///
/// The report goes to a hidden sibling first and is renamed into place,
/// so a failed write never leaves a truncated report behind.
pub fn write_report(
    path: &Path,
    category: Category,
    frequencies: &FrequencyMap,
    total: u64,
    limit: usize,
) -> Result<usize, ProcessEvent> {
    let output_err = |reason: String| ProcessEvent::OutputWrite {
        path: path.display().to_string(),
        reason,
    };

    let tmp_path = tmp_path_for(path);
    let file = File::create(&tmp_path)
        .map_err(|e| output_err(format!("creating {}: {e}", tmp_path.display())))?;

    let written = write_summary(file, category, frequencies, total, limit)
        .and_then(|rows| {
            fs::rename(&tmp_path, path)?;
            Ok(rows)
        });

    match written {
        Ok(rows) => {
            debug!(%category, rows, path = %path.display(), "summary written");
            Ok(rows)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(output_err(e.to_string()))
        }
    }
}
