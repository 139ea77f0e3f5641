use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::ByteRecord;
use serde::Serialize;
use tracing::{error, info};

use crate::events::ProcessEvent;
use crate::header::{Columns, HeaderIndex};
use crate::summary::{write_report, Category};
use crate::tally::Tally;

#[derive(Debug, Serialize)]
pub struct ReportOutcome {
    pub category: Category,
    pub path: String,
    pub rows: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub columns: Columns,
    pub records_read: u64,
    pub certified: u64,
    pub occupation_total: u64,
    pub state_total: u64,
    pub reports: Vec<ReportOutcome>,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.error.is_some()).count()
    }
}

/// Resolve the header, then tally every remaining record in one pass.
///
/// Records are read as raw bytes, so invalid UTF-8 in a column the
/// tally never looks at does not affect the count. Read errors are fatal.
pub fn tally_input<R: Read>(input: R) -> Result<(Columns, Tally), ProcessEvent> {
    let mut reader = BufReader::new(input);

    let mut header_line = Vec::new();
    reader
        .read_until(b'\n', &mut header_line)
        .map_err(|e| ProcessEvent::InputRead(e.to_string()))?;
    let header = HeaderIndex::from_line(&String::from_utf8_lossy(&header_line));
    let columns = header.resolve_columns();
    info!(header_columns = header.len(), ?columns, "header resolved");

    // quotes are data here, never field delimiters
    let mut records = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut tally = Tally::new();
    let mut record = ByteRecord::new();
    while records
        .read_byte_record(&mut record)
        .map_err(|e| ProcessEvent::InputRead(e.to_string()))?
    {
        tally.process_record(&record, &columns);
    }

    Ok((columns, tally))
}

fn write_outcome(tally: &Tally, category: Category, path: &Path, limit: usize) -> ReportOutcome {
    let result = write_report(
        path,
        category,
        tally.frequencies(category),
        tally.total(category),
        limit,
    );

    match result {
        Ok(rows) => {
            info!(%category, rows, path = %path.display(), "summary written");
            ReportOutcome {
                category,
                path: path.display().to_string(),
                rows: Some(rows),
                error: None,
            }
        }
        Err(err) => {
            error!(%category, "{err}");
            ReportOutcome {
                category,
                path: path.display().to_string(),
                rows: None,
                error: Some(err.to_string()),
            }
        }
    }
}

/// Tally `input` and write the occupation and state summaries.
///
/// Only a failure to open or read the input is returned as an error.
/// Each report is attempted regardless of the other; failures are
/// recorded on the returned summary.
pub fn run(
    input: &Path,
    occupation_output: &Path,
    state_output: &Path,
    limit: usize,
) -> Result<RunSummary, ProcessEvent> {
    let file = File::open(input).map_err(|e| ProcessEvent::InputOpen {
        path: input.display().to_string(),
        reason: e.to_string(),
    })?;

    let (columns, tally) = tally_input(file)?;
    info!(
        records = tally.records_read,
        certified = tally.certified,
        "input tallied"
    );

    let reports = [
        (Category::Occupation, occupation_output),
        (Category::State, state_output),
    ]
    .into_iter()
    .map(|(category, path)| write_outcome(&tally, category, path, limit))
    .collect();

    Ok(RunSummary {
        input: input.display().to_string(),
        columns,
        records_read: tally.records_read,
        certified: tally.certified,
        occupation_total: tally.occupation_total,
        state_total: tally.state_total,
        reports,
    })
}
