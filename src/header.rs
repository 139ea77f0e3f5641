use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

pub const DELIM: char = ';';

/// A logical field and the two column names it has been published under.
///
/// Newer files use the primary name, older vintages the alternate one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAlias {
    pub field: &'static str,
    pub primary: &'static str,
    pub alternate: &'static str,
}

pub const STATUS: ColumnAlias = ColumnAlias {
    field: "status",
    primary: "CASE_STATUS",
    alternate: "STATUS",
};

pub const OCCUPATION: ColumnAlias = ColumnAlias {
    field: "occupation",
    primary: "SOC_NAME",
    alternate: "LCA_CASE_SOC_NAME",
};

pub const STATE: ColumnAlias = ColumnAlias {
    field: "state",
    primary: "WORKSITE_STATE",
    alternate: "LCA_CASE_WORKLOC1_STATE",
};

/// Column name to zero-based position, built once from the header line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

/// Resolved positions of the three columns the tally reads.
///
/// `None` means neither alias was present, and the field never matches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Columns {
    pub status: Option<usize>,
    pub occupation: Option<usize>,
    pub state: Option<usize>,
}

impl HeaderIndex {
    /// Build the index from a raw header line.
    ///
    /// A line without a single delimiter is malformed and yields an
    /// empty index. When a name repeats, its last position wins.
    pub fn from_line(line: &str) -> Self {
        let line = line
            .trim_start_matches('\u{feff}')
            .trim_end_matches(['\r', '\n']);

        if !line.contains(DELIM) {
            warn!(header = line, "malformed header: no `{DELIM}` delimiter found");
            return Self::default();
        }

        let positions = line
            .split(DELIM)
            .enumerate()
            .map(|(idx, name)| (name.to_owned(), idx))
            .collect();

        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Primary name if present, otherwise the alternate name.
    pub fn resolve(&self, alias: &ColumnAlias) -> Option<usize> {
        self.position(alias.primary)
            .or_else(|| self.position(alias.alternate))
    }

    pub fn resolve_columns(&self) -> Columns {
        let resolve_logged = |alias: &ColumnAlias| {
            let resolved = self.resolve(alias);
            if resolved.is_none() {
                warn!(
                    field = alias.field,
                    "neither {} nor {} found in header, no record will match on this field",
                    alias.primary,
                    alias.alternate
                );
            }
            resolved
        };

        Columns {
            status: resolve_logged(&STATUS),
            occupation: resolve_logged(&OCCUPATION),
            state: resolve_logged(&STATE),
        }
    }
}
