use std::borrow::Cow;

use csv::ByteRecord;

use crate::header::Columns;

pub const CERTIFIED: &str = "CERTIFIED";
const DOUBLE_QUOTE: char = '"';

/// The values a certified record contributes to the tally.
///
/// A value is `None` when its column is unresolved or the record is
/// too short to reach it.
#[derive(Debug, PartialEq, Eq)]
pub struct CertifiedFields<'a> {
    pub occupation: Option<Cow<'a, str>>,
    pub state: Option<Cow<'a, str>>,
}

/// Strip any leading and any trailing run of double quotes.
///
/// Escaped quotes inside the value are left alone.
pub fn trim_quotes(field: &str) -> &str {
    field
        .trim_end_matches(DOUBLE_QUOTE)
        .trim_start_matches(DOUBLE_QUOTE)
}

// invalid UTF-8 in a field we read is replaced, not fatal
fn field(record: &ByteRecord, idx: Option<usize>) -> Option<Cow<'_, str>> {
    idx.and_then(|idx| record.get(idx))
        .map(String::from_utf8_lossy)
}

/// Status must equal `CERTIFIED` exactly; quotes are not trimmed here.
pub fn is_certified(record: &ByteRecord, columns: &Columns) -> bool {
    columns
        .status
        .and_then(|idx| record.get(idx))
        .is_some_and(|status| status == CERTIFIED.as_bytes())
}

/// Occupation is quote-trimmed, state is taken verbatim.
///
/// If both fields resolve to the same column it is counted as an
/// occupation only.
pub fn certified_fields<'a>(
    record: &'a ByteRecord,
    columns: &Columns,
) -> Option<CertifiedFields<'a>> {
    if !is_certified(record, columns) {
        return None;
    }

    let occupation = field(record, columns.occupation).map(|value| match value {
        Cow::Borrowed(value) => Cow::Borrowed(trim_quotes(value)),
        Cow::Owned(value) => Cow::Owned(trim_quotes(&value).to_owned()),
    });
    let state = field(
        record,
        columns.state.filter(|idx| Some(*idx) != columns.occupation),
    );

    Some(CertifiedFields { occupation, state })
}
