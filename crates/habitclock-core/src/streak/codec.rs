//! Line codec for the streaks file: `<name>|<streak>|<YYYY-MM-DD or empty>`.
//!
//! Fields are split from the right, so a name containing `|` still decodes.

use chrono::NaiveDate;

use crate::error::MalformedRecord;
use crate::storage::numbered_lines;

use super::StreakRecord;

const SEPARATOR: char = '|';
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_line(record: &StreakRecord) -> String {
    let date = record
        .last_completed_date
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{date}",
        record.habit_key, record.streak_count
    )
}

pub fn encode<'a>(records: impl IntoIterator<Item = &'a StreakRecord>) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&encode_line(record));
        out.push('\n');
    }
    out
}

/// Decode one line.
///
/// A missing date field is accepted. An unparseable date is dropped and an
/// unparseable count reads as 0, so neither rejects the whole record.
pub fn decode_line(line: &str, line_no: usize) -> Result<StreakRecord, MalformedRecord> {
    let malformed = |reason| MalformedRecord {
        line: line_no,
        reason,
    };

    let mut fields = line.rsplitn(3, SEPARATOR).collect::<Vec<_>>();
    fields.reverse();
    let (name, count, date) = match fields.as_slice() {
        [name, count, date] => (*name, *count, Some(*date)),
        [name, count] => (*name, *count, None),
        _ => return Err(malformed("missing field separator")),
    };

    if name.trim().is_empty() {
        return Err(malformed("empty habit name"));
    }
    let streak_count = count.trim().parse::<u32>().unwrap_or(0);
    let last_completed_date = date
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok());

    Ok(StreakRecord {
        habit_key: name.to_string(),
        streak_count,
        last_completed_date,
    })
}

pub fn decode(contents: impl AsRef<[u8]>) -> (Vec<StreakRecord>, Vec<MalformedRecord>) {
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (line_no, line) in numbered_lines(contents.as_ref()) {
        let Ok(line) = line else {
            skipped.push(MalformedRecord {
                line: line_no,
                reason: "line is not valid UTF-8",
            });
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line, line_no) {
            Ok(record) => records.push(record),
            Err(bad) => skipped.push(bad),
        }
    }
    (records, skipped)
}
