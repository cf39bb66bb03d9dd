//! Line codec for the habits file.
//!
//! One record per line, `<0|1>|<name>`, in list order. The name is
//! everything after the first separator, so names may contain `|`. Any flag
//! other than `1` reads as unchecked.

use crate::error::MalformedRecord;
use crate::storage::numbered_lines;

use super::HabitEntry;

const SEPARATOR: char = '|';

pub fn encode_line(entry: &HabitEntry) -> String {
    let flag = if entry.completed_today { '1' } else { '0' };
    format!("{flag}{SEPARATOR}{}", entry.name)
}

/// Encode the whole list, newline-terminated.
pub fn encode(entries: &[HabitEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&encode_line(entry));
        out.push('\n');
    }
    out
}

pub fn decode_line(line: &str, line_no: usize) -> Result<HabitEntry, MalformedRecord> {
    let malformed = |reason| MalformedRecord {
        line: line_no,
        reason,
    };

    let (flag, name) = line
        .split_once(SEPARATOR)
        .ok_or_else(|| malformed("missing field separator"))?;
    let completed_today = flag.trim() == "1";
    let name = name.trim();
    if name.is_empty() {
        return Err(malformed("empty habit name"));
    }

    Ok(HabitEntry {
        name: name.to_string(),
        completed_today,
    })
}

/// Decode a whole file, returning the good entries in order and the lines
/// that were skipped.
pub fn decode(contents: impl AsRef<[u8]>) -> (Vec<HabitEntry>, Vec<MalformedRecord>) {
    let mut entries = Vec::new();
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
            Ok(entry) => entries.push(entry),
            Err(bad) => skipped.push(bad),
        }
    }
    (entries, skipped)
}
