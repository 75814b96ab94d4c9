// BuildSleuth - core/parser.rs
//
// Extracts the asset-size block from a Unity editor log.
// Core layer: accepts any iterator of lines, never touches the filesystem.
//
// The scan is a three-state machine:
//
//   Searching --marker--> Collecting --closing rule--> Done
//
// Done is terminal: once entered, no further lines are pulled from the input.

use crate::core::model::{ParseStats, SizeRecord};
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Caller-supplied predicate; `true` keeps the record.
pub type RecordFilter<'a> = &'a dyn Fn(&SizeRecord) -> bool;

/// Position of the scan relative to the size section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for the section marker; every line is discarded.
    Searching,
    /// Inside the section; lines are matched against the record pattern.
    Collecting,
    /// Closing rule seen. Terminal.
    Done,
}

/// How a single line was classified by [`ScanState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Outside the section, or seen after Done.
    Ignored,
    /// The section marker.
    Marker,
    /// The dashed closing rule.
    ClosingRule,
    /// A line inside the section that may hold a record.
    Body,
}

impl ScanState {
    /// Feed one line, returning the next state and what the line was.
    pub fn advance(self, line: &str) -> (ScanState, LineRole) {
        match self {
            ScanState::Searching if line.contains(constants::SECTION_MARKER) => {
                (ScanState::Collecting, LineRole::Marker)
            }
            ScanState::Searching => (ScanState::Searching, LineRole::Ignored),
            ScanState::Collecting if has_dash_run(line, constants::CLOSING_RULE_LEN) => {
                (ScanState::Done, LineRole::ClosingRule)
            }
            ScanState::Collecting => (ScanState::Collecting, LineRole::Body),
            ScanState::Done => (ScanState::Done, LineRole::Ignored),
        }
    }
}

/// Records plus the counters describing the scan that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutput {
    pub records: Vec<SizeRecord>,
    pub stats: ParseStats,
}

/// Parse the size section out of `lines`.
///
/// Never fails: a missing marker, an empty section, or unmatched lines all
/// just produce fewer (possibly zero) records.
pub fn parse<I, S>(lines: I, filter: Option<RecordFilter<'_>>) -> Vec<SizeRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_with_stats(lines, filter).records
}

/// Same as [`parse`], also returning scan counters.
pub fn parse_with_stats<I, S>(lines: I, filter: Option<RecordFilter<'_>>) -> ParseOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ScanState::Searching;
    let mut out = ParseOutput::default();

    for line in lines {
        let line = line.as_ref();
        out.stats.lines_read += 1;

        let (next, role) = state.advance(line);
        state = next;

        match role {
            LineRole::Marker => {
                out.stats.section_found = true;
                tracing::debug!(line = out.stats.lines_read, "Size section marker found");
            }
            LineRole::ClosingRule => {
                out.stats.section_closed = true;
                break;
            }
            LineRole::Body => {
                let Some(record) = match_record(line) else {
                    continue;
                };
                if filter.map_or(true, |keep| keep(&record)) {
                    out.records.push(record);
                } else {
                    out.stats.filtered_out += 1;
                }
            }
            LineRole::Ignored => {}
        }
    }

    tracing::debug!(
        lines = out.stats.lines_read,
        records = out.records.len(),
        filtered_out = out.stats.filtered_out,
        section_found = out.stats.section_found,
        section_closed = out.stats.section_closed,
        "Parsing complete"
    );

    out
}

/// Match a single line against the record pattern.
///
/// The pattern may appear anywhere in the line; the name runs to end of line
/// minus trailing whitespace.
pub fn match_record(line: &str) -> Option<SizeRecord> {
    let caps = record_regex().captures(line)?;
    Some(SizeRecord::new(
        caps.get(3)?.as_str().to_string(),
        caps.get(1)?.as_str().to_string(),
        caps.get(2)?.as_str().to_string(),
    ))
}

fn record_regex() -> &'static Regex {
    static RECORD_RE: OnceLock<Regex> = OnceLock::new();
    RECORD_RE.get_or_init(|| Regex::new(constants::RECORD_PATTERN).expect("invalid record regex"))
}

/// True if `line` holds at least `len` consecutive `-` characters.
fn has_dash_run(line: &str, len: usize) -> bool {
    let mut run = 0usize;
    for b in line.bytes() {
        if b == b'-' {
            run += 1;
            if run >= len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
