// BuildSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Size record (normalised output of parsing)
// =============================================================================

/// One asset line from the build report's size section.
///
/// Only the parser constructs records, and only from text that matched the
/// record pattern, so `size` and `percentage` are always well-formed. Fields
/// are read-only to everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeRecord {
    name: String,
    size: String,
    percentage: String,
}

impl SizeRecord {
    pub(crate) fn new(name: String, size: String, percentage: String) -> Self {
        Self {
            name,
            size,
            percentage,
        }
    }

    /// Asset identifier exactly as written in the log.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable size token, e.g. `12.3 mb`.
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Human-readable share of the build, e.g. `4.5%`.
    pub fn percentage(&self) -> &str {
        &self.percentage
    }

    /// Size in bytes, for sorting and totals.
    pub fn size_bytes(&self) -> f64 {
        size_token_bytes(&self.size).unwrap_or(0.0)
    }

    /// Percentage as a number (`4.5%` -> 4.5).
    pub fn percentage_value(&self) -> f64 {
        self.percentage
            .trim_end_matches('%')
            .trim()
            .parse()
            .unwrap_or(0.0)
    }

    /// Whether this record belongs to the engine or a package rather than
    /// the user's project content.
    pub fn is_internal(&self) -> bool {
        crate::core::classify::is_internal_asset(&self.name)
    }
}

// =============================================================================
// Size units
// =============================================================================

/// Units that appear in the build report's size column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Kilobytes,
    Megabytes,
}

impl SizeUnit {
    /// Case-insensitive parse of `kb` / `mb`.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("kb") {
            Some(Self::Kilobytes)
        } else if token.eq_ignore_ascii_case("mb") {
            Some(Self::Megabytes)
        } else {
            None
        }
    }

    pub fn bytes(self) -> f64 {
        match self {
            Self::Kilobytes => constants::BYTES_PER_KB,
            Self::Megabytes => constants::BYTES_PER_MB,
        }
    }
}

/// Convert a size token (`12.3 mb`, `4kb`) to bytes.
///
/// Returns `None` when the token is not `<number>[ ]<kb|mb>`.
pub fn size_token_bytes(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.len() < 2 || !token.is_char_boundary(token.len() - 2) {
        return None;
    }
    let (number, unit) = token.split_at(token.len() - 2);
    let unit = SizeUnit::from_token(unit)?;
    let value: f64 = number.trim().parse().ok()?;
    Some(value * unit.bytes())
}

/// Render a byte count the way the build report does (`kb` / `mb`, one decimal).
pub fn format_bytes(bytes: f64) -> String {
    if bytes >= constants::BYTES_PER_MB {
        format!("{:.1} mb", bytes / constants::BYTES_PER_MB)
    } else {
        format!("{:.1} kb", bytes / constants::BYTES_PER_KB)
    }
}

// =============================================================================
// Parse statistics
// =============================================================================

/// Counters describing how far a parse got through its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines pulled from the input, including the marker and closing rule.
    pub lines_read: u64,
    /// Whether the section marker was seen.
    pub section_found: bool,
    /// Whether the closing rule was seen after the marker.
    pub section_closed: bool,
    /// Matching lines rejected by the caller's filter.
    pub filtered_out: usize,
}

// =============================================================================
// Build report (one completed load)
// =============================================================================

/// Result of one load of the editor log.
///
/// Holds every record from the section, unfiltered; the display layer
/// decides which ones to show.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// The editor log the records were read from (not the scratch copy).
    pub source: PathBuf,
    /// All records from the size section, in log order.
    pub records: Vec<SizeRecord>,
    /// Parser counters.
    pub stats: ParseStats,
    /// When the load finished.
    pub parsed_at: DateTime<Utc>,
    /// Wall time for copy + parse.
    #[serde(skip)]
    pub duration: Duration,
}

impl BuildReport {
    /// Records classified as internal.
    pub fn internal_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_internal()).count()
    }

    /// Sum of all record sizes in bytes.
    pub fn total_bytes(&self) -> f64 {
        self.records.iter().map(SizeRecord::size_bytes).sum()
    }

    /// Sum of internal record sizes in bytes.
    pub fn internal_bytes(&self) -> f64 {
        self.records
            .iter()
            .filter(|r| r.is_internal())
            .map(SizeRecord::size_bytes)
            .sum()
    }
}
