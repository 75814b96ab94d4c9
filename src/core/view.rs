// BuildSleuth - core/view.rs
//
// Display-side selection over a report: internal-asset toggle, name search,
// and column sort. Produces indices into the unfiltered record list so the
// report itself is never copied or mutated.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::SizeRecord;
use std::cmp::Ordering;

/// Table column the view is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Log order.
    #[default]
    Source,
    Name,
    Size,
    Percentage,
}

impl SortColumn {
    /// Parse the `[report] default_sort` config value.
    pub fn from_config(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "source" => Some(Self::Source),
            "name" => Some(Self::Name),
            "size" => Some(Self::Size),
            "percentage" => Some(Self::Percentage),
            _ => None,
        }
    }

    /// Direction used when the column is first selected: biggest first for
    /// numeric columns, A-Z / log order otherwise.
    pub fn natural_direction(self) -> SortDirection {
        match self {
            Self::Size | Self::Percentage => SortDirection::Descending,
            Self::Source | Self::Name => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow shown next to the active column header.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "\u{25b2}",
            Self::Descending => "\u{25bc}",
        }
    }
}

/// Everything that decides which records are visible and in what order.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Include engine built-ins and package assets.
    pub show_internal: bool,

    /// Case-insensitive substring filter on the name. Empty = no filter.
    pub name_search: String,

    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
}

impl ViewState {
    pub fn new(show_internal: bool, sort_column: SortColumn) -> Self {
        Self {
            show_internal,
            name_search: String::new(),
            sort_column,
            sort_direction: sort_column.natural_direction(),
        }
    }

    /// Header click: flip direction on the active column, otherwise switch
    /// to `column` in its natural direction.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_column = column;
            self.sort_direction = column.natural_direction();
        }
    }
}

/// Indices of the records that pass `view`, in display order.
///
/// Sorting is stable, so ties keep their log order.
pub fn visible_indices(records: &[SizeRecord], view: &ViewState) -> Vec<usize> {
    let needle = view.name_search.to_lowercase();

    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| view.show_internal || !r.is_internal())
        .filter(|(_, r)| needle.is_empty() || r.name().to_lowercase().contains(&needle))
        .map(|(idx, _)| idx)
        .collect();

    indices.sort_by(|&a, &b| {
        let key = match view.sort_direction {
            SortDirection::Ascending => compare(records, a, b, view.sort_column),
            SortDirection::Descending => compare(records, b, a, view.sort_column),
        };
        // Ties keep log order regardless of direction.
        key.then(a.cmp(&b))
    });

    indices
}

fn compare(records: &[SizeRecord], a: usize, b: usize, column: SortColumn) -> Ordering {
    let (ra, rb) = (&records[a], &records[b]);
    match column {
        SortColumn::Source => a.cmp(&b),
        SortColumn::Name => ra.name().to_lowercase().cmp(&rb.name().to_lowercase()),
        SortColumn::Size => ra.size_bytes().total_cmp(&rb.size_bytes()),
        SortColumn::Percentage => ra.percentage_value().total_cmp(&rb.percentage_value()),
    }
}
