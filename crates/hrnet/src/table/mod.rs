//! Client-side data table: global filter, single-column sort, pagination.
//!
//! A [`DataTable`] borrows its rows and keeps only view state (filter text,
//! sort, page). [`DataTable::view`] runs the pipeline in a fixed order,
//! filter then sort then paginate, and returns a [`TableView`] ready to
//! render. Call it again after any state change.

pub mod render;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::employee::{Employee, Field};
use crate::error::{Error, Result};
use crate::widgets::date_input::parse_external;

/// Shown for missing or empty cells.
pub const EMPTY_CELL: &str = "-";

/// Shown when there are no rows at all.
pub const NO_DATA_MESSAGE: &str = "No data available in table";

/// Shown when rows exist but none match the filter.
pub const NO_MATCH_MESSAGE: &str = "No matching records found";

/// Most page buttons shown at once.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// How a column's values are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Case-insensitive lexicographic.
    #[default]
    Text,
    /// Chronological, cells in `MM/DD/YYYY`.
    Date,
    /// Numeric.
    Number,
}

/// Pairs a row field key with its header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Field key passed to [`TableRow::cell`].
    pub key: String,
    /// Header text.
    pub header: String,
    /// Ordering used when sorting by this column.
    #[serde(default)]
    pub kind: ColumnKind,
}

impl ColumnDef {
    /// A text column.
    #[must_use]
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            kind: ColumnKind::Text,
        }
    }

    /// Set the ordering kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Field lookup for anything a table can display.
pub trait TableRow {
    /// The raw value for column `key`, or `None` if the row has no such field.
    fn cell(&self, key: &str) -> Option<&str>;
}

impl TableRow for Employee {
    fn cell(&self, key: &str) -> Option<&str> {
        if key == "id" {
            return Some(&self.id);
        }
        Field::from_key(key).map(|field| self.get(field))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// The active sort: one column, one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Column key.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

/// Supported page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    /// 10 rows.
    #[default]
    Ten,
    /// 25 rows.
    TwentyFive,
    /// 50 rows.
    Fifty,
    /// 100 rows.
    Hundred,
}

impl PageSize {
    /// All sizes, smallest first.
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    /// Rows per page.
    #[must_use]
    pub fn rows(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(rows: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.rows() == rows)
            .ok_or(Error::PageSize(rows))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.rows()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows())
    }
}

/// Which pipeline stages are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Apply the global filter.
    pub searchable: bool,
    /// Allow sorting.
    pub sortable: bool,
    /// Split into pages.
    pub paginated: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            searchable: true,
            sortable: true,
            paginated: true,
        }
    }
}

/// Header cell as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    /// Column key.
    pub key: String,
    /// Header text.
    pub header: String,
    /// Current sort on this column, if any.
    pub sort: Option<SortDirection>,
}

/// Result of running the pipeline once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    /// Column headers in display order.
    pub headers: Vec<HeaderView>,
    /// Rendered cells of the current page.
    pub rows: Vec<Vec<String>>,
    /// Position of each displayed row in the input slice.
    pub row_indices: Vec<usize>,
    /// Rows before filtering.
    pub total_rows: usize,
    /// Rows after filtering.
    pub filtered_rows: usize,
    /// Zero-based current page.
    pub page_index: usize,
    /// Number of pages; zero when nothing matches.
    pub page_count: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Zero-based page indices to offer as buttons.
    pub page_buttons: Vec<usize>,
    /// Whether a previous page exists.
    pub can_previous: bool,
    /// Whether a next page exists.
    pub can_next: bool,
    /// Whether a global filter is active.
    pub filtered: bool,
    /// Message to show instead of rows.
    pub empty_message: Option<&'static str>,
}

impl TableView {
    /// One-based position of the first displayed row, zero if none.
    #[must_use]
    pub fn first_entry(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.page_index * self.page_size + 1
        }
    }

    /// One-based position of the last displayed row, zero if none.
    #[must_use]
    pub fn last_entry(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first_entry() + self.rows.len() - 1
        }
    }

    /// "Showing X to Y of N entries", with the unfiltered total when a
    /// filter is active.
    #[must_use]
    pub fn info_line(&self) -> String {
        let mut line = format!(
            "Showing {} to {} of {} entries",
            self.first_entry(),
            self.last_entry(),
            self.filtered_rows
        );
        if self.filtered {
            line.push_str(&format!(" (filtered from {} total entries)", self.total_rows));
        }
        line
    }
}

/// Table state over a borrowed row slice.
#[derive(Debug, Clone)]
pub struct DataTable<'a, R> {
    rows: &'a [R],
    columns: Vec<ColumnDef>,
    options: TableOptions,
    global_filter: String,
    sort: Option<SortState>,
    page_size: PageSize,
    page_index: usize,
}

impl<'a, R: TableRow> DataTable<'a, R> {
    /// Unfiltered, unsorted, first page, 10 rows per page.
    #[must_use]
    pub fn new(rows: &'a [R], columns: Vec<ColumnDef>) -> Self {
        Self {
            rows,
            columns,
            options: TableOptions::default(),
            global_filter: String::new(),
            sort: None,
            page_size: PageSize::default(),
            page_index: 0,
        }
    }

    /// Enable or disable pipeline stages.
    #[must_use]
    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the initial page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Swap in a new row slice, keeping view state. The page is clamped.
    pub fn set_rows(&mut self, rows: &'a [R]) {
        self.rows = rows;
        self.page_index = self.page_index.min(self.page_count().saturating_sub(1));
    }

    /// Column descriptors.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Current filter text.
    #[must_use]
    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    /// Replace the filter text. Any change returns to the first page.
    pub fn set_global_filter(&mut self, query: impl Into<String>) {
        if !self.options.searchable {
            return;
        }
        let query = query.into();
        if query != self.global_filter {
            self.global_filter = query;
            self.page_index = 0;
        }
    }

    /// Current sort.
    #[must_use]
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Header click: none, then ascending, then descending, then none.
    /// Clicking another column starts it at ascending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] if `key` is not a column.
    pub fn toggle_sort(&mut self, key: &str) -> Result<()> {
        self.column(key)?;
        if !self.options.sortable {
            return Ok(());
        }

        self.sort = match self.sort.take() {
            Some(SortState {
                column,
                direction: SortDirection::Ascending,
            }) if column == key => Some(SortState {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortState {
                column,
                direction: SortDirection::Descending,
            }) if column == key => None,
            _ => Some(SortState {
                column: key.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
        trace!(sort = ?self.sort, "Sort toggled");
        Ok(())
    }

    /// Set the sort directly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] if the column is not in the table.
    pub fn set_sort(&mut self, sort: Option<SortState>) -> Result<()> {
        if let Some(sort) = &sort {
            self.column(&sort.column)?;
        }
        if self.options.sortable {
            self.sort = sort;
        }
        Ok(())
    }

    /// Rows per page.
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page_index = 0;
    }

    /// Zero-based current page.
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of pages for the current filter.
    #[must_use]
    pub fn page_count(&self) -> usize {
        let matching = self.filtered_indices().len();
        if self.options.paginated {
            matching.div_ceil(self.page_size.rows())
        } else {
            usize::from(matching > 0)
        }
    }

    /// Jump to a page, clamped to the valid range.
    pub fn set_page(&mut self, index: usize) {
        self.page_index = index.min(self.page_count().saturating_sub(1));
    }

    /// Go forward one page if possible.
    pub fn next_page(&mut self) {
        self.set_page(self.page_index + 1);
    }

    /// Go back one page if possible.
    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Run filter, sort and pagination.
    #[must_use]
    pub fn view(&self) -> TableView {
        let mut indices = self.filtered_indices();
        let filtered_rows = indices.len();
        self.sort_indices(&mut indices);

        let (page_size, page_count) = if self.options.paginated {
            let size = self.page_size.rows();
            (size, filtered_rows.div_ceil(size))
        } else {
            (filtered_rows.max(1), usize::from(filtered_rows > 0))
        };
        let page_index = self.page_index.min(page_count.saturating_sub(1));

        let row_indices: Vec<usize> = indices
            .into_iter()
            .skip(page_index * page_size)
            .take(page_size)
            .collect();

        let rows = row_indices
            .iter()
            .map(|&i| self.render_row(&self.rows[i]))
            .collect();

        let filtered = self.is_filtering();
        let empty_message = if filtered_rows > 0 {
            None
        } else if filtered && !self.rows.is_empty() {
            Some(NO_MATCH_MESSAGE)
        } else {
            Some(NO_DATA_MESSAGE)
        };

        TableView {
            headers: self
                .columns
                .iter()
                .map(|c| HeaderView {
                    key: c.key.clone(),
                    header: c.header.clone(),
                    sort: self
                        .sort
                        .as_ref()
                        .filter(|s| s.column == c.key)
                        .map(|s| s.direction),
                })
                .collect(),
            rows,
            row_indices,
            total_rows: self.rows.len(),
            filtered_rows,
            page_index,
            page_count,
            page_size,
            page_buttons: page_buttons(page_index, page_count),
            can_previous: page_index > 0,
            can_next: page_index + 1 < page_count,
            filtered,
            empty_message,
        }
    }

    fn column(&self, key: &str) -> Result<&ColumnDef> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| Error::UnknownColumn(key.to_string()))
    }

    fn is_filtering(&self) -> bool {
        self.options.searchable && !self.global_filter.is_empty()
    }

    fn filtered_indices(&self) -> Vec<usize> {
        if !self.is_filtering() {
            return (0..self.rows.len()).collect();
        }
        let needle = self.global_filter.to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                self.columns.iter().any(|c| {
                    row.cell(&c.key)
                        .is_some_and(|value| value.to_lowercase().contains(&needle))
                })
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn sort_indices(&self, indices: &mut [usize]) {
        if !self.options.sortable {
            return;
        }
        let Some(sort) = &self.sort else {
            return;
        };
        let Ok(column) = self.column(&sort.column) else {
            return;
        };

        // Stable: ties keep their original relative order in both directions.
        indices.sort_by(|&a, &b| {
            let ordering = compare_cells(
                column.kind,
                self.rows[a].cell(&column.key),
                self.rows[b].cell(&column.key),
            );
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    fn render_row(&self, row: &R) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| match row.cell(&c.key) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => EMPTY_CELL.to_string(),
            })
            .collect()
    }
}

/// Natural ordering of two cells. Missing and empty values sort first;
/// values that fail to parse as their kind sort after those that do.
#[must_use]
pub fn compare_cells(kind: ColumnKind, a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.filter(|v| !v.is_empty());
    let b = b.filter(|v| !v.is_empty());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match kind {
            ColumnKind::Text => compare_text(a, b),
            ColumnKind::Date => compare_parsed(a, b, |v| parse_external(v).ok(), Ord::cmp),
            ColumnKind::Number => compare_parsed(
                a,
                b,
                |v| v.trim().parse::<f64>().ok(),
                |x: &f64, y: &f64| x.total_cmp(y),
            ),
        },
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_parsed<T>(
    a: &str,
    b: &str,
    parse: impl Fn(&str) -> Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_text(a, b),
    }
}

/// Up to [`MAX_PAGE_BUTTONS`] page indices centered on `current` and clamped
/// to `0..page_count`.
#[must_use]
pub fn page_buttons(current: usize, page_count: usize) -> Vec<usize> {
    if page_count == 0 {
        return Vec::new();
    }
    let window = MAX_PAGE_BUTTONS.min(page_count);
    let start = current
        .saturating_sub(MAX_PAGE_BUTTONS / 2)
        .min(page_count - window);
    (start..start + window).collect()
}
