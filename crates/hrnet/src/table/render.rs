//! Text rendering of a [`TableView`].

use std::fmt::Write;

use super::{SortDirection, TableView};

const ASCENDING_MARKER: &str = " ^";
const DESCENDING_MARKER: &str = " v";

fn header_text(header: &super::HeaderView) -> String {
    match header.sort {
        Some(SortDirection::Ascending) => format!("{}{ASCENDING_MARKER}", header.header),
        Some(SortDirection::Descending) => format!("{}{DESCENDING_MARKER}", header.header),
        None => header.header.clone(),
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, to: usize) -> String {
    let mut out = text.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(text))));
    out
}

/// Boxed grid with header, rows, info line and pagination footer.
#[must_use]
pub fn render_table(view: &TableView) -> String {
    let headers: Vec<String> = view.headers.iter().map(header_text).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in &view.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    if let (Some(message), Some(last)) = (view.empty_message, widths.len().checked_sub(1)) {
        // The message spans every column and the " | " gaps between them.
        let inner: usize = widths.iter().sum::<usize>() + 3 * last;
        widths[last] += width(message).saturating_sub(inner);
    }

    let separator = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    };

    let mut out = String::new();
    let _ = writeln!(out, "{separator}");
    let _ = writeln!(out, "{}", format_line(&headers, &widths));
    let _ = writeln!(out, "{separator}");

    if let Some(message) = view.empty_message {
        let inner = separator.len().saturating_sub(4);
        let _ = writeln!(out, "| {} |", pad(message, inner));
    } else {
        for row in &view.rows {
            let _ = writeln!(out, "{}", format_line(row, &widths));
        }
    }
    let _ = writeln!(out, "{separator}");

    let _ = writeln!(out, "{}", view.info_line());
    if view.page_count > 1 {
        let _ = writeln!(out, "{}", pagination_line(view));
    }
    out
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, w) in cells.iter().zip(widths) {
        let _ = write!(line, " {} |", pad(cell, *w));
    }
    line
}

/// `Page 2 of 7  < 1 [2] 3 4 5 >`
#[must_use]
pub fn pagination_line(view: &TableView) -> String {
    let mut line = format!("Page {} of {} ", view.page_index + 1, view.page_count);
    line.push_str(if view.can_previous { " <" } else { "  " });
    for &page in &view.page_buttons {
        if page == view.page_index {
            let _ = write!(line, " [{}]", page + 1);
        } else {
            let _ = write!(line, " {}", page + 1);
        }
    }
    line.push_str(if view.can_next { " >" } else { "  " });
    line.trim_end().to_string()
}

/// Tab-separated header line followed by one line per row.
#[must_use]
pub fn render_plain(view: &TableView) -> String {
    let mut out = String::new();
    let headers: Vec<&str> = view.headers.iter().map(|h| h.header.as_str()).collect();
    let _ = writeln!(out, "{}", headers.join("\t"));
    for row in &view.rows {
        let _ = writeln!(out, "{}", row.join("\t"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnDef, DataTable, TableRow, NO_DATA_MESSAGE};

    struct Pair(&'static str, &'static str);

    impl TableRow for Pair {
        fn cell(&self, key: &str) -> Option<&str> {
            match key {
                "a" => Some(self.0),
                "b" => Some(self.1),
                _ => None,
            }
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![ColumnDef::new("a", "Alpha"), ColumnDef::new("b", "Beta")]
    }

    #[test]
    fn test_render_table_layout() {
        let rows = vec![Pair("x", "longer value"), Pair("yy", "")];
        let mut table = DataTable::new(&rows, columns());
        table.toggle_sort("a").unwrap();

        let text = render_table(&table.view());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "+---------+--------------+");
        assert_eq!(lines[1], "| Alpha ^ | Beta         |");
        assert_eq!(lines[3], "| x       | longer value |");
        assert_eq!(lines[4], "| yy      | -            |");
        assert_eq!(lines[6], "Showing 1 to 2 of 2 entries");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_render_empty_table() {
        let rows: Vec<Pair> = Vec::new();
        let table = DataTable::new(&rows, columns());
        let text = render_table(&table.view());
        assert!(text.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_empty_message_fits_narrow_columns() {
        let rows: Vec<Pair> = Vec::new();
        let narrow = vec![ColumnDef::new("a", "A"), ColumnDef::new("b", "B")];
        let table = DataTable::new(&rows, narrow);

        let text = render_table(&table.view());
        let grid: Vec<&str> = text.lines().take(5).collect();

        assert_eq!(grid[3], "| No data available in table |");
        for line in &grid {
            assert_eq!(line.chars().count(), grid[0].chars().count(), "{line}");
        }
    }

    #[test]
    fn test_pagination_line() {
        let rows: Vec<Pair> = (0..35).map(|_| Pair("a", "b")).collect();
        let mut table = DataTable::new(&rows, columns());
        table.set_page(1);

        assert_eq!(pagination_line(&table.view()), "Page 2 of 4  < 1 [2] 3 4 >");
        assert!(render_table(&table.view()).contains("Page 2 of 4"));
    }

    #[test]
    fn test_render_plain() {
        let rows = vec![Pair("x", "y")];
        let table = DataTable::new(&rows, columns());
        assert_eq!(render_plain(&table.view()), "Alpha\tBeta\nx\ty\n");
    }
}
