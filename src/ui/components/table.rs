//! Table component: one line per movie.
//!
//! Columns are ID, TITLE, YEAR, FORMAT and ACTORS. The row open in the
//! details view is marked with `>`.

use crate::ui::viewmodel::MovieRow;
use std::fmt::Write;

const ID_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 32;

/// Wide enough for "Blu-ray".
const FORMAT_WIDTH: usize = 7;

pub fn render_table_headers(out: &mut String) {
    let _ = writeln!(
        out,
        "  {:<ID_WIDTH$} {:<TITLE_WIDTH$} {:<4} {:<FORMAT_WIDTH$} ACTORS",
        "ID", "TITLE", "YEAR", "FORMAT"
    );
}

pub fn render_table_rows(out: &mut String, rows: &[MovieRow]) {
    for row in rows {
        render_table_row(out, row);
    }
}

fn render_table_row(out: &mut String, row: &MovieRow) {
    let marker = if row.is_selected { '>' } else { ' ' };
    let _ = writeln!(
        out,
        "{marker} {:<ID_WIDTH$} {:<TITLE_WIDTH$} {:<4} {:<FORMAT_WIDTH$} {}",
        truncate(&row.id, ID_WIDTH),
        truncate(&row.title, TITLE_WIDTH),
        row.year,
        row.format,
        row.actors
    );
}

/// Shortens `text` to `width` characters, ending with `…` when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_titles_are_cut_to_column_width() {
        let cut = truncate("Dr. Strangelove or: How I Learned to Stop Worrying", TITLE_WIDTH);
        assert_eq!(cut.chars().count(), TITLE_WIDTH);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("Heat", TITLE_WIDTH), "Heat");
    }
}
