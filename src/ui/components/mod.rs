//! Text components for the collection screen.
//!
//! Each component appends its lines to a shared `String` buffer and knows
//! nothing about the others. [`render_collection`] stacks them:
//!
//! ```text
//! [Header]
//! [Border]
//! [Error line, if any]
//! [Table headers + rows]   or   [Empty state]
//! [Border]
//! [Footer: pagination / loading]
//! ```

mod empty;
mod footer;
mod header;
mod table;

use crate::ui::viewmodel::CollectionViewModel;
use std::fmt::Write;

/// Width of separator lines.
pub const LINE_WIDTH: usize = 72;

fn render_border(out: &mut String) {
    let _ = writeln!(out, "{}", "─".repeat(LINE_WIDTH));
}

/// Renders the full collection screen into `out`.
pub fn render_collection(out: &mut String, vm: &CollectionViewModel) {
    header::render_header(out, &vm.header);
    render_border(out);

    if let Some(error) = &vm.error {
        let _ = writeln!(out, "Error: {error}");
    }

    match &vm.empty_state {
        Some(empty) => empty::render_empty_state(out, empty),
        None => {
            table::render_table_headers(out);
            table::render_table_rows(out, &vm.rows);
        }
    }

    if vm.loading || vm.pagination.is_some() {
        render_border(out);
        footer::render_footer(out, vm);
    }
}
