//! Empty state component.

use crate::ui::viewmodel::EmptyState;
use std::fmt::Write;

/// Writes the message and its subtitle, separated from the header by a blank
/// line.
pub fn render_empty_state(out: &mut String, empty: &EmptyState) {
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", empty.message);
    let _ = writeln!(out, "  {}", empty.subtitle);
}
