//! Header component: title, count and greeting.

use crate::ui::viewmodel::HeaderInfo;
use std::fmt::Write;

/// Writes the title line and, when signed in, the greeting aligned right.
///
/// ```text
/// Your Movie Collection (25 movies found)              Welcome, Ada
/// ```
pub fn render_header(out: &mut String, header: &HeaderInfo) {
    let left = format!("{} ({})", header.title, header.count_label);
    match &header.welcome {
        Some(welcome) => {
            let padding = super::LINE_WIDTH
                .saturating_sub(left.chars().count() + welcome.chars().count())
                .max(1);
            let _ = writeln!(out, "{left}{}{welcome}", " ".repeat(padding));
        }
        None => {
            let _ = writeln!(out, "{left}");
        }
    }
}
