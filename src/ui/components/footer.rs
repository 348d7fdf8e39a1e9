//! Footer component: pagination and loading indicator.

use crate::ui::viewmodel::CollectionViewModel;
use std::fmt::Write;

pub fn render_footer(out: &mut String, vm: &CollectionViewModel) {
    let mut parts = Vec::new();
    if let Some(pagination) = vm.pagination {
        parts.push(format!(
            "Page {} of {}",
            pagination.current_page, pagination.total_pages
        ));
        if u64::from(pagination.current_page) < pagination.total_pages {
            parts.push(format!("next: --page {}", pagination.current_page + 1));
        }
    }
    if vm.loading {
        parts.push("Loading...".to_string());
    }
    let _ = writeln!(out, "{}", parts.join("  |  "));
}
