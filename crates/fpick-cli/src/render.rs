use std::fmt::Write;

use fpick_core::controller::PickerView;
use fpick_core::nav::lister::SelectionMode;

/// Formats a view as plain text: breadcrumbs, then one numbered line per
/// entry.
///
/// The breadcrumb trail is printed on the root list too, since it is kept
/// there and `c <n>` still jumps into it.
pub fn render(view: &PickerView) -> String {
    let mut out = String::new();

    let mode = match view.selection_mode {
        SelectionMode::File => "file",
        SelectionMode::Directory => "dir",
    };
    let hidden = if view.show_hidden { "shown" } else { "hidden" };

    let trail = view
        .breadcrumbs
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{i}:{}", e.label()))
        .collect::<Vec<_>>()
        .join(" > ");
    let header = match (view.is_root_list(), trail.is_empty()) {
        (true, true) => "[roots]".to_string(),
        (true, false) => format!("[roots] {trail}"),
        (false, _) => trail,
    };
    let _ = writeln!(out, "{header}  (mode: {mode}, hidden: {hidden})");

    if let Some(error) = &view.last_error {
        let _ = writeln!(out, "! {error}");
    }
    if view.entries.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }

    for (i, entry) in view.entries.iter().enumerate() {
        let marker = if entry.file_type().is_container() { "/" } else { "" };
        let detail = entry.size_label().unwrap_or("");
        let _ = writeln!(
            out,
            "{i:>3}  {}{marker}  [{}] {detail}",
            entry.label(),
            entry.file_type()
        );
    }

    out
}
