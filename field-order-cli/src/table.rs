//! Terminal-aware table rendering for field records.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use field_order::{FieldRecord, ProjectionState};

/// Create a table pre-configured for terminal-width-aware output.
///
/// Falls back to 120 columns when not connected to a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// `✓ 2` for visible at order 2, `-` for hidden.
pub fn projection_cell(state: &ProjectionState) -> String {
    match (state.visible, state.order) {
        (true, Some(order)) => format!("✓ {order}"),
        (true, None) => "✓".to_string(),
        (false, _) => "-".to_string(),
    }
}

/// One row per record: id, name, header, pane.
pub fn records_table<'a>(records: impl IntoIterator<Item = &'a FieldRecord>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Field", "Collapsed header", "Sample pane"]);
    for record in records {
        table.add_row(vec![
            record.id.to_string(),
            record.field_name.clone(),
            projection_cell(&record.collapsed_header),
            projection_cell(&record.sample_pane),
        ]);
    }
    table
}
