use crate::domain::model::ConversionResult;
use comfy_table::{presets::UTF8_FULL, Table};

/// Renders the first `rows` converted rows as a table.
///
/// Columns empty in every previewed row are left out so the placeholder tail
/// of the layout does not drown the useful fields.
pub fn render_preview(result: &ConversionResult, rows: usize) -> String {
    let shown = &result.records[..rows.min(result.records.len())];

    let visible: Vec<usize> = (0..result.schema.len())
        .filter(|&idx| shown.iter().any(|r| !r.values()[idx].is_empty()))
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(
            visible
                .iter()
                .map(|&idx| result.schema.columns()[idx].as_str()),
        );

    for record in shown {
        table.add_row(visible.iter().map(|&idx| record.values()[idx].as_str()));
    }

    table.to_string()
}
