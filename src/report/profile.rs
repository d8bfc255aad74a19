//! Console table describing every column of the loaded dataset

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{ColumnKind, ColumnMeta};

/// Build the column profile table
pub fn column_profile_table(columns: &[ColumnMeta]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Kind").add_attribute(Attribute::Bold),
        Cell::new("Distinct").add_attribute(Attribute::Bold),
        Cell::new("Ratio").add_attribute(Attribute::Bold),
        Cell::new("Missing").add_attribute(Attribute::Bold),
        Cell::new("Meaningful").add_attribute(Attribute::Bold),
    ]);

    for meta in columns {
        let kind_color = match meta.kind {
            ColumnKind::Numeric => Color::Cyan,
            ColumnKind::Categorical => Color::Magenta,
        };
        let ratio = meta
            .distinct_ratio
            .map(|r| format!("{:.3}", r))
            .unwrap_or_else(|| "-".to_string());
        let meaningful = if meta.is_meaningful() {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };

        table.add_row(vec![
            Cell::new(&meta.name),
            Cell::new(meta.kind.label()).fg(kind_color),
            Cell::new(meta.distinct).set_alignment(CellAlignment::Right),
            Cell::new(ratio).set_alignment(CellAlignment::Right),
            Cell::new(meta.missing)
                .set_alignment(CellAlignment::Right)
                .fg(if meta.missing > 0 {
                    Color::Yellow
                } else {
                    Color::White
                }),
            meaningful,
        ]);
    }

    table
}

/// Print the column profile, indented to match the other console output
pub fn display_column_profile(columns: &[ColumnMeta]) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("COLUMN PROFILE").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    for line in column_profile_table(columns).to_string().lines() {
        println!("    {}", line);
    }
    println!();
}
