use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pinmap_model::Rgba;

use crate::pipeline::RenderOutcome;

pub fn print_summary(outcome: &RenderOutcome) {
    println!("Data: {}", outcome.data_path.display());
    match &outcome.output_path {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: skipped (dry run)"),
    }
    if outcome.cache_used {
        println!(
            "Records: {} ({} geocoded)",
            outcome.total_records, outcome.geocoded
        );
    } else {
        println!(
            "Records: {} (no geocode cache, coordinates empty)",
            outcome.total_records
        );
    }
    if outcome.duplicate_addresses > 0 {
        println!(
            "Dropped {} duplicate address row(s), first kept",
            outcome.duplicate_addresses
        );
    }
    if outcome.empty_addresses > 0 {
        println!("Dropped {} row(s) without an address", outcome.empty_addresses);
    }
    println!("Points displayed: {}", outcome.visible);

    print_tag_table(outcome);
    print_missing_table(outcome);
}

fn print_tag_table(outcome: &RenderOutcome) {
    if outcome.tags.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tag"),
        header_cell("Color"),
        header_cell("Records"),
        header_cell("Shown"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    let mut tagged_total = 0usize;
    for tag in &outcome.tags {
        tagged_total += tag.records;
        table.add_row(vec![
            Cell::new(&tag.tag),
            swatch_cell(tag.color),
            Cell::new(tag.records),
            shown_cell(tag.selected),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(tagged_total).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn print_missing_table(outcome: &RenderOutcome) {
    if outcome.missing.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Address"),
        header_cell("Tag"),
    ]);
    apply_table_style(&mut table);
    for record in &outcome.missing {
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(&record.address),
            match record.tag.as_deref() {
                Some(tag) => Cell::new(tag),
                None => dim_cell("-"),
            },
        ]);
    }
    println!();
    println!("Addresses without coordinates:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Hex code colored in the tag's own palette color.
pub fn swatch_cell(color: Rgba) -> Cell {
    let (r, g, b) = color.rgb();
    Cell::new(color.hex()).fg(Color::Rgb { r, g, b })
}

fn shown_cell(selected: bool) -> Cell {
    if selected {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
