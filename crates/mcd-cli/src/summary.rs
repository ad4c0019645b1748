use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mcd_cli::types::{FlagsResult, ItemsResult, JoinResult};

pub fn print_join_summary(result: &JoinResult) {
    let mut table = output_table();
    table.add_row(vec![
        Cell::new("Joined rules"),
        path_cell(&result.outputs.rules_csv),
        Cell::new(result.rules),
    ]);
    table.add_row(vec![
        Cell::new("Joined rules (JSON)"),
        path_cell(&result.outputs.rules_json),
        Cell::new(result.rules),
    ]);
    table.add_row(vec![
        Cell::new("Grouped by code"),
        path_cell(&result.outputs.grouped_json),
        Cell::new(result.codes),
    ]);
    align_column(&mut table, 2, CellAlignment::Right);
    println!("{table}");
    println!(
        "Codes requiring PA: {} of {}",
        result.flagged_codes, result.codes
    );
    if let Some(count) = result.overlay_codes {
        println!("Overlay codes: {count}");
    }
}

pub fn print_flags_summary(result: &FlagsResult) {
    println!(
        "Targets: {} NCD, {} LCD; matched articles: {}",
        result.ncd_targets, result.lcd_targets, result.matched_articles
    );
    let mut table = output_table();
    table.add_row(vec![
        Cell::new("Flags"),
        path_cell(&result.out),
        count_cell(result.codes),
    ]);
    align_column(&mut table, 2, CellAlignment::Right);
    println!("{table}");
}

pub fn print_items_summary(result: &ItemsResult) {
    let mut table = output_table();
    table.add_row(vec![
        Cell::new("App items"),
        path_cell(&result.out),
        count_cell(result.items),
    ]);
    align_column(&mut table, 2, CellAlignment::Right);
    println!("{table}");
    println!("Source rows: {}", result.source_rows);
}

fn output_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Output"),
        header_cell("Path"),
        header_cell("Records"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn path_cell(path: &Path) -> Cell {
    Cell::new(path.display())
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
