use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hiring_model::{DisplayConfig, GroupDetailStats, MISSING_VALUE, StatsSnapshot};
use hiring_store::CalcSnapshot;

pub fn print_stats(stats: &StatsSnapshot, display: &DisplayConfig) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("N"),
        header_cell("Pass rate (%)"),
        header_cell("Avg total"),
        header_cell("Cutoff"),
        header_cell("At/above cutoff (%)"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in &stats.cross_group_summary {
        table.add_row(vec![
            group_cell(&row.group_name),
            count_cell(row.n),
            value_cell(display.format_rate(row.pass_rate)),
            value_cell(display.format_score(row.avg_total)),
            value_cell(display.format_score(row.cutoff)),
            value_cell(display.format_rate(row.cutoff_percentile)),
        ]);
    }
    println!("{table}");

    for row in &stats.cross_group_summary {
        if let Some(detail) = stats.groups.get(&row.group_name) {
            print_group_detail(detail, display);
        }
    }
}

fn print_group_detail(detail: &GroupDetailStats, display: &DisplayConfig) {
    println!();
    println!(
        "{}: n={} scored={} pass={} fail={} mean={} median={} sd={} fail max={}",
        detail.group_name,
        detail.n,
        detail.scored,
        detail.pass_count,
        detail.fail_count,
        display.format_score(detail.total.mean),
        display.format_score(detail.total.median),
        display.format_score(detail.total.std_dev),
        display.format_score(detail.fail_max),
    );
    let comparison = &detail.final_comparison;
    if comparison.final_pass_count + comparison.final_fail_phase_pass_count > 0 {
        println!(
            "  final pass avg={} ({}), phase pass but final fail avg={} ({})",
            display.format_score(comparison.final_pass_avg),
            comparison.final_pass_count,
            display.format_score(comparison.final_fail_phase_pass_avg),
            comparison.final_fail_phase_pass_count,
        );
    }
    if detail.fields.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Pass avg"),
        header_cell("Fail avg"),
        header_cell("Correlation"),
        header_cell("Pairs"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for field in &detail.fields {
        table.add_row(vec![
            Cell::new(&field.field),
            value_cell(display.format_score(field.pass_avg)),
            value_cell(display.format_score(field.fail_avg)),
            value_cell(display.format_correlation(field.correlation)),
            count_cell(field.pairs),
        ]);
    }
    println!("{table}");
}

pub fn print_snapshot_header(snapshot: &CalcSnapshot) {
    println!("Snapshot: {} (#{})", snapshot.name, snapshot.id);
    println!("Round: {}", snapshot.round_id);
    println!("Schema: {}", snapshot.schema_version);
    println!("Calculated: {}", snapshot.calculated_at.to_rfc3339());
    println!("Created: {}", snapshot.created_at.to_rfc3339());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn group_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn value_cell(value: String) -> Cell {
    if value == MISSING_VALUE {
        dim_cell(value)
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
