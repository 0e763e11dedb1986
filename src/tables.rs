use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};

use crate::{
    profile::WeeklyProfile,
    savings::SavingsReport,
    weekday::{self, WEEKDAY_ORDER},
};

/// Render one compressor's weekly profile: a row per bucket, a column per weekday.
#[must_use]
pub fn build_profile_table(profile: &WeeklyProfile) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        std::iter::once("Time")
            .chain(WEEKDAY_ORDER.into_iter().map(weekday::name))
            .collect::<Vec<_>>(),
    );
    for bucket in profile.interval().buckets() {
        let mut row = vec![Cell::new(bucket)];
        row.extend(WEEKDAY_ORDER.into_iter().map(|day| {
            Cell::new(profile.power(day, bucket)).set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }
    table
}

/// Render the savings report: a row per compressor plus the grand totals.
#[must_use]
pub fn build_savings_table(report: &SavingsReport) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Compressor", "Weekly", "Weekly $", "Annual", "Annual $"]);
    for row in &report.compressors {
        table.add_row(vec![
            Cell::new(&row.compressor),
            Cell::new(row.weekly).set_alignment(CellAlignment::Right),
            Cell::new(row.weekly_cost).set_alignment(CellAlignment::Right),
            Cell::new(row.annual).set_alignment(CellAlignment::Right),
            Cell::new(row.annual_cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(report.weekly_total).set_alignment(CellAlignment::Right),
        Cell::new(report.weekly_total_cost).set_alignment(CellAlignment::Right),
        Cell::new(report.annual_total).set_alignment(CellAlignment::Right),
        Cell::new(report.annual_total_cost).set_alignment(CellAlignment::Right),
    ]);
    table
}
