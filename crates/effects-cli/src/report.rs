//! Rendering of validation progress, diagnostics, and collected reports.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use effects_normalize::Divergence;
use effects_validate::{Category, Issue, IssueKind, Pass, ValidationReport};

/// Prefix on every validator line.
pub const VALIDATION_TAG: &str = "[Effects Validation]";
/// Prefix on every sorter line.
pub const SORT_TAG: &str = "[Effects Sort]";

pub fn starting_line() -> String {
    format!("{VALIDATION_TAG}: 🚀 Starting validation...")
}

pub fn pass_started_line(pass: Pass) -> String {
    format!(
        "{VALIDATION_TAG}: {}/{} {pass} check started...",
        pass.number(),
        Pass::all().len()
    )
}

pub fn pass_passed_line(pass: Pass) -> String {
    format!("{VALIDATION_TAG}: ✅ {pass} check passed.")
}

pub fn all_passed_line() -> String {
    let total = Pass::all().len();
    format!("{VALIDATION_TAG}: ✨ All {total}/{total} checks passed.")
}

/// The single stderr line for a violation.
pub fn diagnostic_line(issue: &Issue) -> String {
    format!("{VALIDATION_TAG} ❌ {issue}")
}

/// The single stderr line for a document or rules file that could not be
/// used, or a rewrite that could not be saved.
pub fn failure_line(tag: &str, error: &anyhow::Error) -> String {
    format!("{tag} ❌ {error:#}")
}

/// Totals line closing a collect-all text report.
pub fn summary_line(report: &ValidationReport) -> String {
    let noun = if report.len() == 1 { "issue" } else { "issues" };
    let breakdown: Vec<String> = Category::all()
        .iter()
        .filter_map(|category| {
            let count = report.issues_in(*category).count();
            (count > 0).then(|| format!("{}: {count}", category.label()))
        })
        .collect();
    format!(
        "{VALIDATION_TAG}: {} {noun} found in {} records ({}).",
        report.len(),
        report.record_count,
        breakdown.join(", ")
    )
}

pub fn already_sorted_line() -> String {
    format!("{SORT_TAG} Already sorted.")
}

pub fn not_sorted_lines(divergence: &Divergence) -> String {
    format!("{SORT_TAG} NOT sorted. First differing position:\n  {divergence}")
}

pub fn rewritten_line(path: &std::path::Path) -> String {
    format!(
        "{SORT_TAG} Rewrote {} with deterministic ordering.",
        path.display()
    )
}

/// Table of every collected issue, in detection order.
pub fn issue_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Category"),
        header_cell("Rule"),
        header_cell("Effect"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (index, issue) in report.issues.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            category_cell(issue.category()),
            rule_cell(issue.kind()),
            issue.effect().map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(issue.message()),
        ]);
    }
    table
}

/// Issue counts per rule, only rules that fired.
pub fn count_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rule"), header_cell("Count")]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (kind, count) in report.count_by_kind() {
        table.add_row(vec![
            rule_cell(kind),
            Cell::new(count)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table
}

pub fn render_json(report: &ValidationReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
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

fn category_cell(category: Category) -> Cell {
    let color = match category {
        Category::Presence => Color::Yellow,
        Category::Format => Color::Magenta,
        Category::Markup => Color::Blue,
        Category::Consistency => Color::Green,
        Category::Ordering => Color::Red,
    };
    Cell::new(category.label()).fg(color)
}

fn rule_cell(kind: IssueKind) -> Cell {
    Cell::new(kind.label()).add_attribute(Attribute::Bold)
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
