use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use silver_cli::types::RunResult;
use silver_core::{BatchStats, SourceSummary};
use silver_model::{ReasonCode, Severity};
use silver_report::FindingCount;

pub fn print_summary(result: &RunResult) {
    match &result.outputs {
        Some(paths) => {
            println!("Silver records: {}", paths.silver.display());
            println!("Findings: {}", paths.findings.display());
        }
        None => println!("Dry run: nothing written to {}", result.output_dir.display()),
    }
    println!("{}", source_table(&result.sources));
    if !result.findings.is_empty() {
        println!();
        println!("Findings:");
        println!("{}", findings_table(&result.findings.counts));
        println!("{}", reason_table(&result.findings.by_reason()));
    }
}

fn source_table(sources: &[SourceSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Org ID"),
        header_cell("Rows"),
        header_cell("Accepted"),
        header_cell("Rejected"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut totals = BatchStats::default();
    for (summary, row) in sources.iter().zip(source_rows(sources)) {
        let stats = summary.stats;
        totals.input_rows += stats.input_rows;
        totals.accepted += stats.accepted;
        totals.rejected += stats.rejected;
        totals.warnings += stats.warnings;
        let [source, org_id, input_rows, accepted, _, _] = row;
        table.add_row(vec![
            Cell::new(source)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(org_id),
            Cell::new(input_rows),
            Cell::new(accepted),
            count_cell(stats.rejected, Color::Red),
            count_cell(stats.warnings, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(totals.input_rows).add_attribute(Attribute::Bold),
        Cell::new(totals.accepted).add_attribute(Attribute::Bold),
        count_cell(totals.rejected, Color::Red).add_attribute(Attribute::Bold),
        count_cell(totals.warnings, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Plain cell text for each source: id, org, rows, accepted, rejected, warnings.
fn source_rows(sources: &[SourceSummary]) -> Vec<[String; 6]> {
    sources
        .iter()
        .map(|summary| {
            [
                summary.source.to_string(),
                summary.org_id.to_string(),
                summary.stats.input_rows.to_string(),
                summary.stats.accepted.to_string(),
                summary.stats.rejected.to_string(),
                summary.stats.warnings.to_string(),
            ]
        })
        .collect()
}

fn findings_table(counts: &[FindingCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Severity"),
        header_cell("Reason"),
        header_cell("Count"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut ordered: Vec<&FindingCount> = counts.iter().collect();
    ordered.sort_by_key(|count| severity_rank(count.severity));
    for count in ordered {
        table.add_row(vec![
            Cell::new(count.source.as_str()),
            severity_cell(count.severity),
            Cell::new(count.reason.as_str()),
            Cell::new(count.count).fg(severity_color(count.severity)),
        ]);
    }
    table
}

/// Totals per reason across every source.
fn reason_table(totals: &BTreeMap<ReasonCode, usize>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Reason"), header_cell("Total")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (reason, total) in totals {
        table.add_row(vec![Cell::new(reason.as_str()), Cell::new(total)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals.values().sum::<usize>()).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
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

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Reject => 0,
        Severity::Warning => 1,
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Reject => Cell::new("REJECT")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Reject => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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

#[cfg(test)]
mod tests {
    use super::*;
    use silver_model::{OrgId, SourceId, TargetField, ValidationFinding};
    use silver_report::FindingsSummary;

    fn summary(id: &str, input_rows: usize, rejected: usize, warnings: usize) -> SourceSummary {
        SourceSummary {
            source: SourceId::new(id).unwrap(),
            org_id: OrgId::new(id).unwrap(),
            stats: BatchStats {
                input_rows,
                accepted: input_rows - rejected,
                rejected,
                warnings,
            },
        }
    }

    #[test]
    fn source_rows_render_counts() {
        let rows = source_rows(&[summary("springfield", 5, 2, 3), summary("chicago", 0, 0, 0)]);
        insta::assert_debug_snapshot!(rows, @r#"
        [
            [
                "springfield",
                "springfield",
                "5",
                "3",
                "2",
                "3",
            ],
            [
                "chicago",
                "chicago",
                "0",
                "0",
                "0",
                "0",
            ],
        ]
        "#);
    }

    #[test]
    fn tables_list_every_source() {
        let table = source_table(&[summary("springfield", 5, 2, 3), summary("chicago", 1, 0, 0)]);
        let rendered = table.to_string();
        assert!(rendered.contains("springfield"));
        assert!(rendered.contains("chicago"));
        assert!(rendered.contains("TOTAL"));
        assert_eq!(table.row_iter().count(), 3);
    }

    #[test]
    fn reason_totals_span_sources() {
        let springfield = SourceId::new("springfield").unwrap();
        let chicago = SourceId::new("chicago").unwrap();
        let phone = |source: &SourceId, row| {
            ValidationFinding::warning(
                source.clone(),
                row,
                TargetField::Phone,
                ReasonCode::InvalidPhone,
                "555",
            )
        };
        let summary = FindingsSummary::from_findings(&[
            phone(&springfield, 0),
            phone(&chicago, 0),
            phone(&chicago, 3),
        ]);
        let table = reason_table(&summary.by_reason());
        let rendered = table.to_string();
        assert!(rendered.contains("invalid_phone"));
        assert!(rendered.contains('3'));
        assert_eq!(table.row_iter().count(), 2);
    }
}
