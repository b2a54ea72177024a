use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gmd_catalog::DatasetOverview;
use gmd_cli::workflow::{DatasetAnalysis, DetectOutcome};
use gmd_history::Statistics;
use gmd_model::{ComparativeAnalysis, Keyword, Mismatch, Priority};

pub fn print_detection(outcome: &DetectOutcome) {
    let result = &outcome.result;
    println!(
        "Patient: {} ({} years)",
        outcome.patient.sex, outcome.patient.age
    );
    if let Some(reason) = &result.skip_reason {
        println!("Skipped: {reason}");
        return;
    }
    println!(
        "Checked {} keywords in {} ms",
        result.total_keywords_checked, result.processing_time_ms
    );
    if let Some(id) = outcome.log_id {
        println!("Logged as entry {id}");
    }
    if result.mismatches.is_empty() {
        println!("No mismatches found.");
        return;
    }
    println!("{}", mismatch_table(&result.mismatches));
    println!(
        "Mismatches: {} (high {}, medium {}, low {})",
        result.mismatches.len(),
        result.count_priority(Priority::High),
        result.count_priority(Priority::Medium),
        result.count_priority(Priority::Low)
    );
}

pub fn print_comparison(analysis: &ComparativeAnalysis) {
    if let Some(gender) = analysis.gender {
        println!("Gender: {gender}");
    }
    if analysis.analyses.is_empty() {
        println!("No gender analyses ran (gender and at least one text column are required).");
        return;
    }
    for entry in &analysis.analyses {
        let results = &entry.results;
        println!();
        println!(
            "{}: {} matches, {} after exclusions, priority {}",
            entry.analysis_type.label(),
            results.total_matches,
            results.filtered_matches,
            results.priority
        );
        if let Some(reason) = &results.skip_reason {
            println!("Skipped: {reason}");
        } else if !results.mismatches.is_empty() {
            println!("{}", mismatch_table(&results.mismatches));
        }
    }
    println!();
    println!(
        "Overall: {} analyses, {} mismatches, priority {}",
        analysis.overall_summary.total_analyses,
        analysis.overall_summary.mismatches_found,
        analysis.overall_summary.priority
    );
}

pub fn print_dataset_analysis(analysis: &DatasetAnalysis) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Gender"),
        header_cell("Findings"),
        header_cell("Impression"),
        header_cell("Priority"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, row) in analysis.rows.iter().enumerate() {
        let counts: Vec<usize> = row
            .analyses
            .iter()
            .map(|entry| entry.results.mismatches.len())
            .collect();
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(row.gender.map_or("-", |gender| gender.label())),
            count_cell(counts.first().copied()),
            count_cell(counts.get(1).copied()),
            priority_cell(row.overall_summary.priority),
        ]);
    }
    println!("{table}");
    let counts = &analysis.priorities;
    println!(
        "Rows: {} | Mismatches: {} | High: {} | Medium: {} | Low: {} | Clean: {}",
        analysis.rows.len(),
        analysis.mismatches_found,
        counts.high,
        counts.medium,
        counts.low,
        counts.none
    );
}

pub fn print_overview(overview: &DatasetOverview) {
    println!("Records: {}", overview.total_records);
    println!("Genders: {}", overview.genders.join(", "));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Findings"),
        header_cell("Impression"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, (findings, impression)) in overview
        .findings
        .iter()
        .zip(&overview.human_impressions)
        .enumerate()
    {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&findings.label),
            Cell::new(&impression.label),
        ]);
    }
    println!("{table}");
}

pub fn print_keywords(keywords: &[&Keyword]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Keyword"),
        header_cell("Sex"),
        header_cell("Category"),
        header_cell("Subcategory"),
        header_cell("Pregnancy"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    for keyword in keywords {
        table.add_row(vec![
            Cell::new(&keyword.text),
            Cell::new(keyword.sex_association.as_str()),
            Cell::new(keyword.category.label()),
            keyword
                .subcategory
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            if keyword.pregnancy_related {
                Cell::new("yes")
            } else {
                dim_cell("-")
            },
        ]);
    }
    println!("{table}");
    println!("Keywords: {}", keywords.len());
}

pub fn print_statistics(stats: &Statistics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: [(&str, String); 9] = [
        ("Reports", stats.total_reports.to_string()),
        ("Alerts", stats.total_alerts.to_string()),
        ("High priority", stats.high_priority_alerts.to_string()),
        ("Medium priority", stats.medium_priority_alerts.to_string()),
        ("Female patients", stats.female_patients.to_string()),
        ("Male patients", stats.male_patients.to_string()),
        ("Unknown sex", stats.unknown_gender_patients.to_string()),
        ("Avg time (ms)", format!("{:.1}", stats.avg_processing_time)),
        ("Alerts per report", format!("{:.2}", stats.alerts_per_report)),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{table}");

    if stats.recent_activity.is_empty() {
        return;
    }
    let mut recent = Table::new();
    recent.set_header(vec![
        header_cell("Id"),
        header_cell("Sex"),
        header_cell("Age"),
        header_cell("Mismatches"),
        header_cell("Time (ms)"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut recent);
    for column in [0, 2, 3, 4] {
        align_column(&mut recent, column, CellAlignment::Right);
    }
    for activity in &stats.recent_activity {
        recent.add_row(vec![
            Cell::new(activity.id),
            Cell::new(activity.patient_sex.label()),
            Cell::new(activity.patient_age),
            count_cell(Some(activity.mismatches_count)),
            Cell::new(activity.processing_time),
            dim_cell(activity.created_at.format("%Y-%m-%d %H:%M:%S")),
        ]);
    }
    println!("{recent}");
}

fn mismatch_table(mismatches: &[Mismatch]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Keyword"),
        header_cell("Category"),
        header_cell("Priority"),
        header_cell("Context"),
    ]);
    apply_table_style(&mut table);
    for mismatch in mismatches {
        table.add_row(vec![
            Cell::new(&mismatch.keyword).add_attribute(Attribute::Bold),
            Cell::new(mismatch.category.label()),
            priority_cell(mismatch.priority),
            dim_cell(&mismatch.context),
        ]);
    }
    table
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

fn priority_cell(priority: Priority) -> Cell {
    match priority {
        Priority::None => dim_cell(priority.label()),
        _ => Cell::new(priority.label())
            .fg(priority_color(priority))
            .add_attribute(Attribute::Bold),
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Blue,
        Priority::None => Color::DarkGrey,
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
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
