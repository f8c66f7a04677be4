use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lead_filter::ChoiceSet;
use lead_ingest::UploadReport;
use lead_model::{Lead, LeadStatus};

/// Failures listed inline; the rest are in the downloadable error report.
const INLINE_FAILURES: usize = 5;

pub fn print_upload_summary(report: &UploadReport) {
    println!("File: {} ({})", report.file_name, report.file_kind.as_str());
    println!("Attempt: {}", report.attempt_id);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Created"),
        header_cell("Updated"),
        header_cell("Failed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(report.total_rows).add_attribute(Attribute::Bold),
        count_cell(report.created, Color::Green),
        count_cell(report.updated, Color::Cyan),
        count_cell(report.failed(), Color::Red),
    ]);
    println!("{table}");

    print_mapping_table(report);

    if report.failures.is_empty() {
        return;
    }
    println!();
    println!("Failed rows:");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Row"), header_cell("Error")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for failure in report.failures.iter().take(INLINE_FAILURES) {
        table.add_row(vec![
            Cell::new(failure.row_number),
            Cell::new(&failure.message).fg(Color::Red),
        ]);
    }
    println!("{table}");
    if report.failed() > INLINE_FAILURES {
        println!("... and {} more.", report.failed() - INLINE_FAILURES);
    }
    println!("Run `leaddesk errors` to download the full error report.");
}

fn print_mapping_table(report: &UploadReport) {
    let mapping = &report.mapping;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Note"),
    ]);
    apply_table_style(&mut table);
    for assignment in &mapping.assignments {
        table.add_row(vec![
            Cell::new(&assignment.header),
            Cell::new(assignment.field.name()).fg(Color::Green),
            dim_cell("-"),
        ]);
    }
    for dropped in &mapping.dropped {
        table.add_row(vec![
            Cell::new(&dropped.header),
            Cell::new(dropped.field.name()).fg(Color::Yellow),
            Cell::new(format!("ignored, \"{}\" already provides it", dropped.kept_header))
                .fg(Color::Yellow),
        ]);
    }
    for header in &mapping.unmapped {
        table.add_row(vec![Cell::new(header), dim_cell("-"), dim_cell("not imported")]);
    }
    println!();
    println!("Columns:");
    println!("{table}");
}

pub fn print_lead_table(leads: &[Lead], offset: usize, total: usize) {
    if total == 0 {
        println!("No leads found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Email"),
        header_cell("Company"),
        header_cell("Job Title"),
        header_cell("Employees"),
        header_cell("Revenue"),
        header_cell("Status"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for lead in leads {
        table.add_row(vec![
            Cell::new(lead.id),
            Cell::new(lead.display_name()),
            Cell::new(&lead.professional_email),
            Cell::new(&lead.company_name),
            text_cell(&lead.job_title),
            text_cell(&lead.employees),
            text_cell(&lead.revenue),
            status_cell(lead.status),
            Cell::new(lead.created_at.format("%Y-%m-%d")),
        ]);
    }
    println!("{table}");
    let first = if leads.is_empty() { offset } else { offset + 1 };
    println!("Showing {first}-{} of {total} leads", offset + leads.len());
}

pub fn print_choice_sets(sets: &[ChoiceSet]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Filter"),
        header_cell("Any"),
        header_cell("Choices"),
    ]);
    apply_table_style(&mut table);
    for set in sets {
        let options = if set.options.is_empty() {
            dim_cell("(none yet)")
        } else {
            Cell::new(
                set.options
                    .iter()
                    .map(|option| option.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };
        table.add_row(vec![
            Cell::new(set.name).add_attribute(Attribute::Bold),
            dim_cell(set.any_label),
            options,
        ]);
    }
    println!("{table}");
}

fn status_cell(status: LeadStatus) -> Cell {
    let color = match status {
        LeadStatus::New => Color::Cyan,
        LeadStatus::Contacted => Color::Yellow,
        LeadStatus::Qualified => Color::Green,
        LeadStatus::Lost => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
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

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
