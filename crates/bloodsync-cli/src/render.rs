//! Table rendering for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bloodsync_match::{EligibleDonor, MatchResult, OpenRequest};
use bloodsync_model::{BloodGroup, Donation};
use bloodsync_report::{InventoryOverview, Statistics, StockLevel};

pub fn print_statistics(stats: &Statistics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Donors"), Cell::new(stats.total_donors)]);
    table.add_row(vec![
        Cell::new("Available donors"),
        Cell::new(stats.available_donors),
    ]);
    table.add_row(vec![
        Cell::new("Requestors"),
        Cell::new(stats.total_requestors),
    ]);
    table.add_row(vec![Cell::new("Requests"), Cell::new(stats.total_requests)]);
    table.add_row(vec![
        Cell::new("Active requests"),
        Cell::new(stats.active_requests),
    ]);
    table.add_row(vec![
        Cell::new("Fulfilled requests"),
        Cell::new(stats.fulfilled_requests),
    ]);
    table.add_row(vec![
        Cell::new("Donations"),
        Cell::new(stats.total_donations),
    ]);
    table.add_row(vec![
        Cell::new("Inventory units"),
        Cell::new(stats.total_inventory_units)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Critical groups"),
        group_list_cell(&stats.critical_groups, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Low groups"),
        group_list_cell(&stats.low_groups, Color::Yellow),
    ]);
    println!("{table}");
}

pub fn print_inventory(rows: &[InventoryOverview]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Units"),
        header_cell("Donors"),
        header_cell("Level"),
        header_cell("Can donate to"),
        header_cell("Can receive from"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.group).add_attribute(Attribute::Bold),
            Cell::new(row.units),
            Cell::new(row.donor_count),
            level_cell(row.level),
            Cell::new(join_groups(row.can_donate_to)),
            Cell::new(join_groups(row.can_receive_from)),
        ]);
    }
    println!("{table}");
}

pub fn print_match_result(result: &MatchResult) {
    println!(
        "Inventory: {} units on hand, {} still needed, {} compatible donor(s){}",
        result.inventory_units,
        result.remaining_units,
        result.total_compatible,
        if result.fulfillable {
            ""
        } else {
            " - may not be fulfillable"
        }
    );
    if result.candidates.is_empty() {
        println!("No matching donors.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Donor"),
        header_cell("Name"),
        header_cell("Group"),
        header_cell("City"),
        header_cell("Score"),
        header_cell("Eligible now"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for candidate in &result.candidates {
        table.add_row(vec![
            Cell::new(&candidate.donor.id),
            Cell::new(&candidate.donor.name),
            Cell::new(candidate.donor.blood_group),
            Cell::new(&candidate.donor.city),
            Cell::new(candidate.score).add_attribute(Attribute::Bold),
            yes_no_cell(candidate.can_donate_now),
        ]);
    }
    println!("{table}");
}

pub fn print_open_requests(rows: &[OpenRequest]) {
    if rows.is_empty() {
        println!("No open requests.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Request"),
        header_cell("Group"),
        header_cell("Urgency"),
        header_cell("Remaining"),
        header_cell("Hospital"),
        header_cell("City"),
        header_cell("Needed by"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.request.id),
            Cell::new(row.request.blood_group),
            urgency_cell(&row.request),
            Cell::new(row.remaining_units),
            Cell::new(&row.request.hospital_name),
            Cell::new(&row.request.city),
            Cell::new(row.request.required_date),
        ]);
    }
    println!("{table}");
}

pub fn print_eligible_donors(rows: &[EligibleDonor]) {
    if rows.is_empty() {
        println!("No eligible donors for the remaining units.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Donor"),
        header_cell("Name"),
        header_cell("City"),
        header_cell("Donations"),
        header_cell("Eligible now"),
        header_cell("Assigned"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.donor.id),
            Cell::new(&row.donor.name),
            Cell::new(&row.donor.city),
            Cell::new(row.donor.total_donations),
            yes_no_cell(row.can_donate_now),
            yes_no_cell(row.already_assigned),
        ]);
    }
    println!("{table}");
}

pub fn print_recent_donations(donations: &[Donation]) {
    if donations.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("When"),
        header_cell("Donor"),
        header_cell("Group"),
        header_cell("Units"),
        header_cell("For request"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for donation in donations {
        table.add_row(vec![
            Cell::new(donation.donated_at),
            Cell::new(&donation.donor_name),
            Cell::new(donation.blood_group),
            Cell::new(donation.units),
            match &donation.request_id {
                Some(id) => Cell::new(id),
                None => dim_cell("-"),
            },
        ]);
    }
    println!();
    println!("Recent donations:");
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).add_attribute(Attribute::Dim)
}

fn yes_no_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn level_cell(level: StockLevel) -> Cell {
    match level {
        StockLevel::Critical => Cell::new("critical")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        StockLevel::Low => Cell::new("low").fg(Color::Yellow),
        StockLevel::Adequate => Cell::new("adequate").fg(Color::Green),
    }
}

fn urgency_cell(request: &bloodsync_model::BloodRequest) -> Cell {
    use bloodsync_model::Urgency;
    match request.urgency {
        Urgency::Critical => Cell::new("critical")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Urgency::High => Cell::new("high").fg(Color::Yellow),
        Urgency::Normal => Cell::new("normal"),
    }
}

fn group_list_cell(groups: &[BloodGroup], color: Color) -> Cell {
    if groups.is_empty() {
        dim_cell("none")
    } else {
        Cell::new(join_groups(groups)).fg(color)
    }
}

fn join_groups(groups: &[BloodGroup]) -> String {
    groups
        .iter()
        .map(BloodGroup::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_table_style(table: &mut Table) {
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
