use comfy_table::{
    presets::UTF8_FULL, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
};
use flowfolio_core::format::format_currency_in;
use flowfolio_core::models::allocation::Allocation;
use flowfolio_core::models::label::NodeLabel;
use flowfolio_core::PortfolioPlanner;

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn allocation_table(allocations: &[Allocation], currency: &str) -> Table {
    let mut table = new_table(&["Type", "Subsection", "%", "Amount", "Id"]);
    for a in allocations {
        let color = Color::Rgb {
            r: a.color.r,
            g: a.color.g,
            b: a.color.b,
        };
        table.add_row(vec![
            Cell::new(&a.sector_type).add_attribute(Attribute::Bold),
            Cell::new(&a.name).fg(color),
            Cell::new(format!("{}%", a.percentage)).set_alignment(CellAlignment::Right),
            Cell::new(format_currency_in(a.amount(), currency)).set_alignment(CellAlignment::Right),
            Cell::new(a.id.to_string()),
        ]);
    }
    table
}

pub fn print_allocations(planner: &PortfolioPlanner) {
    let currency = planner.get_settings().currency.as_str();

    println!(
        "Total investment: {}",
        format_currency_in(planner.get_total_investment(), currency)
    );
    if planner.get_allocations().is_empty() {
        println!("No sectors added yet.");
    } else {
        println!("{}", allocation_table(planner.get_allocations(), currency));
    }
    println!(
        "Allocated: {}% ({})   Remaining: {}%",
        planner.get_total_percentage(),
        format_currency_in(planner.get_total_allocation(), currency),
        planner.get_remaining_percentage(),
    );

    if planner.get_total_borrow() > 0.0 {
        println!();
        println!(
            "Total borrow: {} (capacity {})",
            format_currency_in(planner.get_total_borrow(), currency),
            format_currency_in(planner.get_borrow_capacity(), currency),
        );
        if planner.get_borrow_allocations().is_empty() {
            println!("No borrow allocations added yet.");
        } else {
            println!("{}", allocation_table(planner.get_borrow_allocations(), currency));
        }
        println!(
            "Borrow allocated: {:.1}%   Remaining: {:.1}%",
            planner.get_total_borrow_percentage(),
            planner.get_remaining_borrow_percentage(),
        );
    }
}

pub fn print_labels(labels: &[NodeLabel]) {
    if labels.is_empty() {
        println!("Add sectors to see your portfolio visualization");
        return;
    }
    let mut table = new_table(&["Node", "Label", "Value"]);
    for label in labels {
        table.add_row(vec![
            Cell::new(&label.node_id),
            Cell::new(&label.title),
            Cell::new(&label.detail).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}
