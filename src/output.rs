use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use petlovers::history::HistoryEntry;
use petlovers::rank::{
    CLIENTS_BY_QUANTITY_LIMIT, CLIENTS_BY_VALUE_LIMIT, PRODUCTS_LIMIT, SERVICES_LIMIT,
};
use petlovers::types::{ClientQuantityRow, ClientValueRow, CodeRow, Pet};
use petlovers::{Breakdown, Snapshot};

use crate::currency::Currency;

/// Everything the default command shows, in display order.
#[derive(Debug, Serialize)]
pub struct Report {
    pub clients_by_quantity: Vec<ClientQuantityRow>,
    pub clients_by_value: Vec<ClientValueRow>,
    pub products: Vec<CodeRow>,
    pub services: Vec<CodeRow>,
    pub products_by_pet_type_and_breed: Breakdown,
    pub services_by_pet_type_and_breed: Breakdown,
}

impl Report {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            clients_by_quantity: snapshot.rank_clients_by_quantity(CLIENTS_BY_QUANTITY_LIMIT),
            clients_by_value: snapshot.rank_clients_by_value(CLIENTS_BY_VALUE_LIMIT),
            products: snapshot.rank_products(PRODUCTS_LIMIT),
            services: snapshot.rank_services(SERVICES_LIMIT),
            products_by_pet_type_and_breed: snapshot.products_by_pet_type_and_breed(),
            services_by_pet_type_and_breed: snapshot.services_by_pet_type_and_breed(),
        }
    }
}

fn new_table<'a>(headers: impl IntoIterator<Item = &'a str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.into_iter().map(Cell::new));
    table
}

fn right(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

fn print_titled(title: &str, table: Option<Table>) {
    println!("{title}");
    match table {
        Some(table) => println!("{table}"),
        None => println!("  (none)"),
    }
}

pub fn print_clients_by_quantity(rows: &[ClientQuantityRow]) {
    print_titled("Top clients by items consumed", clients_by_quantity_table(rows));
}

fn clients_by_quantity_table(rows: &[ClientQuantityRow]) -> Option<Table> {
    if rows.is_empty() {
        return None;
    }
    let mut table = new_table(["#", "Client", "CPF", "Items"]);
    for (i, r) in rows.iter().enumerate() {
        table.add_row(vec![
            right(i + 1),
            Cell::new(&r.name),
            Cell::new(&r.cpf),
            right(r.total),
        ]);
    }
    Some(table)
}

pub fn print_clients_by_value(rows: &[ClientValueRow], currency: &Currency) {
    let title = format!("Top clients by value ({})", currency.code);
    print_titled(&title, clients_by_value_table(rows, currency));
}

fn clients_by_value_table(rows: &[ClientValueRow], currency: &Currency) -> Option<Table> {
    if rows.is_empty() {
        return None;
    }
    let mut table = new_table(["#", "Client", "CPF", "Value"]);
    for (i, r) in rows.iter().enumerate() {
        table.add_row(vec![
            right(i + 1),
            Cell::new(&r.name),
            Cell::new(&r.cpf),
            right(currency.format(r.value)),
        ]);
    }
    Some(table)
}

pub fn print_codes(title: &str, rows: &[CodeRow]) {
    print_titled(title, codes_table(rows));
}

fn codes_table(rows: &[CodeRow]) -> Option<Table> {
    if rows.is_empty() {
        return None;
    }
    let mut table = new_table(["#", "Code", "Name", "Quantity"]);
    for (i, r) in rows.iter().enumerate() {
        table.add_row(vec![
            right(i + 1),
            Cell::new(&r.code),
            Cell::new(&r.name),
            right(r.total),
        ]);
    }
    Some(table)
}

pub fn print_breakdown(title: &str, breakdown: &Breakdown) {
    print_titled(title, breakdown_table(breakdown));
}

fn breakdown_table(breakdown: &Breakdown) -> Option<Table> {
    if breakdown.is_empty() {
        return None;
    }
    let mut table = new_table(["Type", "Breed", "Code", "Name", "Quantity"]);
    for kind in &breakdown.kinds {
        for (bi, breed) in kind.breeds.iter().enumerate() {
            for (ri, r) in breed.rows.iter().enumerate() {
                // Type and breed only on the first row of their group
                let kind_cell = if bi == 0 && ri == 0 {
                    kind.kind.as_str()
                } else {
                    ""
                };
                let breed_cell = if ri == 0 { breed.breed.as_str() } else { "" };
                table.add_row(vec![
                    Cell::new(kind_cell),
                    Cell::new(breed_cell),
                    Cell::new(&r.code),
                    Cell::new(&r.name),
                    right(r.total),
                ]);
            }
        }
    }
    Some(table)
}

pub fn print_history(
    cpf: &str,
    client_name: Option<&str>,
    entries: &[HistoryEntry],
    pets: &[&Pet],
) {
    match client_name {
        Some(name) => println!("{name} (CPF {cpf})"),
        None => println!("Unknown client (CPF {cpf})"),
    }

    let pet_table = if pets.is_empty() {
        None
    } else {
        let mut table = new_table(["Id", "Pet", "Type", "Breed", "Gender"]);
        for p in pets {
            table.add_row(vec![
                right(p.id),
                Cell::new(&p.name),
                Cell::new(&p.kind),
                Cell::new(&p.breed),
                Cell::new(&p.gender),
            ]);
        }
        Some(table)
    };
    print_titled("Pets", pet_table);

    let history_table = if entries.is_empty() {
        None
    } else {
        let mut table = new_table(["Date", "Pet", "Items"]);
        for e in entries {
            let pet = match &e.pet {
                Some(p) => format!("{} ({})", p.name, p.kind),
                None => "pet not found".to_string(),
            };
            let items: Vec<String> = e
                .items
                .iter()
                .map(|i| format!("{} × {}", i.code, i.quantity))
                .collect();
            table.add_row(vec![
                Cell::new(&e.date),
                Cell::new(pet),
                Cell::new(items.join("\n")),
            ]);
        }
        Some(table)
    };
    print_titled("Consumption history", history_table);
}

pub fn print_report(report: &Report, currency: &Currency) {
    print_clients_by_quantity(&report.clients_by_quantity);
    println!();
    print_clients_by_value(&report.clients_by_value, currency);
    println!();
    print_codes("Most consumed products", &report.products);
    println!();
    print_codes("Most consumed services", &report.services);
    println!();
    print_breakdown(
        "Products by pet type and breed",
        &report.products_by_pet_type_and_breed,
    );
    println!();
    print_breakdown(
        "Services by pet type and breed",
        &report.services_by_pet_type_and_breed,
    );
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
