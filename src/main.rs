mod cli;
mod config;
mod currency;
mod graph;
mod output;
mod watch;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Catalog, ClientMetric, Cli, Command, OutputFormat};
use currency::Currency;
use output::Report;
use petlovers::cost::{CatalogPrices, PriceTable};
use petlovers::history::pets_of_client;
use petlovers::index::Index;
use petlovers::rank::{CLIENTS_BY_QUANTITY_LIMIT, CLIENTS_BY_VALUE_LIMIT};
use petlovers::Snapshot;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("PETLOVERS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Load the snapshot and narrow it to the requested date range.
fn load(cli: &Cli, path: &Path) -> Result<Snapshot> {
    let snapshot = petlovers::load_snapshot(path)?;
    let snapshot = if cli.from.is_some() || cli.to.is_some() {
        snapshot.between(cli.from, cli.to)
    } else {
        snapshot
    };

    if !cli.quiet {
        eprintln!(
            "Loaded {} consumption records from {}.",
            snapshot.consumptions.len(),
            path.display()
        );
        let prices = CatalogPrices::new(&snapshot.products, &snapshot.services);
        let unpriced = prices.unpriced_codes(&snapshot.consumptions);
        if !unpriced.is_empty() {
            eprintln!("No product or service for: {}", unpriced.join(", "));
        }
    }

    Ok(snapshot)
}

fn render_report(snapshot: &Snapshot, format: OutputFormat, currency: &Currency) -> Result<()> {
    let report = Report::from_snapshot(snapshot);
    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_report(&report, currency);
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = config::load_config();
    let currency = cli
        .currency
        .as_deref()
        .or(config.currency.as_deref())
        .map(Currency::from_code)
        .unwrap_or_default();
    let path = config.snapshot_path(cli.snapshot.clone());
    let mode = cli.effective_command();

    if let Command::Watch { interval } = mode {
        return watch::run(&path, interval, &|| {
            let snapshot = load(&cli, &path)?;
            render_report(&snapshot, cli.format, &currency)
        });
    }

    let snapshot = load(&cli, &path)?;
    let json = cli.format == OutputFormat::Json;

    match mode {
        Command::Report => render_report(&snapshot, cli.format, &currency)?,
        Command::Clients {
            by: ClientMetric::Quantity,
            limit,
        } => {
            let rows =
                snapshot.rank_clients_by_quantity(limit.unwrap_or(CLIENTS_BY_QUANTITY_LIMIT));
            if json {
                output::print_json(&rows)?;
            } else {
                output::print_clients_by_quantity(&rows);
            }
        }
        Command::Clients {
            by: ClientMetric::Value,
            limit,
        } => {
            let rows = snapshot.rank_clients_by_value(limit.unwrap_or(CLIENTS_BY_VALUE_LIMIT));
            if json {
                output::print_json(&rows)?;
            } else {
                output::print_clients_by_value(&rows, &currency);
            }
        }
        Command::Products { limit } => {
            let rows = snapshot.rank_products(limit);
            if json {
                output::print_json(&rows)?;
            } else {
                output::print_codes("Most consumed products", &rows);
            }
        }
        Command::Services { limit } => {
            let rows = snapshot.rank_services(limit);
            if json {
                output::print_json(&rows)?;
            } else {
                output::print_codes("Most consumed services", &rows);
            }
        }
        Command::Breakdown { catalog } => {
            let (title, breakdown) = match catalog {
                Catalog::Products => (
                    "Products by pet type and breed",
                    snapshot.products_by_pet_type_and_breed(),
                ),
                Catalog::Services => (
                    "Services by pet type and breed",
                    snapshot.services_by_pet_type_and_breed(),
                ),
            };
            if json {
                output::print_json(&breakdown)?;
            } else {
                output::print_breakdown(title, &breakdown);
            }
        }
        Command::History { ref cpf } => {
            let entries = snapshot.client_history(cpf);
            let pets = pets_of_client(cpf, &snapshot.pets);
            if json {
                output::print_json(&serde_json::json!({
                    "cpf": cpf,
                    "pets": pets,
                    "history": entries,
                }))?;
            } else {
                let clients = Index::new(&snapshot.clients);
                output::print_history(cpf, clients.name_of(cpf), &entries, &pets);
            }
        }
        Command::Plot { ranking, limit } => {
            let limit = limit.unwrap_or_else(|| graph::default_limit(ranking));
            graph::render(&snapshot, ranking, limit, &currency)?;
        }
        Command::Watch { .. } => unreachable!(),
    }

    Ok(())
}
