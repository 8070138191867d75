use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "petlovers",
    about = "Consumption rankings and breakdowns for the PetLovers pet store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Snapshot file (JSON with clients, pets, products, services, consumos)
    #[arg(long, global = true, env = "PETLOVERS_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Output format: table (default), json
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Only count consumptions on or after this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub from: Option<NaiveDate>,

    /// Only count consumptions on or before this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub to: Option<NaiveDate>,

    /// Currency code (ISO 4217) for money display, e.g. BRL, USD
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Suppress status output (for scripting)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Every ranking and both breakdowns (default)
    Report,
    /// Top clients
    Clients {
        /// Rank by item count or by money spent
        #[arg(long, default_value = "quantity")]
        by: ClientMetric,
        /// Number of rows (default: 10 by quantity, 5 by value)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Most consumed products
    Products {
        #[arg(long, default_value_t = petlovers::rank::PRODUCTS_LIMIT)]
        limit: usize,
    },
    /// Most consumed services
    Services {
        #[arg(long, default_value_t = petlovers::rank::SERVICES_LIMIT)]
        limit: usize,
    },
    /// Consumption per pet type and breed
    Breakdown {
        /// Catalog to name codes from
        catalog: Catalog,
    },
    /// Consumption history and pets of one client
    History {
        /// Client CPF
        cpf: String,
    },
    /// Re-render the report whenever the snapshot file changes
    Watch {
        /// Minimum seconds between refreshes (debounce)
        #[arg(long, default_value = "2")]
        interval: u64,
    },
    /// Show a bar chart of a ranking
    Plot {
        /// Ranking to chart
        #[arg(default_value = "clients")]
        ranking: PlotRanking,
        /// Number of bars (default: the ranking's own limit)
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum ClientMetric {
    Quantity,
    Value,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum Catalog {
    Products,
    Services,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum PlotRanking {
    /// Clients by item count
    Clients,
    /// Clients by money spent
    Value,
    Products,
    Services,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    pub fn effective_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Report)
    }
}
