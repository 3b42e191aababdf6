use clap::{Parser, Subcommand, ValueEnum};

use crate::app::ViewKind;

pub mod runner;

#[derive(Parser)]
#[command(name = "balear")]
#[command(
    version,
    about = "Balearic daily energy-balance scraper and dashboard views"
)]
#[command(
    long_about = "Fetch the Red Eléctrica daily balance table for the Balearic islands, accumulate a date range into one dataset, and render the dashboard views (records, totals, pivot) as tables, JSON or CSV."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one day's balance table
    Fetch {
        /// Date to fetch (YYYY-MM-DD)
        date: String,

        /// Write the records to a CSV file
        #[arg(long)]
        export: Option<String>,
    },

    /// Fetch a date range and show a dashboard view
    Range {
        /// First day of the range (YYYY-MM-DD)
        start: String,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        end: String,

        /// Only keep rows for this category (accent-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Derived view to render
        #[arg(long, value_enum, default_value = "records")]
        view: ViewArg,

        /// Write the (filtered) records to a CSV file
        #[arg(long)]
        export: Option<String>,
    },

    /// Parse a saved balance page instead of fetching it
    Parse {
        /// Path to the HTML document
        file: String,

        /// Date the document was published for (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Write the records to a CSV file
        #[arg(long)]
        export: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Records,
    DailyTotals,
    CategoryTotals,
    Pivot,
}

impl From<ViewArg> for ViewKind {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Records => ViewKind::Records,
            ViewArg::DailyTotals => ViewKind::DailyTotals,
            ViewArg::CategoryTotals => ViewKind::CategoryTotals,
            ViewArg::Pivot => ViewKind::Pivot,
        }
    }
}
