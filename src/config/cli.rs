use crate::domain::model::TxKind;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(name = "stock-ledger")]
#[command(about = "Inventory ledger with dues tracking and report aggregation")]
pub struct Cli {
    /// Path to the JSON data file (default: data.json)
    #[arg(long, global = true)]
    pub data_file: Option<String>,

    /// Optional TOML config file; explicit flags take precedence
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Number of entries in top-N rankings
    #[arg(long, global = true)]
    pub top: Option<usize>,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON, for running under a log collector
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dashboard totals plus the chart series behind them
    Summary,
    /// Add a product to the catalogue
    AddProduct {
        name: String,
        price: Decimal,
        stock: u32,
    },
    /// Register a seller
    AddSeller {
        name: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Record a sale; the unpaid remainder becomes the seller's due
    RecordSale {
        product_id: String,
        seller_id: String,
        quantity: u32,
        /// Amount paid up front
        #[arg(long, default_value = "0")]
        paid: Decimal,
        /// Sale date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Apply a payment against an outstanding sale
    RecordPayment {
        transaction_id: String,
        amount: Decimal,
        /// Payment date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List transactions, optionally filtered
    Transactions {
        #[arg(long)]
        seller: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value = "all")]
        kind: KindArg,
    },
    /// Export a report as CSV
    Export {
        /// Which view to render
        #[arg(long, value_enum, default_value = "transactions")]
        view: ExportView,
        #[arg(long)]
        seller: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value = "all")]
        kind: KindArg,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// Compare stored seller dues against transaction-derived dues
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    All,
    Sale,
    Payment,
}

/// Report rendered by `export`. The monthly view respects the transaction
/// filters, so `--view monthly --kind sale` gives the sales-only series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportView {
    Transactions,
    Monthly,
    Dues,
}

impl KindArg {
    pub fn to_kind(self) -> Option<TxKind> {
        match self {
            KindArg::All => None,
            KindArg::Sale => Some(TxKind::Sale),
            KindArg::Payment => Some(TxKind::Payment),
        }
    }
}
