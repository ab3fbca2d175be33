pub mod add;
pub mod calc;
pub mod delete;
pub mod edit;
pub mod import;
pub mod init;
pub mod list;
pub mod status;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::error::{LedgerError, Result};

pub(crate) fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Other(format!("Invalid date '{raw}' (expected YYYY-MM-DD)")))
}

pub(crate) fn parse_date_opt(raw: &Option<String>) -> Result<Option<NaiveDate>> {
    raw.as_deref().map(parse_date_arg).transpose()
}

pub(crate) fn check_wear(wear: Option<f64>) -> Result<Option<f64>> {
    match wear {
        Some(w) if !(0.0..=1.0).contains(&w) => Err(LedgerError::Other(format!(
            "Wear must be between 0 and 1, got {w}"
        ))),
        _ => Ok(wear),
    }
}

pub(crate) fn check_price(name: &str, price: Option<f64>) -> Result<Option<f64>> {
    match price {
        Some(p) if p < 0.0 || p.is_nan() => Err(LedgerError::Other(format!(
            "{name} cannot be negative, got {p}"
        ))),
        _ => Ok(price),
    }
}

#[derive(Parser)]
#[command(name = "skinledger", about = "Purchase and sale ledger for CS skins.")]
pub struct Cli {
    /// Ledger CSV to use instead of the configured one
    #[arg(long, global = true)]
    pub ledger: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose the ledger file and exchange rate.
    Init {
        /// Exchange rate (¥ per $) used by the calculators
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Record a purchase (and optionally its sale).
    Add {
        /// Item name, e.g. 'AK-47 | Redline'
        item: String,
        /// Platform the item was bought on
        #[arg(long)]
        platform: Option<String>,
        /// Wear value between 0 and 1
        #[arg(long)]
        wear: Option<f64>,
        #[arg(long = "buy-price")]
        buy_price: Option<f64>,
        /// Purchase date: YYYY-MM-DD (default: today)
        #[arg(long = "buy-date")]
        buy_date: Option<String>,
        #[arg(long = "sell-price")]
        sell_price: Option<f64>,
        #[arg(long = "sell-platform")]
        sell_platform: Option<String>,
        /// Sale date: YYYY-MM-DD
        #[arg(long = "sell-date")]
        sell_date: Option<String>,
        /// Amount actually received
        #[arg(long = "actual-price")]
        actual_price: Option<f64>,
    },
    /// Change the wear, prices, or sale details of a record.
    Edit {
        /// Record index (shown in `skinledger list`)
        index: usize,
        #[arg(long)]
        wear: Option<f64>,
        #[arg(long = "buy-price")]
        buy_price: Option<f64>,
        #[arg(long = "sell-price")]
        sell_price: Option<f64>,
        #[arg(long = "sell-platform")]
        sell_platform: Option<String>,
        /// Sale date: YYYY-MM-DD
        #[arg(long = "sell-date", conflicts_with = "clear_sell_date")]
        sell_date: Option<String>,
        /// Remove the sale date
        #[arg(long = "clear-sell-date")]
        clear_sell_date: bool,
        #[arg(long = "actual-price")]
        actual_price: Option<f64>,
    },
    /// Delete a record by index.
    Delete {
        /// Record index (shown in `skinledger list`)
        index: usize,
    },
    /// Show records.
    List {
        /// Filter by item name or purchase platform
        #[arg(long)]
        search: Option<String>,
        /// Order: default, profit-desc, profit-asc
        #[arg(long, default_value = "default")]
        sort: String,
    },
    /// Replace the ledger with a CSV or XLSX file.
    Import {
        /// Path to CSV or XLSX file
        file: String,
        /// File format (default: from extension)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the ledger location and summary figures.
    Status,
    /// Pricing calculators.
    Calc {
        #[command(subcommand)]
        command: CalcCommands,
    },
}

#[derive(Subcommand)]
pub enum CalcCommands {
    /// Domestic cost of a CSFloat purchase.
    FloatToCny {
        /// CSFloat price in $
        price: f64,
        /// Exchange rate (default: configured rate)
        #[arg(long)]
        rate: Option<f64>,
    },
    /// CSFloat price matching a BUFF/YouPin total.
    CnyToFloat {
        /// Domestic total in ¥
        total: f64,
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Profit on a batch bought at pickup price and sold at market price.
    Profit {
        #[arg(long)]
        market: f64,
        #[arg(long)]
        pickup: f64,
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Evaluate an arithmetic expression, e.g. '120 + 30 * 0.95'.
    Eval {
        expr: String,
    },
}
