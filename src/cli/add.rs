use crate::cli::{check_price, check_wear, parse_date_opt};
use crate::error::Result;
use crate::fmt::{opt_money, wear};
use crate::ledger::Ledger;
use crate::models::NewRecord;
use crate::service;
use crate::settings::resolve_ledger_path;

pub struct AddArgs {
    pub item: String,
    pub platform: Option<String>,
    pub wear: Option<f64>,
    pub buy_price: Option<f64>,
    pub buy_date: Option<String>,
    pub sell_price: Option<f64>,
    pub sell_platform: Option<String>,
    pub sell_date: Option<String>,
    pub actual_price: Option<f64>,
}

pub fn run(ledger_override: Option<&str>, args: AddArgs) -> Result<()> {
    let buy_date = match parse_date_opt(&args.buy_date)? {
        Some(d) => Some(d),
        None => Some(chrono::Local::now().date_naive()),
    };
    let fields = NewRecord {
        item_name: args.item,
        buy_platform: args.platform.filter(|p| !p.is_empty()),
        wear: check_wear(args.wear)?,
        buy_price: check_price("Buy price", args.buy_price)?,
        buy_date,
        sell_price: check_price("Sell price", args.sell_price)?,
        sell_platform: args.sell_platform.filter(|p| !p.is_empty()),
        sell_date: parse_date_opt(&args.sell_date)?,
        actual_price: check_price("Actual price", args.actual_price)?,
    };

    let mut ledger = Ledger::open(&resolve_ledger_path(ledger_override))?;
    let record = service::create(&mut ledger, fields)?;
    println!(
        "Added [{}] {} | wear: {} | profit: {}",
        ledger.len() - 1,
        record.item_name,
        wear(record.wear, record.wear_grade),
        opt_money(record.profit)
    );
    Ok(())
}
