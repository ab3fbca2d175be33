use crate::cli::{check_price, check_wear, parse_date_opt};
use crate::error::{LedgerError, Result};
use crate::fmt::{opt_money, wear};
use crate::ledger::Ledger;
use crate::models::RecordUpdate;
use crate::service;
use crate::settings::resolve_ledger_path;

/// Changes requested on the command line; `None` keeps the current value.
pub struct EditArgs {
    pub wear: Option<f64>,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub sell_platform: Option<String>,
    pub sell_date: Option<String>,
    pub clear_sell_date: bool,
    pub actual_price: Option<f64>,
}

pub fn run(ledger_override: Option<&str>, index: usize, args: EditArgs) -> Result<()> {
    let mut ledger = Ledger::open(&resolve_ledger_path(ledger_override))?;
    let id = ledger.resolve(index)?;
    let current = ledger
        .get(id)
        .ok_or_else(|| LedgerError::NotFound(format!("index {index}")))?;

    let mut fields = RecordUpdate::from_record(current);
    if let Some(w) = check_wear(args.wear)? {
        fields.wear = Some(w);
    }
    if let Some(p) = check_price("Buy price", args.buy_price)? {
        fields.buy_price = Some(p);
    }
    if let Some(p) = check_price("Sell price", args.sell_price)? {
        fields.sell_price = Some(p);
    }
    if let Some(p) = args.sell_platform {
        fields.sell_platform = Some(p).filter(|p| !p.is_empty());
    }
    if args.clear_sell_date {
        fields.sell_date = None;
    } else if let Some(d) = parse_date_opt(&args.sell_date)? {
        fields.sell_date = Some(d);
    }
    if let Some(p) = check_price("Actual price", args.actual_price)? {
        fields.actual_price = Some(p);
    }

    let record = service::update(&mut ledger, id, fields)?;
    println!(
        "Updated [{index}] {} | wear: {} | profit: {}",
        record.item_name,
        wear(record.wear, record.wear_grade),
        opt_money(record.profit)
    );
    Ok(())
}
