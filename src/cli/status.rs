use crate::error::Result;
use crate::fmt::money;
use crate::ledger::Ledger;
use crate::query::total_profit;
use crate::settings::{resolve_ledger_path, Settings};

pub fn run(ledger_override: Option<&str>) -> Result<()> {
    let settings = Settings::load();
    let path = resolve_ledger_path(ledger_override);

    println!("Ledger:        {}", path.display());
    println!("Exchange rate: {}", settings.exchange_rate);

    if !path.exists() {
        println!();
        println!("Ledger file not found. It will be created on the first `skinledger add`.");
        return Ok(());
    }

    let ledger = Ledger::open(&path)?;
    let records = ledger.records();
    let sold = records.iter().filter(|r| r.profit.is_some()).count();
    let profitable = records.iter().filter(|r| r.profit.is_some_and(|p| p > 0.0)).count();

    println!();
    println!("Records:       {}", records.len());
    println!("Closed sales:  {sold}");
    println!("Profitable:    {profitable}");
    println!("Open:          {}", records.len() - sold);
    println!("Total profit:  {}", money(total_profit(records)));
    Ok(())
}
