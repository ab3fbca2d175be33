use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{LedgerError, Result};
use crate::fmt::{date, money, opt_money, text, wear};
use crate::ledger::Ledger;
use crate::models::Record;
use crate::query::{search, sort, total_profit, SortMode};
use crate::settings::resolve_ledger_path;

// Gains in red, losses in green, open positions uncoloured.
fn profit_cell(record: &Record) -> Cell {
    match record.profit {
        Some(p) if p > 0.0 => Cell::new(money(p).red().to_string()),
        Some(p) if p < 0.0 => Cell::new(money(p).green().to_string()),
        other => Cell::new(opt_money(other)),
    }
}

pub fn run(ledger_override: Option<&str>, term: Option<&str>, sort_key: &str) -> Result<()> {
    let mode = SortMode::from_key(sort_key).ok_or_else(|| {
        LedgerError::Other(format!(
            "Unknown sort '{sort_key}' (expected default, profit-desc, or profit-asc)"
        ))
    })?;
    let ledger = Ledger::open(&resolve_ledger_path(ledger_override))?;
    if ledger.is_empty() {
        println!("No records yet.");
        return Ok(());
    }

    let shown = sort(search(ledger.records(), term.unwrap_or("")), mode);

    let mut table = Table::new();
    table.set_header(vec![
        "#", "Item", "Platform", "Wear", "Buy", "Bought", "Sell", "Sold on", "Sold", "Received",
        "Profit",
    ]);
    for record in &shown {
        let index = ledger
            .position(record.id)
            .map(|i| i.to_string())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(index),
            Cell::new(&record.item_name),
            Cell::new(text(record.buy_platform.as_deref())),
            Cell::new(wear(record.wear, record.wear_grade)),
            Cell::new(opt_money(record.buy_price)),
            Cell::new(date(record.buy_date)),
            Cell::new(opt_money(record.sell_price)),
            Cell::new(text(record.sell_platform.as_deref())),
            Cell::new(date(record.sell_date)),
            Cell::new(opt_money(record.actual_price)),
            profit_cell(record),
        ]);
    }
    println!("Records ({} of {})\n{table}", shown.len(), ledger.len());
    println!("Total profit: {}", money(total_profit(ledger.records())));
    Ok(())
}
