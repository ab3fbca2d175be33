use crate::error::Result;
use crate::ledger::Ledger;
use crate::service;
use crate::settings::resolve_ledger_path;

pub fn run(ledger_override: Option<&str>, index: usize) -> Result<()> {
    let mut ledger = Ledger::open(&resolve_ledger_path(ledger_override))?;
    let id = ledger.resolve(index)?;
    let removed = service::delete(&mut ledger, id)?;
    println!("Deleted [{index}] {}", removed.item_name);
    Ok(())
}
