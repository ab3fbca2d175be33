use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::models::{NewRecord, Record, RecordId, RecordUpdate};

// Each operation runs inside `Ledger::commit`, so a failed save leaves the
// in-memory ledger exactly as it was before the call.

fn not_found(id: RecordId) -> LedgerError {
    LedgerError::NotFound(format!("id {id}"))
}

/// Append a new record and persist the ledger.
pub fn create(ledger: &mut Ledger, fields: NewRecord) -> Result<Record> {
    let id = ledger.allocate_id();
    let record = Record::new(id, fields);
    let stored = record.clone();
    ledger.commit(move |records| {
        records.push(stored);
        Ok(())
    })?;
    tracing::info!(%id, item = %record.item_name, "created record");
    Ok(record)
}

/// Overwrite the mutable fields of a record, re-derive grade and profit,
/// and persist.
pub fn update(ledger: &mut Ledger, id: RecordId, fields: RecordUpdate) -> Result<Record> {
    let record = ledger.commit(|records| {
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        record.apply(fields);
        Ok(record.clone())
    })?;
    tracing::info!(%id, profit = ?record.profit, "updated record");
    Ok(record)
}

/// Remove a record and persist. Records after it move up one position.
pub fn delete(ledger: &mut Ledger, id: RecordId) -> Result<Record> {
    let removed = ledger.commit(|records| {
        let pos = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(records.remove(pos))
    })?;
    tracing::info!(%id, item = %removed.item_name, "deleted record");
    Ok(removed)
}
