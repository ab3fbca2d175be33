use std::path::PathBuf;

use crate::error::Result;
use crate::ledger::{Ledger, UploadFormat};
use crate::settings::resolve_ledger_path;

pub fn run(ledger_override: Option<&str>, file: &str, format: Option<&str>) -> Result<()> {
    let file_path = PathBuf::from(file);
    let format = match format {
        Some(key) => UploadFormat::from_key(key)?,
        None => UploadFormat::from_path(&file_path)?,
    };
    let bytes = std::fs::read(&file_path)?;

    let mut ledger = Ledger::open(&resolve_ledger_path(ledger_override))?;
    let replaced = ledger.len();
    let count = ledger.load_from_upload(&bytes, format)?;
    println!(
        "Loaded {count} records from {} into {} (replaced {replaced})",
        file_path.display(),
        ledger.path().display()
    );
    Ok(())
}
