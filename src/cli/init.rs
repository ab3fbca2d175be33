use crate::error::{LedgerError, Result};
use crate::settings::{expand_home, Settings};

pub fn run(ledger: Option<&str>, rate: Option<f64>) -> Result<()> {
    let mut settings = Settings::load();
    if let Some(path) = ledger {
        settings.ledger_path = expand_home(path).to_string_lossy().into_owned();
    }
    if let Some(r) = rate {
        if r <= 0.0 || r.is_nan() {
            return Err(LedgerError::Settings(format!("Exchange rate must be positive, got {r}")));
        }
        settings.exchange_rate = r;
    }
    settings.save()?;

    let resolved = std::path::Path::new(&settings.ledger_path);
    if let Some(parent) = resolved.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    println!("Ledger:        {}", resolved.display());
    println!("Exchange rate: {}", settings.exchange_rate);
    Ok(())
}
