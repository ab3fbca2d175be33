use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calc::DEFAULT_EXCHANGE_RATE;
use crate::error::{LedgerError, Result};

const SETTINGS_FILE: &str = "settings.json";

/// User configuration, stored as JSON. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ledger_path: String,
    pub exchange_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        let ledger = home().join("Documents").join("skinledger").join("cs_log.csv");
        Self {
            ledger_path: ledger.to_string_lossy().into_owned(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
        }
    }
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn settings_file() -> PathBuf {
    home().join(".config").join("skinledger").join(SETTINGS_FILE)
}

impl Settings {
    /// Settings from the user's config directory.
    pub fn load() -> Self {
        Self::load_from(&settings_file())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&settings_file())
    }

    /// Never fails: an absent or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings");
                return Self::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| LedgerError::Settings(e.to_string()))?;
        json.push('\n');
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }
}

/// Ledger to operate on: an explicit `--ledger` wins over settings.
pub fn resolve_ledger_path(cli_override: Option<&str>) -> PathBuf {
    cli_override
        .map(expand_home)
        .unwrap_or_else(|| PathBuf::from(Settings::load().ledger_path))
}

/// Expand a leading `~` or `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => home(),
        Some(rest) if rest.starts_with('/') => home().join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}
