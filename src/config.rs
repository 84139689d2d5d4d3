use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::OsError;

const LOG_FILE_VAR: &str = "RAWKEYS_LOG";
const LOG_LEVEL_VAR: &str = "RAWKEYS_LOG_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings read from the environment. Stdout and stderr belong to the
/// terminal, so logs only go to a file when one is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_file = lookup(LOG_FILE_VAR)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        let log_filter = lookup(LOG_LEVEL_VAR)
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Self {
            log_file,
            log_filter,
        }
    }

    pub fn init_logging(&self) -> Result<(), OsError> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| OsError::new("open", e))?;

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(&self.log_filter))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
        tracing::debug!(path = %path.display(), "logging to file");
        Ok(())
    }
}
