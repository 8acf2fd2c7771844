use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const DATA_DIR_ENV: &str = "BAKEBOOK_DATA_DIR";
pub(crate) const EXPORT_DIR_ENV: &str = "BAKEBOOK_EXPORT_DIR";
pub(crate) const LOG_ENV: &str = "BAKEBOOK_LOG";

/// Where bakebook keeps its files.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) export_dir: PathBuf,
    /// Tracing filter directive, e.g. `info` or `bakebook=debug`.
    pub(crate) log_filter: String,
}

impl Config {
    /// Build from the environment, falling back to platform directories.
    pub(crate) fn from_env() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => directories::ProjectDirs::from("com", "bakebook", "Bakebook")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        let export_dir = match std::env::var_os(EXPORT_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => directories::UserDirs::new()
                .map(|d| d.home_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let log_filter = std::env::var(LOG_ENV).unwrap_or_else(|_| "info".into());
        Ok(Self::new(data_dir, export_dir, log_filter))
    }

    pub(crate) fn new(data_dir: PathBuf, export_dir: PathBuf, log_filter: String) -> Self {
        Self {
            data_dir,
            export_dir,
            log_filter,
        }
    }

    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("bakebook.db")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("bakebook.log")
    }

    /// Expand a leading `~/` and resolve bare file names into the export dir.
    pub(crate) fn export_path(&self, requested: Option<&str>, default_name: &str) -> PathBuf {
        match requested {
            Some(path) => {
                let expanded = PathBuf::from(shellexpand(path));
                if expanded.components().count() == 1 && !path.starts_with('.') {
                    self.export_dir.join(expanded)
                } else {
                    expanded
                }
            }
            None => self.export_dir.join(default_name),
        }
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
