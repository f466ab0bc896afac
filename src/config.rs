//! Process wide settings: where table files live and where the debug log
//! goes.
//!
//! Values come from the environment, with a `.env` file in the working
//! directory picked up through [`dotenvy`]. Command line flags may still
//! override them afterwards.

use std::path::{Path, PathBuf};

pub const DATA_DIR_VAR: &str = "TAFLA_DATA_DIR";
pub const LOGGING_DIR_VAR: &str = "TAFLA_LOGGING_DIR";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LOGGING_DIR: &str = "logs";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub logging_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            logging_dir: PathBuf::from(DEFAULT_LOGGING_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        //! Read the configuration from the environment and `.env`.

        Config::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Config {
            data_dir: lookup(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            logging_dir: lookup(LOGGING_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.logging_dir),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Config {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_logging_dir(mut self, logging_dir: impl AsRef<Path>) -> Config {
        self.logging_dir = logging_dir.as_ref().to_path_buf();
        self
    }
}
