//! Debug log sink for the binary.
//!
//! The library only talks to the [`log`] facade. Whoever hosts it calls
//! [`init`] once at start up, which routes every record into
//! `<logging_dir>/debug.log`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;

use log::LevelFilter;

use crate::config::Config;

pub const LOG_FILE_NAME: &str = "debug.log";

pub fn init(config: &Config) -> io::Result<PathBuf> {
    //! Open (or create) the debug log and install the logger at debug
    //! level. `RUST_LOG` still wins when it is set.
    //!
    //! Returns the path of the log file.

    fs::create_dir_all(&config.logging_dir)?;
    let path = config.logging_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)?;

    Ok(path)
}
