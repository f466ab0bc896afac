use std::process::ExitCode;

use log::{error, info};

use crate::{
    cli::{
        messages::{highlight_argument, system_message},
        parsers::{CliCommand, CliParser},
    },
    config::Config,
    logging,
};

mod colors;
mod commands;
mod messages;
pub mod parsers;

pub fn run(args: CliParser) -> ExitCode {
    //! Resolve the configuration, start logging and run the command.

    let mut config = Config::from_env();
    if let Some(data_dir) = &args.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if let Some(logging_dir) = &args.logging_dir {
        config = config.with_logging_dir(logging_dir);
    }

    match logging::init(&config) {
        Ok(path) => info!("logging to {}", path.display()),
        Err(e) => eprintln!(
            "{}",
            system_message(
                "system",
                format!("logging disabled: {}", highlight_argument(&e.to_string()))
            )
        ),
    }

    let command: CliCommand = args.command;
    match commands::execute(command, &config, &args.delimiter) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("{}", message);
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
