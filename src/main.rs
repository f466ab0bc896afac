use std::process::ExitCode;

use clap::Parser;
use tafla::cli::{self, parsers::CliParser};

fn main() -> ExitCode {
    cli::run(CliParser::parse())
}
