//! General message formatting functions for prettifying the CLI.
//!
//! - Highlight Text (make the text tafla blue but not bold)
//! - System message formatting functions that produce the same
//! format messages.

use colored::Colorize;

use crate::cli::colors::TAFLA_BLUE;

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the tafla blue color to make it
    //! obvious.

    format!("{}", argument.color(TAFLA_BLUE))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Format a message for the command line, according to the command
    //! line theme.
    //!
    //! Takes in a source name (like 'system') and the message as a
    //! formatted text; output of [`format!`].

    let source_formatted = format!("{:6}", source_name.color(TAFLA_BLUE).bold());
    format!("[{}] {}", source_formatted, message)
}
