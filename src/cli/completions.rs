//! Shell completion generation
//!
//! Completions are static: subcommands and flags only.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// Print the completion script for `shell` to stdout
pub fn run(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}
