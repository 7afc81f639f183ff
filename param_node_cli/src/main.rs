//! `paramtree` entry point: parse flags, run the command, print its output.

use std::io::Write;

use clap::Parser;
use param_node_cli::CommandLine;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = CommandLine::parse();
    let output = param_node_cli::run(&cli).map_err(color_eyre::eyre::Report::from)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
