//! Keelson CLI - Convert Mermaid diagrams to and from graph JSON

mod cli;

use clap::Parser;

fn main() {
    // Logging is installed by `run` once the CLI flags are known
    let cli_args = cli::Cli::parse();

    let mut app = cli::KeelsonApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
