use clap::Parser;

use linkcraft::cli::Cli;
use linkcraft::config::{get_config, init_config};
use linkcraft::interfaces::cli::run_cli_command;
use linkcraft::system::logging::init_logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());
    let config = get_config();

    // Keep the guard alive so buffered log lines are flushed on exit
    let guard = match init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}", e.format_colored());
            None
        }
    };

    let result = run_cli_command(cli.command).await;
    drop(guard);

    if let Err(e) = result {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
