use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use yelp_core::storage::config::Config;

mod cli;

use cli::dispatcher::Dispatcher;
use cli::main_types::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(config_dir) = &cli.config_dir {
        log::debug!("Using config directory: {}", config_dir);
    }
    if cli.client_id.as_ref().is_some_and(|id| !id.is_empty()) {
        log::debug!("Using client id provided via env or command line");
    }

    let dispatcher = Dispatcher::new(config, config_path, cli.client_id, cli.client_secret)
        .interactive(std::io::stdin().is_terminal());

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        log::debug!("Command failed ({} severity)", e.severity().label());
        eprintln!("Error: {}", e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
