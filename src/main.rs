//! Atrium CLI entry point.

use clap::Parser;

use atrium::cli::{commands, handle_error, Cli, Commands};
use atrium::infrastructure::config::ConfigLoader;
use atrium::infrastructure::{logging, setup};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_ref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => handle_error(&err, cli.json),
    };

    if let Err(err) = logging::init(&config.logging) {
        handle_error(&err, cli.json);
    }

    let service = match setup::build_content_service(&config).await {
        Ok(service) => service,
        Err(err) => handle_error(&err, cli.json),
    };

    let result = match cli.command {
        Commands::Load(args) => commands::load::execute(&service, args, cli.json).await,
        Commands::Content(args) => commands::content::execute(&service, args, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
