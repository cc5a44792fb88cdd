mod aggregate;
mod cli;
mod config;
mod download;
mod error;
mod export;
mod reading;
mod registry;
mod report;
mod template;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let capabilities = cli.capabilities();

    match cli.command {
        Commands::Info {} => command::info(&Config {
            capabilities,
            ..Config::default()
        }),
        Commands::Scripts { output_dir } => match command::scripts(output_dir) {
            Ok(dir) => println!("Scripts saved to `{}`", dir),
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Fetch(args) => match command::fetch(args, capabilities).await {
            Ok(Some(dir)) => println!("Files saved to `{}`", dir),
            Ok(None) => println!("Fetch skipped"),
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Summary(args) => match command::summary(args) {
            Ok(path) => println!("Statistics saved to `{}`", path),
            Err(e) => eprintln!("Error: {:#}", e),
        },
    }

    Ok(())
}
