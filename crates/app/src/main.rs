//! Coupons Application CLI

use std::process;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if let Err(error) = cli::Cli::parse().run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
