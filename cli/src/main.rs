use clap::Parser;
use nutriscan_core::{application::create_service, domain::common::NutriScanConfig};

use crate::application::{
    logger::init_logger,
    shell::{run_analyze, run_shell},
};
use crate::args::{Args, Command};

mod application;
mod args;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_logger(&args.log);

    let command = args.command.clone().unwrap_or(Command::Shell);
    let config = NutriScanConfig::from(args);
    let service = create_service(&config)?;

    match command {
        Command::Analyze { image, json } => run_analyze(&service, &image, json).await,
        Command::Shell => run_shell(&service).await,
    }
}
