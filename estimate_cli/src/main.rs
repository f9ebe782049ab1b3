//! # Tantya CLI Application
//!
//! Terminal front end for the material cost estimator: price a floor plan,
//! export the placeholder model, render a PDF report, and maintain catalog
//! files.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;

use cli::{CatalogCommands, Cli, Commands};

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level);

    let catalog_path = args.catalog.as_deref();

    match args.command {
        Commands::Estimate {
            budget,
            size,
            style,
            json,
        } => {
            let catalog = commands::load_active_catalog(catalog_path)?;
            commands::estimate(&catalog, &budget, &size, &style, json)?;
        }
        Commands::Model {
            size,
            style,
            output,
        } => {
            commands::model(&size, &style, output.as_deref())?;
        }
        Commands::Report {
            budget,
            size,
            style,
            output,
            prepared_for,
        } => {
            let catalog = commands::load_active_catalog(catalog_path)?;
            commands::report(&catalog, &budget, &size, &style, &output, &prepared_for)?;
        }
        Commands::Catalog { action } => match action {
            CatalogCommands::Show => {
                let catalog = commands::load_active_catalog(catalog_path)?;
                commands::catalog_show(&catalog)?;
            }
            CatalogCommands::Init { output } => commands::catalog_init(&output)?,
            CatalogCommands::SetPrice {
                style,
                material,
                price,
            } => commands::catalog_set_price(catalog_path, &style, &material, price)?,
        },
    }

    Ok(())
}
