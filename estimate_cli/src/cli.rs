use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tantya", version, about = "Construction material cost estimates")]
pub struct Cli {
    /// Catalog file to price from (embedded reference catalog if omitted)
    #[arg(short, long, global = true, env = "TANTYA_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate material costs for a floor area and design style
    Estimate {
        /// Budget in pesos
        #[arg(short, long)]
        budget: String,

        /// Floor area in square meters
        #[arg(short, long)]
        size: String,

        /// Design style: Modern, Classic, or Rustic
        #[arg(long)]
        style: String,

        /// Print the estimate as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export the placeholder box model as Wavefront OBJ
    Model {
        /// Floor area in square meters
        #[arg(short, long)]
        size: String,

        /// Design style: Modern, Classic, or Rustic
        #[arg(long)]
        style: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an estimate as a PDF report
    Report {
        /// Budget in pesos
        #[arg(short, long)]
        budget: String,

        /// Floor area in square meters
        #[arg(short, long)]
        size: String,

        /// Design style: Modern, Classic, or Rustic
        #[arg(long)]
        style: String,

        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,

        /// Client or project name printed on the report
        #[arg(long, default_value = "Client")]
        prepared_for: String,
    },

    /// Catalog maintenance commands
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommands {
    /// Print the active catalog as JSON
    Show,

    /// Write the embedded reference catalog to a file
    Init {
        /// Destination path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Change one unit price in a catalog file
    SetPrice {
        /// Design style: Modern, Classic, or Rustic
        #[arg(long)]
        style: String,

        /// Material name (e.g. Cement)
        #[arg(short, long)]
        material: String,

        /// New unit price in pesos
        #[arg(short, long)]
        price: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_estimate() {
        let cli = Cli::try_parse_from([
            "tantya", "estimate", "--budget", "500000", "--size", "30", "--style", "Modern",
        ])
        .unwrap();
        assert!(cli.catalog.is_none());
        match cli.command {
            Commands::Estimate { budget, size, style, json } => {
                assert_eq!(budget, "500000");
                assert_eq!(size, "30");
                assert_eq!(style, "Modern");
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_catalog_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tantya", "catalog", "show", "--catalog", "/tmp/prices.json",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/prices.json")));
        assert!(matches!(
            cli.command,
            Commands::Catalog { action: CatalogCommands::Show }
        ));
    }

    #[test]
    fn test_set_price_requires_price() {
        let result = Cli::try_parse_from([
            "tantya", "catalog", "set-price", "--style", "Modern", "--material", "Cement",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_defaults() {
        let cli = Cli::try_parse_from([
            "tantya", "report", "-b", "1000000", "-s", "80", "--style", "Rustic", "-o", "out.pdf",
        ])
        .unwrap();
        match cli.command {
            Commands::Report { prepared_for, output, .. } => {
                assert_eq!(prepared_for, "Client");
                assert_eq!(output, PathBuf::from("out.pdf"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
