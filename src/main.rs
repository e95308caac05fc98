#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::uninlined_format_args)]

mod config;
mod connectivity;
mod logging;
mod packages;
mod parcels;
mod structs;

use clap::{Parser, Subcommand};
use config::{CcConfig, ConnectivityConfig, PackagesConfig};
use std::path::PathBuf;
use structs::{Precision, Result};

/// ccmtx - parcel connectivity matrices and R package install scripts
#[derive(Parser, Debug)]
#[command(name = "ccmtx")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a reordered parcel correlation matrix from session timeseries
    Connectivity {
        /// Directory with one whitespace-delimited timeseries file per session
        #[arg(short, long)]
        timeseries_dir: Option<PathBuf>,

        /// Extension of timeseries files
        #[arg(short, long)]
        extension: Option<String>,

        /// Tab-separated parcel metadata table (no header)
        #[arg(short, long)]
        parcels: Option<PathBuf>,

        /// Output file for the reordered matrix
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Precision timeseries values are rounded to on load
        #[arg(long, value_enum)]
        precision: Option<Precision>,

        /// Mantissa digits in the written matrix
        #[arg(long)]
        digits: Option<usize>,
    },

    /// Generate R package install files from loading statements in documents
    Packages {
        /// Directory scanned for documents
        #[arg(short, long)]
        source_dir: Option<PathBuf>,

        /// Extension of scanned documents
        #[arg(short, long)]
        extension: Option<String>,

        /// Directory for dockerfile_includes and package_installs.R
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.verbose, args.quiet);

    let file_config = match &args.config {
        Some(path) => CcConfig::from_file(path)?,
        None => CcConfig::default(),
    };

    match args.command {
        Some(Commands::Connectivity {
            timeseries_dir,
            extension,
            parcels,
            output,
            precision,
            digits,
        }) => {
            let mut config = file_config.connectivity;
            override_connectivity(
                &mut config,
                timeseries_dir,
                extension,
                parcels,
                output,
                precision,
                digits,
            );
            run_connectivity(&config)
        }

        Some(Commands::Packages {
            source_dir,
            extension,
            output_dir,
        }) => {
            let mut config = file_config.packages;
            if let Some(dir) = source_dir {
                config.source_dir = dir;
            }
            if let Some(ext) = extension {
                config.extension = ext;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            run_packages(&config)
        }

        None => {
            eprintln!("No subcommand provided. Use 'ccmtx connectivity' or 'ccmtx packages'.");
            eprintln!("Run 'ccmtx --help' for usage information.");
            std::process::exit(1);
        }
    }
}

fn override_connectivity(
    config: &mut ConnectivityConfig,
    timeseries_dir: Option<PathBuf>,
    extension: Option<String>,
    parcels: Option<PathBuf>,
    output: Option<PathBuf>,
    precision: Option<Precision>,
    digits: Option<usize>,
) {
    if let Some(dir) = timeseries_dir {
        config.timeseries_dir = dir;
    }
    if let Some(ext) = extension {
        config.extension = ext;
    }
    if let Some(path) = parcels {
        config.parcels = path;
    }
    if let Some(path) = output {
        config.output = path;
    }
    if let Some(p) = precision {
        config.precision = p;
    }
    if let Some(d) = digits {
        config.digits = d;
    }
}

/// Run the connectivity build
fn run_connectivity(config: &ConnectivityConfig) -> Result<()> {
    tracing::info!("Timeseries: {}", config.timeseries_dir.display());
    let summary = connectivity::pipeline::build_connectivity(config)?;
    tracing::info!("Done: {}", summary.summary());
    Ok(())
}

/// Run the package scan
fn run_packages(config: &PackagesConfig) -> Result<()> {
    tracing::info!("Scanning: {}", config.source_dir.display());
    let summary = packages::pipeline::build_package_scripts(config)?;
    tracing::info!(
        "Wrote {} packages from {} documents",
        summary.packages.len(),
        summary.documents
    );
    tracing::info!("  - {}", summary.dockerfile_includes.display());
    tracing::info!("  - {}", summary.install_script.display());
    Ok(())
}
