// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lithoframe CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lithoframe::cli::{self, Reporter};
use lithoframe::{EditorConfig, InterpolationMethod};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lithoframe")]
#[command(about = "Lithoframe - layer boundary and roof profile editor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./lithoframe.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty model
    New {
        /// Output model file
        output: PathBuf,

        /// Number of layers
        #[arg(short, long, default_value = "1")]
        layers: usize,

        /// Elevation step between layers
        #[arg(short, long, default_value = "10")]
        spacing: f64,
    },

    /// Show the layer stack of a model
    Info {
        /// Model file
        input: PathBuf,
    },

    /// Decimate layer boundaries
    Simplify {
        /// Model file
        input: PathBuf,

        /// Target vertex count (defaults to the configured target)
        #[arg(short, long)]
        target: Option<usize>,

        /// Only simplify this layer
        #[arg(short, long)]
        layer: Option<usize>,

        /// Output model file (defaults to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rebuild secondary layers between primary ones
    Intermediate {
        /// Model file
        input: PathBuf,

        /// Layers per gap (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Output model file (defaults to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interpolate the roof height grid
    Grid {
        /// Model file
        input: PathBuf,

        /// Interpolation method (linear, nearest, cubic)
        #[arg(short, long)]
        method: Option<InterpolationMethod>,

        /// Grid resolution (defaults to the configured resolution)
        #[arg(short, long)]
        resolution: Option<usize>,

        /// Write the grid as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export depth-stepped roof layers
    ExportRoof {
        /// Model file
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Depth of the first layer
        #[arg(long, default_value = "0")]
        initial: f64,

        /// Depth step between layers
        #[arg(long, default_value = "1")]
        step: f64,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "lithoframe=debug" } else { "lithoframe=info" };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()))
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::from_file(path),
        None => EditorConfig::load(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::New { output, layers, spacing } => {
            let lithology = cli::create_model(&output, &config, layers, spacing)?;
            Reporter::success(&format!(
                "Created {} with {} layer(s)",
                output.display(),
                lithology.len()
            ));
        }
        Commands::Info { input } => {
            let lithology = lithoframe::io::load_lithology(&input)
                .with_context(|| format!("Failed to load model: {}", input.display()))?;
            Reporter::report_model(&input.display().to_string(), &cli::summarize(&lithology));
        }
        Commands::Simplify { input, target, layer, output } => {
            let output = output.unwrap_or_else(|| input.clone());
            let target = target.unwrap_or(config.simplify_target);
            let report = cli::simplify_model(&input, &output, target, layer)?;
            Reporter::report_simplify(&report);
            if report.iter().all(|l| l.after == l.before) {
                Reporter::report_warning("No layer exceeded the target vertex count");
            }
            Reporter::success(&format!("Wrote {}", output.display()));
        }
        Commands::Intermediate { input, count, output } => {
            let output = output.unwrap_or_else(|| input.clone());
            let count = count.unwrap_or(config.intermediate_layers);
            let created = cli::intermediate_model(&input, &output, count)?;
            Reporter::success(&format!(
                "Synthesized {} secondary layer(s) into {}",
                created,
                output.display()
            ));
        }
        Commands::Grid { input, method, resolution, output } => {
            if let Some(resolution) = resolution {
                config.grid_resolution = resolution;
            }
            let start = Instant::now();
            let grid = cli::roof_grid(&input, &config, method)?;
            Reporter::report_grid(&grid, start.elapsed());
            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&grid)?;
                std::fs::write(&output, json)
                    .with_context(|| format!("Failed to write grid: {}", output.display()))?;
                Reporter::report_info(&format!("Grid written to: {}", output.display()));
            }
        }
        Commands::ExportRoof { input, output, initial, step } => {
            let records = cli::export_model(&input, &output, &config, initial, step)?;
            Reporter::success(&format!(
                "Exported {} record(s) to {}",
                records,
                output.display()
            ));
        }
        Commands::Version => {
            println!("Lithoframe v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
