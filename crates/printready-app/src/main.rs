// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printready — print-production preflight, export and quoting for PDFs
//
// Entry point. Initialises logging, loads settings and dispatches to the
// command handlers.

mod commands;
mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use printready_core::error::Result;
use printready_core::human_errors::humanize_error;
use printready_pricing::QuoteRequest;

use commands::export::ExportOverrides;
use commands::quote::PageCounts;

#[derive(Parser)]
#[command(name = "printready")]
#[command(
    version,
    about = "Print-production preflight, export and quoting for PDF documents",
    long_about = None
)]
#[command(after_help = "EXAMPLES:
    printready inspect flyer.pdf                  Page sizes and boxes
    printready analyze brochure.pdf --json        Colour/mono split and checks
    printready export brochure.pdf -o out --dpi 300
    printready quote --pricing prices.json --document brochure.pdf --copies 50 --binding spiral")]
struct Cli {
    /// Pipeline settings file (default: $XDG_CONFIG_HOME/printready/config.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show page count, page sizes and page boxes
    Inspect {
        #[arg(value_name = "PDF")]
        input: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Classify pages and summarise print readiness
    Analyze {
        #[arg(value_name = "PDF")]
        input: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export every page as a density-tagged JPEG
    Export {
        #[arg(value_name = "PDF")]
        input: PathBuf,
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,
        /// Output resolution
        #[arg(long)]
        dpi: Option<u16>,
        /// Scale pages to this physical width
        #[arg(long, value_name = "MM")]
        width_mm: Option<f64>,
        /// JPEG quality (1-100)
        #[arg(long)]
        quality: Option<u8>,
    },
    /// Write PNG thumbnails of every page
    Preview {
        #[arg(value_name = "PDF")]
        input: PathBuf,
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,
        /// Thumbnail width in pixels
        #[arg(long, value_name = "PX")]
        width_px: Option<u32>,
    },
    /// Price an order
    Quote {
        /// Price list (JSON with binding, paper, addons, rates)
        #[arg(long, value_name = "FILE")]
        pricing: PathBuf,
        /// Take page counts from this document
        #[arg(long, value_name = "PDF", conflicts_with_all = ["color", "mono"])]
        document: Option<PathBuf>,
        /// Colour pages, when no document is given
        #[arg(long, default_value_t = 0)]
        color: usize,
        /// Black & white pages, when no document is given
        #[arg(long, default_value_t = 0)]
        mono: usize,
        #[arg(long, default_value_t = 1)]
        copies: u32,
        #[arg(long)]
        binding: Option<String>,
        #[arg(long)]
        paper: Option<String>,
        /// Add-on by name; repeat for several
        #[arg(long = "addon", value_name = "NAME")]
        addons: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr so JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            let human = humanize_error(&err);
            eprintln!("error: {}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = services::config_dir::load_pipeline_config(cli.config.as_deref())?;

    match cli.command {
        Command::Inspect { input, json } => commands::inspect::run(&input, json),
        Command::Analyze { input, json } => commands::analyze::run(&input, &config, json),
        Command::Export {
            input,
            out,
            dpi,
            width_mm,
            quality,
        } => {
            let overrides = ExportOverrides {
                dpi,
                width_mm,
                quality,
            };
            commands::export::run(&input, &out, &config, overrides)
        }
        Command::Preview {
            input,
            out,
            width_px,
        } => commands::preview::run(&input, &out, &config, width_px),
        Command::Quote {
            pricing,
            document,
            color,
            mono,
            copies,
            binding,
            paper,
            addons,
            json,
        } => {
            let counts = match document {
                Some(path) => PageCounts::Document(path),
                None => PageCounts::Manual { color, mono },
            };
            let request = QuoteRequest {
                copies,
                binding,
                paper,
                addons,
            };
            commands::quote::run(&pricing, counts, &request, &config, json)
        }
    }
}
