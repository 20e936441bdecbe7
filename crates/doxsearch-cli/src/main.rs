//! Doxsearch CLI - query Doxygen client-side search indexes from the terminal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use doxsearch_core::{Config, SearchIndex};

mod check;
mod export;
mod inspect;
mod lookup;

#[derive(Debug, Parser)]
#[command(name = "doxsearch")]
#[command(version = doxsearch_core::VERSION)]
#[command(about = "Query Doxygen client-side search indexes", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./doxsearch.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find symbols whose key starts with a prefix
    Lookup {
        /// Symbol prefix, matched case-insensitively
        #[arg(default_value = "")]
        prefix: String,

        /// Search directory or single table file
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Maximum number of results to print
        #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every key with its display label
    List {
        /// Search directory or single table file
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Check the index for structural problems
    Check {
        /// Search directory or single table file
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Print issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the merged index as a single table
    Export {
        /// Search directory or single table file
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = export::ExportFormat::Js)]
        format: export::ExportFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print entry, anchor and page counts
    Stats {
        /// Search directory or single table file
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = Config::discover(cli.config.as_deref(), &cwd).context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Lookup {
            prefix,
            dir,
            limit,
            json,
        } => {
            let index = open_index(dir.as_deref(), &config)?;
            let options = lookup::LookupOptions {
                prefix,
                limit: limit.unwrap_or(config.search.limit),
                json,
            };
            lookup::run(&index, &options, &mut stdout)?;
        }

        Commands::List { dir } => {
            let index = open_index(dir.as_deref(), &config)?;
            inspect::list(&index, &mut stdout)?;
        }

        Commands::Check { dir, json } => {
            let index = open_index(dir.as_deref(), &config)?;
            check::run(&index, json, &mut stdout)?;
        }

        Commands::Export {
            dir,
            format,
            output,
        } => {
            let index = open_index(dir.as_deref(), &config)?;
            match output {
                Some(path) => export::to_file(&index, format, &path)?,
                None => export::run(&index, format, &mut stdout)?,
            }
        }

        Commands::Stats { dir } => {
            let index = open_index(dir.as_deref(), &config)?;
            inspect::stats(&index, &mut stdout)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber; `RUST_LOG` overrides the verbosity flag
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the index from the `--dir` flag, falling back to the configured directory
fn open_index(dir: Option<&Path>, config: &Config) -> Result<SearchIndex> {
    let path = dir.unwrap_or(&config.index.dir);
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "Search index '{}' does not exist. Pass --dir or set [index].dir in doxsearch.toml",
            path.display()
        ));
    }
    let index = SearchIndex::load(path, &config.index.pattern)
        .with_context(|| format!("Failed to load search index from '{}'", path.display()))?;
    debug!(
        files = index.files.len(),
        entries = index.table.len(),
        "search index loaded"
    );
    Ok(index)
}
