//! Reformat a `.bib` file, optionally sorting it and generating cite keys.
//!
//! Usage:
//!   bibdom `<input>` [-o `<output>`] [--settings `<toml>`] [--templates `<toml>`]
//!          [--sort author|key] [--generate-keys] [--verbose]
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser as _, ValueEnum};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bibdom::{Bibliography, ParseSettings, Parser, SortBy, TemplateMap, WriteSettings};

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// BibTeX file to read
    input: PathBuf,

    /// Write the result here instead of to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with `[parse]` and `[write]` settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// TOML file with `[types]` and `[templates]` tables of default tags
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Sort entries before writing
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Generate keys for entries whose key does not match their author and year
    #[arg(long)]
    generate_keys: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum SortArg {
    Author,
    Key,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Author => SortBy::Author,
            SortArg::Key => SortBy::Key,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    parse: ParseSettings,
    write: WriteSettings,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{}: {source}", .path.display())]
    Bib {
        path: PathBuf,
        source: bibdom::Error,
    },

    #[error("{}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Bibliography(bibdom::Error),
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config: Config = match &cli.settings {
        Some(path) => load_toml(path)?,
        None => Config::default(),
    };
    let templates: TemplateMap = match &cli.templates {
        Some(path) => load_toml(path)?,
        None => TemplateMap::default(),
    };

    let parser = Parser::with_templates(&templates).with_settings(config.parse.clone());
    let mut bib = Bibliography::new();
    bib.read_path(&cli.input, &parser)
        .map_err(|source| CliError::Bib {
            path: cli.input.clone(),
            source,
        })?;
    info!(
        constants = bib.string_constants().len(),
        entries = bib.entries().len(),
        "read {}",
        cli.input.display()
    );

    if let Some(sort) = cli.sort {
        bib.sort_entries(sort.into());
    }

    if cli.generate_keys {
        for index in 0..bib.entries().len() {
            if bib.has_valid_auto_key(&bib.entries()[index]) {
                continue;
            }
            let old = bib.entries()[index].key().to_string();
            let key = bib.generate_unique_key(index).map_err(CliError::Bibliography)?;
            debug!(old = %old, new = %key, "replaced cite key");
        }
    }

    match &cli.output {
        Some(path) => bib
            .save_path(path, &config.write)
            .map_err(|source| CliError::Bib {
                path: path.clone(),
                source,
            }),
        None => bib
            .save(io::stdout().lock(), &config.write)
            .map_err(CliError::Bibliography),
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
