use anyhow::{Context, Result};
use bookindex::index::{IndexStats, Page, TermIndex};
use bookindex::output;
use bookindex::utils::{get_config_path, AppConfig};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use termcolor::ColorChoice;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bookindex")]
#[command(about = "Maintain a back-of-book term index")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Index file to operate on
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, global = true)]
    color: Option<ColorMode>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a term on one or more pages
    Add {
        #[arg(value_parser = parse_term)]
        term: String,

        #[arg(required = true, allow_negative_numbers = true, value_parser = page_parser())]
        pages: Vec<Page>,
    },
    /// Remove a term and all its pages
    Remove { term: String },
    /// Rename a term (merges into an existing term of the new name)
    Rename {
        old: String,

        #[arg(value_parser = parse_term)]
        new: String,
    },
    /// Remove a page from every term
    RemovePage {
        #[arg(allow_negative_numbers = true, value_parser = page_parser())]
        page: Page,
    },
    /// List terms starting with a prefix
    Search {
        #[arg(default_value = "")]
        prefix: String,
    },
    /// Print the whole index
    Show,
    /// Show index statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Merge another index file into this one
    Import { path: PathBuf },
    /// Write the index to another file
    Export { path: PathBuf },
    /// Update and show the configuration file
    Config {
        /// Index file used when --file is not given
        #[arg(long)]
        default_file: Option<PathBuf>,

        /// Colorize output by default
        #[arg(long)]
        use_color: Option<bool>,

        /// Log filter used when RUST_LOG is unset
        #[arg(long)]
        log_level: Option<String>,
    },
}

/// Pages are written back as range tokens, so only non-negative pages
/// survive a save and reload
fn page_parser() -> clap::builder::RangedI64ValueParser<Page> {
    clap::value_parser!(Page).range(0..)
}

/// Terms are the first space-separated token of a line
fn parse_term(term: &str) -> std::result::Result<String, String> {
    if term.is_empty() {
        return Err("term must not be empty".to_string());
    }
    if term.chars().any(char::is_whitespace) {
        return Err(format!("term '{}' must not contain whitespace", term));
    }
    Ok(term.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    init_logging(&config.log_level);

    let command = match cli.command {
        Commands::Config {
            default_file,
            use_color,
            log_level,
        } => {
            let path = match cli.config {
                Some(path) => path,
                None => get_config_path().context("Could not determine config directory")?,
            };
            return update_config(config, &path, default_file, use_color, log_level);
        }
        command => command,
    };

    let choice = color_choice(cli.color, config.color);
    let index_path = config.index_file(cli.file);
    let mut index = open_index(&index_path)?;

    match command {
        Commands::Add { term, pages } => {
            for page in pages {
                index.add_term(&term, page);
            }
            save_index(&index, &index_path)?;
        }
        Commands::Remove { term } => {
            if !index.remove_term(&term) {
                output::print_notice(&format!("Term '{}' not found.", term), choice)?;
            }
            save_index(&index, &index_path)?;
        }
        Commands::Rename { old, new } => {
            if !index.update_term(&old, &new) {
                output::print_notice(&format!("Term '{}' not found.", old), choice)?;
            }
            save_index(&index, &index_path)?;
        }
        Commands::RemovePage { page } => {
            index.remove_page(page);
            save_index(&index, &index_path)?;
        }
        Commands::Search { prefix } => {
            let matches: Vec<_> = index.entries_with_prefix(&prefix).collect();
            if matches.is_empty() {
                output::print_notice(
                    &format!("No terms found with the prefix '{}'.", prefix),
                    choice,
                )?;
            } else {
                output::print_entries(matches, choice)?;
            }
        }
        Commands::Show => {
            output::print_entries(index.entries(), choice)?;
        }
        Commands::Stats { json } => {
            let stats = IndexStats::from_index(&index);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                output::print_stats(&mut std::io::stdout().lock(), &stats)?;
            }
        }
        Commands::Import { path } => {
            index
                .load_from_file(&path)
                .with_context(|| format!("Failed to import {}", path.display()))?;
            save_index(&index, &index_path)?;
        }
        Commands::Export { path } => {
            save_index(&index, &path)?;
        }
        Commands::Config { .. } => unreachable!("handled before loading the index"),
    }

    Ok(())
}

/// Apply any given settings, save them if something changed, print the result
fn update_config(
    mut config: AppConfig,
    path: &Path,
    default_file: Option<PathBuf>,
    use_color: Option<bool>,
    log_level: Option<String>,
) -> Result<()> {
    let changed = default_file.is_some() || use_color.is_some() || log_level.is_some();

    if let Some(file) = default_file {
        config.default_index_file = Some(file);
    }
    if let Some(color) = use_color {
        config.color = color;
    }
    if let Some(level) = log_level {
        config.log_level = level;
    }

    if changed {
        config.save_to(path)?;
        debug!(path = %path.display(), "saved config");
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Load the index file; a file that does not exist yet is an empty index
fn open_index(path: &Path) -> Result<TermIndex> {
    let mut index = TermIndex::new();
    if !path.exists() {
        debug!(path = %path.display(), "index file not found, starting empty");
        return Ok(index);
    }

    index
        .load_from_file(path)
        .with_context(|| format!("Failed to load index {}", path.display()))?;
    Ok(index)
}

fn save_index(index: &TermIndex, path: &Path) -> Result<()> {
    index
        .save_to_file(path)
        .with_context(|| format!("Failed to save index {}", path.display()))
}

fn color_choice(mode: Option<ColorMode>, config_color: bool) -> ColorChoice {
    match mode {
        Some(ColorMode::Always) => ColorChoice::Always,
        Some(ColorMode::Never) => ColorChoice::Never,
        Some(ColorMode::Auto) => ColorChoice::Auto,
        None if config_color => ColorChoice::Auto,
        None => ColorChoice::Never,
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok(); // Ignore error if already initialized
}
