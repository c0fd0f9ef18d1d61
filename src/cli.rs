//! Command-line interface parsing for the cuisine CLI
//!
//! This module handles parsing of CLI arguments using clap and resolving them
//! into a `StartupConfig`: which feed to read, where to cache photos, and
//! which cuisine filter to start with.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use thiserror::Error;

use crate::data::recipes::{DEFAULT_ENDPOINT, EMPTY_ENDPOINT, MALFORMED_ENDPOINT};
use crate::filter::FilterOption;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified cuisine filter is not recognized
    #[error("Invalid cuisine filter: '{0}'. Valid filters: all, italian, mexican, asian, french, american, indian, mediterranean, middle-eastern, british, japanese, thai, spanish, greek, other")]
    InvalidFilter(String),
}

/// Published variants of the recipe feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Dataset {
    /// The complete recipe feed
    #[default]
    Full,
    /// A feed with broken entries, for exercising error handling
    Malformed,
    /// A feed with no recipes
    Empty,
}

impl Dataset {
    /// Endpoint serving this dataset
    pub fn endpoint(&self) -> &'static str {
        match self {
            Dataset::Full => DEFAULT_ENDPOINT,
            Dataset::Malformed => MALFORMED_ENDPOINT,
            Dataset::Empty => EMPTY_ENDPOINT,
        }
    }
}

/// Cuisine CLI - Browse recipes by cuisine and cache their photos
#[derive(Parser, Debug)]
#[command(name = "cuisine")]
#[command(about = "Browse a recipe feed by cuisine")]
#[command(version)]
pub struct Cli {
    /// Recipe feed URL; takes precedence over --dataset
    #[arg(long, env = "CUISINE_ENDPOINT", value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Which published feed to read
    #[arg(long, value_enum, default_value_t = Dataset::Full, global = true)]
    pub dataset: Dataset,

    /// Directory for cached photos (defaults to the platform cache directory)
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do once the configuration is resolved
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List recipes, optionally filtered by cuisine (default)
    ///
    /// Examples:
    ///   cuisine list                    # Every recipe
    ///   cuisine list --filter italian   # Italian recipes only
    ///   cuisine list --filter other     # Cuisines without a dedicated filter
    List {
        /// Cuisine to show
        #[arg(short, long, value_name = "CUISINE")]
        filter: Option<String>,
    },
    /// Show the cuisine filters available for the current feed
    Filters,
    /// Show the full card for one recipe
    Show {
        /// Recipe uuid
        uuid: String,
    },
    /// Fetch a photo through the disk cache
    Image {
        /// Photo URL
        url: String,
        /// Write the photo bytes to this file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Download every recipe photo into the cache
    Prefetch {
        /// Fetch large photos instead of thumbnails
        #[arg(long)]
        large: bool,
    },
    /// Delete every cached photo
    ClearCache,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Recipe feed to read
    pub endpoint: String,
    /// Explicit photo cache directory, if one was given
    pub cache_dir: Option<PathBuf>,
    /// Filter to select before the list is shown
    pub initial_filter: FilterOption,
    /// Command to run
    pub command: Command,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_dir: None,
            initial_filter: FilterOption::All,
            command: Command::List { filter: None },
        }
    }
}

/// Parses a cuisine filter argument into a FilterOption.
///
/// # Arguments
/// * `s` - The filter string from CLI
///
/// # Returns
/// * `Ok(FilterOption)` if the string matches a valid filter
/// * `Err(CliError::InvalidFilter)` if the string doesn't match
pub fn parse_filter_arg(s: &str) -> Result<FilterOption, CliError> {
    FilterOption::from_str(s).ok_or_else(|| CliError::InvalidFilter(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid filter was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let endpoint = cli
            .endpoint
            .clone()
            .unwrap_or_else(|| cli.dataset.endpoint().to_string());

        let command = cli
            .command
            .clone()
            .unwrap_or(Command::List { filter: None });

        let initial_filter = match &command {
            Command::List {
                filter: Some(filter),
            } => parse_filter_arg(filter)?,
            _ => FilterOption::All,
        };

        Ok(StartupConfig {
            endpoint,
            cache_dir: cli.cache_dir.clone(),
            initial_filter,
            command,
        })
    }
}
