//! Cuisine CLI - Browse a recipe feed by cuisine
//!
//! Fetches the recipe feed, applies the selected cuisine filter and prints
//! the result. Recipe photos are fetched through a disk cache.

use std::error::Error;
use std::fs;
use std::process;
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};

use cuisine::app::{RecipeListModel, RecipeListState};
use cuisine::cache::ImageCache;
use cuisine::cli::{Cli, Command, StartupConfig};
use cuisine::data::RecipeClient;
use cuisine::output;

/// Opens the photo cache at the configured or platform default location
fn open_cache(config: &StartupConfig) -> Result<ImageCache, Box<dyn Error>> {
    match &config.cache_dir {
        Some(dir) => Ok(ImageCache::with_dir(dir.clone())),
        None => ImageCache::new().ok_or_else(|| "Could not determine a cache directory".into()),
    }
}

/// Builds the list model for the configured feed and performs the first load
///
/// A failed load is returned as its user-facing message.
async fn load_model(config: &StartupConfig) -> Result<RecipeListModel, Box<dyn Error>> {
    let client = RecipeClient::with_endpoint(config.endpoint.clone());
    let model = RecipeListModel::new(Arc::new(client));
    model.set_filter(config.initial_filter);
    model.load_recipes().await;

    if let Some(loaded_at) = model.last_loaded() {
        info!(
            "Recipes from {} loaded at {}",
            config.endpoint,
            loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    match model.state() {
        RecipeListState::Error(message) => Err(message.into()),
        _ => Ok(model),
    }
}

async fn run(config: StartupConfig) -> Result<(), Box<dyn Error>> {
    match &config.command {
        Command::List { .. } => {
            let model = load_model(&config).await?;
            if model.state() == RecipeListState::Empty {
                println!("No recipes available");
            } else {
                println!(
                    "{}",
                    output::recipe_list(&model.filtered_recipes(), model.selected_filter())
                );
            }
        }
        Command::Filters => {
            let model = load_model(&config).await?;
            println!(
                "{}",
                output::filter_menu(&model.available_filter_options(), model.selected_filter())
            );
        }
        Command::Show { uuid } => {
            let model = load_model(&config).await?;
            let recipe = model
                .recipe(uuid)
                .ok_or_else(|| format!("No recipe with id {}", uuid))?;
            println!("{}", output::recipe_card(&recipe));
        }
        Command::Image { url, output } => {
            let cache = open_cache(&config)?;
            let bytes = cache.get(url).await?;
            match output {
                Some(path) => {
                    fs::write(path, &bytes)?;
                    println!("Wrote {} bytes to {}", bytes.len(), path.display());
                }
                None => println!(
                    "{} bytes cached at {}",
                    bytes.len(),
                    cache.path_for(url).display()
                ),
            }
        }
        Command::Prefetch { large } => {
            let model = load_model(&config).await?;
            let cache = open_cache(&config)?;
            let recipes = model.state().recipes().to_vec();
            let urls = recipes.iter().filter_map(|recipe| {
                if *large {
                    recipe.photo_url_large.as_deref()
                } else {
                    recipe.photo_url_small.as_deref()
                }
            });

            let results = cache.prefetch(urls).await;
            let mut failed = 0;
            for (url, result) in &results {
                if let Err(e) = result {
                    warn!("Could not cache {}: {}", url, e);
                    failed += 1;
                }
            }
            println!(
                "Cached {} of {} photos in {}",
                results.len() - failed,
                results.len(),
                cache.dir().display()
            );
        }
        Command::ClearCache => {
            let cache = open_cache(&config)?;
            cache.clear()?;
            println!("Cleared {}", cache.dir().display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    // Failures are reported by their user-facing message; there is no retry,
    // the user reruns the command to refresh.
    if let Err(e) = run(config).await {
        eprintln!("error: {}", e);
        process::exit(1);
    }

    Ok(())
}
