//! starcat CLI
//!
//! One-shot catalog explorer session: each invocation fetches what it
//! needs into an in-memory cache and renders the result as text.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use starcat::{
    error::{AppError, Result},
    explorer::Explorer,
    models::{Category, Config, Item, PageView},
    report,
    services::{CatalogCache, CatalogFetcher, LoadOutcome, search::preview_value},
};

/// starcat - Star Wars catalog explorer
#[derive(Parser, Debug)]
#[command(name = "starcat", version, about = "Explore the SWAPI catalog")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, default_value = "starcat.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every category and print the load report
    Fetch,

    /// Browse one category as paginated cards
    Browse {
        /// Category to browse (people, planets, films, species, vehicles, starships)
        category: Category,

        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Search all categories for a term
    Search {
        /// Free-text term, matched anywhere in an item
        term: String,
    },

    /// Show the full detail view of one item
    Show {
        /// Category the item belongs to
        category: Category,

        /// Display name of the item (case-insensitive)
        name: String,
    },

    /// Print per-category load state
    Summary,

    /// Print aggregate catalog statistics
    Stats,

    /// Run the structural validation report
    Validate,

    /// Export cached data as JSON
    Export {
        /// Export only this category
        #[arg(long)]
        category: Option<Category>,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_page(category: Category, view: &PageView<'_>) {
    println!(
        "{} - page {} of {} ({} total)",
        category, view.page_number, view.total_pages, view.total_count
    );
    for item in view.items {
        print_card(item);
    }
    let previous = if view.has_previous { "yes" } else { "no" };
    let next = if view.has_next { "yes" } else { "no" };
    println!("previous: {previous}  next: {next}");
}

/// Compact card: display name plus a few category-specific fields.
fn print_card(item: &Item) {
    println!("* {} [{}]", item.display_name(), item.category);
    let highlights: &[&str] = match item.category {
        Category::People => &["gender", "birth_year", "eye_color"],
        Category::Planets => &["climate", "population", "terrain"],
        Category::Films => &["release_date", "director", "episode_id"],
        Category::Species => &["classification", "average_lifespan", "language"],
        Category::Vehicles => &["model", "passengers", "cost_in_credits"],
        Category::Starships => &["model", "passengers", "max_atmosphering_speed"],
    };
    for field in highlights {
        if let Some(value) = item.field(field) {
            println!("    {field}: {}", preview_value(value));
        }
    }
}

fn print_details(item: &Item, details: &[(&str, &serde_json::Value)]) {
    println!("{} [{}]", item.display_name(), item.category);
    for (key, value) in details {
        println!("    {key}: {}", preview_value(value));
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    config.validate()?;
    let page_size = config.display.page_size;

    let config = Arc::new(config);
    let fetcher = CatalogFetcher::new(Arc::clone(&config))?;
    let cache = Arc::new(CatalogCache::new(Arc::new(fetcher)));

    match cli.command {
        Command::Fetch => {
            let report = cache.ensure_all_loaded().await;
            for (category, outcome) in &report.outcomes {
                match outcome {
                    LoadOutcome::Loaded {
                        count,
                        sample_titles,
                    } => {
                        println!("{category}: {count} items ({})", sample_titles.join(", "));
                    }
                    LoadOutcome::Failed { error } => {
                        println!("{category}: FAILED - {error}");
                    }
                }
            }
            println!(
                "{} items loaded in {:.2}s",
                report.total_items, report.fetch_secs
            );
        }

        Command::Browse { category, page } => {
            let mut explorer = Explorer::new(Arc::clone(&cache), page_size);
            explorer.select_category(category).await?;

            match explorer.change_page(page as i64 - 1)? {
                Some(view) => print_page(category, &view),
                None => {
                    let total_pages = cache.total(category).div_ceil(page_size).max(1);
                    log::error!("Page {page} out of range 1..={total_pages}");
                }
            }
        }

        Command::Search { term } => {
            let mut explorer = Explorer::new(Arc::clone(&cache), page_size);
            match explorer.search(&term).await {
                Ok((results, _report)) => {
                    if results.is_empty() {
                        println!("No results for \"{}\"", results.term);
                    } else {
                        println!("Results for \"{}\" ({} found)", results.term, results.len());
                        for item in &results.hits {
                            print_card(item);
                        }
                    }
                }
                Err(AppError::EmptyQuery) => {
                    log::error!("Enter a non-empty search term");
                }
                Err(error) => return Err(error),
            }
        }

        Command::Show { category, name } => {
            cache.ensure_loaded(category).await?;
            let explorer = Explorer::new(Arc::clone(&cache), page_size);
            match cache.find_by_name(category, &name) {
                Some(item) => {
                    let details = explorer.item_details(item);
                    print_details(item, &details);
                }
                None => println!("No {category} item named \"{name}\""),
            }
        }

        Command::Summary => {
            cache.ensure_all_loaded().await;
            let summary = report::cache_summary(&cache);
            for (category, state) in &summary.categories {
                let loaded = if state.loaded { "loaded" } else { "pending" };
                println!("{category}: {} items ({loaded})", state.total);
            }
            println!("total: {} items", summary.total_items_loaded);
        }

        Command::Stats => {
            cache.ensure_all_loaded().await;
            let stats = report::statistics(&cache);
            println!("total items: {}", stats.total_items);
            println!("categories by size:");
            for entry in &stats.top_categories {
                println!("    {}: {}", entry.category, entry.count);
            }
            println!("fields: {}", stats.searchable_fields.join(", "));
        }

        Command::Validate => {
            cache.ensure_all_loaded().await;
            let validation = report::validate(&cache);
            for (category, findings) in &validation.categories {
                println!(
                    "{category}: {} items, {} missing fields, {} duplicate names",
                    findings.item_count,
                    findings.missing_fields.len(),
                    findings.duplicates.len()
                );
                for line in &findings.missing_fields {
                    println!("    {line}");
                }
            }
            for warning in &validation.warnings {
                log::warn!("{warning}");
            }
            if validation.is_valid {
                println!("validation passed");
            } else {
                println!("validation failed: {}", validation.errors.join("; "));
            }
        }

        Command::Export { category, output } => {
            match category {
                Some(category) => {
                    cache.ensure_loaded(category).await?;
                }
                None => {
                    cache.ensure_all_loaded().await;
                }
            }
            let document = report::export(&cache, category)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, document)?;
                    log::info!("Exported to {}", path.display());
                }
                None => println!("{document}"),
            }
        }
    }

    Ok(())
}
