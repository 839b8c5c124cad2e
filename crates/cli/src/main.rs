//! Cuppa CLI - coffee journal insights.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cuppa_core::{
    encode_flavor_tags, resolve_tag_names, BeanId, BrewMethod, BrewRecord, CoffeeBean,
    FlavorTaxonomy, InsightsConfig, MethodCategory, MethodId,
};
use cuppa_insights::InsightsServiceFactory;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "cuppa")]
#[command(about = "Coffee journal insights", long_about = None)]
struct Cli {
    /// Engine configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract flavors from tasting notes
    Extract {
        /// Tasting notes
        text: String,
        /// Print the tag blob instead of the flavor list
        #[arg(long)]
        tags: bool,
    },
    /// Mine patterns from a brew history
    Patterns {
        /// Brew history (JSON array of brew records)
        #[arg(long)]
        history: PathBuf,
    },
    /// Suggest parameters for a bean and method
    Suggest {
        /// Brew history (JSON array of brew records)
        #[arg(long)]
        history: PathBuf,
        /// Method ID
        #[arg(long)]
        method: MethodId,
        /// Bean ID
        #[arg(long)]
        bean: Option<BeanId>,
        /// Bean origin, for the same-origin fallback
        #[arg(long, default_value = "")]
        origin: String,
    },
    /// Resolve a persisted tag blob to display names
    Tags {
        /// JSON array of tags
        blob: String,
    },
    /// List the flavor wheel leaves
    Taxonomy,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => InsightsConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => InsightsConfig::default(),
    };

    match cli.command {
        Commands::Extract { text, tags } => {
            let service = InsightsServiceFactory::from_config(&config).await;
            let flavors = service.extract_flavors(&text).await;

            if tags {
                println!("{}", encode_flavor_tags(flavors.iter().map(|f| &f.id), Vec::<String>::new()));
                return Ok(());
            }

            println!("Flavors ({}, {} tier)", flavors.len(), service.tier());
            for flavor in flavors {
                println!("  {} | {} | {:.2} | {:?}",
                    flavor.id,
                    flavor.name,
                    flavor.confidence,
                    flavor.source,
                );
            }
        }
        Commands::Patterns { history } => {
            let history = load_history(&history)?;
            let service = InsightsServiceFactory::from_config(&config).await;
            let patterns = service.analyze_patterns(&history);

            if patterns.is_empty() {
                println!("Not enough brews for patterns yet");
                return Ok(());
            }

            println!("Patterns ({})", patterns.len());
            for pattern in patterns {
                println!("  [{:?}] {}", pattern.category, pattern.title);
                println!("    {}", pattern.description);
            }
        }
        Commands::Suggest { history, method, bean, origin } => {
            let history = load_history(&history)?;
            let service = InsightsServiceFactory::from_config(&config).await;

            let method = method_from_history(method, &history);
            let bean = CoffeeBean::new(bean.unwrap_or_default(), origin);

            let Some(suggestion) = service.suggest_parameters(&bean, &method, &history) else {
                println!("Not enough good brews for a suggestion yet");
                return Ok(());
            };

            println!("Suggestion ({:?} confidence, {} brews)", suggestion.confidence, suggestion.based_on_count);
            println!("  Dose: {:.1} g", suggestion.dose);
            if let Some(water) = suggestion.water_amount {
                println!("  Water: {:.0} g", water);
            }
            if let Some(yield_amount) = suggestion.yield_amount {
                println!("  Yield: {:.1} g", yield_amount);
            }
            if let Some(ratio) = suggestion.ratio(method.category) {
                println!("  Ratio: 1:{:.1}", ratio);
            }
            println!("  Temperature: {:.0} C", suggestion.water_temperature);
            if let Some(grind) = suggestion.grinder_setting {
                println!("  Grind: {:.1}", grind);
            }
            println!("  Time: {}", suggestion.brew_time_formatted());
        }
        Commands::Tags { blob } => {
            for name in resolve_tag_names(&blob) {
                println!("{}", name);
            }
        }
        Commands::Taxonomy => {
            for leaf in FlavorTaxonomy::flatten_leaves() {
                println!("{} | {}", leaf.id, leaf.name);
            }
        }
    }

    Ok(())
}

fn load_history(path: &Path) -> Result<Vec<BrewRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let history: Vec<BrewRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid brew history in {}", path.display()))?;
    debug!("Loaded {} brews from {}", history.len(), path.display());
    Ok(history)
}

/// Recover the method's name and category from any brew that used it.
fn method_from_history(id: MethodId, history: &[BrewRecord]) -> BrewMethod {
    history
        .iter()
        .find(|r| r.method_id == Some(id))
        .map(|r| BrewMethod::new(id, r.method_name.clone(), r.method_category))
        .unwrap_or_else(|| BrewMethod::new(id, "", MethodCategory::Other))
}
