mod cache;
mod forecast;
mod lookup;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adforecast")]
#[command(about = "Campaign forecast resolution tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve free text to an ISO country code
    Country {
        /// Place text, e.g. "Saudi Arabia" or "السعودية"
        text: String,
        /// Secondary autocomplete text, tried first
        #[arg(long)]
        secondary: Option<String>,
    },
    /// Classify the industry of a keyword set and site
    Classify {
        #[arg(long = "keyword", short = 'k')]
        keywords: Vec<String>,
        #[arg(long)]
        site: Option<String>,
    },
    /// Heuristic estimate without cache or network
    Estimate {
        #[arg(long)]
        budget: f64,
        /// ISO country code; repeatable
        #[arg(long = "country", short = 'c')]
        countries: Vec<String>,
        #[arg(long = "keyword", short = 'k')]
        keywords: Vec<String>,
        #[arg(long)]
        site: Option<String>,
        #[arg(long, default_value = "search")]
        campaign_type: String,
        #[arg(long)]
        json: bool,
    },
    /// Resolve a forecast through memory, cache, remote metrics and heuristic tiers
    Forecast {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long)]
        budget: f64,
        /// Fetch keyword suggestions when no keywords are given
        #[arg(long)]
        suggest_keywords: bool,
        #[arg(long)]
        json: bool,
    },
    /// Read daily budgets from stdin, one per line, and recompute debounced
    Watch {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Inspect or clear persisted state
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

/// Inputs shared by `forecast` and `watch`.
#[derive(Debug, Clone, Args)]
struct TargetArgs {
    #[arg(long)]
    site: Option<String>,
    /// "Place" or "Place, Country"; repeatable
    #[arg(long = "location", short = 'l')]
    locations: Vec<String>,
    #[arg(long = "keyword", short = 'k')]
    keywords: Vec<String>,
    #[arg(long, default_value = "search")]
    campaign_type: String,
}

#[derive(Debug, Subcommand)]
enum CacheCommands {
    /// List stored keys and values
    Show,
    /// Remove historical metrics entries
    Clear {
        /// Remove every key, not only historical metrics
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = adforecast_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Country { text, secondary }) => {
            lookup::run_country(&text, secondary.as_deref());
        }
        Some(Commands::Classify { keywords, site }) => {
            lookup::run_classify(&config, &keywords, site.as_deref())?;
        }
        Some(Commands::Estimate {
            budget,
            countries,
            keywords,
            site,
            campaign_type,
            json,
        }) => {
            let input = lookup::EstimateInput {
                budget,
                countries: &countries,
                keywords: &keywords,
                site: site.as_deref(),
                campaign_type: &campaign_type,
            };
            lookup::run_estimate(&config, &input, json)?;
        }
        Some(Commands::Forecast {
            target,
            budget,
            suggest_keywords,
            json,
        }) => {
            forecast::run_forecast(&config, &target, budget, suggest_keywords, json).await?;
        }
        Some(Commands::Watch { target }) => {
            forecast::run_watch(&config, &target).await?;
        }
        Some(Commands::Cache { command }) => match command {
            CacheCommands::Show => cache::run_show(&config)?,
            CacheCommands::Clear { all } => cache::run_clear(&config, all)?,
        },
        None => println!("adforecast ready; see --help for commands"),
    }

    Ok(())
}
