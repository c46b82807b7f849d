//! Command-line front end for the nature cottage scorer.
//!
//! Reports go to stdout; logs go to stderr.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use cottage_scorer::ai::{AnthropicOracle, OpenAIOracle};
use cottage_scorer::pipeline::format_criteria_table;
use cottage_scorer::{
    compose_query, render_report, Analyzer, CriterionRegistry, ExampleCategory, ExampleStore,
    Fetcher, HttpFetcher, ListingExtractor, Oracle, PatternExtractor, ScoreBand, ScoringConfig,
    ScoringResult,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Provider};

#[derive(Parser)]
#[command(name = "cottage-score")]
#[command(about = "Score vacation listings against the nature cottage rubric")]
struct Cli {
    /// Labeled example CSV (overrides TRAINING_DATA)
    #[arg(long, global = true)]
    training_data: Option<PathBuf>,

    /// Oracle provider (overrides ORACLE_PROVIDER)
    #[arg(long, global = true, value_enum)]
    provider: Option<Provider>,

    /// Model name (overrides ORACLE_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and score a listing
    Analyze {
        url: String,
        /// Read the listing markup from a local file instead of fetching
        #[arg(long)]
        html_file: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the loaded calibration examples
    Examples,

    /// Print the oracle query for a listing without sending it
    Prompt {
        url: String,
        #[arg(long)]
        html_file: Option<PathBuf>,
    },

    /// Show the scoring criteria
    Criteria,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cottage_scorer=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.training_data, cli.provider, cli.model);

    match cli.command {
        Commands::Analyze {
            url,
            html_file,
            json,
        } => cmd_analyze(&config, &url, html_file, json).await,
        Commands::Examples => cmd_examples(&config),
        Commands::Prompt { url, html_file } => cmd_prompt(&config, &url, html_file).await,
        Commands::Criteria => cmd_criteria(),
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_analyze(
    config: &Config,
    url: &str,
    html_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    require_http(url)?;

    let analyzer = Analyzer::new(build_oracle(config)?, build_fetcher(config)?)
        .with_store(ExampleStore::load(&config.training_data));

    let result = match html_file {
        Some(path) => {
            let html = read_html(&path).await?;
            analyzer.analyze_html(&html).await
        }
        None => analyzer.analyze_url(url).await,
    }
    .with_context(|| format!("Analysis failed for {url}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result, analyzer.registry()));
        print_verdict(&result);
    }

    Ok(())
}

fn cmd_examples(config: &Config) -> Result<()> {
    let store = ExampleStore::load(&config.training_data);

    println!("{}", "📚 Trainingsvoorbeelden".bright_cyan().bold());
    println!("Bestand: {}", config.training_data.display());
    println!("Totaal:  {}", store.summary());

    if store.is_empty() {
        println!(
            "{}",
            "Geen voorbeelden geladen; scoren gebeurt alleen op criteria.".yellow()
        );
        return Ok(());
    }

    for category in ExampleCategory::ALL {
        let examples = store.get(category);
        if examples.is_empty() {
            continue;
        }
        println!();
        println!("{} ({})", category.short_label().bold(), examples.len());
        for example in examples.iter().take(2) {
            println!("  • {} ({:.0}/100)", example.slug(), example.score);
        }
    }

    Ok(())
}

async fn cmd_prompt(config: &Config, url: &str, html_file: Option<PathBuf>) -> Result<()> {
    require_http(url)?;

    let html = match html_file {
        Some(path) => read_html(&path).await?,
        None => build_fetcher(config)?
            .fetch(url)
            .await
            .with_context(|| format!("Could not fetch {url}"))?,
    };

    let scoring = ScoringConfig::default();
    let listing = PatternExtractor::from_config(&scoring).extract(&html);
    let store = ExampleStore::load(&config.training_data);
    let query = compose_query(&listing, &store, &CriterionRegistry::default(), &scoring);

    println!("{}", query.text);
    println!(
        "{} {} ({} voorbeelden)",
        "fingerprint:".dimmed(),
        query.fingerprint,
        query.injected_examples
    );

    Ok(())
}

fn cmd_criteria() -> Result<()> {
    let registry = CriterionRegistry::default();

    println!("{}", "📋 Beoordelingscriteria".bright_cyan().bold());
    print!("{}", format_criteria_table(&registry));
    println!("Totaal gewicht: {}%", registry.total_weight());

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn require_http(url: &str) -> Result<()> {
    if !url.starts_with("http") {
        bail!("URL must start with http: {url}");
    }
    Ok(())
}

async fn read_html(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))
}

fn build_fetcher(config: &Config) -> Result<HttpFetcher> {
    HttpFetcher::with_timeout(config.fetch_timeout).context("Could not build HTTP client")
}

fn build_oracle(config: &Config) -> Result<Arc<dyn Oracle>> {
    let api_key = config.api_key()?;

    let oracle: Arc<dyn Oracle> = match config.provider {
        Provider::Anthropic => {
            let mut oracle = AnthropicOracle::new(api_key);
            if let Some(model) = &config.model {
                oracle = oracle.with_model(model.clone());
            }
            Arc::new(oracle)
        }
        Provider::Openai => {
            let mut oracle = OpenAIOracle::new(api_key);
            if let Some(model) = &config.model {
                oracle = oracle.with_model(model.clone());
            }
            Arc::new(oracle)
        }
    };

    Ok(oracle)
}

fn print_verdict(result: &ScoringResult) {
    let score = format!("{:.1}/100", result.confidence_score);
    let score = match result.band() {
        ScoreBand::High => score.green().bold(),
        ScoreBand::Medium => score.yellow().bold(),
        ScoreBand::Low => score.red().bold(),
    };
    let label = if result.is_positive {
        result.category_label.green().bold()
    } else {
        result.category_label.red().bold()
    };

    println!("{label}  {score}");
    if result.used_fallback {
        println!(
            "{}",
            "⚠️  Het antwoord van het model was onleesbaar; de score is neutraal.".yellow()
        );
    }
}
