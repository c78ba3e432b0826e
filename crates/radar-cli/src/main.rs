mod brands;
mod enrich;
mod evaluate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "radar")]
#[command(about = "Enrich and classify LLM answers about a brand")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add category, mention, ranking and citation fields to answer records
    Enrich {
        /// Record store to read (phpMyAdmin export or flat array)
        #[arg(long, short)]
        input: PathBuf,
        /// Category source (YAML question battery)
        #[arg(long, short)]
        categories: PathBuf,
        /// Where to write the enriched records
        #[arg(long, short)]
        output: PathBuf,
        /// Main brand; defaults to the brand named in the battery title
        #[arg(long, short)]
        brand: Option<String>,
        /// Answer language code (e.g. es, en)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Classify the sentiment of enriched records towards the brand
    Evaluate {
        #[arg(long, short)]
        input: PathBuf,
        #[arg(long, short)]
        output: PathBuf,
        #[arg(long, short)]
        brand: String,
        /// Chat-completion model, overrides `RADAR_LLM_MODEL`
        #[arg(long, short)]
        model: Option<String>,
        /// Pause between classification calls, overrides `RADAR_LLM_DELAY_MS`
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Enrich then evaluate, writing a single output file
    Run {
        #[arg(long, short)]
        input: PathBuf,
        #[arg(long, short)]
        categories: PathBuf,
        #[arg(long, short)]
        output: PathBuf,
        #[arg(long, short)]
        brand: Option<String>,
        #[arg(long)]
        lang: Option<String>,
        #[arg(long, short)]
        model: Option<String>,
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// List brands configured in the brand registry
    Brands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("radar: use --help to list commands");
        return Ok(());
    };

    let mut config = radar_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // A missing or invalid registry is fatal for every command.
    let registry = radar_core::load_brand_registry(&config.brands_path)?;
    tracing::debug!(?config, brands = registry.brands.len(), "configuration loaded");

    match command {
        Commands::Enrich {
            input,
            categories,
            output,
            brand,
            lang,
        } => {
            let options = enrich::EnrichOptions {
                input: &input,
                categories: &categories,
                brand: brand.as_deref(),
                lang: lang.as_deref(),
            };
            let (records, _) = enrich::run_enrich(&config, &registry, &options).await?;
            enrich::write_output(&output, &records)?;
        }
        Commands::Evaluate {
            input,
            output,
            brand,
            model,
            delay_ms,
        } => {
            evaluate::apply_overrides(&mut config, model, delay_ms);
            let evaluator = evaluate::Evaluator::from_config(&config)?;
            let mut records = radar_core::load_records(&input)?;
            evaluator.run(&brand, &mut records).await;
            enrich::write_output(&output, &records)?;
        }
        Commands::Run {
            input,
            categories,
            output,
            brand,
            lang,
            model,
            delay_ms,
        } => {
            evaluate::apply_overrides(&mut config, model, delay_ms);
            let evaluator = evaluate::Evaluator::from_config(&config)?;
            let options = enrich::EnrichOptions {
                input: &input,
                categories: &categories,
                brand: brand.as_deref(),
                lang: lang.as_deref(),
            };
            let (mut records, brand) = enrich::run_enrich(&config, &registry, &options).await?;
            evaluator.run(&brand, &mut records).await;
            enrich::write_output(&output, &records)?;
        }
        Commands::Brands => brands::run_brands(&registry),
    }

    Ok(())
}
