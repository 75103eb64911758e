use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

use sentiment_fusion::config::{Config, TranslatorBackend};
use sentiment_fusion::db::{self, SqliteStatisticsStore, StatisticsStore};
use sentiment_fusion::lexicon::{LexiconScorer, PatternPolarity, WordLists};
use sentiment_fusion::model::{ModelInferenceAdapter, OnnxEngine};
use sentiment_fusion::output::terminal;
use sentiment_fusion::pipeline::{batch, PipelineComponents, SentimentPipeline};
use sentiment_fusion::profanity::ProfanityDetector;
use sentiment_fusion::translation::google::GoogleTranslator;
use sentiment_fusion::translation::{IdentityTranslator, TranslationGateway, Translator};

/// Sentiment Fusion: lexicon + neural sentiment classification.
///
/// Classifies text as positive, neutral or negative and keeps daily
/// statistics of everything it has classified.
#[derive(Parser)]
#[command(name = "sentiment", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and word lists
    Init {
        /// Seed a week of demo statistics (only into an empty table)
        #[arg(long)]
        demo: bool,
    },

    /// Classify a single text
    Classify {
        /// The text to classify
        text: String,

        /// Don't record the result in the statistics store
        #[arg(long)]
        no_record: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify every non-blank line of a file
    Batch {
        /// File with one text per line
        file: std::path::PathBuf,

        /// Number of texts to classify in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },

    /// Show recent daily statistics
    Stats {
        /// Number of days to show (default: 7)
        #[arg(long, default_value = "7")]
        limit: u32,
    },

    /// Show system status (DB stats, model, word lists)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sentiment_fusion=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init { demo } => {
            info!("Initializing sentiment database...");
            let conn = db::initialize(&config.db_path, config.busy_timeout)?;
            let table_count = db::schema::table_count(&conn)?;
            drop(conn);
            println!("Database initialized at: {}", config.db_path.display());
            println!("Tables created: {table_count}");

            let words = WordLists::load_or_create(&config.wordlist_dir);
            println!(
                "Word lists: {} positive, {} negative (in {})",
                words.positive_len(),
                words.negative_len(),
                config.wordlist_dir.display()
            );

            if demo {
                let store = SqliteStatisticsStore::new(&config.db_path, config.busy_timeout);
                if store.seed_demo().await? {
                    println!("Seeded 7 days of demo statistics");
                } else {
                    println!("{}", "Statistics already present, demo data skipped".dimmed());
                }
            }

            if !config.model_path.exists() {
                println!(
                    "\n{}",
                    format!(
                        "Note: no model at {}. Set SENTIMENT_MODEL_PATH before classifying.",
                        config.model_path.display()
                    )
                    .yellow()
                );
            }
            println!("\nReady. Try: sentiment classify \"what a lovely day\"");
        }

        Commands::Classify {
            text,
            no_record,
            json,
        } => {
            let pipeline = build_pipeline(&config)?;

            let result = if no_record {
                pipeline.classify(&text).await
            } else {
                pipeline.record_and_classify(&text).await
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_result(&text, &result);
            }
        }

        Commands::Batch { file, concurrency } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let texts: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            if texts.is_empty() {
                println!("No texts in {}", file.display());
                return Ok(());
            }

            let pipeline = build_pipeline(&config)?;
            println!(
                "Classifying {} texts ({} concurrent)...",
                texts.len(),
                concurrency
            );
            let summary = batch::run(&pipeline, texts, concurrency).await;
            terminal::display_batch_summary(&summary);
        }

        Commands::Stats { limit } => {
            db::open(&config.db_path, config.busy_timeout)?;
            let store = SqliteStatisticsStore::new(&config.db_path, config.busy_timeout);
            let rows = store.recent(limit).await;
            terminal::display_statistics(&rows);
        }

        Commands::Status => {
            sentiment_fusion::status::show(&config).await?;
        }
    }

    Ok(())
}

/// Assemble the pipeline from config. A missing or malformed model is fatal
/// here, before anything is classified.
fn build_pipeline(config: &Config) -> Result<SentimentPipeline> {
    config.require_model()?;
    let engine = OnnxEngine::load(&config.model_path)?;
    let model = ModelInferenceAdapter::new(Arc::new(engine), config.max_length);

    db::initialize(&config.db_path, config.busy_timeout)?;
    let store: Arc<dyn StatisticsStore> = Arc::new(SqliteStatisticsStore::new(
        &config.db_path,
        config.busy_timeout,
    ));

    let profanity = Arc::new(ProfanityDetector::default());
    let lexicon = LexiconScorer::new(
        Arc::new(WordLists::load_or_create(&config.wordlist_dir)),
        profanity.clone(),
        Arc::new(PatternPolarity::default()),
    );

    Ok(SentimentPipeline::new(PipelineComponents {
        profanity,
        gateway: Arc::new(TranslationGateway::new(create_translator(config)?)),
        lexicon,
        model: Some(model),
        store,
        working_language: config.working_language.clone(),
        display_language: config.display_language.clone(),
    }))
}

/// Create a translator based on the configured backend.
fn create_translator(config: &Config) -> Result<Arc<dyn Translator>> {
    match config.translator {
        TranslatorBackend::Google => {
            info!(url = %config.translate_url, "Using Google translator");
            Ok(Arc::new(GoogleTranslator::new(&config.translate_url)?))
        }
        TranslatorBackend::None => {
            info!("Translation disabled, assuming working-language input");
            Ok(Arc::new(IdentityTranslator::new(
                config.working_language.clone(),
            )))
        }
    }
}
