use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use pagetopics::classify::{clamp_limit, Classifier};
use pagetopics::config::Config;
use pagetopics::output::terminal;
use pagetopics::page::fetcher::HttpPageSource;
use pagetopics::page::parser::PageParser;

/// pagetopics: extract ranked topics from web pages.
///
/// Fetches a page, weighs its title, headings, metadata, links and body text,
/// and reports the keywords and phrases that best describe it.
#[derive(Parser)]
#[command(name = "pagetopics", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single URL
    Classify {
        /// The page to classify (http or https)
        url: String,

        /// Number of topics to return (1-50, default from PAGETOPICS_DEFAULT_LIMIT)
        #[arg(long)]
        limit: Option<i64>,

        /// Print the raw JSON result instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Classify several URLs, pausing between fetches
    Batch {
        /// The pages to classify
        #[arg(required = true)]
        urls: Vec<String>,

        /// Number of topics per URL (1-50)
        #[arg(long)]
        limit: Option<i64>,

        #[arg(long)]
        json: bool,
    },

    /// Extract topics from a local HTML file (no network access)
    Extract {
        /// Path to an HTML file
        file: PathBuf,

        #[arg(long)]
        limit: Option<i64>,

        #[arg(long)]
        json: bool,
    },

    /// Run the JSON API server
    #[cfg(feature = "web")]
    Serve {
        #[arg(long, default_value = "8080")]
        port: u16,

        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pagetopics=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Classify { url, limit, json } => {
            let classifier = build_classifier(&config)?;
            let limit = clamp_limit(limit.unwrap_or(config.default_limit as i64));

            let result = classifier.classify(&url, limit).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_classification(&result);
            }
        }

        Commands::Batch { urls, limit, json } => {
            if urls.len() > config.max_batch {
                anyhow::bail!(
                    "Maximum {} URLs allowed per batch (got {}).\n\
                     Raise PAGETOPICS_MAX_BATCH to allow more.",
                    config.max_batch,
                    urls.len()
                );
            }

            let classifier = build_classifier(&config)?;
            let limit = clamp_limit(limit.unwrap_or(config.default_limit as i64));

            let progress = ProgressBar::new(urls.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );

            let batch = classifier
                .classify_batch(&urls, limit, |result| {
                    progress.set_message(result.url.clone());
                    progress.inc(1);
                })
                .await;
            progress.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(&batch)?);
            } else {
                terminal::display_batch(&batch);
            }
        }

        Commands::Extract { file, limit, json } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let page = PageParser::new()?.parse(&html);

            info!(file = %file.display(), "Parsed local HTML file");

            let classifier = build_classifier(&config)?;
            let limit = clamp_limit(limit.unwrap_or(config.default_limit as i64));
            let source = format!("file://{}", file.display());
            let result = classifier.classify_record(&source, &page, limit, 0.0);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_classification(&result);
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            pagetopics::web::run_server(config, port, &bind).await?;
        }
    }

    Ok(())
}

/// Validate engine settings and wire the HTTP page source to the extractor.
fn build_classifier(config: &Config) -> Result<Classifier> {
    let extractor = config.build_extractor()?;
    let source = HttpPageSource::new(&config.user_agent, config.fetch_timeout)?;
    Ok(Classifier::new(Arc::new(source), Arc::new(extractor)).with_batch_delay(config.batch_delay))
}
