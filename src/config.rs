use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::classify::{DEFAULT_BATCH_DELAY, DEFAULT_TOPIC_LIMIT};
use crate::page::fetcher::DEFAULT_USER_AGENT;
use crate::topics::density::DensityExtractor;
use crate::topics::settings::EngineConfig;
use crate::topics::stopwords::StopWords;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// variable is optional; unset means the built-in default.
pub struct Config {
    /// User agent sent with page requests (PAGETOPICS_USER_AGENT)
    pub user_agent: String,
    /// Per-request fetch timeout (PAGETOPICS_TIMEOUT_SECS, default 30)
    pub fetch_timeout: Duration,
    /// Politeness delay between batch fetches (PAGETOPICS_BATCH_DELAY_MS, default 500)
    pub batch_delay: Duration,
    /// Most URLs accepted in one batch (PAGETOPICS_MAX_BATCH, default 10)
    pub max_batch: usize,
    /// Topic count when the caller doesn't specify one (PAGETOPICS_DEFAULT_LIMIT)
    pub default_limit: usize,
    /// Topic engine tuning. Not validated until `build_extractor`.
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout: Duration::from_secs(30),
            batch_delay: DEFAULT_BATCH_DELAY,
            max_batch: 10,
            default_limit: DEFAULT_TOPIC_LIMIT,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A variable that is set but can't be parsed is an error rather than a
    /// silent fallback.
    pub fn load() -> Result<Self> {
        let defaults = Config::default();
        let mut engine = defaults.engine;

        if let Ok(source) = env::var("PAGETOPICS_STOP_WORDS") {
            engine.stop_words = match source.as_str() {
                "" | "builtin" => StopWords::builtin(),
                "none" => StopWords::empty(),
                language => StopWords::from_language(language).with_context(|| {
                    format!("PAGETOPICS_STOP_WORDS: no stop-word list for language {language:?}")
                })?,
            };
        }
        engine.min_word_length = env_or("PAGETOPICS_MIN_WORD_LENGTH", engine.min_word_length)?;
        engine.max_word_length = env_or("PAGETOPICS_MAX_WORD_LENGTH", engine.max_word_length)?;
        engine.min_phrase_length =
            env_or("PAGETOPICS_MIN_PHRASE_LENGTH", engine.min_phrase_length)?;
        engine.max_phrase_length =
            env_or("PAGETOPICS_MAX_PHRASE_LENGTH", engine.max_phrase_length)?;
        engine.phrase_score_boost = env_or("PAGETOPICS_PHRASE_BOOST", engine.phrase_score_boost)?;
        engine.max_topics = env_or("PAGETOPICS_MAX_TOPICS", engine.max_topics)?;

        Ok(Self {
            user_agent: env::var("PAGETOPICS_USER_AGENT").unwrap_or(defaults.user_agent),
            fetch_timeout: Duration::from_secs(env_or("PAGETOPICS_TIMEOUT_SECS", 30)?),
            batch_delay: Duration::from_millis(env_or("PAGETOPICS_BATCH_DELAY_MS", 500)?),
            max_batch: env_or("PAGETOPICS_MAX_BATCH", defaults.max_batch)?,
            default_limit: env_or("PAGETOPICS_DEFAULT_LIMIT", defaults.default_limit)?,
            engine,
        })
    }

    /// Validate the engine settings and build the extractor.
    /// Call this once at startup so bad tuning fails before any request.
    pub fn build_extractor(&self) -> Result<DensityExtractor> {
        DensityExtractor::new(self.engine.clone()).context("Invalid topic engine configuration")
    }
}

/// Parse an optional environment variable, naming it in the error.
fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid number, got {raw:?}")),
        _ => Ok(default),
    }
}
