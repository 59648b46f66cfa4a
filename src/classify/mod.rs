// Page classification: fetch a URL, extract its topics, report the result.
//
// The classifier owns the caller-facing contract: URL validation, the topic
// limit, timing metadata and batch politeness. Failures never escape as
// errors; they become unsuccessful results carrying the URL and the cause.

pub mod throttle;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::error::ClassifyError;
use crate::page::fetcher::PageSource;
use crate::page::PageRecord;
use crate::topics::rank::{Topic, TopicKind};
use crate::topics::traits::TopicExtractor;

use self::throttle::Throttle;

/// Topics returned when the caller doesn't ask for a specific count.
pub const DEFAULT_TOPIC_LIMIT: usize = 10;
/// Largest topic count a caller may request.
pub const MAX_TOPIC_LIMIT: usize = 50;
/// Delay between consecutive fetches in a batch.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(500);

/// Outcome of classifying one URL.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    pub success: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    /// Topic text only, in rank order
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics_detailed: Option<Vec<Topic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Timing (seconds) and counts for a successful classification.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub scrape_time: f64,
    pub extraction_time: f64,
    pub total_time: f64,
    /// Topics the engine produced before the caller's limit
    pub topics_found: usize,
    pub topics_returned: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub success: bool,
    pub total_urls: usize,
    pub results: Vec<ClassificationResult>,
}

/// Aggregate view of one classification result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    pub total_topics: usize,
    pub phrase_count: usize,
    pub keyword_count: usize,
    pub average_score: f64,
    pub processing_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassificationResult {
    fn failure(url: &str, error: &ClassifyError) -> Self {
        Self {
            success: false,
            url: url.to_string(),
            page_title: None,
            topics: Vec::new(),
            topics_detailed: None,
            metadata: None,
            error: Some(error.to_string()),
        }
    }
}

/// Clamp a caller-requested topic count into [1, MAX_TOPIC_LIMIT].
pub fn clamp_limit(requested: i64) -> usize {
    requested.clamp(1, MAX_TOPIC_LIMIT as i64) as usize
}

/// Accept only absolute http(s) URLs.
pub fn validate_url(url: &str) -> Result<Url, ClassifyError> {
    let invalid = || ClassifyError::InvalidUrl(url.to_string());
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        _ => Err(invalid()),
    }
}

/// Coordinates a page source and a topic extractor.
#[derive(Clone)]
pub struct Classifier {
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn TopicExtractor>,
    batch_delay: Duration,
}

impl Classifier {
    pub fn new(source: Arc<dyn PageSource>, extractor: Arc<dyn TopicExtractor>) -> Self {
        Self {
            source,
            extractor,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Classify a URL, returning at most `limit` topics.
    pub async fn classify(&self, url: &str, limit: usize) -> ClassificationResult {
        if let Err(e) = validate_url(url) {
            warn!(url = url, error = %e, "Page classification failed");
            return ClassificationResult::failure(url, &e);
        }

        info!(url = url, "Classifying page");

        let started = Instant::now();
        let page = match self.source.fetch_page(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = url, error = %e, "Page classification failed");
                return ClassificationResult::failure(url, &e);
            }
        };
        let scrape_time = started.elapsed().as_secs_f64();

        info!(url = url, time_secs = round_to(scrape_time, 2), "Page scraped successfully");

        self.classify_record(url, &page, limit, scrape_time)
    }

    /// Run extraction on an already-parsed page.
    pub fn classify_record(
        &self,
        url: &str,
        page: &PageRecord,
        limit: usize,
        scrape_time: f64,
    ) -> ClassificationResult {
        let started = Instant::now();
        let all_topics = self.extractor.extract(page);
        let extraction_time = started.elapsed().as_secs_f64();

        info!(
            url = url,
            topics_found = all_topics.len(),
            time_secs = round_to(extraction_time, 2),
            "Topics extracted successfully"
        );

        let topics_found = all_topics.len();
        let detailed: Vec<Topic> = all_topics.into_iter().take(limit).collect();
        let topics: Vec<String> = detailed.iter().map(|t| t.text.clone()).collect();

        ClassificationResult {
            success: true,
            url: url.to_string(),
            page_title: Some(page.title.clone()),
            metadata: Some(Metadata {
                scrape_time: round_to(scrape_time, 3),
                extraction_time: round_to(extraction_time, 3),
                total_time: round_to(scrape_time + extraction_time, 3),
                topics_found,
                topics_returned: topics.len(),
            }),
            topics,
            topics_detailed: Some(detailed),
            error: None,
        }
    }

    /// Classify URLs one after another with a politeness delay between
    /// fetches. `on_result` sees each result as soon as it is ready.
    pub async fn classify_batch<F>(
        &self,
        urls: &[String],
        limit: usize,
        mut on_result: F,
    ) -> BatchResult
    where
        F: FnMut(&ClassificationResult),
    {
        let throttle = Throttle::new(self.batch_delay);
        let mut results = Vec::with_capacity(urls.len());

        for url in urls {
            throttle.acquire().await;
            let result = self.classify(url, limit).await;
            on_result(&result);
            results.push(result);
        }

        BatchResult {
            success: true,
            total_urls: urls.len(),
            results,
        }
    }
}

/// Summarize a classification result.
pub fn summarize(result: &ClassificationResult) -> Summary {
    if !result.success {
        return Summary {
            status: "failed".to_string(),
            page_title: None,
            total_topics: 0,
            phrase_count: 0,
            keyword_count: 0,
            average_score: 0.0,
            processing_time: 0.0,
            error: Some(
                result
                    .error
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
        };
    }

    let topics = result.topics_detailed.as_deref().unwrap_or_default();
    let phrase_count = topics
        .iter()
        .filter(|t| t.kind == TopicKind::Phrase)
        .count();
    let average_score = if topics.is_empty() {
        0.0
    } else {
        topics.iter().map(|t| t.score).sum::<f64>() / topics.len() as f64
    };

    Summary {
        status: "success".to_string(),
        page_title: result.page_title.clone(),
        total_topics: topics.len(),
        phrase_count,
        keyword_count: topics.len() - phrase_count,
        average_score: round_to(average_score, 2),
        processing_time: result.metadata.as_ref().map_or(0.0, |m| m.total_time),
        error: None,
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
