// Composition tests: verifying that the pieces chain together correctly.
//
// These tests exercise the data flow between modules:
//   HTML -> PageParser -> DensityExtractor -> Classifier -> Summary
// with a canned PageSource standing in for the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use pagetopics::classify::{summarize, Classifier};
use pagetopics::error::ClassifyError;
use pagetopics::page::fetcher::PageSource;
use pagetopics::page::parser::PageParser;
use pagetopics::page::PageRecord;
use pagetopics::topics::density::DensityExtractor;
use pagetopics::topics::rank::TopicKind;

const CAMPING_PAGE: &str = r#"<html>
<head>
  <title>How to Introduce Your Indoorsy Friend to the Outdoors</title>
  <meta name="description" content="Tips for a first camping trip with a friend who prefers staying indoors.">
</head>
<body>
  <nav><a href="/shop">Shop camping gear</a></nav>
  <article>
    <h1>How to Introduce Your Indoorsy Friend to the Outdoors</h1>
    <h2>Pick an easy camping trip</h2>
    <h2>Bring comfortable camping gear</h2>
    <p>A first camping trip should be short. Choose a campground with water and
       restrooms, pack comfortable sleeping pads, and plan simple camp meals.</p>
    <img src="/tent.jpg" alt="Tent at a lakeside campground">
  </article>
</body>
</html>"#;

/// Serves parsed fixtures by URL and counts fetches.
struct StubSource {
    pages: HashMap<String, PageRecord>,
    fetches: AtomicUsize,
}

impl StubSource {
    fn new() -> Self {
        let parser = PageParser::new().unwrap();
        let mut pages = HashMap::new();
        pages.insert(
            "https://blog.example.com/camp/indoorsy-friend".to_string(),
            parser.parse(CAMPING_PAGE),
        );
        pages.insert(
            "https://blog.example.com/empty".to_string(),
            PageRecord::default(),
        );
        Self {
            pages,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn fetch_page(&self, url: &str) -> Result<PageRecord, ClassifyError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(url) {
            Some(page) => Ok(page.clone()),
            None => Err(ClassifyError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn classifier(source: Arc<StubSource>) -> Classifier {
    Classifier::new(source, Arc::new(DensityExtractor::default()))
        .with_batch_delay(Duration::ZERO)
}

// ============================================================
// Chain: HTML -> PageRecord -> topics
// ============================================================

#[test]
fn parsed_page_yields_camping_topics() {
    let page = PageParser::new().unwrap().parse(CAMPING_PAGE);
    let topics = pagetopics::topics::traits::TopicExtractor::extract(
        &DensityExtractor::default(),
        &page,
    );
    assert!(!topics.is_empty());
    assert!(
        topics
            .iter()
            .any(|t| t.text.to_lowercase().contains("camping")),
        "expected a camping topic, got {:?}",
        topics.iter().map(|t| &t.text).collect::<Vec<_>>()
    );
    // Navigation links never reach the engine
    assert!(page.links.iter().all(|l| l.text != "Shop camping gear"));
}

// ============================================================
// Classifier: single URL
// ============================================================

#[tokio::test]
async fn classify_success_respects_limit() {
    let source = Arc::new(StubSource::new());
    let result = classifier(source.clone())
        .classify("https://blog.example.com/camp/indoorsy-friend", 5)
        .await;

    assert!(result.success);
    assert_eq!(
        result.page_title.as_deref(),
        Some("How to Introduce Your Indoorsy Friend to the Outdoors")
    );
    assert_eq!(result.topics.len(), 5);

    let detailed = result.topics_detailed.as_ref().unwrap();
    let names: Vec<&str> = detailed.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(result.topics, names);

    let meta = result.metadata.as_ref().unwrap();
    assert_eq!(meta.topics_returned, 5);
    assert!(meta.topics_found >= meta.topics_returned);
    assert!(meta.topics_found <= 20);
    assert!(meta.total_time >= 0.0);
    assert!(result.error.is_none());
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_url_fails_without_fetching() {
    let source = Arc::new(StubSource::new());
    let result = classifier(source.clone()).classify("not a url", 10).await;

    assert!(!result.success);
    assert!(result.topics.is_empty());
    assert!(result.error.as_deref().unwrap().contains("Invalid URL"));
    assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fetch_failure_reports_url_and_cause() {
    let source = Arc::new(StubSource::new());
    let result = classifier(source)
        .classify("https://blog.example.com/missing", 10)
        .await;

    assert!(!result.success);
    assert_eq!(result.url, "https://blog.example.com/missing");
    let error = result.error.unwrap();
    assert!(error.contains("https://blog.example.com/missing"));
    assert!(error.contains("404"));
}

#[tokio::test]
async fn empty_page_is_success_with_no_topics() {
    let source = Arc::new(StubSource::new());
    let result = classifier(source)
        .classify("https://blog.example.com/empty", 10)
        .await;

    assert!(result.success);
    assert!(result.topics.is_empty());
    assert_eq!(result.metadata.unwrap().topics_found, 0);
}

// ============================================================
// Classifier: batch
// ============================================================

#[tokio::test]
async fn batch_classifies_every_url_in_order() {
    let source = Arc::new(StubSource::new());
    let urls = vec![
        "https://blog.example.com/camp/indoorsy-friend".to_string(),
        "https://blog.example.com/missing".to_string(),
        "https://blog.example.com/empty".to_string(),
    ];

    let mut seen = Vec::new();
    let batch = classifier(source)
        .classify_batch(&urls, 3, |r| seen.push(r.url.clone()))
        .await;

    assert!(batch.success);
    assert_eq!(batch.total_urls, 3);
    assert_eq!(seen, urls);
    let outcomes: Vec<bool> = batch.results.iter().map(|r| r.success).collect();
    assert_eq!(outcomes, vec![true, false, true]);
    assert!(batch.results[0].topics.len() <= 3);
}

#[tokio::test]
async fn batch_pauses_between_fetches() {
    let source = Arc::new(StubSource::new());
    let classifier = Classifier::new(source, Arc::new(DensityExtractor::default()))
        .with_batch_delay(Duration::from_millis(200));
    let urls = vec![
        "https://blog.example.com/empty".to_string(),
        "https://blog.example.com/empty".to_string(),
    ];

    let start = Instant::now();
    classifier.classify_batch(&urls, 10, |_| {}).await;
    assert!(
        start.elapsed() >= Duration::from_millis(150),
        "expected a politeness delay, got {:?}",
        start.elapsed()
    );
}

// ============================================================
// Summary
// ============================================================

#[tokio::test]
async fn summary_counts_topic_kinds() {
    let source = Arc::new(StubSource::new());
    let result = classifier(source)
        .classify("https://blog.example.com/camp/indoorsy-friend", 10)
        .await;
    let summary = summarize(&result);

    let detailed = result.topics_detailed.as_ref().unwrap();
    let phrases = detailed
        .iter()
        .filter(|t| t.kind == TopicKind::Phrase)
        .count();

    assert_eq!(summary.status, "success");
    assert_eq!(summary.total_topics, detailed.len());
    assert_eq!(summary.phrase_count, phrases);
    assert_eq!(summary.keyword_count, detailed.len() - phrases);
    assert!(summary.average_score > 0.0);
    assert!(summary.error.is_none());
}

#[tokio::test]
async fn summary_of_failure_carries_error() {
    let source = Arc::new(StubSource::new());
    let result = classifier(source).classify("ftp://example.com", 10).await;
    let summary = summarize(&result);
    assert_eq!(summary.status, "failed");
    assert!(summary.error.unwrap().contains("ftp://example.com"));
}
