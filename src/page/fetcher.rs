// Page fetching: turns a URL into a parsed PageRecord.
//
// PageSource is the seam between the classifier and the network. The HTTP
// implementation is a thin reqwest wrapper; tests plug in canned pages.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tracing::debug;

use crate::error::ClassifyError;

use super::parser::PageParser;
use super::PageRecord;

/// Default user agent sent with every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; PageTopicsBot/1.0)";

/// Anything that can produce a PageRecord for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch and parse a page. Failures carry the URL and a readable cause.
    async fn fetch_page(&self, url: &str) -> Result<PageRecord, ClassifyError>;
}

/// Fetches pages over HTTP(S) and parses them with `PageParser`.
pub struct HttpPageSource {
    client: reqwest::Client,
    parser: PageParser,
}

impl HttpPageSource {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            parser: PageParser::new()?,
        })
    }

    /// GET the raw markup for a URL.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ClassifyError> {
        debug!(url = url, "Fetching page");

        let fetch_error = |e: reqwest::Error| ClassifyError::Fetch {
            url: url.to_string(),
            cause: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(fetch_error)
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> Result<PageRecord, ClassifyError> {
        let html = self.fetch_html(url).await?;
        Ok(self.parser.parse(&html))
    }
}
