// Classification failures reported back to callers.
//
// Everything that can go wrong before the topic engine runs lands here, always
// tagged with the URL so batch results can be matched to their input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch {url}: {cause}")]
    Fetch { url: String, cause: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl ClassifyError {
    /// The URL the failure is about.
    pub fn url(&self) -> &str {
        match self {
            ClassifyError::InvalidUrl(url) => url,
            ClassifyError::Fetch { url, .. } => url,
            ClassifyError::Status { url, .. } => url,
        }
    }
}
