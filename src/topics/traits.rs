// Topic extractor trait: swap-ready abstraction.
//
// The classifier and web layer only see this trait, so the density engine can
// be replaced (or stubbed in tests) without touching the rest of the service.

use crate::page::PageRecord;

use super::rank::Topic;

/// Trait for turning a parsed page into a ranked topic list.
///
/// Extraction is a pure function of the page: it never fails, and an empty or
/// uninformative page simply yields an empty list.
pub trait TopicExtractor: Send + Sync {
    /// Analyze a page and return topics ordered by descending score.
    fn extract(&self, page: &PageRecord) -> Vec<Topic>;
}
