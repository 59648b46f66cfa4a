// Weighted-fragment collection: the first stage of density analysis.
//
// Walks a PageRecord in a fixed order and pairs each piece of text with the
// importance weight of the field it came from. Links, images and body text are
// hard-truncated so very large pages cost the same as moderately sized ones.

use crate::page::PageRecord;

use super::settings::{CollectorCaps, FieldKind, FieldWeights};

/// A unit of page text paired with an importance weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedFragment<'a> {
    pub text: &'a str,
    pub weight: u32,
}

/// Collect weighted fragments in order: title, meta description, meta
/// keywords, h1s, h2s, h3s, structured content, link text, image alt text,
/// then the (truncated) body. Blank text never produces a fragment.
pub fn collect<'a>(
    page: &'a PageRecord,
    weights: &FieldWeights,
    caps: &CollectorCaps,
) -> Vec<WeightedFragment<'a>> {
    let mut fragments = Vec::new();
    let mut push = |text: &'a str, kind: FieldKind| {
        if !text.trim().is_empty() {
            fragments.push(WeightedFragment {
                text,
                weight: weights.weight(kind),
            });
        }
    };

    push(&page.title, FieldKind::Title);
    push(&page.meta_description, FieldKind::MetaDescription);
    push(&page.meta_keywords, FieldKind::MetaKeywords);

    for (level, kind) in [("h1", FieldKind::H1), ("h2", FieldKind::H2), ("h3", FieldKind::H3)] {
        for heading in page.headings(level) {
            push(heading, kind);
        }
    }

    for value in page.structured_content.values() {
        for item in value.items() {
            push(item, FieldKind::StructuredContent);
        }
    }

    for link in page.links.iter().take(caps.max_links) {
        push(&link.text, FieldKind::LinkText);
    }

    for image in page.images.iter().take(caps.max_images) {
        push(&image.alt, FieldKind::ImageAlt);
    }

    push(
        truncate_chars(&page.body_text, caps.max_body_chars),
        FieldKind::BodyText,
    );

    fragments
}

/// Borrow at most the first `max_chars` characters of `text`, never
/// splitting a multi-byte character.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
