// Page records: the structured view of a fetched web page.
//
// A PageRecord is produced once by the parser and never modified. Every
// field may be empty; the topic engine treats missing and empty alike.

pub mod fetcher;
pub mod parser;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured text pulled from a page, ready for topic extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    /// Heading text keyed by level ("h1".."h6"), in document order
    pub headings: BTreeMap<String, Vec<String>>,
    pub body_text: String,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    /// Site-specific content (product title, article title, breadcrumbs)
    pub structured_content: BTreeMap<String, StructuredValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// A structured-content entry is either one string or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructuredValue {
    Text(String),
    List(Vec<String>),
}

impl StructuredValue {
    /// Iterate the entry's strings, flattening lists.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            StructuredValue::Text(text) => std::slice::from_ref(text),
            StructuredValue::List(items) => items,
        };
        slice.iter().map(String::as_str)
    }
}

impl PageRecord {
    /// Headings for one level ("h1".."h6"); empty if the page has none.
    pub fn headings(&self, level: &str) -> &[String] {
        self.headings.get(level).map(Vec::as_slice).unwrap_or(&[])
    }
}
