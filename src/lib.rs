// pagetopics: weighted density topic extraction for web pages.
//
// This is the library root. Each module corresponds to a major subsystem:
// page fetching/parsing, the topic engine, classification orchestration,
// terminal output and the optional JSON API.

pub mod classify;
pub mod config;
pub mod error;
pub mod output;
pub mod page;
pub mod topics;

#[cfg(feature = "web")]
pub mod web;
