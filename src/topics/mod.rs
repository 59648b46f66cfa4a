// Topic extraction: weighted density analysis over page text.
//
// Pipeline: fragments -> (phrases, keywords) -> rank.

pub mod density;
pub mod fragments;
pub mod keywords;
pub mod phrases;
pub mod rank;
pub mod settings;
pub mod stopwords;
pub mod tokenizer;
pub mod traits;
