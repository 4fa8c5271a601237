pub mod extractive;
pub mod sentences;
pub mod summarizer;

pub use sentences::split_sentences;
pub use summarizer::summarize;
