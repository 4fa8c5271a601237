use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Default)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SummaryStrategy {
    #[serde(rename = "original-too-short")]
    OriginalTooShort,
    #[serde(rename = "extractive-smart")]
    ExtractiveSmart,
    #[serde(rename = "bart-abstractive")]
    Abstractive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMeta {
    pub strategy: SummaryStrategy,
    pub original_words: usize,
    pub summary_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub original: String,
    pub summary: String,
    pub meta: SummaryMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularSummary {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    /// Keyed by column name, in declaration order.
    pub numeric_summary: IndexMap<String, ColumnProfile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularResponse {
    pub success: bool,
    #[serde(flatten)]
    pub summary: TabularSummary,
    pub file_name: String,
}
