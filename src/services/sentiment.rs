use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::AppError;
use crate::models::{SentimentResult, Tone};
use crate::services::round_to;

/// Polarity at or beyond which text is no longer neutral, on either side.
pub const NEUTRAL_THRESHOLD: f64 = 0.25;

/// Lexicon-based scorer producing a compound polarity in `[-1, 1]`.
pub trait PolarityScorer: Send + Sync {
    fn compound(&self, text: &str) -> Result<f64, AppError>;
}

pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for VaderScorer {
    fn compound(&self, text: &str) -> Result<f64, AppError> {
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .ok_or_else(|| AppError::ModelError("compound score missing from analyzer output".to_string()))
    }
}

pub fn classify(polarity: f64) -> Tone {
    if polarity >= NEUTRAL_THRESHOLD {
        Tone::Positive
    } else if polarity <= -NEUTRAL_THRESHOLD {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Scores `text` and maps the polarity, rounded to 3 decimals, onto a tone.
pub fn analyze(text: &str, scorer: &dyn PolarityScorer) -> Result<SentimentResult, AppError> {
    let polarity = round_to(scorer.compound(text)?, 3);
    let tone = classify(polarity);
    tracing::info!("Sentiment polarity {} classified as {:?}", polarity, tone);
    Ok(SentimentResult { polarity, tone })
}
