use crate::error::AppError;
use crate::models::{SummaryMeta, SummaryResult, SummaryStrategy};
use crate::services::abstractive::{length_bounds, LazySummarizer};

use super::extractive::{extractive_summary, DEFAULT_MAX_SENTENCES};
use super::sentences::word_count;

pub const MAX_INPUT_CHARS: usize = 1000;

const EXTRACTIVE_MIN_WORDS: usize = 30;
const ABSTRACTIVE_MIN_WORDS: usize = 70;

/// Trims `text` and rejects empty or oversized input.
pub fn validate_text(text: Option<&str>) -> Result<&str, AppError> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::InvalidInput("Text is required".to_string()));
    }
    Ok(text)
}

pub fn select_strategy(word_count: usize) -> SummaryStrategy {
    match word_count {
        n if n < EXTRACTIVE_MIN_WORDS => SummaryStrategy::OriginalTooShort,
        n if n < ABSTRACTIVE_MIN_WORDS => SummaryStrategy::ExtractiveSmart,
        _ => SummaryStrategy::Abstractive,
    }
}

/// Summarizes `text`, choosing the strategy from its word count.
pub async fn summarize(text: Option<&str>, gateway: &LazySummarizer) -> Result<SummaryResult, AppError> {
    let text = validate_text(text)?;
    if text.chars().count() > MAX_INPUT_CHARS {
        return Err(AppError::InvalidInput(format!(
            "Input must be <= {} characters",
            MAX_INPUT_CHARS
        )));
    }

    let original_words = word_count(text);
    let strategy = select_strategy(original_words);
    tracing::info!("Summarizing {} words with strategy {:?}", original_words, strategy);

    let summary = match strategy {
        SummaryStrategy::OriginalTooShort => text.to_string(),
        SummaryStrategy::ExtractiveSmart => extractive_summary(text, DEFAULT_MAX_SENTENCES),
        SummaryStrategy::Abstractive => {
            let (max_length, min_length) = length_bounds(original_words);
            let start = std::time::Instant::now();
            let summary = gateway
                .get()?
                .summarize(text, max_length, min_length)
                .await?;
            tracing::info!(
                "Abstractive summary generated in {:?} (bounds {}..={})",
                start.elapsed(),
                min_length,
                max_length
            );
            summary.trim().to_string()
        }
    };

    Ok(SummaryResult {
        original: text.to_string(),
        meta: SummaryMeta {
            strategy,
            original_words,
            summary_words: word_count(&summary),
        },
        summary,
    })
}
