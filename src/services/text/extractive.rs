use super::sentences::{split_sentences, word_count};

pub const DEFAULT_MAX_SENTENCES: usize = 2;

const FIRST_SENTENCE_BONUS: u32 = 3;
const LAST_SENTENCE_BONUS: u32 = 1;
const BALANCED_LENGTH_BONUS: u32 = 2;
const BALANCED_LENGTH_WORDS: std::ops::RangeInclusive<usize> = 10..=25;

/// Builds a summary from verbatim sentences of `text`.
///
/// Text with at most `max_sentences` sentences is returned unchanged.
/// Otherwise sentences are ranked by position and length, the top
/// `max_sentences` are picked, and the picks are emitted in the order they
/// appear in the source.
pub fn extractive_summary(text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= max_sentences {
        return text.to_string();
    }

    let last = sentences.len() - 1;
    let mut scored: Vec<(u32, &str)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| (score_sentence(idx, last, sentence), *sentence))
        .collect();

    // `sort_by` is stable: equal scores keep their source order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let selected: Vec<&str> = scored
        .iter()
        .take(max_sentences)
        .map(|(_, sentence)| *sentence)
        .collect();

    sentences
        .iter()
        .filter(|sentence| selected.contains(*sentence))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn score_sentence(idx: usize, last: usize, sentence: &str) -> u32 {
    let mut score = 0;
    if idx == 0 {
        score += FIRST_SENTENCE_BONUS;
    }
    if idx == last {
        score += LAST_SENTENCE_BONUS;
    }
    if BALANCED_LENGTH_WORDS.contains(&word_count(sentence)) {
        score += BALANCED_LENGTH_BONUS;
    }
    score
}
