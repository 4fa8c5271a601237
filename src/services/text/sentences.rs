use once_cell::sync::Lazy;
use regex::Regex;

// Terminal punctuation followed by at least one whitespace character.
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").expect("sentence break pattern is valid")
});

/// Splits text into sentences on whitespace that follows `.`, `!` or `?`.
///
/// The punctuation stays with the sentence it terminates. Segments are
/// trimmed and empty ones dropped. No abbreviation handling is attempted,
/// so "Dr. Smith" yields two segments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is a single ASCII byte.
        let end = m.start() + 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        sentences.push(segment);
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
