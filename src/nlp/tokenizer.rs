//! Unicode-aware tokenization
//!
//! This module provides UAX #29 sentence and word segmentation. Words and
//! punctuation marks both come out as tokens; whitespace never does.

use crate::types::Sentence;
use unicode_segmentation::UnicodeSegmentation;

/// A Unicode-aware tokenizer following UAX #29
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Split text into trimmed, non-empty sentences
    ///
    /// Single line breaks are treated as spaces so hard-wrapped paragraphs
    /// stay intact; a blank line still ends a sentence.
    pub fn split_sentences(&self, text: &str) -> Vec<Sentence> {
        let unwrapped = unwrap_lines(text);
        let mut sentences = Vec::new();

        for (start, segment) in unwrapped.split_sentence_bound_indices() {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                continue;
            }
            let lead = segment.len() - segment.trim_start().len();
            let abs_start = start + lead;
            let abs_end = abs_start + trimmed.len();
            sentences.push(Sentence::new(
                &text[abs_start..abs_end],
                abs_start,
                abs_end,
                sentences.len(),
            ));
        }

        sentences
    }

    /// Split one sentence into word and punctuation tokens
    pub fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        sentence
            .split_word_bounds()
            .filter(|w| !w.trim().is_empty())
            .collect()
    }

    /// Tokenize text sentence by sentence, returning the flattened token texts
    pub fn word_tokens(&self, text: &str) -> Vec<String> {
        self.split_sentences(text)
            .iter()
            .flat_map(|s| {
                self.words(&s.text)
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Replace lone line breaks with spaces, keeping byte offsets unchanged.
///
/// A `\n` that has another `\n` as its nearest non-`\r` neighbour is part of
/// a paragraph break and is kept.
fn unwrap_lines(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());

    for (idx, ch) in text.char_indices() {
        match ch {
            '\r' => out.push(' '),
            '\n' => {
                let prev_newline = bytes[..idx]
                    .iter()
                    .rev()
                    .find(|&&b| b != b'\r')
                    .is_some_and(|&b| b == b'\n');
                let next_newline = bytes[idx + 1..]
                    .iter()
                    .find(|&&b| b != b'\r')
                    .is_some_and(|&b| b == b'\n');
                if prev_newline || next_newline {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_split() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.split_sentences("Hello world. This is a test.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Hello world.");
        assert_eq!(sentences[1].text, "This is a test.");
        assert_eq!(sentences[1].index, 1);
    }

    #[test]
    fn test_sentence_offsets_point_into_source() {
        let tokenizer = Tokenizer::new();
        let text = "  First one.   Second one.  ";
        for sentence in tokenizer.split_sentences(text) {
            assert_eq!(&text[sentence.start..sentence.end], sentence.text);
        }
    }

    #[test]
    fn test_hard_wrapped_paragraph_is_one_sentence() {
        let tokenizer = Tokenizer::new();
        let text = "Machine learning is a subset\nof artificial intelligence.";
        let sentences = tokenizer.split_sentences(text);

        assert_eq!(sentences.len(), 1);
        // Original text is preserved, line break included
        assert!(sentences[0].text.contains('\n'));
    }

    #[test]
    fn test_blank_line_breaks_sentences() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.split_sentences("Database Systems\n\nA database stores data.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Database Systems");
    }

    #[test]
    fn test_words_keep_punctuation() {
        let tokenizer = Tokenizer::new();
        let words = tokenizer.words("The engine stores, retrieves and updates data.");

        assert_eq!(
            words,
            vec!["The", "engine", "stores", ",", "retrieves", "and", "updates", "data", "."]
        );
    }

    #[test]
    fn test_contractions_stay_whole() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.words("The pool doesn't grow."),
            vec!["The", "pool", "doesn't", "grow", "."]
        );
    }

    #[test]
    fn test_word_tokens_across_sentences() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.word_tokens("the cat sat. the dog ran");

        assert_eq!(tokens, vec!["the", "cat", "sat", ".", "the", "dog", "ran"]);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.split_sentences("").is_empty());
        assert!(tokenizer.split_sentences("   \n\n  ").is_empty());
        assert!(tokenizer.word_tokens("").is_empty());
    }

    #[test]
    fn test_unicode_handling() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.word_tokens("Café résumé naïve.");

        assert!(tokens.iter().any(|t| t == "Café"));
        assert!(tokens.iter().any(|t| t == "résumé"));
    }

    #[test]
    fn test_unwrap_lines_preserves_length() {
        let text = "a\nb\r\nc\n\nd";
        let unwrapped = unwrap_lines(text);

        assert_eq!(unwrapped.len(), text.len());
        assert_eq!(unwrapped, "a b  c\n\nd");
    }
}
