//! Chunk → answer grouping
//!
//! [`CorpusChunker`] runs sentence splitting, tagging and chunking over a
//! corpus and folds every sentence into a [`ChunkIndex`] under the keys of
//! the chunks it contains.

use super::chunker::{chunk_key, NounChunker};
use crate::nlp::tagger::{HeuristicTagger, PosTagger};
use crate::nlp::tokenizer::Tokenizer;
use crate::types::Token;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Insertion-ordered mapping from chunk key to accumulated answer text.
///
/// Keys are stored once and looked up through a hash map; iteration follows
/// first-insertion order so random draws over the keys are reproducible.
#[derive(Debug, Default, Clone)]
pub struct ChunkIndex {
    /// Maps keys to their position in `entries`
    key_to_id: FxHashMap<Arc<str>, usize>,
    /// Keys and answers in insertion order
    entries: Vec<(Arc<str>, String)>,
}

impl ChunkIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the collision policy for one chunk occurrence.
    ///
    /// An unseen key is created only when `eligible` (the sentence passed the
    /// length filter); a known key always gets the sentence appended with no
    /// separator. Returns `true` if the index changed.
    pub fn record(&mut self, key: &str, sentence: &str, eligible: bool) -> bool {
        if let Some(&id) = self.key_to_id.get(key) {
            self.entries[id].1.push_str(sentence);
            return true;
        }

        if !eligible {
            return false;
        }

        let id = self.entries.len();
        let arc: Arc<str> = key.into();
        self.key_to_id.insert(arc.clone(), id);
        self.entries.push((arc, sentence.to_string()));
        true
    }

    /// Get the answer text for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.key_to_id.get(key).map(|&id| self.entries[id].1.as_str())
    }

    /// Get the key and answer at a position in insertion order
    pub fn entry(&self, id: usize) -> Option<(&str, &str)> {
        self.entries
            .get(id)
            .map(|(key, answer)| (key.as_ref(), answer.as_str()))
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.key_to_id.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_ref())
    }

    /// Key/answer pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, answer)| (key.as_ref(), answer.as_str()))
    }

    /// Get the number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a [`ChunkIndex`] from corpus text
#[derive(Debug, Clone)]
pub struct CorpusChunker<T: PosTagger = HeuristicTagger> {
    tokenizer: Tokenizer,
    tagger: T,
    chunker: NounChunker,
    min_sentence_tokens: usize,
}

impl Default for CorpusChunker<HeuristicTagger> {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusChunker<HeuristicTagger> {
    /// Create a chunker with the built-in tagger and the default length filter
    pub fn new() -> Self {
        Self::with_tagger(HeuristicTagger::new())
    }
}

impl<T: PosTagger> CorpusChunker<T> {
    /// Create a chunker around a custom tagger
    pub fn with_tagger(tagger: T) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            tagger,
            chunker: NounChunker::new(),
            min_sentence_tokens: 20,
        }
    }

    /// Set the sentence length filter for new keys
    pub fn with_min_sentence_tokens(mut self, min_sentence_tokens: usize) -> Self {
        self.min_sentence_tokens = min_sentence_tokens;
        self
    }

    /// Extract chunks from a corpus and group sentences by chunk key.
    ///
    /// Never fails: an empty corpus yields an empty index, and a sentence
    /// the tagger rejects is logged and skipped.
    pub fn extract_chunks(&self, corpus_text: &str) -> ChunkIndex {
        let mut index = ChunkIndex::new();

        if corpus_text.trim().is_empty() {
            tracing::warn!("no corpus text to extract chunks from");
            return index;
        }

        let sentences = self.tokenizer.split_sentences(corpus_text);
        let mut skipped = 0usize;

        for sentence in &sentences {
            let tokens = match self.tag_sentence(&sentence.text, sentence.index) {
                Ok(tokens) => tokens,
                Err(err) => {
                    tracing::warn!(
                        sentence = sentence.index,
                        error = %err,
                        "skipping sentence that could not be tagged"
                    );
                    skipped += 1;
                    continue;
                }
            };

            let eligible = tokens.len() > self.min_sentence_tokens;
            for chunk in self.chunker.extract_chunks(&tokens) {
                let key = chunk_key(&tokens, &chunk);
                index.record(&key, &sentence.text, eligible);
            }
        }

        tracing::debug!(
            sentences = sentences.len(),
            skipped,
            keys = index.len(),
            "built chunk index"
        );

        index
    }

    /// Tokenize and tag one sentence
    fn tag_sentence(&self, text: &str, sentence_idx: usize) -> crate::Result<Vec<Token>> {
        let words = self.tokenizer.words(text);
        let tags = self.tagger.tag(&words)?;

        if tags.len() != words.len() {
            return Err(crate::AssessError::tagging(format!(
                "tagger returned {} tags for {} tokens",
                tags.len(),
                words.len()
            )));
        }

        Ok(words
            .into_iter()
            .zip(tags)
            .enumerate()
            .map(|(token_idx, (word, pos))| Token::new(word, pos, sentence_idx, token_idx))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AssessError, Result};
    use crate::types::PosTag;

    /// A long sentence (> 20 tokens) containing "database engine".
    const LONG: &str = "The database engine is the part of the system that keeps every record \
                        safe on disk and serves each request that the application sends to it.";

    #[test]
    fn test_record_policy() {
        let mut index = ChunkIndex::new();

        // Short sentence cannot create a key
        assert!(!index.record("QUERY PROCESSOR", "Short one.", false));
        assert!(index.is_empty());

        assert!(index.record("QUERY PROCESSOR", "Long one.", true));
        // Once the key exists short sentences are appended without a separator
        assert!(index.record("QUERY PROCESSOR", "Short one.", false));

        assert_eq!(index.get("QUERY PROCESSOR"), Some("Long one.Short one."));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut index = ChunkIndex::new();
        index.record("B", "b", true);
        index.record("A", "a", true);
        index.record("B", "b", true);

        let keys: Vec<&str> = index.keys().collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(index.entry(0), Some(("B", "bb")));
        assert_eq!(index.entry(2), None);
        assert!(index.contains_key("A"));
        assert!(!index.contains_key("a"));
    }

    #[test]
    fn test_extract_from_long_sentence() {
        let index = CorpusChunker::new().extract_chunks(LONG);

        assert_eq!(index.get("DATABASE ENGINE"), Some(LONG));
    }

    #[test]
    fn test_short_sentence_cannot_seed_key() {
        let index = CorpusChunker::new().extract_chunks("The database engine stores data.");
        assert!(index.is_empty());
    }

    #[test]
    fn test_short_sentence_appended_after_seed() {
        let corpus = format!("{} Every database engine needs memory.", LONG);
        let index = CorpusChunker::new().extract_chunks(&corpus);

        let expected = format!("{}Every database engine needs memory.", LONG);
        assert_eq!(index.get("DATABASE ENGINE"), Some(expected.as_str()));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let shouted = LONG.replace("database engine", "Database Engine");
        let corpus = format!("{} {}", LONG, shouted);
        let index = CorpusChunker::new().extract_chunks(&corpus);

        let answer = index.get("DATABASE ENGINE").unwrap();
        assert!(answer.starts_with(LONG));
        assert!(answer.ends_with(shouted.as_str()));
    }

    #[test]
    fn test_lower_length_filter() {
        let index = CorpusChunker::new()
            .with_min_sentence_tokens(3)
            .extract_chunks("The database engine stores data.");
        assert!(index.contains_key("DATABASE ENGINE"));
    }

    #[test]
    fn test_empty_corpus() {
        assert!(CorpusChunker::new().extract_chunks("").is_empty());
        assert!(CorpusChunker::new().extract_chunks("  \n ").is_empty());
    }

    /// Fails on any sentence mentioning "broken"
    struct PickyTagger;

    impl PosTagger for PickyTagger {
        fn tag(&self, words: &[&str]) -> Result<Vec<PosTag>> {
            if words.contains(&"broken") {
                return Err(AssessError::tagging("cannot tag"));
            }
            HeuristicTagger::new().tag(words)
        }
    }

    #[test]
    fn test_tagger_failure_skips_sentence_only() {
        let broken = LONG.replace("disk", "broken");
        let corpus = format!("{} {}", broken, LONG);
        let index = CorpusChunker::with_tagger(PickyTagger).extract_chunks(&corpus);

        assert_eq!(index.get("DATABASE ENGINE"), Some(LONG));
    }

    /// Returns one tag too few
    struct ShortTagger;

    impl PosTagger for ShortTagger {
        fn tag(&self, words: &[&str]) -> Result<Vec<PosTag>> {
            Ok(vec![PosTag::Noun; words.len().saturating_sub(1)])
        }
    }

    #[test]
    fn test_tag_count_mismatch_is_skipped() {
        let index = CorpusChunker::with_tagger(ShortTagger).extract_chunks(LONG);
        assert!(index.is_empty());
    }
}
