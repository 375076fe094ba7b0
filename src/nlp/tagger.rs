//! Part-of-speech tagging
//!
//! [`PosTagger`] is the seam for plugging in a statistical tagger. The
//! built-in [`HeuristicTagger`] uses closed-class word lists, capitalization
//! and suffix rules, which is enough to drive the chunk grammar on
//! expository English text.

use crate::errors::{AssessError, Result};
use crate::types::PosTag;

/// Assigns one tag per word of a sentence
pub trait PosTagger {
    /// Tag the words of a single sentence, in order.
    ///
    /// Implementations must return exactly `words.len()` tags or an error.
    fn tag(&self, words: &[&str]) -> Result<Vec<PosTag>>;
}

impl<T: PosTagger + ?Sized> PosTagger for &T {
    fn tag(&self, words: &[&str]) -> Result<Vec<PosTag>> {
        (**self).tag(words)
    }
}

/// Rule-based English tagger
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    /// Create a new heuristic tagger
    pub fn new() -> Self {
        Self
    }

    /// Guess the tag of `word`, given the tag assigned to the previous word
    fn guess_pos(&self, word: &str, position: usize, prev: Option<PosTag>) -> PosTag {
        if !word.chars().any(|c| c.is_alphanumeric()) {
            return PosTag::Punctuation;
        }

        if word
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return PosTag::Numeral;
        }

        let lower = word.to_lowercase();

        if let Some(pos) = self.function_word_pos(&lower) {
            return pos;
        }

        // Word segmentation keeps "don't" whole, so negated auxiliaries land here
        if lower.ends_with("n't") || lower.ends_with("n\u{2019}t") {
            return PosTag::Verb;
        }

        let alphabetic: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
        let is_acronym = alphabetic.len() >= 2 && alphabetic.iter().all(|c| c.is_uppercase());
        let is_capitalized = word.chars().next().is_some_and(|c| c.is_uppercase());

        if is_acronym {
            return PosTag::ProperNoun;
        }

        // Sentence-initial capitals are judged on their lowercase form
        if is_capitalized && position > 0 {
            return PosTag::ProperNoun;
        }

        self.guess_from_suffix(&lower, prev)
    }

    fn guess_from_suffix(&self, lower: &str, prev: Option<PosTag>) -> PosTag {
        if lower.ends_with("ly") && lower.len() > 4 {
            return PosTag::Adverb;
        }

        if lower.ends_with("ing") && lower.len() > 5 {
            // "is running" vs "machine learning"
            return if prev == Some(PosTag::Verb) {
                PosTag::Verb
            } else {
                PosTag::Noun
            };
        }

        if (lower.ends_with("ed") && lower.len() > 4 && !lower.ends_with("eed"))
            || lower.ends_with("ize")
            || lower.ends_with("ise")
            || lower.ends_with("ify")
        {
            return PosTag::Verb;
        }

        if lower.ends_with("ful")
            || lower.ends_with("less")
            || lower.ends_with("ous")
            || lower.ends_with("ive")
            || lower.ends_with("able")
            || lower.ends_with("ible")
            || lower.ends_with("al")
            || lower.ends_with("ic")
        {
            return PosTag::Adjective;
        }

        if lower.ends_with('s')
            && lower.len() > 3
            && !lower.ends_with("ss")
            && !lower.ends_with("us")
            && !lower.ends_with("is")
        {
            // "it stores" vs "the stores"
            return if prev == Some(PosTag::Pronoun) {
                PosTag::Verb
            } else {
                PosTag::PluralNoun
            };
        }

        // Most open-class words left at this point are nouns
        PosTag::Noun
    }

    fn function_word_pos(&self, lower: &str) -> Option<PosTag> {
        let pos = match lower {
            // Determiners
            "a" | "an" | "the" | "this" | "that" | "these" | "those" | "my" | "your" | "his"
            | "her" | "its" | "our" | "their" | "some" | "any" | "each" | "every" | "no"
            | "all" | "both" | "another" => PosTag::Determiner,
            // Coordinating conjunctions
            "and" | "or" | "but" | "nor" | "yet" | "so" => PosTag::Conjunction,
            // Prepositions and subordinators
            "of" | "to" | "in" | "for" | "on" | "with" | "at" | "from" | "by" | "about" | "as"
            | "into" | "like" | "through" | "after" | "over" | "between" | "out" | "against"
            | "during" | "without" | "before" | "under" | "around" | "among" | "within"
            | "upon" | "across" | "if" | "because" | "while" | "though" | "although"
            | "whether" | "unless" | "until" | "since" | "than" => PosTag::Preposition,
            // Pronouns
            "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them"
            | "myself" | "yourself" | "itself" | "ourselves" | "themselves" | "who" | "whom"
            | "which" | "what" | "whose" => PosTag::Pronoun,
            // Auxiliaries, modals and very common verbs
            "is" | "are" | "was" | "were" | "be" | "been" | "being" | "am" | "has" | "have"
            | "had" | "do" | "does" | "did" | "can" | "could" | "will" | "would" | "shall"
            | "should" | "may" | "might" | "must" | "make" | "makes" | "made" | "use"
            | "uses" | "used" | "include" | "includes" | "provide" | "provides" => PosTag::Verb,
            // Adverbs and particles without an -ly suffix
            "not" | "also" | "very" | "too" | "often" | "always" | "never" | "then"
            | "there" | "here" | "when" | "where" | "how" | "why" | "well" | "only" | "even"
            | "just" | "still" | "already" | "again" => PosTag::Adverb,
            // Common adjectives that no suffix rule catches
            "new" | "old" | "large" | "small" | "big" | "high" | "low" | "good" | "bad"
            | "many" | "much" | "more" | "most" | "other" | "such" | "same" | "different"
            | "main" | "basic" | "simple" | "complex" | "important" | "primary" => {
                PosTag::Adjective
            }
            _ => return None,
        };
        Some(pos)
    }
}

impl PosTagger for HeuristicTagger {
    fn tag(&self, words: &[&str]) -> Result<Vec<PosTag>> {
        let mut tags = Vec::with_capacity(words.len());
        for (position, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(AssessError::tagging(format!(
                    "empty token at position {}",
                    position
                )));
            }
            let prev = tags.last().copied();
            tags.push(self.guess_pos(word, position, prev));
        }
        Ok(tags)
    }
}
