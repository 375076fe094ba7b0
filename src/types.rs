//! Core types for rapid_assess
//!
//! This module defines the fundamental data structures used throughout the library:
//! part-of-speech tags, tokens, sentences, chunk spans, and configuration.

use crate::errors::{AssessError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Token
// ============================================================================

/// Part-of-speech tags
///
/// Only the first five variants take part in the chunk grammar. The rest
/// exist so taggers can say what a token is instead of lumping everything
/// into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    /// Singular or mass common noun (NN)
    Noun,
    /// Plural common noun (NNS)
    PluralNoun,
    /// Singular proper noun (NNP)
    ProperNoun,
    /// Preposition or subordinating conjunction (IN)
    Preposition,
    /// Determiner (DT)
    Determiner,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Conjunction,
    Numeral,
    Punctuation,
    Other,
}

impl PosTag {
    /// Parse from a Penn Treebank tag
    pub fn from_penn(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NN" => PosTag::Noun,
            "NNS" => PosTag::PluralNoun,
            "NNP" => PosTag::ProperNoun,
            "IN" => PosTag::Preposition,
            "DT" => PosTag::Determiner,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" | "MD" => PosTag::Verb,
            "JJ" | "JJR" | "JJS" => PosTag::Adjective,
            "RB" | "RBR" | "RBS" => PosTag::Adverb,
            "PRP" | "PRP$" | "WP" | "WP$" => PosTag::Pronoun,
            "CC" => PosTag::Conjunction,
            "CD" => PosTag::Numeral,
            "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" | "(" | ")" => {
                PosTag::Punctuation
            }
            _ => PosTag::Other,
        }
    }

    /// Get the Penn Treebank tag string for this enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::PluralNoun => "NNS",
            PosTag::ProperNoun => "NNP",
            PosTag::Preposition => "IN",
            PosTag::Determiner => "DT",
            PosTag::Verb => "VB",
            PosTag::Adjective => "JJ",
            PosTag::Adverb => "RB",
            PosTag::Pronoun => "PRP",
            PosTag::Conjunction => "CC",
            PosTag::Numeral => "CD",
            PosTag::Punctuation => ".",
            PosTag::Other => "X",
        }
    }
}

/// A token from the input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form (original text)
    pub text: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Sentence index this token belongs to
    pub sentence_idx: usize,
    /// Token index within the sentence
    pub token_idx: usize,
}

impl Token {
    /// Create a new token
    pub fn new(
        text: impl Into<String>,
        pos: PosTag,
        sentence_idx: usize,
        token_idx: usize,
    ) -> Self {
        Self {
            text: text.into(),
            pos,
            sentence_idx,
            token_idx,
        }
    }
}

// ============================================================================
// Chunk
// ============================================================================

/// A span of tokens matched by the chunk grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpan {
    /// Start token index within the sentence (inclusive)
    pub start_token: usize,
    /// End token index within the sentence (exclusive)
    pub end_token: usize,
    /// The sentence this chunk belongs to
    pub sentence_idx: usize,
}

// ============================================================================
// Sentence
// ============================================================================

/// A sentence from the input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text, trimmed
    pub text: String,
    /// Start byte offset in original text
    pub start: usize,
    /// End byte offset in original text
    pub end: usize,
    /// Sentence index within the document
    pub index: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(text: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
        }
    }
}

// ============================================================================
// Template Selection
// ============================================================================

/// How a candidate's question template is chosen.
///
/// `Coupled` reuses the random draw that picked the chunk key
/// (`draw % templates.len()`), so a given key is always phrased with the
/// same template. This keeps generated tests compatible with question sets
/// produced by earlier deployments. `Independent` spends a second draw on
/// the template and is an explicit behavior change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSelection {
    #[default]
    Coupled,
    Independent,
}

impl TemplateSelection {
    /// Returns `true` when the template draw is tied to the key draw.
    pub fn is_coupled(self) -> bool {
        matches!(self, TemplateSelection::Coupled)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Question templates; the chunk key and a trailing "." are appended.
pub const DEFAULT_TEMPLATES: [&str; 4] = [
    "Explain in detail ",
    "Define ",
    "Write a short note on ",
    "What do you mean by ",
];

/// Configuration for test generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Number of distinct questions in a test
    pub num_questions: usize,
    /// Number of candidates drawn before final selection
    pub pool_size: usize,
    /// A sentence must have strictly more tokens than this to seed a new chunk key
    pub min_sentence_tokens: usize,
    /// Question templates
    pub templates: Vec<String>,
    /// Coupled or independent template draw
    pub template_selection: TemplateSelection,
    /// Maximum selection draws against one candidate pool
    pub max_attempts: usize,
    /// Maximum number of candidate pools built per test
    pub max_rounds: usize,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            num_questions: 5,
            pool_size: 10,
            min_sentence_tokens: 20,
            templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
            template_selection: TemplateSelection::Coupled,
            max_attempts: 1000,
            max_rounds: 10,
        }
    }
}

impl AssessmentConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_questions == 0 {
            return Err(AssessError::invalid_config("num_questions must be > 0"));
        }

        if self.pool_size == 0 {
            return Err(AssessError::invalid_config("pool_size must be > 0"));
        }

        if self.num_questions > self.pool_size {
            return Err(AssessError::invalid_config(format!(
                "num_questions ({}) must be <= pool_size ({})",
                self.num_questions, self.pool_size
            )));
        }

        if self.templates.is_empty() {
            return Err(AssessError::invalid_config("templates must not be empty"));
        }

        if self.max_attempts == 0 {
            return Err(AssessError::invalid_config("max_attempts must be > 0"));
        }

        if self.max_rounds == 0 {
            return Err(AssessError::invalid_config("max_rounds must be > 0"));
        }

        Ok(())
    }

    /// Builder method: set number of questions
    pub fn with_num_questions(mut self, num_questions: usize) -> Self {
        self.num_questions = num_questions;
        self
    }

    /// Builder method: set candidate pool size
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Builder method: set the sentence length filter for new chunk keys
    pub fn with_min_sentence_tokens(mut self, min_sentence_tokens: usize) -> Self {
        self.min_sentence_tokens = min_sentence_tokens;
        self
    }

    /// Builder method: set question templates
    pub fn with_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.templates = templates.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set template selection mode
    pub fn with_template_selection(mut self, selection: TemplateSelection) -> Self {
        self.template_selection = selection;
        self
    }

    /// Builder method: set maximum selection draws per pool
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Builder method: set maximum pool rebuilds
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}
