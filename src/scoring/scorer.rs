//! Answer scoring
//!
//! Scores a free-text answer against a reference answer by the cosine of
//! their binary token-occurrence vectors. Tokens are case-sensitive;
//! callers that want case-insensitive grading normalize both texts first
//! (see [`normalize_answer`]).

use super::vector::{build_vocabulary, cosine_similarity_score, AnswerVector};
use crate::nlp::tokenizer::Tokenizer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Coarse verdict attached to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// The answer shares vocabulary with the reference
    Relevant,
    /// No overlap with the reference
    NeedsImprovement,
}

impl Feedback {
    /// Classify a score
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Feedback::Relevant
        } else {
            Feedback::NeedsImprovement
        }
    }

    /// Human-readable feedback line for question `question_number` (1-based)
    pub fn message(&self, question_number: usize, suggested_answer: &str) -> String {
        match self {
            Feedback::Relevant => format!(
                "Question {}: Good job! Your answer is relevant.",
                question_number
            ),
            Feedback::NeedsImprovement => format!(
                "Question {}: Needs improvement. Suggested answer was {}.",
                question_number, suggested_answer
            ),
        }
    }
}

/// Score and verdict for one answer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Similarity percentage in `[0, 100]`
    pub score: f64,
    pub feedback: Feedback,
}

impl Grade {
    fn from_score(score: f64) -> Self {
        Self {
            score,
            feedback: Feedback::from_score(score),
        }
    }
}

/// Bag-of-words answer scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerScorer {
    tokenizer: Tokenizer,
}

impl AnswerScorer {
    /// Create a new scorer
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Similarity of `candidate` to `reference` as a percentage.
    ///
    /// Symmetric in its arguments. Returns 0.0 when either text has no
    /// tokens.
    pub fn score(&self, reference: &str, candidate: &str) -> f64 {
        let reference_tokens = self.tokenizer.word_tokens(reference);
        let candidate_tokens = self.tokenizer.word_tokens(candidate);

        let vocabulary = build_vocabulary(&reference_tokens, &candidate_tokens);
        let reference_vector = AnswerVector::from_tokens(&reference_tokens, &vocabulary);
        let candidate_vector = AnswerVector::from_tokens(&candidate_tokens, &vocabulary);

        cosine_similarity_score(&reference_vector, &candidate_vector)
    }

    /// Score and classify one answer
    pub fn grade(&self, reference: &str, candidate: &str) -> Grade {
        Grade::from_score(self.score(reference, candidate))
    }

    /// Grade many (reference, candidate) pairs in parallel, preserving order
    pub fn grade_all<R, C>(&self, pairs: &[(R, C)]) -> Vec<Grade>
    where
        R: AsRef<str> + Sync,
        C: AsRef<str> + Sync,
    {
        pairs
            .par_iter()
            .map(|(reference, candidate)| self.grade(reference.as_ref(), candidate.as_ref()))
            .collect()
    }
}

/// Trim and upper-case an answer before grading
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Arithmetic mean of the scores, 0.0 for no grades
pub fn mean_score(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.iter().map(|g| g.score).sum::<f64>() / grades.len() as f64
}
