//! Answer scoring
//!
//! Cosine similarity of binary token vectors, reported as a percentage.

pub mod scorer;
pub mod vector;

pub use scorer::{mean_score, normalize_answer, AnswerScorer, Feedback, Grade};
pub use vector::{build_vocabulary, cosine_similarity_score, AnswerVector};
