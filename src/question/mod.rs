//! Subjective question generation from chunk indexes

pub mod generator;

pub use generator::{Candidate, QuestionGenerator, TestSet};
