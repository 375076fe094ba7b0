//! # rapid_assess
//!
//! Online-assessment generation and grading with Python bindings.
//!
//! A reference text is split into sentences, tagged and chunked into
//! noun phrases. Each phrase key points at the sentences it came from, and
//! subjective questions are drawn from those keys. Free-text answers are
//! graded by cosine similarity against the reference sentence.
//!
//! ## Features
//!
//! - **Deterministic**: every random draw goes through a caller-supplied RNG
//! - **Bounded**: test generation always terminates, with an error when the
//!   corpus is too thin
//! - **Pluggable tagging**: swap the built-in heuristic tagger through
//!   [`PosTagger`]
//! - **Python bindings**: Seamless integration with Python via PyO3

pub mod corpus;
pub mod errors;
pub mod nlp;
pub mod phrase;
pub mod question;
pub mod scoring;
pub mod subjective;
pub mod types;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use errors::{AssessError, Result};
pub use types::{
    AssessmentConfig, ChunkSpan, PosTag, Sentence, TemplateSelection, Token, DEFAULT_TEMPLATES,
};

// Re-export main functionality
pub use corpus::{Corpus, CorpusStatus};
pub use nlp::{tagger::HeuristicTagger, tagger::PosTagger, tokenizer::Tokenizer};
pub use phrase::{chunker::NounChunker, index::ChunkIndex, index::CorpusChunker};
pub use question::generator::{Candidate, QuestionGenerator, TestSet};
pub use scoring::scorer::{normalize_answer, AnswerScorer, Feedback, Grade};
pub use subjective::SubjectiveTest;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Initialize the Python module
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_module(m)?;
    Ok(())
}
