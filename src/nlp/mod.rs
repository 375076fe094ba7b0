//! NLP utilities: tokenization and part-of-speech tagging

pub mod tagger;
pub mod tokenizer;

pub use tagger::{HeuristicTagger, PosTagger};
pub use tokenizer::Tokenizer;
