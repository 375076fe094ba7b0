//! Chunk extraction and chunk → sentence grouping

pub mod chunker;
pub mod index;

pub use chunker::{chunk_key, chunk_text, ChunkRule, NounChunker, DEFAULT_GRAMMAR};
pub use index::{ChunkIndex, CorpusChunker};
