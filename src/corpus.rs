//! Corpus loading
//!
//! A missing or unreadable corpus file is not fatal: [`Corpus::from_path`]
//! falls back to an empty corpus and records why in [`CorpusStatus`].
//! Callers that prefer an error use [`Corpus::try_from_path`].

use crate::errors::{AssessError, Result};
use crate::nlp::tagger::PosTagger;
use crate::phrase::index::{ChunkIndex, CorpusChunker};
use std::fs;
use std::path::{Path, PathBuf};

/// Whether the corpus text was actually loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusStatus {
    Loaded,
    Unavailable { reason: String },
}

/// The subject text questions are generated from
#[derive(Debug, Clone)]
pub struct Corpus {
    text: String,
    source: Option<PathBuf>,
    status: CorpusStatus,
}

impl Corpus {
    /// Wrap raw corpus text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
            status: CorpusStatus::Loaded,
        }
    }

    /// Read a UTF-8 corpus file, falling back to an empty corpus on failure
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_from_path(path) {
            Ok(corpus) => corpus,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "corpus unavailable, using empty corpus"
                );
                let reason = match err {
                    AssessError::CorpusUnavailable { message, .. } => message,
                    other => other.to_string(),
                };
                Self {
                    text: String::new(),
                    source: Some(path.to_path_buf()),
                    status: CorpusStatus::Unavailable { reason },
                }
            }
        }
    }

    /// Read a UTF-8 corpus file
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            AssessError::corpus_unavailable(path.display().to_string(), err.to_string())
        })?;

        Ok(Self {
            text,
            source: Some(path.to_path_buf()),
            status: CorpusStatus::Loaded,
        })
    }

    /// The corpus text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Path the corpus was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Load status
    pub fn status(&self) -> &CorpusStatus {
        &self.status
    }

    /// Check whether the corpus file was available
    pub fn is_available(&self) -> bool {
        matches!(self.status, CorpusStatus::Loaded)
    }

    /// Check whether there is any text to work with
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Build a fresh chunk index for this corpus
    pub fn chunk_index<T: PosTagger>(&self, chunker: &CorpusChunker<T>) -> ChunkIndex {
        chunker.extract_chunks(&self.text)
    }
}
