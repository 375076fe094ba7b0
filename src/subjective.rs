//! Subjective test facade
//!
//! Ties a corpus, the chunker, the question generator and the scorer
//! together behind the two calls a request handler needs: build a test,
//! then grade the submitted answers.

use crate::corpus::Corpus;
use crate::errors::Result;
use crate::nlp::tagger::{HeuristicTagger, PosTagger};
use crate::phrase::index::{ChunkIndex, CorpusChunker};
use crate::question::generator::{QuestionGenerator, TestSet};
use crate::scoring::scorer::{normalize_answer, AnswerScorer, Grade};
use crate::types::AssessmentConfig;
use rand::Rng;
use std::path::Path;

/// Generates and grades subjective tests for one corpus
#[derive(Debug, Clone)]
pub struct SubjectiveTest<T: PosTagger = HeuristicTagger> {
    corpus: Corpus,
    chunker: CorpusChunker<T>,
    generator: QuestionGenerator,
    scorer: AnswerScorer,
}

impl SubjectiveTest<HeuristicTagger> {
    /// Create with default config over an already loaded corpus
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, AssessmentConfig::default())
    }

    /// Load the corpus from a file; a missing file gives an empty corpus
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(Corpus::from_path(path))
    }

    /// Create with custom config
    pub fn with_config(corpus: Corpus, config: AssessmentConfig) -> Self {
        Self::with_tagger(corpus, config, HeuristicTagger::new())
    }
}

impl<T: PosTagger> SubjectiveTest<T> {
    /// Create with custom config and tagger
    pub fn with_tagger(corpus: Corpus, config: AssessmentConfig, tagger: T) -> Self {
        let chunker =
            CorpusChunker::with_tagger(tagger).with_min_sentence_tokens(config.min_sentence_tokens);
        Self {
            corpus,
            chunker,
            generator: QuestionGenerator::with_config(config),
            scorer: AnswerScorer::new(),
        }
    }

    /// The corpus this test draws from
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The active configuration
    pub fn config(&self) -> &AssessmentConfig {
        self.generator.config()
    }

    /// Build a fresh chunk index for the corpus
    pub fn chunk_index(&self) -> ChunkIndex {
        self.corpus.chunk_index(&self.chunker)
    }

    /// Generate a test with the configured number of questions
    pub fn generate_test<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TestSet> {
        self.generate_test_with(self.config().num_questions, rng)
    }

    /// Generate a test with `num_questions` questions
    pub fn generate_test_with<R: Rng + ?Sized>(
        &self,
        num_questions: usize,
        rng: &mut R,
    ) -> Result<TestSet> {
        if self.corpus.is_empty() {
            tracing::warn!(
                status = ?self.corpus.status(),
                "no summary available to generate tests"
            );
        }
        let index = self.chunk_index();
        self.generator.generate(&index, num_questions, rng)
    }

    /// Score a user answer against the original answer, in `[0, 100]`
    pub fn evaluate_subjective_answer(&self, original_answer: &str, user_answer: &str) -> f64 {
        self.scorer.score(original_answer, user_answer)
    }

    /// Grade submitted answers against a generated test.
    ///
    /// Both sides are trimmed and upper-cased first. Extra answers on either
    /// side are ignored.
    pub fn grade_submission<S: AsRef<str>>(
        &self,
        test: &TestSet,
        user_answers: &[S],
    ) -> Vec<Grade> {
        let pairs: Vec<(String, String)> = test
            .answers
            .iter()
            .zip(user_answers)
            .map(|(reference, user)| (normalize_answer(reference), normalize_answer(user.as_ref())))
            .collect();
        self.scorer.grade_all(&pairs)
    }
}
