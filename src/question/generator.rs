//! Question generation
//!
//! Turns a [`ChunkIndex`] into a [`TestSet`] in two stages:
//!
//! 1. Draw a candidate pool of `pool_size` (question, answer) pairs, keys
//!    sampled with replacement. Duplicates are allowed here.
//! 2. Draw pool entries until `num_questions` distinct questions are
//!    collected, in acceptance order.
//!
//! Both stages are bounded. A pool with too few distinct questions is
//! rebuilt at most `max_rounds` times before giving up with
//! [`AssessError::InsufficientContent`].

use crate::errors::{AssessError, Result};
use crate::phrase::index::ChunkIndex;
use crate::types::{AssessmentConfig, TemplateSelection};
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A (question, reference answer) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub question: String,
    pub answer: String,
}

/// Questions and their reference answers, index-aligned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSet {
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

impl TestSet {
    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check if the test has no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate over (question, answer) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }

    /// Split into the question list and the answer list
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.questions, self.answers)
    }

    fn push(&mut self, candidate: &Candidate) {
        self.questions.push(candidate.question.clone());
        self.answers.push(candidate.answer.clone());
    }
}

/// Generates subjective tests from a chunk index
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    config: AssessmentConfig,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionGenerator {
    /// Create a generator with default config
    pub fn new() -> Self {
        Self {
            config: AssessmentConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: AssessmentConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Generate a test with `num_questions` distinct questions.
    ///
    /// Zero questions yields an empty test. Asking for more questions than
    /// the pool holds is [`AssessError::InsufficientContent`].
    pub fn generate<R: Rng + ?Sized>(
        &self,
        index: &ChunkIndex,
        num_questions: usize,
        rng: &mut R,
    ) -> Result<TestSet> {
        self.config.validate()?;
        if num_questions == 0 {
            return Ok(TestSet::default());
        }
        if num_questions > self.config.pool_size {
            return Err(AssessError::insufficient_content(format!(
                "a pool of {} candidates cannot hold {} distinct questions",
                self.config.pool_size, num_questions
            )));
        }

        let _span = tracing::info_span!(
            "generate_test",
            keys = index.len(),
            num_questions
        )
        .entered();

        if index.is_empty() {
            return Err(AssessError::insufficient_content(
                "no chunks could be extracted from the corpus",
            ));
        }

        let reachable = self.max_distinct_questions(index);
        if reachable < num_questions {
            return Err(AssessError::insufficient_content(format!(
                "corpus yields at most {} distinct questions, {} requested",
                reachable, num_questions
            )));
        }

        for round in 0..self.config.max_rounds {
            let pool = self.build_pool(index, rng);
            if let Some(test) = self.select(&pool, num_questions, rng) {
                return Ok(test);
            }
            tracing::debug!(round, "candidate pool too thin, rebuilding");
        }

        Err(AssessError::insufficient_content(format!(
            "could not assemble {} distinct questions in {} rounds",
            num_questions, self.config.max_rounds
        )))
    }

    /// Draw the candidate pool.
    pub fn build_pool<R: Rng + ?Sized>(&self, index: &ChunkIndex, rng: &mut R) -> Vec<Candidate> {
        let templates = &self.config.templates;
        let mut pool = Vec::with_capacity(self.config.pool_size);

        if index.is_empty() || templates.is_empty() {
            return pool;
        }

        for _ in 0..self.config.pool_size {
            let draw = rng.gen_range(0..index.len());
            let template_idx = match self.config.template_selection {
                TemplateSelection::Coupled => draw % templates.len(),
                TemplateSelection::Independent => rng.gen_range(0..templates.len()),
            };
            if let Some((key, answer)) = index.entry(draw) {
                pool.push(Candidate {
                    question: format!("{}{}.", templates[template_idx], key),
                    answer: answer.to_string(),
                });
            }
        }

        pool
    }

    /// Pick `num_questions` distinct questions from the pool, or `None` if
    /// the pool cannot supply them within `max_attempts` draws.
    fn select<R: Rng + ?Sized>(
        &self,
        pool: &[Candidate],
        num_questions: usize,
        rng: &mut R,
    ) -> Option<TestSet> {
        let distinct: FxHashSet<&str> = pool.iter().map(|c| c.question.as_str()).collect();
        if distinct.len() < num_questions {
            return None;
        }

        let mut test = TestSet::default();
        let mut seen: FxHashSet<&str> = FxHashSet::default();

        for _ in 0..self.config.max_attempts {
            let candidate = &pool[rng.gen_range(0..pool.len())];
            if seen.insert(candidate.question.as_str()) {
                test.push(candidate);
                if test.len() == num_questions {
                    return Some(test);
                }
            }
        }

        None
    }

    /// Upper bound on distinct questions any pool can hold for this index
    fn max_distinct_questions(&self, index: &ChunkIndex) -> usize {
        let per_key = match self.config.template_selection {
            TemplateSelection::Coupled => 1,
            TemplateSelection::Independent => self.config.templates.len(),
        };
        index
            .len()
            .saturating_mul(per_key)
            .min(self.config.pool_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_TEMPLATES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn index_with(keys: &[&str]) -> ChunkIndex {
        let mut index = ChunkIndex::new();
        for key in keys {
            index.record(key, &format!("Answer about {}.", key.to_lowercase()), true);
        }
        index
    }

    const KEYS: [&str; 8] = [
        "DATABASE ENGINE",
        "QUERY PROCESSOR",
        "TRANSACTION MANAGER",
        "DATABASE SCHEMA",
        "ACID PROPERTIES",
        "STORAGE MANAGER",
        "BUFFER POOL",
        "INDEX STRUCTURE",
    ];

    #[test]
    fn test_generate_basic() {
        let index = index_with(&KEYS);
        let mut rng = StdRng::seed_from_u64(7);
        let test = QuestionGenerator::new().generate(&index, 5, &mut rng).unwrap();

        assert_eq!(test.questions.len(), 5);
        assert_eq!(test.answers.len(), 5);

        let distinct: FxHashSet<&String> = test.questions.iter().collect();
        assert_eq!(distinct.len(), 5);

        for (question, answer) in test.iter() {
            assert!(DEFAULT_TEMPLATES.iter().any(|t| question.starts_with(t)));
            assert!(question.ends_with('.'));
            assert!(!answer.is_empty());
        }
    }

    #[test]
    fn test_answers_match_questions() {
        let index = index_with(&KEYS);
        let mut rng = StdRng::seed_from_u64(11);
        let test = QuestionGenerator::new().generate(&index, 5, &mut rng).unwrap();

        for (question, answer) in test.iter() {
            let key = KEYS.iter().find(|k| question.contains(*k)).unwrap();
            assert_eq!(index.get(key), Some(answer));
        }
    }

    #[test]
    fn test_coupled_template_follows_key_position() {
        let index = index_with(&KEYS);
        let mut rng = StdRng::seed_from_u64(3);
        let pool = QuestionGenerator::new().build_pool(&index, &mut rng);

        assert_eq!(pool.len(), 10);
        for candidate in &pool {
            let (pos, key) = index
                .keys()
                .enumerate()
                .find(|(_, k)| candidate.question.ends_with(&format!("{}.", k)))
                .unwrap();
            let expected = format!("{}{}.", DEFAULT_TEMPLATES[pos % 4], key);
            assert_eq!(candidate.question, expected);
        }
    }

    #[test]
    fn test_same_seed_same_test() {
        let index = index_with(&KEYS);
        let generator = QuestionGenerator::new();

        let a = generator
            .generate(&index, 5, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = generator
            .generate(&index, 5, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_index_is_insufficient() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = QuestionGenerator::new()
            .generate(&ChunkIndex::new(), 5, &mut rng)
            .unwrap_err();
        assert!(err.is_insufficient_content());
    }

    #[test]
    fn test_too_few_keys_fails_fast() {
        let index = index_with(&KEYS[..4]);
        let mut rng = StdRng::seed_from_u64(0);
        let err = QuestionGenerator::new()
            .generate(&index, 5, &mut rng)
            .unwrap_err();
        assert!(err.is_insufficient_content());
    }

    #[test]
    fn test_independent_templates_stretch_small_index() {
        // Two keys x four templates can cover five distinct questions
        let index = index_with(&KEYS[..2]);
        let config = AssessmentConfig::default()
            .with_template_selection(TemplateSelection::Independent)
            .with_max_rounds(50);
        let mut rng = StdRng::seed_from_u64(5);
        let test = QuestionGenerator::with_config(config)
            .generate(&index, 5, &mut rng)
            .unwrap();

        let distinct: FxHashSet<&String> = test.questions.iter().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_bounded_rounds_give_up() {
        // Five keys, but a pool of five draws with replacement almost never
        // covers all of them; a single round must fail instead of looping.
        let index = index_with(&KEYS[..5]);
        let config = AssessmentConfig::default()
            .with_pool_size(5)
            .with_max_rounds(1);
        let generator = QuestionGenerator::with_config(config);

        let failures = (0..20u64)
            .filter(|seed| {
                generator
                    .generate(&index, 5, &mut StdRng::seed_from_u64(*seed))
                    .is_err()
            })
            .count();
        assert!(failures > 0);
    }

    #[test]
    fn test_zero_questions_is_empty_test() {
        let index = index_with(&KEYS);
        let mut rng = StdRng::seed_from_u64(0);

        let test = QuestionGenerator::new().generate(&index, 0, &mut rng).unwrap();
        assert!(test.is_empty());
        assert!(test.answers.is_empty());

        // Even without any chunks
        let test = QuestionGenerator::new()
            .generate(&ChunkIndex::new(), 0, &mut rng)
            .unwrap();
        assert_eq!(test, TestSet::default());
    }

    #[test]
    fn test_more_questions_than_pool_is_insufficient() {
        let many: Vec<String> = (0..30).map(|i| format!("KEY NUMBER {}", i)).collect();
        let mut index = ChunkIndex::new();
        for key in &many {
            index.record(key, "Some answer.", true);
        }
        let mut rng = StdRng::seed_from_u64(0);

        let err = QuestionGenerator::new()
            .generate(&index, 11, &mut rng)
            .unwrap_err();
        assert!(err.is_insufficient_content());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let index = index_with(&KEYS);
        let mut rng = StdRng::seed_from_u64(0);
        let config = AssessmentConfig::default().with_max_rounds(0);

        assert!(matches!(
            QuestionGenerator::with_config(config).generate(&index, 5, &mut rng),
            Err(AssessError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_into_parts() {
        let index = index_with(&KEYS);
        let mut rng = StdRng::seed_from_u64(9);
        let test = QuestionGenerator::new().generate(&index, 3, &mut rng).unwrap();
        let (questions, answers) = test.into_parts();
        assert_eq!(questions.len(), 3);
        assert_eq!(answers.len(), 3);
    }
}
