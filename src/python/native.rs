//! Native Python interface
//!
//! Mirrors the calls the web layer makes: build a `SubjectiveTest` from a
//! corpus file, generate the question/answer lists, score an answer.

use crate::corpus::Corpus;
use crate::errors::AssessError;
use crate::scoring::scorer::AnswerScorer;
use crate::subjective::SubjectiveTest;
use crate::types::{AssessmentConfig, TemplateSelection};
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn to_py_err(err: AssessError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Configuration for test generation
#[pyclass(name = "AssessmentConfig")]
#[derive(Clone)]
pub struct PyAssessmentConfig {
    inner: AssessmentConfig,
}

#[pymethods]
impl PyAssessmentConfig {
    #[new]
    #[pyo3(signature = (
        num_questions=5,
        pool_size=10,
        min_sentence_tokens=20,
        templates=None,
        template_selection="coupled",
        max_attempts=1000,
        max_rounds=10
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        num_questions: usize,
        pool_size: usize,
        min_sentence_tokens: usize,
        templates: Option<Vec<String>>,
        template_selection: &str,
        max_attempts: usize,
        max_rounds: usize,
    ) -> PyResult<Self> {
        let selection = match template_selection.to_lowercase().as_str() {
            "coupled" => TemplateSelection::Coupled,
            "independent" => TemplateSelection::Independent,
            _ => {
                return Err(pyo3::exceptions::PyValueError::new_err(format!(
                    "Unknown template_selection: {}. Use 'coupled' or 'independent'",
                    template_selection
                )))
            }
        };

        let mut config = AssessmentConfig::default()
            .with_num_questions(num_questions)
            .with_pool_size(pool_size)
            .with_min_sentence_tokens(min_sentence_tokens)
            .with_template_selection(selection)
            .with_max_attempts(max_attempts)
            .with_max_rounds(max_rounds);
        if let Some(templates) = templates {
            config = config.with_templates(templates);
        }

        config.validate().map_err(to_py_err)?;

        Ok(Self { inner: config })
    }

    fn __repr__(&self) -> String {
        format!(
            "AssessmentConfig(num_questions={}, pool_size={}, min_sentence_tokens={})",
            self.inner.num_questions, self.inner.pool_size, self.inner.min_sentence_tokens
        )
    }
}

/// Subjective test generator and grader for one corpus
#[pyclass(name = "SubjectiveTest")]
pub struct PySubjectiveTest {
    inner: SubjectiveTest,
}

#[pymethods]
impl PySubjectiveTest {
    /// Exactly one of `filepath` or `text` should be given
    #[new]
    #[pyo3(signature = (filepath=None, text=None, config=None))]
    fn new(
        filepath: Option<&str>,
        text: Option<String>,
        config: Option<PyAssessmentConfig>,
    ) -> PyResult<Self> {
        let corpus = match (filepath, text) {
            (Some(path), None) => Corpus::from_path(path),
            (None, Some(text)) => Corpus::from_text(text),
            _ => {
                return Err(pyo3::exceptions::PyValueError::new_err(
                    "pass exactly one of filepath or text",
                ))
            }
        };
        let config = config.map(|c| c.inner).unwrap_or_default();

        Ok(Self {
            inner: SubjectiveTest::with_config(corpus, config),
        })
    }

    /// Whether the corpus file could be read
    #[getter]
    fn corpus_available(&self) -> bool {
        self.inner.corpus().is_available()
    }

    /// Generate `(questions, answers)`; pass `seed` for a reproducible test
    #[pyo3(signature = (num_questions=5, seed=None))]
    fn generate_test(
        &self,
        num_questions: usize,
        seed: Option<u64>,
    ) -> PyResult<(Vec<String>, Vec<String>)> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.inner
            .generate_test_with(num_questions, &mut rng)
            .map(|test| test.into_parts())
            .map_err(to_py_err)
    }

    /// Similarity of the user answer to the original answer, 0-100
    fn evaluate_subjective_answer(&self, original_answer: &str, user_answer: &str) -> f64 {
        self.inner
            .evaluate_subjective_answer(original_answer, user_answer)
    }

    fn __repr__(&self) -> String {
        format!(
            "SubjectiveTest(corpus_available={}, num_questions={})",
            self.inner.corpus().is_available(),
            self.inner.config().num_questions
        )
    }
}

/// Score an answer against a reference without building a test
#[pyfunction]
pub fn score_answer(reference: &str, candidate: &str) -> f64 {
    AnswerScorer::new().score(reference, candidate)
}
