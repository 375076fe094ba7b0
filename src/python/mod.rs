//! Python bindings via PyO3
//!
//! This module provides the Python interface for rapid_assess.

pub mod native;

use pyo3::prelude::*;

/// Register all Python classes and functions
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_class::<native::PyAssessmentConfig>()?;
    m.add_class::<native::PySubjectiveTest>()?;
    m.add_function(wrap_pyfunction!(native::score_answer, m)?)?;

    Ok(())
}
