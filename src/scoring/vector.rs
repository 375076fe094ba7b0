//! Binary occurrence vectors and cosine similarity
//!
//! The vocabulary is the plain concatenation of both token lists, so a
//! token repeated in the input contributes repeated positions to both
//! vectors and weighs more in the dot product.

use rustc_hash::FxHashSet;

/// Concatenate reference and candidate tokens, keeping order and duplicates
pub fn build_vocabulary<'a, S: AsRef<str>>(
    reference: &'a [S],
    candidate: &'a [S],
) -> Vec<&'a str> {
    reference.iter().chain(candidate).map(|t| t.as_ref()).collect()
}

/// 0/1 vector over a shared vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerVector(Vec<u8>);

impl AnswerVector {
    /// Mark each vocabulary position whose token occurs in `tokens`
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], vocabulary: &[&str]) -> Self {
        let present: FxHashSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();
        Self(
            vocabulary
                .iter()
                .map(|tok| u8::from(present.contains(tok)))
                .collect(),
        )
    }

    /// Raw entries
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Vector length (vocabulary size)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the vector has no positions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dot product with another vector of the same vocabulary
    pub fn dot(&self, other: &AnswerVector) -> f64 {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(&a, &b)| f64::from(a) * f64::from(b))
            .sum()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.0
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<u8>> for AnswerVector {
    fn from(entries: Vec<u8>) -> Self {
        Self(entries)
    }
}

/// Cosine similarity scaled to a 0–100 percentage.
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity_score(a: &AnswerVector, b: &AnswerVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        tracing::debug!("zero answer vector, similarity is 0");
        return 0.0;
    }

    (a.dot(b) / (norm_a * norm_b) * 100.0).min(100.0)
}
