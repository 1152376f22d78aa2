//! String similarity used by the fuzzy matching stage.

/// Similarity score in [0, 1]; 1 means identical.
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Jaro-Winkler similarity (prefix scale 0.1, prefix capped at 4 characters).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b)
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn score(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}
