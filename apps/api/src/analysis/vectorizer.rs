//! TF-IDF vectorizer. Fit once over a reference corpus, then frozen.
//!
//! Vocabulary: lowercased runs of two or more word characters, capped at
//! `max_features` (most frequent corpus terms first, ties alphabetical), indexed
//! in alphabetical order. Weights use smoothed idf `ln((1+n)/(1+df)) + 1` and each
//! output vector is L2-normalized.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: Option<usize>,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fits vocabulary and idf weights. Fails on an empty corpus or when no
    /// document contains a single token.
    pub fn fit<S: AsRef<str>>(
        documents: &[S],
        max_features: Option<usize>,
    ) -> Result<Self, AnalysisError> {
        if documents.is_empty() {
            return Err(AnalysisError::Training(
                "cannot fit vectorizer on an empty corpus".to_string(),
            ));
        }

        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            let mut seen = HashSet::new();
            for token in tokens {
                *term_counts.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.clone()) {
                    *doc_freq.entry(token).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(AnalysisError::Training(
                "empty vocabulary; corpus contains no tokens".to_string(),
            ));
        }

        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(limit) = max_features {
            ranked.truncate(limit);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        Ok(Self {
            max_features,
            vocabulary,
            idf,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    #[cfg(test)]
    fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Maps text to a fixed-length vector. Tokens unseen at fit time are ignored,
    /// so out-of-vocabulary text yields the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary_size()];
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                vector[idx] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    /// Checks internal consistency after deserialization.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let indices_ok = self.vocabulary.values().all(|&i| i < self.idf.len());
        if self.vocabulary.len() != self.idf.len() || !indices_ok {
            return Err(AnalysisError::Artifact(format!(
                "vectorizer vocabulary ({}) does not match idf weights ({})",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        Ok(())
    }
}

/// Cosine similarity of two equal-length vectors; 0 when either is all zeros.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
