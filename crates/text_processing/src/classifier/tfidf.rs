//! TF-IDF featurizer over word unigrams and bigrams

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{Result, TextProcessingError};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Sparse feature vector: (column, value) pairs sorted by column
pub type SparseVector = Vec<(usize, f32)>;

/// Fitted TF-IDF vectorizer
///
/// - lower-cased tokens of two or more word characters
/// - unigrams plus bigrams of adjacent tokens
/// - vocabulary capped at `max_features` most frequent terms
/// - smoothed idf `ln((1 + n) / (1 + df)) + 1`, L2-normalized rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf_diag: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from `documents`
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Result<Self> {
        if documents.is_empty() {
            return Err(TextProcessingError::EmptyTrainingData);
        }
        if max_features == 0 {
            return Err(TextProcessingError::InvalidOption(
                "max_features must be positive".to_string(),
            ));
        }

        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let terms = analyze(document.as_ref());
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *term_counts.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(TextProcessingError::EmptyTrainingData);
        }

        // most frequent first, alphabetical among equals
        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = documents.len() as f32;
        let idf_diag = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        Ok(Self {
            vocabulary,
            idf_diag,
        })
    }

    pub fn nb_features(&self) -> usize {
        self.idf_diag.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Featurize one document; out-of-vocabulary terms are ignored
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf_diag[index]))
            .collect();
        features.sort_by_key(|(index, _)| *index);

        let norm = features.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, value) in features.iter_mut() {
                *value /= norm;
            }
        }
        features
    }

    /// Check that the persisted vocabulary and idf agree
    pub(crate) fn check(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf_diag.len()
            || self.vocabulary.values().any(|&i| i >= self.idf_diag.len())
        {
            return Err(TextProcessingError::ModelLoad(
                "vectorizer vocabulary does not match idf weights".to_string(),
            ));
        }
        Ok(())
    }
}

/// Unigram and bigram terms of a document
pub fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}
