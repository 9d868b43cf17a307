//! Multinomial logistic regression over sparse features

use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

use super::tfidf::SparseVector;
use crate::{Result, TextProcessingError};

/// Gradient descent settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub max_iter: usize,
    pub learning_rate: f32,
    /// L2 penalty strength (1/C), divided by the sample count
    pub l2: f32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 1.5,
            l2: 1.0,
        }
    }
}

/// Softmax classifier; probabilities sum to one across classes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialLogisticRegression {
    /// matrix with shape (f + 1, c)
    /// ------------------------
    ///
    /// - f = number of features, row 0 holds the intercept
    /// - c = number of classes
    weights: Array2<f32>,
}

impl MultinomialLogisticRegression {
    pub fn nb_features(&self) -> usize {
        // without intercept
        self.weights.dim().0 - 1
    }

    pub fn nb_classes(&self) -> usize {
        self.weights.dim().1
    }

    /// Fit by full-batch gradient descent from zero weights
    ///
    /// Minimizes mean cross-entropy plus `l2 / (2n) * ||W||^2` (intercept
    /// excluded). Deterministic for fixed inputs.
    pub fn fit(
        rows: &[SparseVector],
        labels: &[usize],
        nb_features: usize,
        nb_classes: usize,
        options: &SolverOptions,
    ) -> Result<Self> {
        if rows.is_empty() {
            return Err(TextProcessingError::EmptyTrainingData);
        }
        if rows.len() != labels.len() {
            return Err(TextProcessingError::InvalidOption(format!(
                "{} feature rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= nb_classes) {
            return Err(TextProcessingError::InvalidOption(format!(
                "label index {} out of range for {} classes",
                label, nb_classes
            )));
        }

        let n = rows.len() as f32;
        let l2 = options.l2 / n;
        let mut model = Self {
            weights: Array2::zeros((nb_features + 1, nb_classes)),
        };

        for _ in 0..options.max_iter {
            let mut gradient = Array2::<f32>::zeros((nb_features + 1, nb_classes));

            for (row, &label) in rows.iter().zip(labels) {
                let mut residual = model.predict_proba(row);
                residual[label] -= 1.0;

                gradient.row_mut(0).scaled_add(1.0, &residual);
                for &(index, value) in row {
                    gradient.row_mut(index + 1).scaled_add(value, &residual);
                }
            }

            gradient /= n;
            gradient
                .slice_mut(s![1.., ..])
                .scaled_add(l2, &model.weights.slice(s![1.., ..]));

            model.weights.scaled_add(-options.learning_rate, &gradient);
        }

        Ok(model)
    }

    /// Class probabilities for one sparse row
    pub fn predict_proba(&self, row: &SparseVector) -> Array1<f32> {
        let mut logits = self.weights.row(0).to_owned();
        for &(index, value) in row {
            if index < self.nb_features() {
                logits.scaled_add(value, &self.weights.row(index + 1));
            }
        }
        softmax(logits)
    }
}

fn softmax(mut logits: Array1<f32>) -> Array1<f32> {
    let max = logits.fold(f32::NEG_INFINITY, |acc, &x| acc.max(x));
    logits.mapv_inplace(|x| (x - max).exp());
    let total = logits.sum();
    logits /= total;
    logits
}
