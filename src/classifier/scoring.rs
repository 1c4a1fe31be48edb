//! Log-space Naive Bayes scoring.
//!
//! For a category `c` and a document with distinct tokens `t` occurring `f`
//! times each, the score is
//!
//! ```text
//! ln(docCount[c] / totalDocuments) + Σ f · ln((freq[c][t] + 1) / (wordCount[c] + vocabularySize))
//! ```
//!
//! The vocabulary size in the denominator is the global one, so it is the
//! same for every category. Scores are compared, never exponentiated.

use serde::{Deserialize, Serialize};

use super::model::{ClassifierState, NaiveBayesClassifier};
use crate::error::Result;

/// The raw log score of one category for one document.
///
/// `value` is not a probability: it is not normalized and stays in log space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub value: f64,
}

impl ClassifierState {
    /// Smoothed `P(token | category)`; `None` for an unknown category.
    pub fn token_probability(&self, token: &str, category: &str) -> Option<f64> {
        if !self.has_category(category) {
            return None;
        }

        // Counters restored from a snapshot may sit near u64::MAX.
        let denominator = self.word_count(category) as f64 + self.vocabulary_size as f64;
        if denominator == 0.0 {
            // Only empty documents learned so far: the token carries no evidence.
            return Some(1.0);
        }

        let numerator = self.word_frequency(category, token) as f64 + 1.0;
        Some(numerator / denominator)
    }

    fn log_prior(&self, category: &str) -> f64 {
        if self.total_documents == 0 {
            return f64::NEG_INFINITY;
        }
        (self.doc_count(category) as f64 / self.total_documents as f64).ln()
    }

    /// Score `category` against a document's frequency table.
    pub(crate) fn score(&self, category: &str, table: &[(String, u64)]) -> f64 {
        table
            .iter()
            .fold(self.log_prior(category), |score, (token, frequency)| {
                let probability = self.token_probability(token, category).unwrap_or(1.0);
                score + *frequency as f64 * probability.ln()
            })
    }

    /// The first category with the strictly greatest score.
    ///
    /// A category scoring `-inf` (no documents behind it) is never chosen.
    pub(crate) fn best_category(&self, table: &[(String, u64)]) -> Option<&str> {
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for category in &self.categories {
            let score = self.score(category, table);
            if score > best_score {
                best = Some(category.as_str());
                best_score = score;
            }
        }
        best
    }
}

impl NaiveBayesClassifier {
    /// Pick the most likely category for `text`.
    ///
    /// Returns `None` when nothing has been learned, or when no category has
    /// any documents behind it. Ties go to the category that was learned first.
    pub fn categorize(&self, text: &str) -> Result<Option<String>> {
        let table = self.frequency_table(text)?;
        Ok(self.state.best_category(&table).map(str::to_string))
    }

    /// Raw log scores for every category, in category insertion order.
    ///
    /// ```
    /// use bayes::classifier::NaiveBayesClassifier;
    ///
    /// let mut classifier = NaiveBayesClassifier::new();
    /// classifier.learn("sunny warm", "summer").unwrap();
    /// classifier.learn("snow cold", "winter").unwrap();
    ///
    /// let scores = classifier.probabilities("warm").unwrap();
    /// assert_eq!(scores[0].category, "summer");
    /// assert!(scores[0].value > scores[1].value);
    /// assert!(scores.iter().all(|score| score.value < 0.0));
    /// ```
    pub fn probabilities(&self, text: &str) -> Result<Vec<CategoryScore>> {
        let table = self.frequency_table(text)?;
        Ok(self
            .state
            .categories
            .iter()
            .map(|category| CategoryScore {
                category: category.clone(),
                value: self.state.score(category, &table),
            })
            .collect())
    }

    /// Smoothed `P(token | category)`; `None` for an unknown category.
    pub fn token_probability(&self, token: &str, category: &str) -> Option<f64> {
        self.state.token_probability(token, category)
    }
}
