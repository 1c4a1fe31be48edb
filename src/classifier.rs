//! Multinomial Naive Bayes classification.
//!
//! - [`NaiveBayesClassifier`]: learned counts plus the tokenizer that feeds them
//! - [`ClassifierOptions`]: construction-time configuration
//! - [`CategoryScore`]: one category's raw log score
//! - [`snapshot`]: the JSON snapshot format
//!
//! # Example
//!
//! ```
//! use bayes::classifier::NaiveBayesClassifier;
//!
//! # fn main() -> bayes::error::Result<()> {
//! let mut classifier = NaiveBayesClassifier::new();
//! classifier.learn("Chinese Beijing Chinese", "chinese")?;
//! classifier.learn("Tokyo Japan Chinese", "japanese")?;
//!
//! let snapshot = classifier.serialize()?;
//! let restored = NaiveBayesClassifier::deserialize(&snapshot)?;
//! assert_eq!(restored.categorize("Beijing")?.as_deref(), Some("chinese"));
//! # Ok(())
//! # }
//! ```

mod model;
mod options;
mod scoring;
pub mod snapshot;

pub use model::{ClassifierState, FrequencyTable, NaiveBayesClassifier};
pub use options::ClassifierOptions;
pub use scoring::CategoryScore;
pub use snapshot::STATE_KEYS;
