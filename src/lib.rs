//! # Bayes
//!
//! A multinomial Naive Bayes text classifier with Laplace smoothing.
//!
//! ## Features
//!
//! - Incremental training, one labelled document at a time
//! - Pluggable tokenizers (Unicode-aware word splitting by default)
//! - Log-space scoring that does not underflow on long documents
//! - Strictly validated JSON snapshots

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod error;

pub mod prelude {
    pub use crate::analysis::tokenizer::{Tokenizer, TokenizerConfig};
    pub use crate::classifier::{CategoryScore, ClassifierOptions, NaiveBayesClassifier};
    pub use crate::error::{BayesError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
