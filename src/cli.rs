//! Command line interface for the bayes classifier.
//!
//! Every command works on a model file holding one classifier snapshot.

pub mod args;
pub mod commands;
pub mod output;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use output::*;
