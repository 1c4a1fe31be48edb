//! Text analysis for the classifier.
//!
//! Tokenizers turn raw text into the token sequence that both training and
//! inference count. The classifier treats tokens as opaque strings, so any
//! [`tokenizer::Tokenizer`] implementation can be plugged in.

pub mod token;
pub mod tokenizer;
