//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of both training and inference: they split
//! raw text into the ordered token sequence whose frequencies the classifier
//! counts. A tokenizer must be deterministic, since the same text has to
//! produce the same counts before and after a snapshot round-trip.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Runs of Unicode word characters (the default)
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//! - [`ngram::NgramTokenizer`] - Character n-gram tokenization
//!
//! # Examples
//!
//! ```
//! use bayes::analysis::tokenizer::Tokenizer;
//! use bayes::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::default();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a classifier holding an
/// `Arc<dyn Tokenizer>` can be shared across threads for read-only use.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use bayes::analysis::token::{Token, TokenStream};
/// use bayes::analysis::tokenizer::Tokenizer;
/// use bayes::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split(',')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Describe this tokenizer as data so it can be persisted in a snapshot.
    ///
    /// Caller-supplied tokenizers fall back to [`TokenizerConfig::Custom`],
    /// which records the name only and cannot be rebuilt from a snapshot.
    fn config(&self) -> TokenizerConfig {
        TokenizerConfig::Custom {
            name: self.name().to_string(),
        }
    }
}

pub mod config;
pub mod ngram;
pub mod regex;
pub mod unicode_word;
pub mod whitespace;

pub use config::TokenizerConfig;
pub use ngram::NgramTokenizer;
pub use regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;
