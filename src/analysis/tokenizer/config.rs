//! Data-only tokenizer descriptions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Tokenizer;
use super::ngram::NgramTokenizer;
use super::regex::{DEFAULT_PATTERN, RegexTokenizer};
use super::unicode_word::UnicodeWordTokenizer;
use super::whitespace::WhitespaceTokenizer;
use crate::error::{BayesError, Result};

/// A serializable description of a tokenizer.
///
/// This is what a snapshot stores instead of the tokenizer itself.
///
/// ```
/// use bayes::analysis::tokenizer::TokenizerConfig;
///
/// let config: TokenizerConfig =
///     serde_json::from_str(r#"{"type": "ngram", "min_gram": 1, "max_gram": 1}"#).unwrap();
/// let tokenizer = config.build().unwrap();
/// assert_eq!(tokenizer.name(), "ngram");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenizerConfig {
    /// [`RegexTokenizer`] with the given pattern.
    Regex {
        pattern: String,
        #[serde(default)]
        gaps: bool,
    },
    /// [`WhitespaceTokenizer`].
    Whitespace,
    /// [`UnicodeWordTokenizer`].
    UnicodeWord,
    /// [`NgramTokenizer`] over grapheme clusters.
    Ngram { min_gram: usize, max_gram: usize },
    /// A caller-supplied tokenizer, known only by name.
    Custom { name: String },
}

impl TokenizerConfig {
    /// Construct the tokenizer this config describes.
    pub fn build(&self) -> Result<Arc<dyn Tokenizer>> {
        let tokenizer: Arc<dyn Tokenizer> = match self {
            TokenizerConfig::Regex { pattern, gaps } => {
                if *gaps {
                    Arc::new(RegexTokenizer::with_gaps(pattern)?)
                } else {
                    Arc::new(RegexTokenizer::with_pattern(pattern)?)
                }
            }
            TokenizerConfig::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerConfig::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
            TokenizerConfig::Ngram {
                min_gram,
                max_gram,
            } => Arc::new(NgramTokenizer::new(*min_gram, *max_gram)?),
            TokenizerConfig::Custom { name } => {
                return Err(BayesError::invalid_options(format!(
                    "custom tokenizer `{name}` cannot be rebuilt from configuration"
                )));
            }
        };
        Ok(tokenizer)
    }

    /// Whether this config can be rebuilt without the caller's help.
    pub fn is_custom(&self) -> bool {
        matches!(self, TokenizerConfig::Custom { .. })
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig::Regex {
            pattern: DEFAULT_PATTERN.to_string(),
            gaps: false,
        }
    }
}
