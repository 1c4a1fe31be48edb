//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::{Tokenizer, TokenizerConfig};
use crate::analysis::token::{Token, TokenStream};
use crate::error::{BayesError, Result};

/// Pattern of the default tokenizer: maximal runs of Unicode word characters.
pub const DEFAULT_PATTERN: &str = r"\w+";

/// A regex-based tokenizer that extracts tokens using regular expressions.
///
/// This is the classifier's default tokenizer. With [`DEFAULT_PATTERN`] it
/// yields exactly the tokens obtained by replacing every character that is
/// neither a word character nor whitespace with a space and then splitting on
/// runs of whitespace. `\w` is Unicode-aware, so Cyrillic, Greek, CJK and other
/// scripts come out as whole words. Case is preserved.
///
/// ```
/// use bayes::analysis::tokenizer::{RegexTokenizer, Tokenizer};
///
/// let tokenizer = RegexTokenizer::default();
/// let words: Vec<String> = tokenizer
///     .tokenize("awesome, cool, amazing!! Yay.")
///     .unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(words, vec!["awesome", "cool", "amazing", "Yay"]);
/// ```
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Whether to extract gaps (text between matches) instead of matches
    gaps: bool,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| BayesError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
            gaps: false,
        })
    }

    /// Create a tokenizer that extracts gaps (text between matches) instead of matches.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| BayesError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
            gaps: true,
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check if this tokenizer extracts gaps.
    pub fn gaps(&self) -> bool {
        self.gaps
    }

    fn gap_tokens(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last_end = 0;

        for mat in self.pattern.find_iter(text) {
            if mat.start() > last_end {
                tokens.push(Token::with_offsets(
                    &text[last_end..mat.start()],
                    tokens.len(),
                    last_end,
                    mat.start(),
                ));
            }
            last_end = mat.end();
        }

        if last_end < text.len() {
            tokens.push(Token::with_offsets(
                &text[last_end..],
                tokens.len(),
                last_end,
                text.len(),
            ));
        }

        tokens
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new().expect("Default regex pattern should be valid")
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = if self.gaps {
            self.gap_tokens(text)
        } else {
            self.pattern
                .find_iter(text)
                .filter(|mat| !mat.is_empty())
                .enumerate()
                .map(|(position, mat)| {
                    Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
                })
                .collect()
        };

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }

    fn config(&self) -> TokenizerConfig {
        TokenizerConfig::Regex {
            pattern: self.pattern().to_string(),
            gaps: self.gaps,
        }
    }
}
