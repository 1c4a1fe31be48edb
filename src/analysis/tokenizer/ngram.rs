//! N-gram tokenizer implementation.

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::{Tokenizer, TokenizerConfig};
use crate::error::{BayesError, Result};

/// A tokenizer that generates character n-grams.
///
/// "Characters" are extended grapheme clusters, so a letter with a combining
/// accent is one character. Whitespace and punctuation are not removed.
///
/// # Examples
///
/// ```
/// use bayes::analysis::tokenizer::ngram::NgramTokenizer;
/// use bayes::analysis::tokenizer::Tokenizer;
///
/// // Single characters
/// let tokenizer = NgramTokenizer::character();
/// let tokens: Vec<_> = tokenizer.tokenize("abcd").unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, vec!["a", "b", "c", "d"]);
///
/// // Variable length (2-3)
/// let tokenizer = NgramTokenizer::new(2, 3).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("abc").unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, vec!["ab", "abc", "bc"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    /// Minimum n-gram size
    min_gram: usize,
    /// Maximum n-gram size
    max_gram: usize,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_gram` is 0 or `max_gram` is less than `min_gram`.
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        if min_gram == 0 {
            return Err(BayesError::analysis("min_gram must be at least 1"));
        }
        if max_gram < min_gram {
            return Err(BayesError::analysis(format!(
                "max_gram ({max_gram}) must be >= min_gram ({min_gram})"
            )));
        }
        Ok(Self { min_gram, max_gram })
    }

    /// Create a tokenizer that splits text into single characters (n=1).
    pub fn character() -> Self {
        Self {
            min_gram: 1,
            max_gram: 1,
        }
    }

    pub fn min_gram(&self) -> usize {
        self.min_gram
    }

    pub fn max_gram(&self) -> usize {
        self.max_gram
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
        let mut tokens = Vec::new();

        for start in 0..graphemes.len() {
            for gram_size in self.min_gram..=self.max_gram {
                let end = start + gram_size;
                if end > graphemes.len() {
                    break;
                }

                let start_offset = graphemes[start].0;
                let (last_offset, last) = graphemes[end - 1];
                let end_offset = last_offset + last.len();

                tokens.push(Token::with_offsets(
                    &text[start_offset..end_offset],
                    tokens.len(),
                    start_offset,
                    end_offset,
                ));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }

    fn config(&self) -> TokenizerConfig {
        TokenizerConfig::Ngram {
            min_gram: self.min_gram,
            max_gram: self.max_gram,
        }
    }
}
