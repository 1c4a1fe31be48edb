//! Classifier configuration.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer, TokenizerConfig};
use crate::error::{BayesError, Result};

/// Options used to construct a [`NaiveBayesClassifier`](super::NaiveBayesClassifier).
///
/// The only recognised option is the tokenizer. When none is given the
/// default [`RegexTokenizer`] is used.
///
/// ```
/// use std::sync::Arc;
/// use bayes::analysis::tokenizer::NgramTokenizer;
/// use bayes::classifier::ClassifierOptions;
///
/// let options = ClassifierOptions::new().with_tokenizer(Arc::new(NgramTokenizer::character()));
/// assert_eq!(options.tokenizer_config().is_custom(), false);
/// ```
#[derive(Clone, Default)]
pub struct ClassifierOptions {
    /// Caller-selected tokenizer; `None` means the default one.
    tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl ClassifierOptions {
    /// Options selecting the default tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given tokenizer instead of the default one.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Use a built-in tokenizer described by `config`.
    pub fn with_tokenizer_config(self, config: TokenizerConfig) -> Result<Self> {
        let tokenizer = config.build().map_err(|e| match e {
            BayesError::InvalidOptions(msg) => BayesError::InvalidOptions(msg),
            other => BayesError::invalid_options(format!("tokenizer: {other}")),
        })?;
        Ok(self.with_tokenizer(tokenizer))
    }

    /// Build options from their JSON form.
    ///
    /// `null` and `{}` select the defaults. Anything other than an object is
    /// rejected, as are unknown keys.
    ///
    /// ```
    /// use bayes::classifier::ClassifierOptions;
    /// use bayes::error::BayesError;
    ///
    /// let options = ClassifierOptions::from_value(&serde_json::json!({})).unwrap();
    /// assert!(!options.has_tokenizer());
    ///
    /// let err = ClassifierOptions::from_value(&serde_json::json!([1, 2])).unwrap_err();
    /// assert!(matches!(err, BayesError::InvalidOptions(_)));
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(map) => map,
            other => {
                return Err(BayesError::invalid_options(format!(
                    "expected an object, found {}",
                    json_kind(other)
                )));
            }
        };

        if let Some(key) = map.keys().find(|key| key.as_str() != "tokenizer") {
            return Err(BayesError::invalid_options(format!("unknown option `{key}`")));
        }

        match map.get("tokenizer") {
            None | Some(Value::Null) => Ok(Self::new()),
            Some(raw) => {
                let config: TokenizerConfig = serde_json::from_value(raw.clone())
                    .map_err(|e| BayesError::invalid_options(format!("tokenizer: {e}")))?;
                Self::new().with_tokenizer_config(config)
            }
        }
    }

    /// The JSON form persisted in snapshots.
    ///
    /// Default options serialize as `{}`.
    pub fn to_value(&self) -> Result<Value> {
        let mut map = Map::new();
        if let Some(tokenizer) = &self.tokenizer {
            map.insert(
                "tokenizer".to_string(),
                serde_json::to_value(tokenizer.config())?,
            );
        }
        Ok(Value::Object(map))
    }

    /// Whether a tokenizer other than the default was selected.
    pub fn has_tokenizer(&self) -> bool {
        self.tokenizer.is_some()
    }

    /// The config of the tokenizer these options resolve to.
    pub fn tokenizer_config(&self) -> TokenizerConfig {
        self.tokenizer
            .as_ref()
            .map(|tokenizer| tokenizer.config())
            .unwrap_or_default()
    }

    /// The tokenizer these options resolve to.
    pub(crate) fn resolve_tokenizer(&self) -> Arc<dyn Tokenizer> {
        match &self.tokenizer {
            Some(tokenizer) => Arc::clone(tokenizer),
            None => Arc::new(RegexTokenizer::default()),
        }
    }
}

impl fmt::Debug for ClassifierOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierOptions")
            .field("tokenizer", &self.tokenizer.as_ref().map(|t| t.name()))
            .finish()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
