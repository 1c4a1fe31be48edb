//! JSON snapshots of a classifier.
//!
//! A snapshot is one flat JSON object whose keys are [`STATE_KEYS`]:
//!
//! ```json
//! {
//!   "categories": {"chinese": true, "japanese": true},
//!   "docCount": {"chinese": 1, "japanese": 1},
//!   "totalDocuments": 2,
//!   "vocabulary": {"Beijing": true, "Chinese": true},
//!   "vocabularySize": 2,
//!   "wordCount": {"chinese": 3, "japanese": 1},
//!   "wordFrequencyCount": {"chinese": {"Beijing": 1, "Chinese": 2}, "japanese": {"Chinese": 1}},
//!   "options": {}
//! }
//! ```
//!
//! `categories` keeps insertion order, which decides ties during
//! categorization. Everything else is written in sorted order so the same
//! state always produces the same text. Decoding is strict: every key must be
//! present and non-null, no other key is accepted, and the counters must
//! agree with each other.

use std::collections::HashMap;

use ahash::{AHashMap, AHashSet};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use super::model::{ClassifierState, NaiveBayesClassifier};
use super::options::ClassifierOptions;
use crate::error::{BayesError, Result};

/// Top-level keys of a snapshot, all required.
pub const STATE_KEYS: [&str; 8] = [
    "categories",
    "docCount",
    "totalDocuments",
    "vocabulary",
    "vocabularySize",
    "wordCount",
    "wordFrequencyCount",
    "options",
];

/// A JSON object written in the given entry order.
struct Entries<'a, V>(Vec<(&'a str, V)>);

impl<V: Serialize> Serialize for Entries<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    categories: Entries<'a, bool>,
    doc_count: Entries<'a, u64>,
    total_documents: u64,
    vocabulary: Entries<'a, bool>,
    vocabulary_size: usize,
    word_count: Entries<'a, u64>,
    word_frequency_count: Entries<'a, Entries<'a, u64>>,
    options: Value,
}

impl<'a> SnapshotRef<'a> {
    fn new(classifier: &'a NaiveBayesClassifier) -> Result<Self> {
        let state = &classifier.state;
        let per_category = |counts: &'a AHashMap<String, u64>| {
            Entries(
                state
                    .categories
                    .iter()
                    .map(|category| (category.as_str(), counts.get(category).copied().unwrap_or(0)))
                    .collect(),
            )
        };

        let mut vocabulary: Vec<&str> = state.vocabulary.iter().map(String::as_str).collect();
        vocabulary.sort_unstable();

        Ok(SnapshotRef {
            categories: Entries(state.categories.iter().map(|c| (c.as_str(), true)).collect()),
            doc_count: per_category(&state.doc_count),
            total_documents: state.total_documents,
            vocabulary: Entries(vocabulary.into_iter().map(|token| (token, true)).collect()),
            vocabulary_size: state.vocabulary_size,
            word_count: per_category(&state.word_count),
            word_frequency_count: Entries(
                state
                    .categories
                    .iter()
                    .map(|category| {
                        let mut tokens: Vec<(&str, u64)> = state
                            .word_frequency_count
                            .get(category)
                            .map(|frequencies| {
                                frequencies
                                    .iter()
                                    .map(|(token, count)| (token.as_str(), *count))
                                    .collect()
                            })
                            .unwrap_or_default();
                        tokens.sort_unstable_by(|a, b| a.0.cmp(b.0));
                        (category.as_str(), Entries(tokens))
                    })
                    .collect(),
            ),
            options: classifier.options.to_value()?,
        })
    }
}

impl NaiveBayesClassifier {
    /// Encode the complete classifier state as a JSON snapshot.
    pub fn serialize(&self) -> Result<String> {
        let snapshot = serde_json::to_string(&SnapshotRef::new(self)?)?;
        debug!(
            "serialized snapshot: {} categories, {} tokens, {} bytes",
            self.state.categories.len(),
            self.state.vocabulary_size,
            snapshot.len()
        );
        Ok(snapshot)
    }

    /// Same as [`serialize`](Self::serialize), indented for humans.
    pub fn serialize_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&SnapshotRef::new(self)?)?)
    }

    /// Rebuild a classifier from a snapshot.
    ///
    /// The tokenizer is recreated from the snapshot's `options`. Snapshots of
    /// classifiers with a caller-supplied tokenizer fail with
    /// [`BayesError::InvalidOptions`]; use
    /// [`deserialize_with_options`](Self::deserialize_with_options) for those.
    ///
    /// ```
    /// use bayes::classifier::NaiveBayesClassifier;
    /// use bayes::error::BayesError;
    ///
    /// let mut classifier = NaiveBayesClassifier::new();
    /// classifier.learn("hello there", "greeting").unwrap();
    ///
    /// let restored = NaiveBayesClassifier::deserialize(&classifier.serialize().unwrap()).unwrap();
    /// assert_eq!(restored, classifier);
    ///
    /// let err = NaiveBayesClassifier::deserialize("not json").unwrap_err();
    /// assert!(matches!(err, BayesError::MalformedSnapshot(_)));
    /// ```
    pub fn deserialize(snapshot: &str) -> Result<Self> {
        let mut fields = parse_fields(snapshot)?;
        let options = ClassifierOptions::from_value(&take(&mut fields, "options")?).map_err(
            |e| match e {
                BayesError::InvalidOptions(msg) => BayesError::invalid_options(format!(
                    "{msg} (pass the tokenizer to deserialize_with_options)"
                )),
                other => other,
            },
        )?;
        let state = decode_state(&mut fields)?;
        Ok(Self::from_parts(state, options))
    }

    /// Rebuild a classifier from a snapshot, using `options` instead of the
    /// options recorded in it.
    ///
    /// The recorded options must still be present and must be an object. A
    /// warning is logged when they describe a different tokenizer.
    pub fn deserialize_with_options(snapshot: &str, options: ClassifierOptions) -> Result<Self> {
        let mut fields = parse_fields(snapshot)?;
        let recorded = take(&mut fields, "options")?;
        if !recorded.is_object() {
            return Err(BayesError::invalid_options(
                "snapshot options must be an object",
            ));
        }
        let supplied = options.to_value()?;
        if recorded != supplied {
            warn!("snapshot options {recorded} differ from supplied options {supplied}");
        }
        let state = decode_state(&mut fields)?;
        Ok(Self::from_parts(state, options))
    }
}

/// Parse the snapshot and check its key set.
fn parse_fields(snapshot: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(snapshot)
        .map_err(|e| BayesError::malformed_snapshot(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(BayesError::malformed_snapshot(
            "expected a JSON object at the top level",
        ));
    };

    for key in STATE_KEYS {
        if fields.get(key).is_none_or(Value::is_null) {
            return Err(BayesError::incomplete_snapshot(key));
        }
    }
    if let Some(key) = fields.keys().find(|key| !STATE_KEYS.contains(&key.as_str())) {
        return Err(BayesError::malformed_snapshot(format!("unknown field `{key}`")));
    }

    debug!("parsed snapshot of {} bytes", snapshot.len());
    Ok(fields)
}

fn take(fields: &mut Map<String, Value>, key: &str) -> Result<Value> {
    fields
        .remove(key)
        .ok_or_else(|| BayesError::incomplete_snapshot(key))
}

fn field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Result<T> {
    serde_json::from_value(take(fields, key)?)
        .map_err(|e| BayesError::malformed_snapshot(format!("field `{key}`: {e}")))
}

/// Keys of a `{key: true}` object, in document order.
fn flag_keys(fields: &mut Map<String, Value>, key: &str) -> Result<Vec<String>> {
    let flags: Map<String, Value> = field(fields, key)?;
    flags
        .into_iter()
        .map(|(name, flag)| match flag {
            Value::Bool(true) => Ok(name),
            other => Err(BayesError::malformed_snapshot(format!(
                "field `{key}`: entry `{name}` must be true, found {other}"
            ))),
        })
        .collect()
}

fn decode_state(fields: &mut Map<String, Value>) -> Result<ClassifierState> {
    let categories = flag_keys(fields, "categories")?;
    let vocabulary: AHashSet<String> = flag_keys(fields, "vocabulary")?.into_iter().collect();
    let doc_count: HashMap<String, u64> = field(fields, "docCount")?;
    let word_count: HashMap<String, u64> = field(fields, "wordCount")?;
    let word_frequency_count: HashMap<String, HashMap<String, u64>> =
        field(fields, "wordFrequencyCount")?;

    let state = ClassifierState {
        vocabulary,
        vocabulary_size: field(fields, "vocabularySize")?,
        total_documents: field(fields, "totalDocuments")?,
        categories,
        doc_count: doc_count.into_iter().collect(),
        word_count: word_count.into_iter().collect(),
        word_frequency_count: word_frequency_count
            .into_iter()
            .map(|(category, frequencies)| (category, frequencies.into_iter().collect()))
            .collect(),
    };
    validate(&state)?;
    Ok(state)
}

/// Check the counter invariants of a decoded state.
fn validate(state: &ClassifierState) -> Result<()> {
    if state.vocabulary_size != state.vocabulary.len() {
        return Err(BayesError::inconsistent_snapshot(format!(
            "vocabularySize is {} but vocabulary has {} tokens",
            state.vocabulary_size,
            state.vocabulary.len()
        )));
    }

    let category_count = state.categories.len();
    for (name, len) in [
        ("docCount", state.doc_count.len()),
        ("wordCount", state.word_count.len()),
        ("wordFrequencyCount", state.word_frequency_count.len()),
    ] {
        if len != category_count {
            return Err(BayesError::inconsistent_snapshot(format!(
                "{name} has {len} categories, expected {category_count}"
            )));
        }
    }

    let mut documents = 0u64;
    let mut counted_tokens: AHashSet<&str> = AHashSet::new();
    for category in &state.categories {
        let (Some(docs), Some(words), Some(frequencies)) = (
            state.doc_count.get(category),
            state.word_count.get(category),
            state.word_frequency_count.get(category),
        ) else {
            return Err(BayesError::inconsistent_snapshot(format!(
                "category `{category}` is missing from the per-category counters"
            )));
        };
        documents = documents.checked_add(*docs).ok_or_else(|| {
            BayesError::inconsistent_snapshot("docCount overflows when summed")
        })?;

        let occurrences = frequencies
            .values()
            .try_fold(0u64, |sum, count| sum.checked_add(*count))
            .ok_or_else(|| {
                BayesError::inconsistent_snapshot(format!(
                    "frequencies of `{category}` overflow when summed"
                ))
            })?;
        if occurrences != *words {
            return Err(BayesError::inconsistent_snapshot(format!(
                "wordCount of `{category}` is {words} but its frequencies sum to {occurrences}"
            )));
        }

        for token in frequencies.keys() {
            if !state.vocabulary.contains(token) {
                return Err(BayesError::inconsistent_snapshot(format!(
                    "token `{token}` of `{category}` is not in the vocabulary"
                )));
            }
            counted_tokens.insert(token.as_str());
        }
    }

    if documents != state.total_documents {
        return Err(BayesError::inconsistent_snapshot(format!(
            "docCount sums to {documents} but totalDocuments is {}",
            state.total_documents
        )));
    }
    if counted_tokens.len() != state.vocabulary.len() {
        return Err(BayesError::inconsistent_snapshot(format!(
            "{} vocabulary tokens never occur in any category",
            state.vocabulary.len() - counted_tokens.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trained() -> NaiveBayesClassifier {
        let mut classifier = NaiveBayesClassifier::new();
        classifier.learn("Chinese Beijing Chinese", "chinese").unwrap();
        classifier.learn("Tokyo Japan Chinese", "japanese").unwrap();
        classifier
    }

    fn snapshot_value(classifier: &NaiveBayesClassifier) -> Value {
        serde_json::from_str(&classifier.serialize().unwrap()).unwrap()
    }

    #[test]
    fn test_snapshot_shape() {
        let value = snapshot_value(&trained());
        assert_eq!(
            value,
            json!({
                "categories": {"chinese": true, "japanese": true},
                "docCount": {"chinese": 1, "japanese": 1},
                "totalDocuments": 2,
                "vocabulary": {"Beijing": true, "Chinese": true, "Japan": true, "Tokyo": true},
                "vocabularySize": 4,
                "wordCount": {"chinese": 3, "japanese": 3},
                "wordFrequencyCount": {
                    "chinese": {"Beijing": 1, "Chinese": 2},
                    "japanese": {"Chinese": 1, "Japan": 1, "Tokyo": 1}
                },
                "options": {}
            })
        );
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let a = trained();
        let b = trained();
        assert_eq!(a.serialize().unwrap(), b.serialize().unwrap());
    }

    #[test]
    fn test_category_order_survives_round_trip() {
        let mut classifier = NaiveBayesClassifier::new();
        for category in ["zeta", "alpha", "mu"] {
            classifier.learn("same", category).unwrap();
        }
        let restored = NaiveBayesClassifier::deserialize(&classifier.serialize().unwrap()).unwrap();
        assert_eq!(restored.categories(), ["zeta", "alpha", "mu"]);
        assert_eq!(restored.categorize("same").unwrap().as_deref(), Some("zeta"));
    }

    #[test]
    fn test_null_field_is_incomplete() {
        let mut value = snapshot_value(&trained());
        value["wordCount"] = Value::Null;
        let err = NaiveBayesClassifier::deserialize(&value.to_string()).unwrap_err();
        assert!(matches!(err, BayesError::IncompleteSnapshot(ref f) if f == "wordCount"));
    }

    #[test]
    fn test_unknown_field_is_malformed() {
        let mut value = snapshot_value(&trained());
        value["tokenizer"] = json!("regex");
        let err = NaiveBayesClassifier::deserialize(&value.to_string()).unwrap_err();
        assert!(matches!(err, BayesError::MalformedSnapshot(_)));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let mut value = snapshot_value(&trained());
        value["totalDocuments"] = json!("two");
        let err = NaiveBayesClassifier::deserialize(&value.to_string()).unwrap_err();
        assert!(matches!(err, BayesError::MalformedSnapshot(_)));

        let mut value = snapshot_value(&trained());
        value["categories"] = json!({"chinese": true, "japanese": 1});
        let err = NaiveBayesClassifier::deserialize(&value.to_string()).unwrap_err();
        assert!(matches!(err, BayesError::MalformedSnapshot(_)));
    }

    #[test]
    fn test_non_object_options_are_invalid() {
        let mut value = snapshot_value(&trained());
        value["options"] = json!(["regex"]);
        let err = NaiveBayesClassifier::deserialize(&value.to_string()).unwrap_err();
        assert!(matches!(err, BayesError::InvalidOptions(_)));

        let err = NaiveBayesClassifier::deserialize_with_options(
            &value.to_string(),
            ClassifierOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BayesError::InvalidOptions(_)));
    }

    #[test]
    fn test_overflowing_counters_are_rejected() {
        let mut value = snapshot_value(&trained());
        value["docCount"] = json!({"chinese": u64::MAX, "japanese": 1});
        let err = NaiveBayesClassifier::deserialize(&value.to_string()).unwrap_err();
        assert!(matches!(err, BayesError::InconsistentSnapshot(_)), "{err}");

        let mut value = snapshot_value(&trained());
        value["wordFrequencyCount"]["chinese"] = json!({"Beijing": u64::MAX, "Chinese": 4});
        value["wordCount"]["chinese"] = json!(3);
        let err = NaiveBayesClassifier::deserialize(&value.to_string()).unwrap_err();
        assert!(matches!(err, BayesError::InconsistentSnapshot(_)), "{err}");
    }

    #[test]
    fn test_inconsistent_counters_are_rejected() {
        let corruptions: Vec<(&str, Value)> = vec![
            ("vocabularySize", json!(5)),
            ("totalDocuments", json!(3)),
            ("wordCount", json!({"chinese": 4, "japanese": 3})),
            ("docCount", json!({"chinese": 1})),
            (
                "vocabulary",
                json!({"Beijing": true, "Chinese": true, "Japan": true, "Osaka": true}),
            ),
        ];

        for (key, corrupted) in corruptions {
            let mut value = snapshot_value(&trained());
            value[key] = corrupted;
            let err = NaiveBayesClassifier::deserialize(&value.to_string()).unwrap_err();
            assert!(
                matches!(err, BayesError::InconsistentSnapshot(_)),
                "{key}: {err}"
            );
        }
    }
}
