//! Classifier state and training.

use std::fmt;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};

use super::options::ClassifierOptions;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Per-document token frequencies, in first-occurrence order.
pub type FrequencyTable = Vec<(String, u64)>;

/// The learned counts of a classifier.
///
/// Every field only ever grows. The invariants below hold after every
/// [`NaiveBayesClassifier::learn`] call and are checked when a snapshot is
/// decoded:
///
/// - `vocabulary_size == vocabulary.len()`
/// - the sum of `doc_count` equals `total_documents`
/// - for each category, the sum of its token frequencies equals its word count
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifierState {
    /// Every token seen in any learned document.
    pub(crate) vocabulary: AHashSet<String>,
    pub(crate) vocabulary_size: usize,
    pub(crate) total_documents: u64,
    /// Category labels in insertion order.
    pub(crate) categories: Vec<String>,
    pub(crate) doc_count: AHashMap<String, u64>,
    pub(crate) word_count: AHashMap<String, u64>,
    pub(crate) word_frequency_count: AHashMap<String, AHashMap<String, u64>>,
}

impl ClassifierState {
    /// Category labels in the order they were first learned.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn vocabulary(&self) -> &AHashSet<String> {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    /// Number of documents learned under `category`.
    pub fn doc_count(&self, category: &str) -> u64 {
        self.doc_count.get(category).copied().unwrap_or(0)
    }

    /// Total token occurrences attributed to `category`.
    pub fn word_count(&self, category: &str) -> u64 {
        self.word_count.get(category).copied().unwrap_or(0)
    }

    /// How often `token` occurred in documents learned under `category`.
    pub fn word_frequency(&self, category: &str, token: &str) -> u64 {
        self.word_frequency_count
            .get(category)
            .and_then(|frequencies| frequencies.get(token))
            .copied()
            .unwrap_or(0)
    }

    /// All token frequencies of `category`, if the category is known.
    pub fn word_frequencies(&self, category: &str) -> Option<&AHashMap<String, u64>> {
        self.word_frequency_count.get(category)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.doc_count.contains_key(category)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }

    /// Whether nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.total_documents == 0 && self.categories.is_empty()
    }

    fn initialize_category(&mut self, category: &str) {
        if self.has_category(category) {
            return;
        }
        debug!("initializing category {category:?}");
        self.categories.push(category.to_string());
        self.doc_count.insert(category.to_string(), 0);
        self.word_count.insert(category.to_string(), 0);
        self.word_frequency_count
            .insert(category.to_string(), AHashMap::new());
    }

    /// Merge one document's frequency table into `category`.
    pub(crate) fn record(&mut self, category: &str, table: &[(String, u64)]) {
        self.initialize_category(category);

        // Saturate: restored counters are not bounded by what learn produced.
        let docs = self.doc_count.entry(category.to_string()).or_insert(0);
        *docs = docs.saturating_add(1);
        self.total_documents = self.total_documents.saturating_add(1);

        let frequencies = self
            .word_frequency_count
            .entry(category.to_string())
            .or_default();
        let mut occurrences: u64 = 0;
        for (token, count) in table {
            if !self.vocabulary.contains(token) {
                self.vocabulary.insert(token.clone());
                self.vocabulary_size += 1;
            }
            let frequency = frequencies.entry(token.clone()).or_insert(0);
            *frequency = frequency.saturating_add(*count);
            occurrences = occurrences.saturating_add(*count);
        }
        let words = self.word_count.entry(category.to_string()).or_insert(0);
        *words = words.saturating_add(occurrences);

        trace!(
            "learned document under {category:?}: {occurrences} tokens, {} distinct",
            table.len()
        );
    }
}

/// A multinomial Naive Bayes text classifier with add-one smoothing.
///
/// # Examples
///
/// ```
/// use bayes::classifier::NaiveBayesClassifier;
///
/// # fn main() -> bayes::error::Result<()> {
/// let mut classifier = NaiveBayesClassifier::new();
/// classifier.learn("amazing, awesome movie!! Yeah!! Oh boy.", "positive")?;
/// classifier.learn("Sweet, this is incredibly, amazing, perfect, great!!", "positive")?;
/// classifier.learn("terrible, shitty thing. Damn. Sucks!!", "negative")?;
///
/// let category = classifier.categorize("awesome, cool, amazing!! Yay.")?;
/// assert_eq!(category.as_deref(), Some("positive"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NaiveBayesClassifier {
    pub(crate) state: ClassifierState,
    pub(crate) options: ClassifierOptions,
    pub(crate) tokenizer: Arc<dyn Tokenizer>,
}

impl NaiveBayesClassifier {
    /// Create an empty classifier using the default tokenizer.
    pub fn new() -> Self {
        Self::with_options(ClassifierOptions::new())
    }

    /// Create an empty classifier with the given options.
    pub fn with_options(options: ClassifierOptions) -> Self {
        Self::from_parts(ClassifierState::default(), options)
    }

    pub(crate) fn from_parts(state: ClassifierState, options: ClassifierOptions) -> Self {
        let tokenizer = options.resolve_tokenizer();
        Self {
            state,
            options,
            tokenizer,
        }
    }

    /// Train on one document labelled `category`.
    ///
    /// The text is tokenized before any counter is touched, so a failing
    /// tokenizer leaves the classifier unchanged. Empty text and empty
    /// category labels are accepted.
    pub fn learn(&mut self, text: &str, category: &str) -> Result<()> {
        let table = self.frequency_table(text)?;
        self.state.record(category, &table);
        Ok(())
    }

    /// Tokenize `text` and count each distinct token.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use bayes::analysis::tokenizer::NgramTokenizer;
    /// use bayes::classifier::{ClassifierOptions, NaiveBayesClassifier};
    ///
    /// let options = ClassifierOptions::new().with_tokenizer(Arc::new(NgramTokenizer::character()));
    /// let classifier = NaiveBayesClassifier::with_options(options);
    /// let table = classifier.frequency_table("abca").unwrap();
    /// assert_eq!(table, vec![("a".to_string(), 2), ("b".to_string(), 1), ("c".to_string(), 1)]);
    /// ```
    pub fn frequency_table(&self, text: &str) -> Result<FrequencyTable> {
        let mut index: AHashMap<String, usize> = AHashMap::new();
        let mut table: FrequencyTable = Vec::new();

        for token in self.tokenizer.tokenize(text)? {
            match index.get(&token.text) {
                Some(&slot) => table[slot].1 += 1,
                None => {
                    index.insert(token.text.clone(), table.len());
                    table.push((token.text, 1));
                }
            }
        }

        Ok(table)
    }

    /// The learned counts.
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Category labels in the order they were first learned.
    pub fn categories(&self) -> &[String] {
        self.state.categories()
    }

    pub fn vocabulary(&self) -> &AHashSet<String> {
        self.state.vocabulary()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.state.vocabulary_size()
    }

    pub fn total_documents(&self) -> u64 {
        self.state.total_documents()
    }

    pub fn doc_count(&self, category: &str) -> u64 {
        self.state.doc_count(category)
    }

    pub fn word_count(&self, category: &str) -> u64 {
        self.state.word_count(category)
    }

    pub fn word_frequency(&self, category: &str, token: &str) -> u64 {
        self.state.word_frequency(category, token)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.state.contains_token(token)
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for NaiveBayesClassifier {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.tokenizer.config() == other.tokenizer.config()
    }
}

impl fmt::Debug for NaiveBayesClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaiveBayesClassifier")
            .field("categories", &self.state.categories)
            .field("total_documents", &self.state.total_documents)
            .field("vocabulary_size", &self.state.vocabulary_size)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::NgramTokenizer;

    fn assert_invariants(classifier: &NaiveBayesClassifier) {
        let state = classifier.state();
        assert_eq!(state.vocabulary_size, state.vocabulary.len());
        assert_eq!(
            state.doc_count.values().sum::<u64>(),
            state.total_documents
        );
        for category in &state.categories {
            let frequencies = &state.word_frequency_count[category];
            assert_eq!(frequencies.values().sum::<u64>(), state.word_count[category]);
        }
    }

    #[test]
    fn test_new_classifier_is_empty() {
        let classifier = NaiveBayesClassifier::new();
        assert!(classifier.is_empty());
        assert_eq!(classifier.total_documents(), 0);
        assert_eq!(classifier.vocabulary_size(), 0);
        assert!(classifier.categories().is_empty());
        assert_eq!(classifier.tokenizer().name(), "regex");
    }

    #[test]
    fn test_learn_updates_counters() {
        let mut classifier = NaiveBayesClassifier::new();
        classifier.learn("Chinese Beijing Chinese", "chinese").unwrap();
        classifier.learn("Tokyo Japan Chinese", "japanese").unwrap();

        assert_eq!(classifier.total_documents(), 2);
        assert_eq!(classifier.categories(), ["chinese", "japanese"]);
        assert_eq!(classifier.doc_count("chinese"), 1);
        assert_eq!(classifier.word_count("chinese"), 3);
        assert_eq!(classifier.word_frequency("chinese", "Chinese"), 2);
        assert_eq!(classifier.word_frequency("japanese", "Chinese"), 1);
        assert_eq!(classifier.word_frequency("japanese", "Beijing"), 0);
        assert_eq!(classifier.vocabulary_size(), 4);
        assert_invariants(&classifier);
    }

    #[test]
    fn test_empty_text_and_empty_category() {
        let mut classifier = NaiveBayesClassifier::new();
        classifier.learn("", "").unwrap();
        classifier.learn("!!! ...", "").unwrap();

        assert_eq!(classifier.categories(), [""]);
        assert_eq!(classifier.doc_count(""), 2);
        assert_eq!(classifier.word_count(""), 0);
        assert_eq!(classifier.vocabulary_size(), 0);
        assert!(!classifier.is_empty());
        assert_invariants(&classifier);
    }

    #[test]
    fn test_category_order_is_insertion_order() {
        let mut classifier = NaiveBayesClassifier::new();
        for category in ["zeta", "alpha", "mu", "alpha", "zeta"] {
            classifier.learn("text", category).unwrap();
        }
        assert_eq!(classifier.categories(), ["zeta", "alpha", "mu"]);
        assert_invariants(&classifier);
    }

    #[test]
    fn test_character_tokenizer_frequencies() {
        let options =
            ClassifierOptions::new().with_tokenizer(Arc::new(NgramTokenizer::character()));
        let mut classifier = NaiveBayesClassifier::with_options(options);

        let table = classifier.frequency_table("abcd").unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|(token, count)| token.chars().count() == 1 && *count == 1));

        classifier.learn("abcd", "letters").unwrap();
        assert_eq!(classifier.word_count("letters"), 4);
        assert_invariants(&classifier);
    }

    #[test]
    fn test_learn_saturates_restored_counters() {
        let snapshot = serde_json::json!({
            "categories": {"a": true},
            "docCount": {"a": u64::MAX},
            "totalDocuments": u64::MAX,
            "vocabulary": {"x": true},
            "vocabularySize": 1,
            "wordCount": {"a": u64::MAX},
            "wordFrequencyCount": {"a": {"x": u64::MAX}},
            "options": {}
        });
        let mut classifier = NaiveBayesClassifier::deserialize(&snapshot.to_string()).unwrap();

        classifier.learn("x x y", "a").unwrap();
        assert_eq!(classifier.doc_count("a"), u64::MAX);
        assert_eq!(classifier.total_documents(), u64::MAX);
        assert_eq!(classifier.word_count("a"), u64::MAX);
        assert_eq!(classifier.word_frequency("a", "x"), u64::MAX);
        assert_eq!(classifier.word_frequency("a", "y"), 1);
        assert_eq!(classifier.vocabulary_size(), 2);
    }

    #[test]
    fn test_equality_ignores_tokenizer_identity() {
        let mut a = NaiveBayesClassifier::new();
        let mut b = NaiveBayesClassifier::new();
        a.learn("one two", "x").unwrap();
        assert_ne!(a, b);
        b.learn("one two", "x").unwrap();
        assert_eq!(a, b);

        let character =
            ClassifierOptions::new().with_tokenizer(Arc::new(NgramTokenizer::character()));
        assert_ne!(NaiveBayesClassifier::new(), NaiveBayesClassifier::with_options(character));
    }
}
