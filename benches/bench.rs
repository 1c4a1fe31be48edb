//! Criterion benchmarks for the bayes classifier.
//!
//! Covers tokenization, training throughput, categorization and snapshot
//! serialization.

use std::hint::black_box;
use std::sync::Arc;

use bayes::analysis::tokenizer::{RegexTokenizer, Tokenizer, UnicodeWordTokenizer};
use bayes::classifier::{ClassifierOptions, NaiveBayesClassifier};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const CATEGORIES: [&str; 4] = ["sports", "politics", "science", "music"];

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<(String, &'static str)> {
    let words = [
        "goal", "match", "team", "vote", "election", "senate", "atom", "cell",
        "theory", "guitar", "melody", "concert", "the", "a", "of", "and", "fast",
        "new", "record", "crowd", "policy", "lab", "song", "stadium",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 20 + (i % 60);
        let mut doc_words = Vec::with_capacity(doc_length);

        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13) % words.len(); // Pseudo-random distribution
            doc_words.push(words[word_idx]);
        }

        documents.push((doc_words.join(", "), CATEGORIES[i % CATEGORIES.len()]));
    }

    documents
}

fn trained_classifier(documents: &[(String, &str)]) -> NaiveBayesClassifier {
    let mut classifier = NaiveBayesClassifier::new();
    for (text, category) in documents {
        classifier.learn(text, category).unwrap();
    }
    classifier
}

/// Benchmark the built-in tokenizers.
fn bench_tokenization(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenization");
    let documents = generate_test_documents(1);
    let text = &documents[0].0;

    let tokenizers: Vec<Arc<dyn Tokenizer>> = vec![
        Arc::new(RegexTokenizer::new().unwrap()),
        Arc::new(UnicodeWordTokenizer::new()),
    ];
    for tokenizer in tokenizers {
        group.bench_function(tokenizer.name(), |b| {
            b.iter(|| {
                let tokens = tokenizer.tokenize(black_box(text)).unwrap();
                black_box(tokens.count())
            })
        });
    }

    group.finish();
}

/// Benchmark training.
fn bench_learn(c: &mut Criterion) {
    let mut group = c.benchmark_group("learn");

    for size in [100, 1000] {
        let documents = generate_test_documents(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &documents, |b, docs| {
            b.iter_with_setup(
                || NaiveBayesClassifier::with_options(ClassifierOptions::new()),
                |mut classifier| {
                    for (text, category) in docs {
                        classifier.learn(black_box(text), category).unwrap();
                    }
                    black_box(classifier)
                },
            )
        });
    }

    group.finish();
}

/// Benchmark categorization against a trained model.
fn bench_categorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("categorize");

    let documents = generate_test_documents(1000);
    let classifier = trained_classifier(&documents);
    let query = &documents[17].0;

    group.bench_function("categorize", |b| {
        b.iter(|| black_box(classifier.categorize(black_box(query)).unwrap()))
    });
    group.bench_function("probabilities", |b| {
        b.iter(|| black_box(classifier.probabilities(black_box(query)).unwrap()))
    });

    group.finish();
}

/// Benchmark snapshot serialization.
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    group.sample_size(20);

    let classifier = trained_classifier(&generate_test_documents(1000));
    let snapshot = classifier.serialize().unwrap();

    group.bench_function("serialize", |b| {
        b.iter(|| black_box(classifier.serialize().unwrap()))
    });
    group.bench_function("deserialize", |b| {
        b.iter(|| black_box(NaiveBayesClassifier::deserialize(black_box(&snapshot)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenization,
    bench_learn,
    bench_categorize,
    bench_snapshot
);

criterion_main!(benches);
