//! Command implementations for the bayes CLI.

use std::fs;
use std::path::Path;

use log::info;

use crate::classifier::{ClassifierOptions, NaiveBayesClassifier};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{BayesError, Result};

/// Execute a CLI command.
pub fn execute_command(args: BayesArgs) -> Result<()> {
    match &args.command {
        Command::Learn(learn_args) => {
            let result = learn_document(learn_args)?;
            output_result("Document learned", &result, &args)
        }
        Command::Categorize(categorize_args) => {
            let result = categorize_text(categorize_args)?;
            output_result("Categorization", &result, &args)
        }
        Command::Probabilities(categorize_args) => {
            let result = score_text(categorize_args)?;
            output_result("Category scores", &result, &args)
        }
        Command::Stats(stats_args) => {
            let result = model_stats(stats_args)?;
            output_result("Model statistics", &result, &args)
        }
    }
}

/// A follow-up line for errors the user can act on.
pub fn error_hint(error: &BayesError) -> Option<&'static str> {
    if error.is_snapshot_error() {
        Some("the model file is not a valid classifier snapshot; relearn it or restore a backup")
    } else {
        None
    }
}

/// Read a classifier snapshot from disk.
pub fn load_model(path: &Path) -> Result<NaiveBayesClassifier> {
    let snapshot = fs::read_to_string(path)?;
    NaiveBayesClassifier::deserialize(&snapshot)
}

/// Write a classifier snapshot to disk, replacing the file atomically.
pub fn save_model(classifier: &NaiveBayesClassifier, path: &Path) -> Result<()> {
    let snapshot = classifier.serialize()?;
    let staging = path.with_extension("tmp");
    fs::write(&staging, snapshot)?;
    fs::rename(&staging, path)?;
    Ok(())
}

/// Learn one document into the model file, creating it if needed.
pub fn learn_document(args: &LearnArgs) -> Result<LearnResult> {
    let text = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(input)) => fs::read_to_string(input)?,
        (None, None) => {
            return Err(BayesError::invalid_options(
                "either --text or --input is required",
            ));
        }
    };

    let created = !args.model_path.exists();
    let mut classifier = if created {
        info!("creating new model at {}", args.model_path.display());
        let options = match args.tokenizer.config() {
            Some(config) => ClassifierOptions::new().with_tokenizer_config(config)?,
            None => ClassifierOptions::new(),
        };
        NaiveBayesClassifier::with_options(options)
    } else {
        load_model(&args.model_path)?
    };

    classifier.learn(&text, &args.category)?;
    save_model(&classifier, &args.model_path)?;

    Ok(LearnResult {
        category: args.category.clone(),
        created,
        total_documents: classifier.total_documents(),
        vocabulary_size: classifier.vocabulary_size(),
    })
}

/// Pick the most likely category for a text.
pub fn categorize_text(args: &CategorizeArgs) -> Result<CategorizeResult> {
    let classifier = load_model(&args.model_path)?;
    Ok(CategorizeResult {
        category: classifier.categorize(&args.text)?,
    })
}

/// Score a text against every category.
pub fn score_text(args: &CategorizeArgs) -> Result<ProbabilitiesResult> {
    let classifier = load_model(&args.model_path)?;
    Ok(ProbabilitiesResult {
        scores: classifier.probabilities(&args.text)?,
    })
}

/// Summarize a model file.
pub fn model_stats(args: &StatsArgs) -> Result<ModelStats> {
    let classifier = load_model(&args.model_path)?;
    let state = classifier.state();

    Ok(ModelStats {
        total_documents: state.total_documents(),
        vocabulary_size: state.vocabulary_size(),
        tokenizer: classifier.tokenizer().name().to_string(),
        categories: state
            .categories()
            .iter()
            .map(|category| CategoryStats {
                category: category.clone(),
                documents: state.doc_count(category),
                words: state.word_count(category),
                distinct_tokens: state
                    .word_frequencies(category)
                    .map_or(0, |frequencies| frequencies.len()),
            })
            .collect(),
    })
}
