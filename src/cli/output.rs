//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::classifier::CategoryScore;
use crate::cli::args::{BayesArgs, OutputFormat};
use crate::error::Result;

/// Result structure for learning a document.
#[derive(Debug, Serialize, Deserialize)]
pub struct LearnResult {
    pub category: String,
    pub created: bool,
    pub total_documents: u64,
    pub vocabulary_size: usize,
}

/// Result structure for categorization.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategorizeResult {
    pub category: Option<String>,
}

/// Result structure for per-category scores.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProbabilitiesResult {
    pub scores: Vec<CategoryScore>,
}

/// Model statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStats {
    pub total_documents: u64,
    pub vocabulary_size: usize,
    pub tokenizer: String,
    pub categories: Vec<CategoryStats>,
}

/// Category-specific statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub documents: u64,
    pub words: u64,
    pub distinct_tokens: usize,
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &BayesArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &BayesArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    for line in render_human(&value) {
        println!("{line}");
    }
    Ok(())
}

/// Render a result object as `key: value` lines; arrays of objects become
/// one indented block per element.
pub fn render_human(value: &serde_json::Value) -> Vec<String> {
    let mut lines = Vec::new();
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Array(items)
                        if items.iter().all(serde_json::Value::is_object) =>
                    {
                        lines.push(format!("{key}:"));
                        for item in items {
                            let fields = render_human(item);
                            lines.push(format!("  - {}", fields.join(", ")));
                        }
                    }
                    _ => lines.push(format!("{key}: {}", format_value(val))),
                }
            }
        }
        _ => lines.push(format_value(value)),
    }
    lines
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &BayesArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human-readable output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scalar_fields() {
        let value = serde_json::to_value(CategorizeResult { category: None }).unwrap();
        assert_eq!(render_human(&value), vec!["category: none"]);
    }

    #[test]
    fn test_render_nested_scores() {
        let value = serde_json::to_value(ProbabilitiesResult {
            scores: vec![
                CategoryScore {
                    category: "chinese".to_string(),
                    value: -8.5,
                },
                CategoryScore {
                    category: "japanese".to_string(),
                    value: -9.25,
                },
            ],
        })
        .unwrap();

        assert_eq!(
            render_human(&value),
            vec![
                "scores:",
                "  - category: chinese, value: -8.5",
                "  - category: japanese, value: -9.25",
            ]
        );
    }
}
