//! Rendering processor outputs for the recipe host.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// How processor outputs are printed on stdout.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `key=value` line per output, sorted by key
    #[default]
    Plain,
    /// A single JSON object
    Json,
}

/// Render a processor output value in the requested format.
pub fn render<T: Serialize>(outputs: &T, format: OutputFormat) -> Result<String> {
    let value = serde_json::to_value(outputs).context("Failed to serialize processor outputs")?;

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&value).context("Failed to encode processor outputs")
        }
        OutputFormat::Plain => {
            let Value::Object(map) = value else {
                anyhow::bail!("Processor outputs must be a set of named values");
            };

            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let lines: Vec<String> = entries
                .into_iter()
                .map(|(key, value)| match value {
                    Value::String(s) => format!("{}={}", key, s),
                    other => format!("{}={}", key, other),
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        version: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stop_processing: Option<bool>,
    }

    fn sample(stop_processing: Option<bool>) -> Sample {
        Sample {
            version: "19.2.0".to_string(),
            url: "https://example.com/fmp.dmg".to_string(),
            stop_processing,
        }
    }

    #[test]
    fn test_render_plain_sorted() {
        let rendered = render(&sample(Some(true)), OutputFormat::Plain).unwrap();
        assert_eq!(
            rendered,
            "stop_processing=true\nurl=https://example.com/fmp.dmg\nversion=19.2.0"
        );
    }

    #[test]
    fn test_render_plain_skips_absent() {
        let rendered = render(&sample(None), OutputFormat::Plain).unwrap();
        assert!(!rendered.contains("stop_processing"));
    }

    #[test]
    fn test_render_json() {
        let rendered = render(&sample(Some(false)), OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["version"], "19.2.0");
        assert_eq!(value["stop_processing"], false);
    }

    #[test]
    fn test_render_plain_rejects_non_object() {
        assert!(render(&vec!["a", "b"], OutputFormat::Plain).is_err());
    }
}
