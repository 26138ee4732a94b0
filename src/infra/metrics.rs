// ============================================================
// Layer 6 - Metrics Logger
// ============================================================
// Appends one CSV row per evaluated split, so results from many
// runs (different language lists, context sizes, networks) end up
// side by side in one file.
//
// Example CSV output:
//   split,languages,rows,mean_loss,perplexity
//   Dev,en_fr,15234,4.812300,123.012900
//   Test,en_fr,14870,4.790100,120.310400

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

use crate::domain::split::{Split, SplitScore};

const HEADER: &str = "split,languages,rows,mean_loss,perplexity";

/// The reported result for one split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitMetrics {
    pub split:      Split,
    /// Underscore-joined dataset languages, in row order
    pub languages:  String,
    pub rows:       usize,
    pub mean_loss:  f64,
    pub perplexity: f64,
}

impl SplitMetrics {
    pub fn new(split: Split, languages: impl Into<String>, rows: usize, score: SplitScore) -> Self {
        Self {
            split,
            languages:  languages.into(),
            rows,
            mean_loss:  score.mean_loss,
            perplexity: score.perplexity,
        }
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Open (or create) the CSV file, writing the header if it is new.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();

        if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create metrics file '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &SplitMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open metrics file '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{},{},{:.6},{:.6}",
            m.split, m.languages, m.rows, m.mean_loss, m.perplexity,
        )?;

        tracing::debug!("Logged {} metrics: mean_loss={:.4}", m.split, m.mean_loss);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_written_once_and_rows_appended() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("eval.csv");
        let score = SplitScore { mean_loss: 2.0, perplexity: 2.0_f64.exp() };

        MetricsLogger::new(&path).unwrap()
            .log(&SplitMetrics::new(Split::Dev, "en_fr", 10, score)).unwrap();
        let logger = MetricsLogger::new(&path).unwrap();
        logger.log(&SplitMetrics::new(Split::Test, "en_fr", 12, score)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "Dev,en_fr,10,2.000000,7.389056");
        assert!(lines[2].starts_with("Test,en_fr,12,"));
    }
}
