// ============================================================
// Layer 2 - EvaluateUseCase
// ============================================================
// Runs one evaluation end to end:
//
//   Step 1: Load the symbol table               (Layer 6 - infra)
//   Step 2: Parse both language lists, flag languages the
//           network has no head for
//   Step 3: Extract + aggregate each enabled split
//           (languages in list order)            (Layer 4 - data)
//   Step 4: Load the network                     (Layer 6 / 5)
//   Step 5: Evaluate each split                  (Layer 5 - ml)
//   Step 6: Append metrics to the CSV log        (Layer 6 - infra)
//
// A split whose corpus path is unset is skipped entirely. If no
// split is enabled there is nothing to evaluate and the network is
// not loaded.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::network::NetworkConfig;
use crate::data::aggregator::{aggregate_splits, SplitAccumulator};
use crate::data::extractor::ContextWindowExtractor;
use crate::domain::language::{LanguageHeads, LanguageList};
use crate::domain::matrix::ContextMatrix;
use crate::domain::split::Split;
use crate::domain::traits::{SplitEvaluator, SymbolLookup};
use crate::infra::metrics::{MetricsLogger, SplitMetrics};
use crate::ml::evaluator::NetworkEvaluator;
use crate::ml::EvalBackend;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub network:     NetworkConfig,
    /// Underscore-delimited dataset languages, in row order
    pub lang_list:   String,
    pub dev_path:    Option<PathBuf>,
    pub test_path:   Option<PathBuf>,
    pub batch_size:  usize,
    pub metrics_csv: Option<PathBuf>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            network:     NetworkConfig::default(),
            lang_list:   "ar".to_string(),
            dev_path:    None,
            test_path:   None,
            batch_size:  100,
            metrics_csv: None,
        }
    }
}

impl EvalConfig {
    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        ensure!(self.batch_size >= 1, "batch size must be at least 1");
        Ok(())
    }

    /// (split, corpus) for every split whose path is set, dev first.
    pub fn enabled_splits(&self) -> Vec<(Split, PathBuf)> {
        [(Split::Dev, &self.dev_path), (Split::Test, &self.test_path)]
            .into_iter()
            .filter_map(|(split, path)| path.clone().map(|p| (split, p)))
            .collect()
    }
}

pub struct EvaluateUseCase {
    config: EvalConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Run the evaluation and return one SplitMetrics per enabled split.
    pub fn execute(&self) -> Result<Vec<SplitMetrics>> {
        let cfg = &self.config;
        cfg.validate()?;
        tracing::debug!("Evaluation config: {}", serde_json::to_string(cfg)?);

        // ── Step 1: Symbol table ──────────────────────────────────────────────
        let symbols = cfg.network.load_symbols()?;

        // ── Step 2: Language lists ────────────────────────────────────────────
        let languages = LanguageList::parse(&cfg.lang_list)?;
        let heads     = cfg.network.resolve_heads(&symbols)?;
        unheaded_languages(&heads, &languages);

        // ── Step 3: Extract + aggregate ───────────────────────────────────────
        let splits = build_splits(cfg, &symbols, &languages)?;
        if splits.is_empty() {
            tracing::warn!("Neither a dev nor a test corpus is configured, nothing to evaluate");
            return Ok(Vec::new());
        }

        // ── Step 4: Load the network ──────────────────────────────────────────
        let mnlm_cfg  = cfg.network.mnlm_config(symbols.size(), heads.len());
        let evaluator = NetworkEvaluator::<EvalBackend>::from_checkpoint(
            &cfg.network.checkpoint(),
            &mnlm_cfg,
            heads,
            cfg.batch_size,
            Default::default(),
        )?;

        // ── Step 5: Evaluate ──────────────────────────────────────────────────
        let metrics = run_evaluation(&evaluator, splits, &languages)?;

        // ── Step 6: Metrics log ───────────────────────────────────────────────
        if let Some(path) = &cfg.metrics_csv {
            let logger = MetricsLogger::new(path)?;
            for m in &metrics {
                logger.log(m)?;
            }
        }

        Ok(metrics)
    }
}

/// Dataset languages the network has no output head for, in dataset
/// order. Each one is logged; its rows are scored by the shared
/// output layer only.
pub fn unheaded_languages<'a>(heads: &LanguageHeads, languages: &'a LanguageList) -> Vec<&'a str> {
    let missing = heads.missing_from(languages);
    for lang in &missing {
        tracing::warn!(
            "Dataset language '{}' is not among the network languages '{}'; \
             its rows are scored by the shared output layer only",
            lang,
            heads.languages().joined()
        );
    }
    missing
}

/// Extract and concatenate every enabled split of `cfg`.
pub fn build_splits<S: SymbolLookup>(
    cfg:       &EvalConfig,
    symbols:   &S,
    languages: &LanguageList,
) -> Result<Vec<(Split, ContextMatrix)>> {
    let accumulators: Vec<SplitAccumulator> = cfg
        .enabled_splits()
        .into_iter()
        .map(|(split, path)| SplitAccumulator::new(split, path))
        .collect();
    if accumulators.is_empty() {
        return Ok(Vec::new());
    }

    let extractor = ContextWindowExtractor::new(symbols, cfg.network.context_size)?;
    aggregate_splits(&extractor, languages, accumulators)
}

/// Hand each split to the evaluator and collect what it reports.
pub fn run_evaluation<E: SplitEvaluator>(
    evaluator: &E,
    splits:    Vec<(Split, ContextMatrix)>,
    languages: &LanguageList,
) -> Result<Vec<SplitMetrics>> {
    let mut metrics = Vec::with_capacity(splits.len());
    for (split, matrix) in splits {
        ensure!(
            !matrix.is_empty(),
            "{} split has no rows: its corpus contains no tokens",
            split
        );
        tracing::info!("{} set evaluation ({} rows)", split, matrix.len());

        let rows  = matrix.len();
        let score = evaluator
            .test(matrix)
            .with_context(|| format!("{} set evaluation failed", split))?;
        metrics.push(SplitMetrics::new(split, languages.joined(), rows, score));
    }
    Ok(metrics)
}
