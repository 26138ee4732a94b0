// ============================================================
// Layer 5 - Network Evaluator
// ============================================================
// The "Test" operation: mean cross-entropy of a whole split and
// its perplexity, exp(mean_loss).
//
// A NetworkEvaluator can only be built from a checkpoint, so code
// that holds one never runs against an unloaded network.
//
// Batches come from Burn's DataLoader without shuffling or worker
// threads. Each batch's mean loss is weighted by its size, so the
// result is the exact per-row mean even when the last batch is
// short.

use anyhow::{ensure, Result};
use burn::{data::dataloader::DataLoaderBuilder, prelude::*};

use crate::data::{batcher::ContextBatcher, dataset::ContextDataset};
use crate::domain::language::LanguageHeads;
use crate::domain::matrix::ContextMatrix;
use crate::domain::split::SplitScore;
use crate::domain::traits::SplitEvaluator;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{MnlmConfig, MnlmModel};

pub struct NetworkEvaluator<B: Backend> {
    model:      MnlmModel<B>,
    heads:      LanguageHeads,
    batch_size: usize,
    device:     B::Device,
}

impl<B: Backend> NetworkEvaluator<B> {
    /// Load the network described by `cfg` from `ckpt`.
    pub fn from_checkpoint(
        ckpt:       &CheckpointManager,
        cfg:        &MnlmConfig,
        heads:      LanguageHeads,
        batch_size: usize,
        device:     B::Device,
    ) -> Result<Self> {
        ensure!(batch_size >= 1, "batch size must be at least 1");
        ensure!(
            heads.len() == cfg.num_languages,
            "network has {} language heads but {} languages were given",
            cfg.num_languages,
            heads.len()
        );
        let model = ckpt.load_model::<B>(cfg, &device)?;
        Ok(Self { model, heads, batch_size, device })
    }
}

impl<B: Backend> SplitEvaluator for NetworkEvaluator<B> {
    fn test(&self, split: ContextMatrix) -> Result<SplitScore> {
        let rows = split.len();
        ensure!(rows > 0, "cannot evaluate a split with no rows");

        let batcher = ContextBatcher::<B>::new(self.device.clone(), self.heads.clone());
        let loader  = DataLoaderBuilder::new(batcher)
            .batch_size(self.batch_size)
            .build(ContextDataset::new(split));

        let mut loss_sum = 0.0f64;
        for batch in loader.iter() {
            let batch_rows = batch.targets.dims()[0];
            let loss: f64 = self
                .model
                .forward_loss(batch.features, batch.heads, batch.targets)
                .into_scalar()
                .elem::<f64>();
            loss_sum += loss * batch_rows as f64;
        }

        let mean_loss = loss_sum / rows as f64;
        tracing::debug!("Evaluated {} rows, mean loss {:.4}", rows, mean_loss);
        Ok(SplitScore { mean_loss, perplexity: mean_loss.exp() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::language::LanguageList;
    use crate::domain::traits::SymbolLookup;
    use crate::infra::symbol_table::SymbolTable;
    use burn::backend::NdArray;

    type B = NdArray;

    fn setup(dir: &std::path::Path, batch_size: usize) -> NetworkEvaluator<B> {
        let table = SymbolTable::from_words(["<s>", "</s>", "INS", "en", "a", "b"]).unwrap();
        let heads = LanguageHeads::resolve(&LanguageList::parse("en").unwrap(), &table).unwrap();
        let cfg   = MnlmConfig::new(table.size(), 3, 4, 1);
        let ckpt  = CheckpointManager::new(dir);
        ckpt.save_model(&cfg.init::<B>(&Default::default()), &cfg).unwrap();
        NetworkEvaluator::from_checkpoint(&ckpt, &cfg, heads, batch_size, Default::default())
            .unwrap()
    }

    fn matrix() -> ContextMatrix {
        let mut m = ContextMatrix::new(4);
        m.push_row(&[0, 2, 5, 3], 4, 3);
        m.push_row(&[4, 2, 1, 3], 5, 3);
        m.push_row(&[0, 2, 1, 3], 4, 3);
        m
    }

    #[test]
    fn test_perplexity_is_exp_of_mean_loss() {
        let dir   = tempfile::tempdir().unwrap();
        let score = setup(dir.path(), 2).test(matrix()).unwrap();
        assert!(score.mean_loss.is_finite() && score.mean_loss > 0.0);
        assert!((score.perplexity - score.mean_loss.exp()).abs() < 1e-9);
    }

    #[test]
    fn test_batch_size_does_not_change_the_mean() {
        let dir  = tempfile::tempdir().unwrap();
        let eval = setup(dir.path(), 1);
        let one  = eval.test(matrix()).unwrap();
        let all  = NetworkEvaluator { batch_size: 3, ..eval }.test(matrix()).unwrap();
        assert!((one.mean_loss - all.mean_loss).abs() < 1e-4);
    }

    #[test]
    fn test_empty_split_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(setup(dir.path(), 2).test(ContextMatrix::new(4)).is_err());
    }

    #[test]
    fn test_unloadable_network_gives_no_evaluator() {
        let dir   = tempfile::tempdir().unwrap();
        let table = SymbolTable::from_words(["en"]).unwrap();
        let heads = LanguageHeads::resolve(&LanguageList::parse("en").unwrap(), &table).unwrap();
        let cfg   = MnlmConfig::new(1, 3, 4, 1);
        let ckpt  = CheckpointManager::new(dir.path().join("missing"));
        assert!(NetworkEvaluator::<B>::from_checkpoint(&ckpt, &cfg, heads, 2, Default::default())
            .is_err());
    }
}
