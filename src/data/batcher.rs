// ============================================================
// Layer 4 - Context Batcher
// ============================================================
// Implements Burn's Batcher trait to stack ContextSamples into
// tensors for the network.
//
//   Input:  Vec of N ContextSamples, each with W feature indices
//   Output: ContextBatch with
//             features [N, W]   vocabulary indices
//             targets  [N]      vocabulary indices
//             heads    [N]      output-head position, -1 if none
//
// The language tag is a vocabulary index; the network wants the
// position of its output head instead. The batcher does that
// translation with the LanguageHeads table. A language the
// network has no head for maps to -1 and is scored by the shared
// output layer alone.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::ContextSample;
use crate::domain::language::LanguageHeads;

/// Head id used for rows whose language has no output head.
pub const NO_HEAD: i64 = -1;

#[derive(Debug, Clone)]
pub struct ContextBatch<B: Backend> {
    /// shape: [batch_size, num_features]
    pub features: Tensor<B, 2, Int>,

    /// shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,

    /// shape: [batch_size]
    pub heads: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct ContextBatcher<B: Backend> {
    pub device: B::Device,
    heads:      LanguageHeads,
}

impl<B: Backend> ContextBatcher<B> {
    pub fn new(device: B::Device, heads: LanguageHeads) -> Self {
        Self { device, heads }
    }
}

impl<B: Backend> Batcher<ContextSample, ContextBatch<B>> for ContextBatcher<B> {
    fn batch(&self, items: Vec<ContextSample>) -> ContextBatch<B> {
        let batch_size = items.len();
        // Every row of a split has the same width
        let width      = items.first().map_or(0, |s| s.features.len());

        let features_flat: Vec<i64> = items
            .iter()
            .flat_map(|s| s.features.iter().map(|&x| x as i64))
            .collect();

        let targets: Vec<i64> = items.iter().map(|s| s.target as i64).collect();

        let heads: Vec<i64> = items
            .iter()
            .map(|s| self.heads.head_of(s.lang).map_or(NO_HEAD, |h| h as i64))
            .collect();

        let features = Tensor::<B, 1, Int>::from_ints(features_flat.as_slice(), &self.device)
            .reshape([batch_size, width]);
        let targets  = Tensor::<B, 1, Int>::from_ints(targets.as_slice(), &self.device);
        let heads    = Tensor::<B, 1, Int>::from_ints(heads.as_slice(), &self.device);

        ContextBatch { features, targets, heads }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::language::LanguageList;
    use crate::infra::symbol_table::SymbolTable;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_head_mapping() {
        let table = SymbolTable::from_words(["<s>", "</s>", "INS", "en", "fr", "ar"]).unwrap();
        let heads = LanguageHeads::resolve(&LanguageList::parse("fr_en").unwrap(), &table).unwrap();

        let batcher = ContextBatcher::<NdArray>::new(Default::default(), heads);
        let batch   = batcher.batch(vec![
            ContextSample { features: vec![0, 2, 1, 3], target: 3, lang: 3 },
            ContextSample { features: vec![0, 2, 1, 4], target: 4, lang: 4 },
            ContextSample { features: vec![0, 2, 1, 5], target: 5, lang: 5 },
        ]);

        assert_eq!(batch.features.dims(), [3, 4]);
        assert_eq!(batch.targets.dims(), [3]);

        let heads: Vec<i64> = batch.heads.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(heads, vec![1, 0, -1]);

        let features: Vec<i64> = batch.features.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(&features[8..], &[0, 2, 1, 5]);
    }

    #[test]
    fn test_large_indices_are_not_truncated() {
        let table = SymbolTable::from_words(["en"]).unwrap();
        let heads = LanguageHeads::resolve(&LanguageList::parse("en").unwrap(), &table).unwrap();
        let big   = i32::MAX as usize + 7;

        let batcher = ContextBatcher::<NdArray>::new(Default::default(), heads);
        let batch   = batcher.batch(vec![ContextSample { features: vec![big, 0], target: big, lang: 0 }]);

        let features: Vec<i64> = batch.features.into_data().convert::<i64>().to_vec().unwrap();
        let targets: Vec<i64>  = batch.targets.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(features, vec![big as i64, 0]);
        assert_eq!(targets, vec![big as i64]);
    }
}
