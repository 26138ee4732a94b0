use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::matrix::ContextMatrix;

/// One row of a split: feature indices, the index to predict, and
/// the language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSample {
    pub features: Vec<usize>,
    pub target:   usize,
    pub lang:     usize,
}

/// A split matrix exposed through Burn's Dataset trait so the
/// DataLoader can batch it.
pub struct ContextDataset {
    matrix: ContextMatrix,
}

impl ContextDataset {
    pub fn new(matrix: ContextMatrix) -> Self { Self { matrix } }
}

impl Dataset<ContextSample> for ContextDataset {
    fn get(&self, index: usize) -> Option<ContextSample> {
        self.matrix.row(index).map(|row| ContextSample {
            features: row.features.to_vec(),
            target:   row.target,
            lang:     row.lang,
        })
    }

    fn len(&self) -> usize {
        self.matrix.len()
    }
}
