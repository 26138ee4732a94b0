// ============================================================
// Layer 2 - ExportVectorsUseCase
// ============================================================
// Loads a network and writes its embedding matrix as text,
// "word v1 v2 ...", one line per vocabulary entry.

use anyhow::Result;
use std::path::PathBuf;

use crate::application::network::NetworkConfig;
use crate::domain::traits::SymbolLookup;
use crate::infra::vectors::save_vectors;
use crate::ml::EvalBackend;

pub struct ExportVectorsUseCase {
    config: NetworkConfig,
    output: PathBuf,
}

impl ExportVectorsUseCase {
    pub fn new(config: NetworkConfig, output: impl Into<PathBuf>) -> Self {
        Self { config, output: output.into() }
    }

    /// Returns the number of vectors written.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;
        cfg.validate()?;

        let symbols = cfg.load_required_symbols()?;
        let heads   = cfg.resolve_heads(&symbols)?;
        let mnlm    = cfg.mnlm_config(symbols.size(), heads.len());

        let model   = cfg
            .checkpoint()
            .load_model::<EvalBackend>(&mnlm, &Default::default())?;
        let vectors = model.embedding_vectors()?;

        save_vectors(&symbols, &vectors, &self.output)?;
        Ok(vectors.len())
    }
}
