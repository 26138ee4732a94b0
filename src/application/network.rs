// ============================================================
// Layer 2 - Network Settings
// ============================================================
// The settings every command needs to describe the network:
// where it lives, which vocabulary it was built on, and the
// shape parameters that must match the saved weights.
//
// The network's language heads default to the languages encoded
// in the symbol table file name ("symbol_table.en_fr" → en, fr).
// `model_langs` overrides that. Either way this list is separate
// from the dataset languages of an evaluation run.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::language::{LanguageHeads, LanguageList};
use crate::domain::matrix::feature_width;
use crate::domain::traits::SymbolLookup;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::symbol_table::SymbolTable;
use crate::ml::model::MnlmConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_dir:  PathBuf,
    pub symbol_table: PathBuf,
    pub model_langs:  Option<String>,
    pub vector_size:  usize,
    pub context_size: usize,
    pub alpha:        f64,
    pub betta:        f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network_dir:  PathBuf::from("work/context"),
            symbol_table: PathBuf::from("work/symbol_table.en_ru_fr_ro_it_mt_sw_hi_ar"),
            model_langs:  None,
            vector_size:  100,
            context_size: 2,
            alpha:        1.0,
            betta:        0.0,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.context_size >= 1, "context size must be at least 1, got {}", self.context_size);
        ensure!(self.vector_size >= 1, "vector size must be at least 1, got {}", self.vector_size);
        ensure!(
            (0.0..1.0).contains(&self.betta),
            "betta must be in [0, 1), got {}",
            self.betta
        );
        Ok(())
    }

    /// Languages the network has output heads for.
    pub fn model_languages(&self) -> Result<LanguageList> {
        match &self.model_langs {
            Some(list) => LanguageList::parse(list),
            None       => LanguageList::from_symbol_table_path(&self.symbol_table),
        }
    }

    pub fn load_symbols(&self) -> Result<SymbolTable> {
        SymbolTable::load_or_empty(&self.symbol_table)
    }

    /// Like `load_symbols`, but a network cannot be built on an
    /// empty vocabulary, so a missing or empty table is an error.
    pub fn load_required_symbols(&self) -> Result<SymbolTable> {
        let symbols = self.load_symbols()?;
        ensure!(
            symbols.size() > 0,
            "symbol table '{}' is missing or empty",
            self.symbol_table.display()
        );
        Ok(symbols)
    }

    pub fn resolve_heads<S: SymbolLookup>(&self, symbols: &S) -> Result<LanguageHeads> {
        LanguageHeads::resolve(&self.model_languages()?, symbols)
    }

    /// Network shape implied by these settings and the vocabulary.
    pub fn mnlm_config(&self, vocab_size: usize, num_languages: usize) -> MnlmConfig {
        MnlmConfig::new(vocab_size, self.vector_size, feature_width(self.context_size), num_languages)
            .with_alpha(self.alpha)
            .with_betta(self.betta)
    }

    pub fn checkpoint(&self) -> CheckpointManager {
        CheckpointManager::new(&self.network_dir)
    }
}
