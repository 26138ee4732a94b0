// ============================================================
// Layer 2 - InitUseCase
// ============================================================
// Creates a freshly initialised network directory for the given
// settings, laid out exactly as `eval` expects to load it. Useful
// for smoke-testing a vocabulary, language list, and context size
// before real weights exist.

use anyhow::Result;

use crate::application::network::NetworkConfig;
use crate::domain::traits::SymbolLookup;
use crate::ml::EvalBackend;

pub struct InitUseCase {
    config: NetworkConfig,
}

impl InitUseCase {
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;
        cfg.validate()?;

        let symbols = cfg.load_required_symbols()?;
        let heads   = cfg.resolve_heads(&symbols)?;
        let mnlm    = cfg.mnlm_config(symbols.size(), heads.len());

        tracing::info!(
            "Initialising network: vocab={}, vector_size={}, features={}, languages='{}'",
            mnlm.vocab_size,
            mnlm.vector_size,
            mnlm.num_features,
            heads.languages().joined()
        );

        let model = mnlm.init::<EvalBackend>(&Default::default());
        cfg.checkpoint().save_model(&model, &mnlm)
    }
}
