// ============================================================
// Layer 6 - Checkpoint Manager
// ============================================================
// Saves and restores the network with Burn's named MessagePack
// recorder at full precision, so a reloaded network scores exactly
// like the one that was saved.
//
// Network directory layout:
//   <network_dir>/
//     model_config.json   ← MnlmConfig the weights were built with
//     model.mpk           ← all learned parameters
//
// Loading always goes through the config check first. Burn's
// load_record() does not compare tensor shapes, so a network saved
// with another vocabulary or context size would only fail later,
// deep inside a forward pass. Checking the saved config up front
// turns that into a clear error naming the directory.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{anyhow, ensure, Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::ml::model::{MnlmConfig, MnlmModel};

const CONFIG_FILE: &str = "model_config.json";
const MODEL_FILE:  &str = "model";

type NetworkRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the config and weights into the network directory,
    /// creating it if needed.
    pub fn save_model<B: Backend>(&self, model: &MnlmModel<B>, cfg: &MnlmConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create network directory '{}'", self.dir.display()))?;

        let config_path = self.dir.join(CONFIG_FILE);
        cfg.save(&config_path)
            .with_context(|| format!("Cannot write '{}'", config_path.display()))?;

        let model_path = self.dir.join(MODEL_FILE);
        NetworkRecorder::new()
            .record(model.clone().into_record(), model_path.clone())
            .with_context(|| format!("Cannot save network to '{}'", model_path.display()))?;

        tracing::info!("Saved network to '{}'", self.dir.display());
        Ok(())
    }

    /// Read the config the saved weights were built with.
    pub fn load_config(&self) -> Result<MnlmConfig> {
        let path = self.dir.join(CONFIG_FILE);
        MnlmConfig::load(&path)
            .map_err(|e| anyhow!("Cannot read network config '{}': {:?}", path.display(), e))
    }

    /// Load the network. The saved shape must match `expected`;
    /// alpha and betta are taken from `expected`.
    pub fn load_model<B: Backend>(
        &self,
        expected: &MnlmConfig,
        device:   &B::Device,
    ) -> Result<MnlmModel<B>> {
        ensure!(
            self.dir.is_dir(),
            "Network directory '{}' does not exist",
            self.dir.display()
        );

        let saved = self.load_config()?;
        expected
            .ensure_same_shape(&saved)
            .with_context(|| format!("Cannot load network from '{}'", self.dir.display()))?;

        let model_path = self.dir.join(MODEL_FILE);
        let record = NetworkRecorder::new()
            .load(model_path.clone(), device)
            .with_context(|| format!("Cannot load network weights '{}'", model_path.display()))?;

        tracing::info!("Loaded network from '{}'", self.dir.display());
        Ok(expected.init::<B>(device).load_record(record))
    }
}
