// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Everything that touches the filesystem outside the corpus:
// the vocabulary file, the persisted network, metric logs, and
// exported vectors. Other layers only see the types exported here.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Network save/load (config + weights)
pub mod checkpoint;

/// Evaluation results CSV logger
pub mod metrics;

/// Vocabulary file loading
pub mod symbol_table;

/// Embedding export in "word v1 v2 ..." format
pub mod vectors;
