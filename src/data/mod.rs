// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between a corpus file on disk and a tensor batch:
//
//   corpus file (one tokenised line per sentence)
//       │
//       ▼
//   ContextWindowExtractor  → windows → feature rows, targets, tags
//       │
//       ▼
//   aggregator              → per-split matrix, languages in order
//       │
//       ▼
//   ContextDataset          → Burn's Dataset trait over the matrix
//       │
//       ▼
//   ContextBatcher          → [batch, width] Int tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Corpus file → context windows for one language
pub mod extractor;

/// Per-split concatenation across languages
pub mod aggregator;

/// Implements Burn's Dataset trait for context samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
