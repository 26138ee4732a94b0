// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The two seams the pipeline is built around:
//
//   SymbolLookup   - the read-only vocabulary. The extractor only
//                    ever asks for indices; it can never add a word.
//   SplitEvaluator - the "Test" operation of a loaded network.
//
// The application layer is written against these traits, so the
// aggregation and reporting logic can be tested with an in-memory
// vocabulary and a recording evaluator, no model required.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::matrix::ContextMatrix;
use crate::domain::split::SplitScore;

// ─── SymbolLookup ─────────────────────────────────────────────────────────────
/// Bidirectional string <-> index vocabulary, immutable once loaded.
///
/// Implementations:
///   - SymbolTable → loaded from a one-symbol-per-line file
pub trait SymbolLookup {
    /// Index of `word`. A miss is an error naming the word.
    fn word_index(&self, word: &str) -> Result<usize>;

    /// Word stored at `index`, if any.
    fn index_to_word(&self, index: usize) -> Option<&str>;

    /// Number of entries in the vocabulary.
    fn size(&self) -> usize;
}

// ─── SplitEvaluator ───────────────────────────────────────────────────────────
/// Anything that can score an assembled split.
///
/// Implementations:
///   - NetworkEvaluator → only constructible from a loaded checkpoint,
///     so holding one proves the model was loaded
pub trait SplitEvaluator {
    /// Evaluate every row of `split` and return the mean loss and
    /// perplexity. The split is consumed; nothing keeps it afterwards.
    fn test(&self, split: ContextMatrix) -> Result<SplitScore>;
}
