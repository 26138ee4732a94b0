// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// All network code lives here.
//
//   model.rs     - the multilingual context network:
//                  embedding → tanh projection → shared output
//                  layer plus one output head per language
//
//   evaluator.rs - the "Test" operation over a whole split;
//                  only constructible by loading a checkpoint
//
// Evaluation runs on the CPU ndarray backend unless the crate is
// built with the `wgpu` feature.
//
// Reference: Burn Book §3 (Building Blocks)

/// Multilingual context network architecture
pub mod model;

/// Split evaluation over a loaded network
pub mod evaluator;

#[cfg(feature = "wgpu")]
pub type EvalBackend = burn::backend::Wgpu;

#[cfg(not(feature = "wgpu"))]
pub type EvalBackend = burn::backend::NdArray;
