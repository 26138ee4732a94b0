// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust types and traits describing what the pipeline works
// with. Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Ordered language lists and the network's language heads
pub mod language;

// The X / Y / language-tag matrix for one split
pub mod matrix;

// Dev / test split identifiers and their scores
pub mod split;

// Reserved vocabulary entries
pub mod symbols;

// Core abstractions (traits) that other layers implement
pub mod traits;
