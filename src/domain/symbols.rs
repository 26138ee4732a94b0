// Reserved vocabulary entries. Every symbol table used with this
// tool must contain them alongside the corpus words and the
// language identifiers.

/// Left boundary marker, repeated `context_size` times before a line.
pub const START_SYMBOL: &str = "<s>";

/// Right boundary marker, repeated `context_size` times after a line.
pub const END_SYMBOL: &str = "</s>";

/// Stands in for the predicted token inside a feature row.
pub const INSERT_SYMBOL: &str = "INS";
