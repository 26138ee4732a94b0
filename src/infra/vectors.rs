// Writes embedding vectors in the plain "word v1 v2 ..." text format,
// one vocabulary entry per line, in index order.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::traits::SymbolLookup;

pub fn save_vectors<S: SymbolLookup>(symbols: &S, vectors: &[Vec<f32>], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create vector file '{}'", path.display()))?;
    let mut out = BufWriter::new(file);

    for (index, vector) in vectors.iter().enumerate() {
        let word = symbols
            .index_to_word(index)
            .with_context(|| format!("Embedding row {} has no symbol in the symbol table", index))?;
        let values: Vec<String> = vector.iter().map(f32::to_string).collect();
        writeln!(out, "{} {}", word, values.join(" "))?;
    }
    out.flush()?;

    tracing::info!("Wrote {} vectors to '{}'", vectors.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::symbol_table::SymbolTable;
    use std::fs;

    #[test]
    fn test_one_line_per_symbol() {
        let dir     = tempfile::tempdir().unwrap();
        let path    = dir.path().join("vectors.txt");
        let symbols = SymbolTable::from_words(["<s>", "cat"]).unwrap();

        save_vectors(&symbols, &[vec![0.5, -1.0], vec![2.0, 0.25]], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<s> 0.5 -1\ncat 2 0.25\n");
    }

    #[test]
    fn test_row_without_symbol_is_error() {
        let dir     = tempfile::tempdir().unwrap();
        let symbols = SymbolTable::from_words(["<s>"]).unwrap();
        let err = save_vectors(&symbols, &[vec![0.0], vec![1.0]], &dir.path().join("v")).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
