// ============================================================
// Layer 6 - Symbol Table Store
// ============================================================
// Loads the vocabulary used to turn tokens into indices.
//
// File format: one symbol per line, its index is the (0-based)
// line number:
//
//   <s>        ← 0
//   </s>       ← 1
//   INS        ← 2
//   en         ← 3
//   hello      ← 4
//   ...
//
// The table is load-once. Nothing in SymbolLookup can insert a
// word, so extraction cannot grow the vocabulary behind our back.

use anyhow::{anyhow, bail, ensure, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::traits::SymbolLookup;

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    word_to_index: HashMap<String, usize>,
    index_to_word: Vec<String>,
}

impl SymbolTable {
    /// An empty table. Every lookup on it fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table whose indices follow the iteration order.
    pub fn from_words<I, W>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let mut table = Self::new();
        for (position, word) in words.into_iter().enumerate() {
            let word: String = word.into();
            ensure!(!word.is_empty(), "empty symbol at position {}", position);
            if table.word_to_index.contains_key(&word) {
                bail!("symbol '{}' appears twice (second at position {})", word, position);
            }
            table.word_to_index.insert(word.clone(), table.index_to_word.len());
            table.index_to_word.push(word);
        }
        Ok(table)
    }

    /// Read a symbol table file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read symbol table '{}'", path.display()))?;

        // A UTF-8 byte-order mark would otherwise stick to symbol 0
        let words = text
            .strip_prefix('\u{feff}')
            .unwrap_or(text.as_str())
            .lines()
            .enumerate()
            .map(|(n, line)| {
                let word = line.trim();
                if word.is_empty() {
                    Err(anyhow!("blank entry at line {}", n + 1))
                } else {
                    Ok(word)
                }
            })
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Malformed symbol table '{}'", path.display()))?;

        let table = Self::from_words(words)
            .with_context(|| format!("Malformed symbol table '{}'", path.display()))?;

        tracing::info!(
            "Loaded symbol table '{}' ({} symbols)",
            path.display(),
            table.size()
        );
        Ok(table)
    }

    /// Load `path` if it exists, otherwise start with an empty table.
    /// An empty table makes extraction fail on the first lookup.
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::warn!(
                "Symbol table '{}' does not exist, starting with an empty vocabulary",
                path.display()
            );
            Ok(Self::new())
        }
    }
}

impl SymbolLookup for SymbolTable {
    fn word_index(&self, word: &str) -> Result<usize> {
        self.word_to_index
            .get(word)
            .copied()
            .ok_or_else(|| anyhow!("'{}' is not in the symbol table", word))
    }

    fn index_to_word(&self, index: usize) -> Option<&str> {
        self.index_to_word.get(index).map(String::as_str)
    }

    fn size(&self) -> usize {
        self.index_to_word.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_indices_follow_file_order() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "<s>\n</s>\nINS\nen\nhello").unwrap();

        let table = SymbolTable::load_from_file(f.path()).unwrap();
        assert_eq!(table.size(), 5);
        assert_eq!(table.word_index("<s>").unwrap(), 0);
        assert_eq!(table.word_index("hello").unwrap(), 4);
        assert_eq!(table.index_to_word(2), Some("INS"));
        assert_eq!(table.index_to_word(5), None);
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "\u{feff}<s>\n</s>\n").unwrap();

        let table = SymbolTable::load_from_file(f.path()).unwrap();
        assert_eq!(table.word_index("<s>").unwrap(), 0);
        assert_eq!(table.index_to_word(0), Some("<s>"));
    }

    #[test]
    fn test_miss_names_the_word() {
        let table = SymbolTable::from_words(["a", "b"]).unwrap();
        let err   = table.word_index("zebra").unwrap_err();
        assert!(err.to_string().contains("'zebra'"));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        assert!(SymbolTable::from_words(["a", "b", "a"]).is_err());
    }

    #[test]
    fn test_blank_line_rejected() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "a\n\nb").unwrap();
        let err = SymbolTable::load_from_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn test_missing_file_gives_empty_table() {
        let dir   = tempfile::tempdir().unwrap();
        let table = SymbolTable::load_or_empty(&dir.path().join("symbol_table.en")).unwrap();
        assert_eq!(table.size(), 0);
        assert!(table.word_index("<s>").is_err());
    }
}
