// ============================================================
// Layer 4 - Context Window Extractor
// ============================================================
// Turns one corpus file into (feature row, target, language tag)
// triples for one language.
//
// For every line, with context_size = c:
//
//   tokens:  x y
//   padded:  <s> .. <s>  x y  </s> .. </s>      (c markers each side)
//   windows: every span of width 2c+1, step 1
//
// and for every window w:
//
//   features = idx(w[..c]) ++ idx(INS) ++ idx(w[c+1..]) ++ idx(lang)
//   target   = idx(w[c])
//   lang tag = idx(lang)
//
// The centre token never reaches the features: the INS placeholder
// takes its slot. A padded line of T tokens is T + 2c long, so it
// yields exactly T windows; an empty line yields none.
//
// Every lookup is strict. An out-of-vocabulary token aborts the
// extraction with the token, file, line, and language in the error.

use anyhow::{ensure, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter;
use std::path::Path;

use crate::domain::matrix::{feature_width, ContextMatrix};
use crate::domain::symbols::{END_SYMBOL, INSERT_SYMBOL, START_SYMBOL};
use crate::domain::traits::SymbolLookup;

pub struct ContextWindowExtractor<'a, S: SymbolLookup> {
    symbols:      &'a S,
    context_size: usize,
}

impl<'a, S: SymbolLookup> ContextWindowExtractor<'a, S> {
    /// Create an extractor. `context_size` must be at least 1.
    pub fn new(symbols: &'a S, context_size: usize) -> Result<Self> {
        ensure!(context_size >= 1, "context size must be at least 1, got {}", context_size);
        Ok(Self { symbols, context_size })
    }

    /// Feature columns per row: 2·context_size + 2.
    pub fn width(&self) -> usize {
        feature_width(self.context_size)
    }

    /// Extract every window of the corpus at `path` for `lang`.
    pub fn extract_file(&self, path: &Path, lang: &str) -> Result<ContextMatrix> {
        let file = File::open(path)
            .with_context(|| format!("Cannot open corpus '{}'", path.display()))?;

        let matrix = self
            .extract(BufReader::new(file), lang)
            .with_context(|| {
                format!("Extraction of language '{}' from '{}' failed", lang, path.display())
            })?;

        tracing::debug!(
            "Extracted {} windows for '{}' from '{}'",
            matrix.len(),
            lang,
            path.display()
        );
        Ok(matrix)
    }

    /// Extract from any line-oriented reader.
    pub fn extract<R: BufRead>(&self, reader: R, lang: &str) -> Result<ContextMatrix> {
        let c          = self.context_size;
        let lang_index = self.symbols.word_index(lang).context("Unknown language identifier")?;
        let insert     = self.symbols.word_index(INSERT_SYMBOL).context("Missing placeholder symbol")?;

        let mut matrix = ContextMatrix::new(self.width());
        let mut row    = Vec::with_capacity(self.width());

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Cannot read line {}", line_no + 1))?;

            let padded: Vec<&str> = iter::repeat(START_SYMBOL)
                .take(c)
                .chain(line.split_whitespace())
                .chain(iter::repeat(END_SYMBOL).take(c))
                .collect();

            for window in padded.windows(2 * c + 1) {
                row.clear();
                for word in &window[..c] {
                    row.push(self.index_at(word, line_no)?);
                }
                row.push(insert);
                for word in &window[c + 1..] {
                    row.push(self.index_at(word, line_no)?);
                }
                row.push(lang_index);

                let target = self.index_at(window[c], line_no)?;
                matrix.push_row(&row, target, lang_index);
            }
        }

        Ok(matrix)
    }

    fn index_at(&self, word: &str, line_no: usize) -> Result<usize> {
        self.symbols
            .word_index(word)
            .with_context(|| format!("Vocabulary miss at line {}", line_no + 1))
    }
}
