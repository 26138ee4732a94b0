// ============================================================
// Layer 3 - Language Lists
// ============================================================
// Two independent lists of language identifiers exist in a run:
//
//   1. the dataset languages (--lang-list), whose order decides the
//      row order of every split matrix;
//   2. the network's output-head languages, by default taken from
//      the symbol table file name: "symbol_table.en_ru_fr" → en, ru, fr.
//
// They are never assumed equal. LanguageHeads::missing_from reports
// dataset languages the network has no head for, so the caller can
// flag them.

use anyhow::{bail, ensure, Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::domain::traits::SymbolLookup;

/// Ordered, duplicate-free list of language identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageList {
    languages: Vec<String>,
}

impl LanguageList {
    /// Parse an underscore-delimited list such as `"en_ru_fr"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut languages: Vec<String> = Vec::new();
        for lang in spec.split('_') {
            let lang = lang.trim();
            ensure!(
                !lang.is_empty(),
                "language list '{}' contains an empty identifier",
                spec
            );
            ensure!(
                !lang.contains(','),
                "language '{}' in '{}' contains a comma",
                lang,
                spec
            );
            if languages.iter().any(|l| l == lang) {
                bail!("language '{}' is listed twice in '{}'", lang, spec);
            }
            languages.push(lang.to_string());
        }
        Ok(Self { languages })
    }

    /// Derive the list from the suffix after the last '.' of the
    /// symbol table's file name.
    pub fn from_symbol_table_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Symbol table path '{}' has no file name", path.display()))?;

        let suffix = name.rsplit('.').next().unwrap_or(name);
        Self::parse(suffix).with_context(|| {
            format!(
                "Cannot derive network languages from symbol table name '{}'",
                name
            )
        })
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(String::as_str)
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.languages.iter().any(|l| l == lang)
    }

    /// Underscore-joined form, as accepted by `parse`.
    pub fn joined(&self) -> String {
        self.languages.join("_")
    }
}

/// The network's output heads: head position ↔ language vocabulary index.
#[derive(Debug, Clone)]
pub struct LanguageHeads {
    languages: LanguageList,
    by_symbol: HashMap<usize, usize>,
}

impl LanguageHeads {
    /// Look every language up in the vocabulary. A language missing
    /// from the vocabulary is fatal, exactly like any other symbol.
    pub fn resolve<S: SymbolLookup>(languages: &LanguageList, symbols: &S) -> Result<Self> {
        let mut by_symbol = HashMap::with_capacity(languages.len());
        for (head, lang) in languages.iter().enumerate() {
            let index = symbols
                .word_index(lang)
                .with_context(|| format!("Network language '{}' has no vocabulary index", lang))?;
            by_symbol.insert(index, head);
        }
        Ok(Self { languages: languages.clone(), by_symbol })
    }

    /// Number of output heads.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn languages(&self) -> &LanguageList {
        &self.languages
    }

    /// Head position for a language tag (a vocabulary index).
    pub fn head_of(&self, lang_symbol: usize) -> Option<usize> {
        self.by_symbol.get(&lang_symbol).copied()
    }

    /// Dataset languages that have no output head, in dataset order.
    pub fn missing_from<'a>(&self, dataset: &'a LanguageList) -> Vec<&'a str> {
        dataset.iter().filter(|l| !self.languages.contains(l)).collect()
    }
}
