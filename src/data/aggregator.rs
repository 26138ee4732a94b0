// ============================================================
// Layer 4 - Multi-Language Dataset Aggregator
// ============================================================
// Grows one matrix per split by running the extractor once per
// (language, split) pair and concatenating the results:
//
//   languages: [en, fr]   splits: dev, test
//
//   dev  = extract(dev_path,  en) ++ extract(dev_path,  fr)
//   test = extract(test_path, en) ++ extract(test_path, fr)
//
// Languages are always visited in list order, so the first N_en
// rows of each split are exactly the English windows. Dev and
// test accumulators never share rows.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::data::extractor::ContextWindowExtractor;
use crate::domain::language::LanguageList;
use crate::domain::matrix::ContextMatrix;
use crate::domain::split::Split;
use crate::domain::traits::SymbolLookup;

/// Extract `lang` from `corpus` and append it to `accumulated`.
/// An unset accumulator means this is the first language.
pub fn append_lang_data<S: SymbolLookup>(
    extractor:   &ContextWindowExtractor<'_, S>,
    corpus:      &Path,
    lang:        &str,
    accumulated: Option<ContextMatrix>,
) -> Result<ContextMatrix> {
    let contribution = extractor.extract_file(corpus, lang)?;
    match accumulated {
        None => Ok(contribution),
        Some(mut matrix) => {
            matrix.append(contribution)?;
            Ok(matrix)
        }
    }
}

/// One split's corpus path and the rows gathered for it so far.
#[derive(Debug)]
pub struct SplitAccumulator {
    split:  Split,
    corpus: PathBuf,
    matrix: Option<ContextMatrix>,
}

impl SplitAccumulator {
    pub fn new(split: Split, corpus: impl Into<PathBuf>) -> Self {
        Self { split, corpus: corpus.into(), matrix: None }
    }

    pub fn append_language<S: SymbolLookup>(
        &mut self,
        extractor: &ContextWindowExtractor<'_, S>,
        lang:      &str,
    ) -> Result<()> {
        let matrix = append_lang_data(extractor, &self.corpus, lang, self.matrix.take())
            .with_context(|| format!("{} split", self.split))?;
        tracing::info!("{} split: {} rows after '{}'", self.split, matrix.len(), lang);
        self.matrix = Some(matrix);
        Ok(())
    }

    /// The assembled matrix. Empty if no language was appended.
    pub fn finish(self, width: usize) -> (Split, ContextMatrix) {
        let matrix = self.matrix.unwrap_or_else(|| ContextMatrix::new(width));
        (self.split, matrix)
    }
}

/// Build every configured split, visiting languages in list order.
pub fn aggregate_splits<S: SymbolLookup>(
    extractor: &ContextWindowExtractor<'_, S>,
    languages: &LanguageList,
    mut splits: Vec<SplitAccumulator>,
) -> Result<Vec<(Split, ContextMatrix)>> {
    for lang in languages.iter() {
        tracing::info!("Language: {}", lang);
        for acc in splits.iter_mut() {
            acc.append_language(extractor, lang)?;
        }
    }

    let width = extractor.width();
    Ok(splits.into_iter().map(|acc| acc.finish(width)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::symbol_table::SymbolTable;
    use std::fs;
    use tempfile::TempDir;

    fn symbols() -> SymbolTable {
        SymbolTable::from_words([
            "<s>", "</s>", "INS", "en", "fr", "the", "cat", "le", "chat", "noir",
        ])
        .unwrap()
    }

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_first_language_becomes_initial_matrix() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = write(&dir, "dev", "the cat\n");
        let table = symbols();
        let ex    = ContextWindowExtractor::new(&table, 1).unwrap();

        let alone = ex.extract_file(&path, "en").unwrap();
        let first = append_lang_data(&ex, &path, "en", None).unwrap();
        assert_eq!(first, alone);
    }

    #[test]
    fn test_concatenation_preserves_language_order() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = write(&dir, "dev", "the cat\nle chat noir\n");
        let table = symbols();
        let ex    = ContextWindowExtractor::new(&table, 2).unwrap();

        let en = ex.extract_file(&path, "en").unwrap();
        let fr = ex.extract_file(&path, "fr").unwrap();

        let acc = append_lang_data(&ex, &path, "en", None).unwrap();
        let acc = append_lang_data(&ex, &path, "fr", Some(acc)).unwrap();

        assert_eq!(acc.len(), en.len() + fr.len());
        assert_eq!(acc.targets().len(), acc.lang_tags().len());
        for (i, row) in en.rows().enumerate() {
            assert_eq!(acc.row(i).unwrap(), row);
        }
        for (i, row) in fr.rows().enumerate() {
            assert_eq!(acc.row(en.len() + i).unwrap(), row);
        }
    }

    #[test]
    fn test_splits_are_independent() {
        let dir   = tempfile::tempdir().unwrap();
        let dev   = write(&dir, "dev", "the cat\n");
        let test  = write(&dir, "test", "le chat noir\nthe\n");
        let table = symbols();
        let ex    = ContextWindowExtractor::new(&table, 1).unwrap();
        let langs = LanguageList::parse("en_fr").unwrap();

        let built = aggregate_splits(
            &ex,
            &langs,
            vec![SplitAccumulator::new(Split::Dev, &dev), SplitAccumulator::new(Split::Test, &test)],
        )
        .unwrap();

        assert_eq!(built.len(), 2);
        let (dev_split, dev_rows)   = &built[0];
        let (test_split, test_rows) = &built[1];
        assert_eq!(*dev_split, Split::Dev);
        assert_eq!(*test_split, Split::Test);
        // two tokens per language on dev, four per language on test
        assert_eq!(dev_rows.len(), 4);
        assert_eq!(test_rows.len(), 8);
        // en rows first, then fr rows
        assert_eq!(dev_rows.lang_tags(), &[3, 3, 4, 4]);
    }

    #[test]
    fn test_error_names_split_and_language() {
        let dir   = tempfile::tempdir().unwrap();
        let dev   = write(&dir, "dev", "the dog\n");
        let table = symbols();
        let ex    = ContextWindowExtractor::new(&table, 1).unwrap();
        let langs = LanguageList::parse("en").unwrap();

        let err = aggregate_splits(&ex, &langs, vec![SplitAccumulator::new(Split::Dev, &dev)])
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Dev split"), "{msg}");
        assert!(msg.contains("'dog'"), "{msg}");
    }

    #[test]
    fn test_no_splits_does_no_work() {
        let table = symbols();
        let ex    = ContextWindowExtractor::new(&table, 1).unwrap();
        let langs = LanguageList::parse("en_fr").unwrap();
        assert!(aggregate_splits(&ex, &langs, Vec::new()).unwrap().is_empty());
    }
}
