// ============================================================
// Layer 3 - Context Matrix
// ============================================================
// The dataset for one split: feature rows (X), targets (Y) and
// language tags, stored column-aligned so row i of each always
// describes the same n-gram window.
//
// X is kept as one flat row-major Vec of fixed width instead of
// Vec<Vec<_>>: every row has exactly 2·context_size + 2 entries,
// and appending another language's rows is a plain extend.
//
//   features: [r0c0 r0c1 .. r0cW | r1c0 .. r1cW | ...]
//   targets:  [t0, t1, ...]
//   lang_tags:[l0, l1, ...]

use anyhow::{ensure, Result};

/// Number of feature columns for a given context size:
/// left context + placeholder + right context + language.
pub fn feature_width(context_size: usize) -> usize {
    2 * context_size + 2
}

/// Borrowed view of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextRow<'a> {
    pub features: &'a [usize],
    pub target:   usize,
    pub lang:     usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMatrix {
    width:     usize,
    features:  Vec<usize>,
    targets:   Vec<usize>,
    lang_tags: Vec<usize>,
}

impl ContextMatrix {
    /// Create an empty matrix whose rows have `width` feature columns.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            features:  Vec::new(),
            targets:   Vec::new(),
            lang_tags: Vec::new(),
        }
    }

    /// Number of rows. X, Y and the language tags always agree on it.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Append one row.
    ///
    /// # Panics
    /// Panics if `features` does not have exactly `width` entries.
    pub fn push_row(&mut self, features: &[usize], target: usize, lang: usize) {
        assert_eq!(
            features.len(),
            self.width,
            "feature row has {} columns, matrix expects {}",
            features.len(),
            self.width
        );
        self.features.extend_from_slice(features);
        self.targets.push(target);
        self.lang_tags.push(lang);
    }

    /// Concatenate `other` below this matrix along the row axis.
    /// Rows already present keep their positions.
    pub fn append(&mut self, other: ContextMatrix) -> Result<()> {
        ensure!(
            other.width == self.width,
            "cannot concatenate a matrix of width {} onto one of width {}",
            other.width,
            self.width
        );
        self.features.extend(other.features);
        self.targets.extend(other.targets);
        self.lang_tags.extend(other.lang_tags);
        Ok(())
    }

    pub fn row(&self, index: usize) -> Option<ContextRow<'_>> {
        let target = *self.targets.get(index)?;
        let start  = index * self.width;
        Some(ContextRow {
            features: &self.features[start..start + self.width],
            target,
            lang:     self.lang_tags[index],
        })
    }
}

// Whole-column views, for assertions on assembled splits.
#[cfg(test)]
impl ContextMatrix {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> impl Iterator<Item = ContextRow<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Flat row-major feature storage (`len() * width()` entries).
    pub fn features(&self) -> &[usize] {
        &self.features
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn lang_tags(&self) -> &[usize] {
        &self.lang_tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rows() -> ContextMatrix {
        let mut m = ContextMatrix::new(4);
        m.push_row(&[0, 4, 3, 5], 2, 5);
        m.push_row(&[2, 4, 1, 5], 3, 5);
        m
    }

    #[test]
    fn test_feature_width() {
        assert_eq!(feature_width(1), 4);
        assert_eq!(feature_width(2), 6);
    }

    #[test]
    fn test_rows_are_aligned() {
        let m = two_rows();
        assert_eq!(m.len(), 2);
        assert_eq!(m.features().len(), 2 * m.width());
        assert_eq!(m.targets().len(), m.lang_tags().len());

        let second = m.row(1).unwrap();
        assert_eq!(second.features, &[2, 4, 1, 5]);
        assert_eq!(second.target, 3);
        assert_eq!(second.lang, 5);
        assert!(m.row(2).is_none());
    }

    #[test]
    fn test_append_keeps_order() {
        let mut a = two_rows();
        let mut b = ContextMatrix::new(4);
        b.push_row(&[0, 4, 9, 7], 8, 7);

        a.append(b).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a.targets(), &[2, 3, 8]);
        assert_eq!(a.lang_tags(), &[5, 5, 7]);
        assert_eq!(a.row(2).unwrap().features, &[0, 4, 9, 7]);
    }

    #[test]
    fn test_append_rejects_width_mismatch() {
        let mut a = two_rows();
        let b     = ContextMatrix::new(6);
        assert!(a.append(b).is_err());
        assert_eq!(a.len(), 2);
    }

    #[test]
    #[should_panic]
    fn test_push_row_wrong_width_panics() {
        let mut m = ContextMatrix::new(4);
        m.push_row(&[1, 2, 3], 0, 0);
    }

    #[test]
    fn test_empty_matrix() {
        let m = ContextMatrix::new(6);
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
    }
}
