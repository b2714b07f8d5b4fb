//! Variable-length per-event columns and derived scalar extraction.
//!
//! Some sources carry a ragged list per event (e.g. the energies of all
//! particles in the interaction). The cut-flow core only understands flat
//! scalar fields, so the derived scalar (typically the leading entry) is
//! extracted here, at the sample-construction boundary.

use cf_core::{Error, Result};

/// A jagged column stored flat with entry offsets.
///
/// `offsets.len() == n_entries + 1`; entry `row` occupies
/// `flat[offsets[row]..offsets[row + 1]]`.
#[derive(Debug, Clone)]
pub struct JaggedColumn {
    flat: Vec<f64>,
    offsets: Vec<usize>,
}

impl JaggedColumn {
    /// Build from per-event vectors.
    pub fn from_rows(rows: &[Vec<f64>]) -> JaggedColumn {
        let mut flat = Vec::with_capacity(rows.iter().map(|r| r.len()).sum());
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        offsets.push(0);
        for row in rows {
            flat.extend_from_slice(row);
            offsets.push(flat.len());
        }
        JaggedColumn { flat, offsets }
    }

    /// Build from a flat array plus offsets.
    ///
    /// Offsets must start at 0, end at `flat.len()`, and be non-decreasing.
    pub fn new(flat: Vec<f64>, offsets: Vec<usize>) -> Result<JaggedColumn> {
        if offsets.first() != Some(&0) || offsets.last() != Some(&flat.len()) {
            return Err(Error::ColumnLength(format!(
                "jagged offsets must span 0..={}, got {:?}..={:?}",
                flat.len(),
                offsets.first(),
                offsets.last()
            )));
        }
        if offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::ColumnLength("jagged offsets must be non-decreasing".into()));
        }
        Ok(JaggedColumn { flat, offsets })
    }

    /// Number of events.
    pub fn n_entries(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// The values belonging to event `row`.
    ///
    /// # Panics
    /// Panics if `row >= n_entries()`.
    pub fn entry(&self, row: usize) -> &[f64] {
        &self.flat[self.offsets[row]..self.offsets[row + 1]]
    }

    /// Extract the first value of every event as a flat scalar column.
    ///
    /// Fails with [`Error::IndexOutOfRange`] naming the first event that has
    /// no entries at all; an empty per-event list is a malformed input, not
    /// an implicit zero.
    pub fn leading(&self) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.n_entries());
        for row in 0..self.n_entries() {
            let entry = self.entry(row);
            match entry.first() {
                Some(&v) => out.push(v),
                None => {
                    return Err(Error::IndexOutOfRange(format!(
                        "event {} has no entries; cannot extract leading value",
                        row
                    )));
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_round_trip() {
        let j = JaggedColumn::from_rows(&[vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(j.n_entries(), 3);
        assert_eq!(j.entry(0), &[1.0, 2.0]);
        assert_eq!(j.entry(1), &[3.0]);
        assert_eq!(j.entry(2), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn leading_extracts_first_per_event() {
        let j = JaggedColumn::from_rows(&[vec![7.0, 1.0], vec![8.0], vec![9.0, 2.0]]);
        assert_eq!(j.leading().unwrap(), vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn leading_fails_on_empty_event() {
        let j = JaggedColumn::from_rows(&[vec![1.0], vec![], vec![2.0]]);
        let err = j.leading().unwrap_err();
        assert!(err.to_string().contains("event 1"));
    }

    #[test]
    fn new_validates_offsets() {
        assert!(JaggedColumn::new(vec![1.0, 2.0], vec![0, 1, 2]).is_ok());
        assert!(JaggedColumn::new(vec![1.0, 2.0], vec![0, 1]).is_err());
        assert!(JaggedColumn::new(vec![1.0, 2.0], vec![1, 2]).is_err());
        assert!(JaggedColumn::new(vec![1.0, 2.0], vec![0, 2, 1, 2]).is_err());
    }

    #[test]
    fn empty_column() {
        let j = JaggedColumn::from_rows(&[]);
        assert_eq!(j.n_entries(), 0);
        assert!(j.leading().unwrap().is_empty());
    }
}
