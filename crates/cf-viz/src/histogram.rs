//! Weighted 1D histogram filling with explicit bin edges.

use cf_core::{Error, Result};

/// `n` equal-width bins over `[min, max]`; returns `n + 1` edges.
pub fn linear_edges(min: f64, max: f64, n: usize) -> Result<Vec<f64>> {
    if n == 0 || !(max > min) {
        return Err(Error::Validation(format!(
            "linear_edges requires n > 0 and max > min (got n={n}, min={min}, max={max})"
        )));
    }
    let width = (max - min) / n as f64;
    let mut edges: Vec<f64> = (0..n).map(|i| min + width * i as f64).collect();
    edges.push(max);
    Ok(edges)
}

/// `n` logarithmically spaced bins over `[min, max]`; returns `n + 1` edges.
///
/// Both bounds must be strictly positive.
pub fn log_edges(min: f64, max: f64, n: usize) -> Result<Vec<f64>> {
    if n == 0 || !(max > min) || min <= 0.0 {
        return Err(Error::Validation(format!(
            "log_edges requires n > 0 and max > min > 0 (got n={n}, min={min}, max={max})"
        )));
    }
    let (lmin, lmax) = (min.ln(), max.ln());
    let step = (lmax - lmin) / n as f64;
    let mut edges: Vec<f64> = (0..n).map(|i| (lmin + step * i as f64).exp()).collect();
    edges.push(max);
    Ok(edges)
}

/// Fill a weighted histogram: sum of weights per bin.
///
/// `values` and `weights` must be aligned; `edges` must be sorted with at
/// least two entries. Entries outside `[edges[0], edges[last])` are dropped.
pub fn fill_histogram(values: &[f64], weights: &[f64], edges: &[f64]) -> Result<Vec<f64>> {
    if edges.len() < 2 {
        return Err(Error::Validation(format!(
            "need at least 2 bin edges, got {}",
            edges.len()
        )));
    }
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::Validation("bin edges must be strictly increasing".into()));
    }
    if values.len() != weights.len() {
        return Err(Error::Validation(format!(
            "values ({}) and weights ({}) must be aligned",
            values.len(),
            weights.len()
        )));
    }

    let mut content = vec![0.0; edges.len() - 1];
    for (&val, &w) in values.iter().zip(weights) {
        if let Some(bin) = find_bin(edges, val) {
            content[bin] += w;
        }
    }
    Ok(content)
}

/// Find the bin index for a value given sorted bin edges.
///
/// Returns `None` for underflow/overflow.
fn find_bin(edges: &[f64], val: f64) -> Option<usize> {
    if val < edges[0] || val >= edges[edges.len() - 1] {
        return None;
    }
    match edges.binary_search_by(|e| e.partial_cmp(&val).unwrap()) {
        Ok(i) => {
            if i >= edges.len() - 1 {
                None
            } else {
                Some(i)
            }
        }
        Err(i) => {
            if i == 0 || i >= edges.len() {
                None
            } else {
                Some(i - 1)
            }
        }
    }
}
