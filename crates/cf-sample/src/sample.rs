//! Weighted columnar event storage and positional concatenation.

use std::collections::HashMap;

use cf_core::{Error, Result};

/// An in-memory weighted dataset: one weight and a set of named scalar
/// fields per event, aligned by event index.
///
/// Immutable once built. Construct via [`EventSample::builder`] or
/// [`EventSample::concatenate`].
#[derive(Debug, Clone)]
pub struct EventSample {
    weights: Vec<f64>,
    fields: HashMap<String, Vec<f64>>,
}

impl EventSample {
    /// Start building a sample from its weight column.
    pub fn builder(weights: Vec<f64>) -> SampleBuilder {
        SampleBuilder { weights, fields: HashMap::new(), scale: None }
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the sample has no events.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Per-event weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all event weights. 0.0 for an empty sample.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Look up a field column by name.
    pub fn field(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(|v| v.as_slice())
    }

    /// Field names, sorted (stable across runs for messages and schema checks).
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Keep only the events where `mask` is true.
    ///
    /// Used to apply an inclusion pre-filter before a cut list is built;
    /// the cut-flow engine itself never shrinks a sample.
    pub fn filtered(&self, mask: &[bool]) -> Result<EventSample> {
        if mask.len() != self.weights.len() {
            return Err(Error::ColumnLength(format!(
                "filter mask has {} entries, sample has {} events",
                mask.len(),
                self.weights.len()
            )));
        }
        let pick = |col: &[f64]| -> Vec<f64> {
            col.iter().zip(mask).filter(|(_, &keep)| keep).map(|(&v, _)| v).collect()
        };
        let weights = pick(&self.weights);
        let fields =
            self.fields.iter().map(|(name, col)| (name.clone(), pick(col))).collect();
        Ok(EventSample { weights, fields })
    }

    /// Positional concatenation of several samples into one.
    ///
    /// Weights and every field column are appended in argument order; no
    /// reweighting or renormalization is applied across sources. Fails with
    /// [`Error::SchemaMismatch`] if the inputs do not all carry the same set
    /// of field names.
    pub fn concatenate(samples: &[EventSample]) -> Result<EventSample> {
        let Some(first) = samples.first() else {
            return Ok(EventSample { weights: Vec::new(), fields: HashMap::new() });
        };

        let schema = first.field_names();
        for (i, s) in samples.iter().enumerate().skip(1) {
            if s.field_names() != schema {
                return Err(Error::SchemaMismatch(format!(
                    "sample 0 has fields {:?}, sample {} has fields {:?}",
                    schema,
                    i,
                    s.field_names()
                )));
            }
        }

        let n_total: usize = samples.iter().map(|s| s.len()).sum();
        let mut weights = Vec::with_capacity(n_total);
        for s in samples {
            weights.extend_from_slice(&s.weights);
        }

        log::debug!(
            "concatenating {} samples into {} events ({} fields)",
            samples.len(),
            n_total,
            schema.len()
        );

        let mut fields = HashMap::with_capacity(schema.len());
        for name in schema {
            let mut col = Vec::with_capacity(n_total);
            for s in samples {
                // Schema check above guarantees presence.
                col.extend_from_slice(&s.fields[name]);
            }
            fields.insert(name.to_string(), col);
        }

        Ok(EventSample { weights, fields })
    }
}

/// Builder validating column alignment before an [`EventSample`] exists.
#[derive(Debug)]
pub struct SampleBuilder {
    weights: Vec<f64>,
    fields: HashMap<String, Vec<f64>>,
    scale: Option<f64>,
}

impl SampleBuilder {
    /// Add a named field column. Length is checked at `build`.
    pub fn field(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.fields.insert(name.into(), values);
        self
    }

    /// Scale every weight by a constant at build time.
    ///
    /// Flux-normalization factors belong here, at sample construction,
    /// never inside the cut-flow engine.
    pub fn scale_weights(mut self, factor: f64) -> Self {
        self.scale = Some(factor);
        self
    }

    /// Validate column alignment and produce the immutable sample.
    pub fn build(self) -> Result<EventSample> {
        let n = self.weights.len();
        for (name, col) in &self.fields {
            if col.len() != n {
                return Err(Error::ColumnLength(format!(
                    "field '{}' has {} entries, weight column has {}",
                    name,
                    col.len(),
                    n
                )));
            }
        }
        let mut weights = self.weights;
        if let Some(factor) = self.scale {
            for w in &mut weights {
                *w *= factor;
            }
        }
        Ok(EventSample { weights, fields: self.fields })
    }
}
