//! Named selection cuts and their vectorized predicates.

use cf_core::{Error, Result};
use cf_sample::EventSample;
use serde::{Deserialize, Serialize};

/// A boolean predicate over named sample fields, evaluated for the whole
/// sample at once.
///
/// Tagged variants replace the closure-over-columns style of ad hoc analysis
/// scripts: the engine only depends on the boolean-sequence contract, never
/// on a concrete predicate representation. Predicates are stateless, so
/// re-evaluation on the same sample is bit-identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// `field == value`
    Equals {
        /// Field name.
        field: String,
        /// Comparison value.
        value: f64,
    },
    /// `field > value`
    GreaterThan {
        /// Field name.
        field: String,
        /// Comparison value.
        value: f64,
    },
    /// `field < value`
    LessThan {
        /// Field name.
        field: String,
        /// Comparison value.
        value: f64,
    },
    /// Logical AND of several predicates.
    All {
        /// The conjuncts; an empty list accepts every event.
        predicates: Vec<Predicate>,
    },
}

impl Predicate {
    /// `field == value` predicate.
    pub fn equals(field: impl Into<String>, value: f64) -> Predicate {
        Predicate::Equals { field: field.into(), value }
    }

    /// `field > value` predicate.
    pub fn greater_than(field: impl Into<String>, value: f64) -> Predicate {
        Predicate::GreaterThan { field: field.into(), value }
    }

    /// `field < value` predicate.
    pub fn less_than(field: impl Into<String>, value: f64) -> Predicate {
        Predicate::LessThan { field: field.into(), value }
    }

    /// AND of several predicates. An empty list accepts every event.
    pub fn all(predicates: Vec<Predicate>) -> Predicate {
        Predicate::All { predicates }
    }

    /// Every field name this predicate reads, in first-reference order.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::Equals { field, .. }
            | Predicate::GreaterThan { field, .. }
            | Predicate::LessThan { field, .. } => {
                if !out.contains(&field.as_str()) {
                    out.push(field);
                }
            }
            Predicate::All { predicates } => {
                for p in predicates {
                    p.collect_fields(out);
                }
            }
        }
    }

    /// Evaluate over the full sample, returning one boolean per event.
    ///
    /// Fails with [`Error::Validation`] if a referenced field is absent;
    /// callers that know the owning cut should map this to
    /// [`Error::UnknownField`] (the engine validates eagerly and does).
    pub fn evaluate(&self, sample: &EventSample) -> Result<Vec<bool>> {
        match self {
            Predicate::Equals { field, value } => {
                Self::compare(sample, field, |x| x == *value)
            }
            Predicate::GreaterThan { field, value } => {
                Self::compare(sample, field, |x| x > *value)
            }
            Predicate::LessThan { field, value } => {
                Self::compare(sample, field, |x| x < *value)
            }
            Predicate::All { predicates } => {
                let mut mask = vec![true; sample.len()];
                for p in predicates {
                    let sub = p.evaluate(sample)?;
                    for (m, s) in mask.iter_mut().zip(&sub) {
                        *m &= s;
                    }
                }
                Ok(mask)
            }
        }
    }

    fn compare(
        sample: &EventSample,
        field: &str,
        pass: impl Fn(f64) -> bool,
    ) -> Result<Vec<bool>> {
        let col = sample.field(field).ok_or_else(|| {
            Error::Validation(format!("predicate references unknown field '{}'", field))
        })?;
        Ok(col.iter().map(|&x| pass(x)).collect())
    }
}

/// A named cut: the label is report-only, never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cut {
    /// Human-readable label used in the report.
    pub name: String,
    /// The selection predicate.
    pub predicate: Predicate,
}

impl Cut {
    /// Create a named cut.
    pub fn new(name: impl Into<String>, predicate: Predicate) -> Cut {
        Cut { name: name.into(), predicate }
    }
}
