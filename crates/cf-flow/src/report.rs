//! Ordered per-cut efficiency records.

use serde::{Deserialize, Serialize};

/// One record of the cut-flow trace: cumulative efficiencies after this cut
/// and every preceding cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutFlowStep {
    /// Label of the cut, as supplied.
    pub cut: String,
    /// Weighted fraction of the signal sample surviving, in `[0, 1]`.
    pub signal_efficiency: f64,
    /// Weighted fraction of the background sample surviving, in `[0, 1]`.
    pub background_efficiency: f64,
    /// `signal_efficiency / background_efficiency`; `f64::INFINITY` when the
    /// background is fully depleted (a sentinel, not a failure).
    pub ratio: f64,
}

/// Ordered cut-flow output: one step per supplied cut, in cut-list order.
///
/// Pure data product; an empty cut list yields an empty report. Callers
/// wanting the "no cuts" baseline record it themselves as efficiency 1.0
/// before running the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyReport {
    /// Per-cut records.
    pub steps: Vec<CutFlowStep>,
}

impl EfficiencyReport {
    /// Number of cuts in the trace.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the report holds no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over the steps in cut order.
    pub fn iter(&self) -> std::slice::Iter<'_, CutFlowStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a EfficiencyReport {
    type Item = &'a CutFlowStep;
    type IntoIter = std::slice::Iter<'a, CutFlowStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for EfficiencyReport {
    type Item = CutFlowStep;
    type IntoIter = std::vec::IntoIter<CutFlowStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
