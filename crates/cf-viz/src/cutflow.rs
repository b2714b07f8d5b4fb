//! Cut-flow plot artifact — efficiency-ratio versus cumulative cuts.
//!
//! Downstream renderers draw this as a step plot: one x position per cut,
//! the efficiency ratio on y. The artifact carries the aligned efficiency
//! arrays as well, so the same file can feed a per-group efficiency plot.

use cf_flow::EfficiencyReport;
use serde::{Deserialize, Serialize};

/// Single per-cut point of the cut-flow artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutFlowPoint {
    /// Cut label, in application order.
    pub cut: String,
    /// Cumulative weighted signal efficiency.
    pub signal_efficiency: f64,
    /// Cumulative weighted background efficiency.
    pub background_efficiency: f64,
    /// Efficiency ratio; `None` when the background is fully depleted
    /// (JSON has no `+inf`).
    pub ratio: Option<f64>,
}

/// Plot-friendly artifact for a whole cut-flow trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutFlowArtifact {
    /// Artifact schema identifier.
    pub schema_version: String,
    /// Per-cut points, in cut order.
    pub points: Vec<CutFlowPoint>,
    /// Cut labels aligned with `points` (x axis).
    pub cut_labels: Vec<String>,
    /// Ratio values aligned with `cut_labels`; `None` marks a depleted background.
    pub ratios: Vec<Option<f64>>,
}

impl CutFlowArtifact {
    /// Schema identifier emitted by this version.
    pub const SCHEMA_VERSION: &'static str = "cutflow_report_v0";

    /// Build the artifact from an engine report.
    pub fn from_report(report: &EfficiencyReport) -> CutFlowArtifact {
        let mut points = Vec::with_capacity(report.len());
        let mut cut_labels = Vec::with_capacity(report.len());
        let mut ratios = Vec::with_capacity(report.len());

        for step in report {
            let ratio = if step.ratio.is_finite() { Some(step.ratio) } else { None };
            points.push(CutFlowPoint {
                cut: step.cut.clone(),
                signal_efficiency: step.signal_efficiency,
                background_efficiency: step.background_efficiency,
                ratio,
            });
            cut_labels.push(step.cut.clone());
            ratios.push(ratio);
        }

        CutFlowArtifact {
            schema_version: Self::SCHEMA_VERSION.to_string(),
            points,
            cut_labels,
            ratios,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_flow::CutFlowStep;

    fn report() -> EfficiencyReport {
        EfficiencyReport {
            steps: vec![
                CutFlowStep {
                    cut: "n_lep == 0".into(),
                    signal_efficiency: 0.9,
                    background_efficiency: 0.3,
                    ratio: 3.0,
                },
                CutFlowStep {
                    cut: "e_pi > 0.25".into(),
                    signal_efficiency: 0.5,
                    background_efficiency: 0.0,
                    ratio: f64::INFINITY,
                },
            ],
        }
    }

    #[test]
    fn artifact_aligns_with_report() {
        let a = CutFlowArtifact::from_report(&report());
        assert_eq!(a.schema_version, "cutflow_report_v0");
        assert_eq!(a.cut_labels, vec!["n_lep == 0", "e_pi > 0.25"]);
        assert_eq!(a.ratios, vec![Some(3.0), None]);
        assert_eq!(a.points.len(), 2);
    }

    #[test]
    fn infinite_ratio_becomes_null_in_json() {
        let a = CutFlowArtifact::from_report(&report());
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("null"));
        let back: CutFlowArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ratios, vec![Some(3.0), None]);
    }

    #[test]
    fn empty_report_empty_artifact() {
        let a = CutFlowArtifact::from_report(&EfficiencyReport::default());
        assert!(a.points.is_empty());
        assert!(a.cut_labels.is_empty());
    }
}
