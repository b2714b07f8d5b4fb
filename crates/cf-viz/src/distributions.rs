//! Per-process weighted distribution artifact (numbers-first).
//!
//! Overlays one variable across several named processes (signal plus each
//! background), each filled with its own event weights. This is the numeric
//! half of the classic signal-vs-background shape plot; styling and output
//! format are a renderer concern.

use cf_core::{Error, Result};
use cf_sample::EventSample;
use serde::{Deserialize, Serialize};

use crate::histogram::fill_histogram;

/// One process's weighted histogram of the plotted variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSeries {
    /// Process label (e.g. "signal", "nu_mu NC").
    pub name: String,
    /// Sum of weights per bin, aligned with the artifact's `bin_edges`.
    pub y: Vec<f64>,
    /// Total weight of the process sample before binning.
    pub total_weight: f64,
}

/// Distribution artifact: one variable, shared binning, one series per process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionArtifact {
    /// Artifact schema identifier.
    pub schema_version: String,
    /// Name of the plotted field.
    pub variable: String,
    /// Bin edges (length = n_bins + 1).
    pub bin_edges: Vec<f64>,
    /// One weighted series per process, in input order.
    pub series: Vec<ProcessSeries>,
}

impl DistributionArtifact {
    /// Schema identifier emitted by this version.
    pub const SCHEMA_VERSION: &'static str = "cutflow_distributions_v0";

    /// Fill the named variable for each `(label, sample)` pair.
    ///
    /// Fails with [`Error::Validation`] if any sample lacks the variable;
    /// all processes must be plottable or the artifact is not produced.
    pub fn build(
        variable: &str,
        bin_edges: Vec<f64>,
        processes: &[(String, &EventSample)],
    ) -> Result<DistributionArtifact> {
        let mut series = Vec::with_capacity(processes.len());
        for (name, sample) in processes {
            let values = sample.field(variable).ok_or_else(|| {
                Error::Validation(format!(
                    "process '{}' has no field '{}'",
                    name, variable
                ))
            })?;
            let y = fill_histogram(values, sample.weights(), &bin_edges)?;
            series.push(ProcessSeries {
                name: name.clone(),
                y,
                total_weight: sample.total_weight(),
            });
        }
        Ok(DistributionArtifact {
            schema_version: Self::SCHEMA_VERSION.to_string(),
            variable: variable.to_string(),
            bin_edges,
            series,
        })
    }
}
