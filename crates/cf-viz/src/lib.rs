//! # cf-viz
//!
//! Visualization data artifacts for the cutflow toolkit.
//!
//! This crate is intentionally dependency-light and focuses on emitting
//! plot-friendly JSON structures (arrays instead of nested objects).
//! Rendering to SVG/PNG happens downstream, outside this repository.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Cut-flow artifact (efficiency traces and ratios per cut).
pub mod cutflow;

/// Per-process weighted distribution artifacts.
pub mod distributions;

/// Weighted 1D histogram filling and binning helpers.
pub mod histogram;

pub use cutflow::{CutFlowArtifact, CutFlowPoint};
pub use distributions::{DistributionArtifact, ProcessSeries};
pub use histogram::{fill_histogram, linear_edges, log_edges};
