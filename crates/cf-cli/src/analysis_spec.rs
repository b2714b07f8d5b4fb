//! Analysis spec v0 (JSON) parsing + sample construction.
//!
//! A single JSON file names the signal and background sample files, the
//! construction-time options (weight scale, jagged-derived fields, inclusion
//! pre-filter), the ordered cut list, and optional histogram settings. The
//! engine itself never reads files; everything I/O-shaped lives here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cf_flow::{Cut, Predicate};
use cf_sample::{EventSample, JaggedColumn};
use serde::Deserialize;

const SPEC_V0: &str = "cutflow_spec_v0";

/// Top-level analysis spec.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSpec {
    pub schema_version: String,
    /// Path to the signal sample file, relative to the spec file.
    pub signal: PathBuf,
    /// Paths to the background sample files; concatenated into one group.
    pub backgrounds: Vec<PathBuf>,
    /// Constant applied to every weight at construction time
    /// (flux normalization and similar global factors).
    #[serde(default)]
    pub weight_scale: Option<f64>,
    /// Derived scalar fields: new field name -> jagged column whose leading
    /// entry provides the value.
    #[serde(default)]
    pub leading_fields: HashMap<String, String>,
    /// Inclusion pre-filter applied to every sample before the cut list.
    #[serde(default)]
    pub pre_filter: Option<Predicate>,
    /// Ordered cut list.
    #[serde(default)]
    pub cuts: Vec<Cut>,
    /// Histogram settings for the `hist` subcommand.
    #[serde(default)]
    pub hist: Option<HistSpec>,
}

/// Settings for one distribution plot.
#[derive(Debug, Clone, Deserialize)]
pub struct HistSpec {
    /// Field to histogram.
    pub variable: String,
    /// Binning scheme.
    pub binning: Binning,
}

/// Binning scheme for distribution artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binning {
    /// Equal-width bins.
    Linear { min: f64, max: f64, bins: usize },
    /// Logarithmically spaced bins.
    Log { min: f64, max: f64, bins: usize },
    /// Explicit sorted edges.
    Edges { edges: Vec<f64> },
}

impl Binning {
    pub fn edges(&self) -> Result<Vec<f64>> {
        let edges = match self {
            Binning::Linear { min, max, bins } => cf_viz::linear_edges(*min, *max, *bins)?,
            Binning::Log { min, max, bins } => cf_viz::log_edges(*min, *max, *bins)?,
            Binning::Edges { edges } => edges.clone(),
        };
        Ok(edges)
    }
}

/// On-disk columnar sample: weights, flat fields, optional jagged columns.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleFile {
    pub weights: Vec<f64>,
    #[serde(default)]
    pub fields: HashMap<String, Vec<f64>>,
    /// Variable-length per-event columns, by name.
    #[serde(default)]
    pub jagged: HashMap<String, Vec<Vec<f64>>>,
}

/// Read and validate an analysis spec.
pub fn read_spec(path: &Path) -> Result<AnalysisSpec> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading spec {}", path.display()))?;
    let spec: AnalysisSpec = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing spec {}", path.display()))?;
    if spec.schema_version != SPEC_V0 {
        bail!(
            "unsupported spec schema_version '{}' (expected '{}')",
            spec.schema_version,
            SPEC_V0
        );
    }
    if spec.backgrounds.is_empty() {
        bail!("spec must name at least one background sample");
    }
    Ok(spec)
}

/// Resolve a sample path relative to the spec file's directory.
fn resolve(spec_path: &Path, sample: &Path) -> PathBuf {
    if sample.is_absolute() {
        sample.to_path_buf()
    } else {
        spec_path.parent().unwrap_or_else(|| Path::new(".")).join(sample)
    }
}

/// Load one sample file and build an [`EventSample`] per the spec's
/// construction options (derived leading fields, weight scale, pre-filter).
pub fn load_sample(spec: &AnalysisSpec, spec_path: &Path, sample: &Path) -> Result<EventSample> {
    let path = resolve(spec_path, sample);
    let bytes = std::fs::read(&path)
        .with_context(|| format!("reading sample {}", path.display()))?;
    let file: SampleFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing sample {}", path.display()))?;

    let mut builder = EventSample::builder(file.weights);
    for (name, values) in file.fields {
        builder = builder.field(name, values);
    }
    for (derived, jagged_name) in &spec.leading_fields {
        let rows = file.jagged.get(jagged_name).with_context(|| {
            format!("sample {} has no jagged column '{}'", path.display(), jagged_name)
        })?;
        let leading = JaggedColumn::from_rows(rows)
            .leading()
            .with_context(|| format!("deriving '{}' in {}", derived, path.display()))?;
        builder = builder.field(derived.clone(), leading);
    }
    if let Some(factor) = spec.weight_scale {
        builder = builder.scale_weights(factor);
    }
    let sample = builder
        .build()
        .with_context(|| format!("building sample {}", path.display()))?;

    match &spec.pre_filter {
        Some(predicate) => {
            let mask = predicate
                .evaluate(&sample)
                .with_context(|| format!("pre-filtering {}", path.display()))?;
            Ok(sample.filtered(&mask)?)
        }
        None => Ok(sample),
    }
}

/// Load the signal sample and the concatenated background sample.
pub fn load_groups(spec: &AnalysisSpec, spec_path: &Path) -> Result<(EventSample, EventSample)> {
    let signal = load_sample(spec, spec_path, &spec.signal)?;
    let backgrounds = spec
        .backgrounds
        .iter()
        .map(|p| load_sample(spec, spec_path, p))
        .collect::<Result<Vec<_>>>()?;
    let background = EventSample::concatenate(&backgrounds)?;
    tracing::info!(
        signal_events = signal.len(),
        background_events = background.len(),
        "samples loaded"
    );
    Ok((signal, background))
}

/// Label for a background process, taken from its file stem.
pub fn process_label(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| {
        path.to_string_lossy().into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_parses_with_defaults() {
        let json = r#"{
            "schema_version": "cutflow_spec_v0",
            "signal": "sig.json",
            "backgrounds": ["b1.json"],
            "cuts": [
                {"name": "x > 2", "predicate": {"op": "greater_than", "field": "x", "value": 2.0}}
            ]
        }"#;
        let spec: AnalysisSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.schema_version, SPEC_V0);
        assert!(spec.pre_filter.is_none());
        assert!(spec.weight_scale.is_none());
        assert_eq!(spec.cuts.len(), 1);
    }

    #[test]
    fn binning_variants_produce_edges() {
        let lin = Binning::Linear { min: 0.0, max: 2.0, bins: 2 };
        assert_eq!(lin.edges().unwrap(), vec![0.0, 1.0, 2.0]);
        let explicit = Binning::Edges { edges: vec![0.0, 0.5, 1.0] };
        assert_eq!(explicit.edges().unwrap(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn process_label_uses_file_stem() {
        assert_eq!(process_label(Path::new("data/nu_mu_nc.json")), "nu_mu_nc");
    }
}
