//! Cumulative mask folding and weighted efficiency computation.

use cf_core::{Error, Result};
use cf_sample::EventSample;

use crate::cut::Cut;
use crate::report::{CutFlowStep, EfficiencyReport};

/// Survivor bookkeeping for one sample across the cut list.
///
/// The mask starts all-true (100% pre-selection) and only ever loses `true`
/// positions: each cut is ANDed in, so an excluded event never re-enters.
/// The denominator is the pre-cut total weight, fixed for the whole run.
struct MaskedSample<'a> {
    sample: &'a EventSample,
    mask: Vec<bool>,
    total_weight: f64,
}

impl<'a> MaskedSample<'a> {
    fn new(sample: &'a EventSample) -> Self {
        Self { sample, mask: vec![true; sample.len()], total_weight: sample.total_weight() }
    }

    /// AND the cut's predicate result into the mask, then return the
    /// cumulative efficiency relative to the pre-cut total.
    fn fold(&mut self, cut: &Cut) -> Result<f64> {
        // The predicate sees the full sample, not just current survivors.
        let passed = cut.predicate.evaluate(self.sample)?;
        for (m, p) in self.mask.iter_mut().zip(&passed) {
            *m &= p;
        }

        if self.total_weight <= 0.0 {
            return Ok(0.0);
        }
        let surviving: f64 = self
            .sample
            .weights()
            .iter()
            .zip(&self.mask)
            .filter(|(_, &kept)| kept)
            .map(|(&w, _)| w)
            .sum();
        Ok(surviving / self.total_weight)
    }
}

/// Check every field referenced by every cut against a sample, so that a
/// malformed cut list aborts before any mask is folded. A cut-flow is only
/// meaningful as a whole; partial reports are never produced.
fn validate_cuts(sample: &EventSample, cuts: &[Cut], group: &str) -> Result<()> {
    for cut in cuts {
        for field in cut.predicate.fields() {
            if sample.field(field).is_none() {
                log::debug!("{} sample fields: {:?}", group, sample.field_names());
                return Err(Error::UnknownField {
                    cut: cut.name.clone(),
                    field: field.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Apply an ordered cut list cumulatively to a signal and a background
/// sample and trace the weighted efficiencies.
///
/// Efficiencies are always relative to the pre-cut totals, never to the
/// previous step's survivors. A zero-total-weight sample yields efficiency
/// 0.0 at every step; a depleted background yields a `f64::INFINITY` ratio.
/// The report has exactly one step per cut.
pub fn run(
    signal: &EventSample,
    background: &EventSample,
    cuts: &[Cut],
) -> Result<EfficiencyReport> {
    validate_cuts(signal, cuts, "signal")?;
    validate_cuts(background, cuts, "background")?;

    let mut sig = MaskedSample::new(signal);
    let mut bkg = MaskedSample::new(background);

    let mut steps = Vec::with_capacity(cuts.len());
    for cut in cuts {
        let signal_efficiency = sig.fold(cut)?;
        let background_efficiency = bkg.fold(cut)?;
        let ratio = if background_efficiency != 0.0 {
            signal_efficiency / background_efficiency
        } else {
            f64::INFINITY
        };
        steps.push(CutFlowStep {
            cut: cut.name.clone(),
            signal_efficiency,
            background_efficiency,
            ratio,
        });
    }

    Ok(EfficiencyReport { steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::Predicate;

    fn signal() -> EventSample {
        EventSample::builder(vec![1.0; 4])
            .field("x", vec![1.0, 2.0, 3.0, 4.0])
            .build()
            .unwrap()
    }

    fn background() -> EventSample {
        EventSample::builder(vec![2.0; 4])
            .field("x", vec![1.0, 1.0, 5.0, 5.0])
            .build()
            .unwrap()
    }

    #[test]
    fn single_cut_example() {
        let cuts = vec![Cut::new("x > 2", Predicate::greater_than("x", 2.0))];
        let report = run(&signal(), &background(), &cuts).unwrap();
        assert_eq!(report.len(), 1);
        let step = &report.steps[0];
        assert!((step.signal_efficiency - 0.5).abs() < 1e-12);
        assert!((step.background_efficiency - 0.5).abs() < 1e-12);
        assert!((step.ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn depleted_background_gives_infinite_ratio() {
        let bkg = EventSample::builder(vec![1.0, 1.0])
            .field("x", vec![0.0, 0.0])
            .build()
            .unwrap();
        let cuts = vec![Cut::new("x > 2", Predicate::greater_than("x", 2.0))];
        let report = run(&signal(), &bkg, &cuts).unwrap();
        let step = &report.steps[0];
        assert!((step.signal_efficiency - 0.5).abs() < 1e-12);
        assert_eq!(step.background_efficiency, 0.0);
        assert!(step.ratio.is_infinite() && step.ratio > 0.0);
    }

    #[test]
    fn empty_cut_list_empty_report() {
        let report = run(&signal(), &background(), &[]).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn efficiencies_are_monotone_non_increasing() {
        let cuts = vec![
            Cut::new("x > 1", Predicate::greater_than("x", 1.0)),
            Cut::new("x > 2", Predicate::greater_than("x", 2.0)),
            Cut::new("x > 3", Predicate::greater_than("x", 3.0)),
        ];
        let report = run(&signal(), &background(), &cuts).unwrap();
        for pair in report.steps.windows(2) {
            assert!(pair[1].signal_efficiency <= pair[0].signal_efficiency);
            assert!(pair[1].background_efficiency <= pair[0].background_efficiency);
        }
    }

    #[test]
    fn denominator_is_fixed_at_pre_cut_total() {
        // Two successive cuts each halving the survivors: the second step
        // must be 0.25 of the original total, not 0.5 of the previous step.
        let sig = EventSample::builder(vec![1.0; 4])
            .field("x", vec![1.0, 2.0, 3.0, 4.0])
            .build()
            .unwrap();
        let cuts = vec![
            Cut::new("x > 2", Predicate::greater_than("x", 2.0)),
            Cut::new("x > 3", Predicate::greater_than("x", 3.0)),
        ];
        let report = run(&sig, &background(), &cuts).unwrap();
        assert!((report.steps[0].signal_efficiency - 0.5).abs() < 1e-12);
        assert!((report.steps[1].signal_efficiency - 0.25).abs() < 1e-12);
    }

    #[test]
    fn cuts_accumulate_rather_than_reset() {
        // Disjoint cuts: together they exclude everything even though each
        // passes half the sample in isolation.
        let cuts = vec![
            Cut::new("x < 3", Predicate::less_than("x", 3.0)),
            Cut::new("x > 2", Predicate::greater_than("x", 2.0)),
        ];
        let report = run(&signal(), &background(), &cuts).unwrap();
        assert!((report.steps[1].signal_efficiency - 0.0).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_sample_yields_zero_efficiency() {
        let sig = EventSample::builder(vec![0.0; 3])
            .field("x", vec![1.0, 2.0, 3.0])
            .build()
            .unwrap();
        let cuts = vec![
            Cut::new("x > 0", Predicate::greater_than("x", 0.0)),
            Cut::new("x > 2", Predicate::greater_than("x", 2.0)),
        ];
        let report = run(&sig, &background(), &cuts).unwrap();
        for step in &report {
            assert_eq!(step.signal_efficiency, 0.0);
        }
    }

    #[test]
    fn unknown_field_aborts_before_any_step() {
        let cuts = vec![
            Cut::new("x > 2", Predicate::greater_than("x", 2.0)),
            Cut::new("bad", Predicate::equals("nope", 1.0)),
        ];
        let err = run(&signal(), &background(), &cuts).unwrap_err();
        match err {
            Error::UnknownField { cut, field } => {
                assert_eq!(cut, "bad");
                assert_eq!(field, "nope");
            }
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn deterministic_across_runs() {
        let cuts = vec![
            Cut::new("x > 1", Predicate::greater_than("x", 1.0)),
            Cut::new("x < 4", Predicate::less_than("x", 4.0)),
        ];
        let a = run(&signal(), &background(), &cuts).unwrap();
        let b = run(&signal(), &background(), &cuts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn weighted_efficiency_uses_weights_not_counts() {
        // One heavy event passing, three light ones failing.
        let sig = EventSample::builder(vec![7.0, 1.0, 1.0, 1.0])
            .field("x", vec![5.0, 0.0, 0.0, 0.0])
            .build()
            .unwrap();
        let cuts = vec![Cut::new("x > 2", Predicate::greater_than("x", 2.0))];
        let report = run(&sig, &background(), &cuts).unwrap();
        assert!((report.steps[0].signal_efficiency - 0.7).abs() < 1e-12);
    }
}
