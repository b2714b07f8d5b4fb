//! # cf-flow
//!
//! Cumulative cut-flow evaluation over weighted event samples.
//!
//! An ordered list of [`Cut`]s is folded into per-sample survivor masks for
//! a signal sample and a background sample; after each cut the engine
//! records the cumulative weighted efficiency of both groups and their
//! ratio. Efficiencies are always relative to the pre-cut totals.
//!
//! ## Example
//!
//! ```
//! use cf_flow::{Cut, Predicate, run};
//! use cf_sample::EventSample;
//!
//! let signal = EventSample::builder(vec![1.0; 4])
//!     .field("x", vec![1.0, 2.0, 3.0, 4.0])
//!     .build()
//!     .unwrap();
//! let background = EventSample::builder(vec![2.0; 4])
//!     .field("x", vec![1.0, 1.0, 5.0, 5.0])
//!     .build()
//!     .unwrap();
//!
//! let cuts = vec![Cut::new("x > 2", Predicate::greater_than("x", 2.0))];
//! let report = run(&signal, &background, &cuts).unwrap();
//! assert_eq!(report.steps[0].signal_efficiency, 0.5);
//! assert_eq!(report.steps[0].ratio, 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cut;
pub mod engine;
pub mod report;

pub use cut::{Cut, Predicate};
pub use engine::run;
pub use report::{CutFlowStep, EfficiencyReport};
