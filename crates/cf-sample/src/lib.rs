//! # cf-sample
//!
//! In-memory weighted event samples for cut-flow analysis.
//!
//! An [`EventSample`] holds one weight per event plus named scalar columns,
//! all aligned by event index. Samples are built once (possibly by
//! concatenating several sources) and immutable thereafter; reading them
//! from disk is the caller's problem.
//!
//! ## Example
//!
//! ```
//! use cf_sample::EventSample;
//!
//! let sample = EventSample::builder(vec![1.0, 2.0, 3.0])
//!     .field("pt", vec![10.0, 25.0, 40.0])
//!     .build()
//!     .unwrap();
//! assert_eq!(sample.total_weight(), 6.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod jagged;
pub mod sample;

pub use jagged::JaggedColumn;
pub use sample::{EventSample, SampleBuilder};
