//! # cf-core
//!
//! Shared error taxonomy for the cutflow analysis toolkit.
//!
//! Structural problems (schema mismatches, unknown fields, misaligned
//! columns) are fatal and abort a run; arithmetic edge cases such as a
//! zero-weight sample or a depleted background are not errors and are
//! handled in-band by the consuming crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{Error, Result};
