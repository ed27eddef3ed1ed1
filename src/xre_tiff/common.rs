//! Common utilities module
//!
//! Shared error type used by the codec, the converter and the TIFF layer.

pub mod error;

pub use error::{XreTiffError, Result};
