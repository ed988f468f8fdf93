// src/core/mod.rs

//! Core data structures and types

pub mod constants;
pub mod encoding;
pub mod error;
pub mod qudit;
pub mod state;

// Re-export public types for convenient access via `qudit_sim::core::TypeName`
pub use constants::{CLEANUP_THRESHOLD, NORM_TOLERANCE};
pub use encoding::BasisIndex;
pub use error::{QuditError, QuditResult};
pub use qudit::{Dimension, QuditId};
pub use state::{Amplitude, LabelledState, StateVector};
