//! Error handling logic

use super::qudit::{Dimension, QuditId};
use num_complex::Complex64;
use thiserror::Error;

/// Failures raised while building or running a circuit.
///
/// Every error surfaces at the point where it is detected: parse errors when the
/// circuit is loaded, gate errors at the offending gate application. The runner
/// never catches or translates them.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum QuditError {
    /// A gate was applied to a register of the wrong qudit dimension.
    #[error("gate '{gate}' acts on {required}s but the register holds {actual}s")]
    TypeMismatch {
        /// Canonical text of the offending gate.
        gate: String,
        /// Dimension the gate is defined for.
        required: Dimension,
        /// Dimension the simulator was configured with.
        actual: Dimension,
    },

    /// Two controls or targets of one gate name the same qudit.
    #[error("qudit {qudit} appears more than once in gate '{gate}'")]
    DuplicateTarget {
        /// Canonical text of the offending gate.
        gate: String,
        /// The repeated qudit.
        qudit: QuditId,
    },

    /// A control or target lies outside the register.
    #[error("qudit {qudit} is outside the {num_qudits}-qudit register (gate '{gate}')")]
    QuditOutOfRange {
        /// Canonical text of the offending gate.
        gate: String,
        /// The out-of-range qudit.
        qudit: QuditId,
        /// Register width.
        num_qudits: usize,
    },

    /// Total probability drifted away from one after a gate.
    #[error("state is not normalized: sum |a|^2 = {norm_sqr} (tolerance {tolerance})")]
    NormalizationViolation {
        /// Observed Σ|a|².
        norm_sqr: f64,
        /// Allowed deviation from 1.
        tolerance: f64,
    },

    /// The lowest populated basis state does not carry a real, non-negative amplitude.
    #[error("amplitude {amplitude} at lowest basis index {index} is not real and non-negative")]
    PhaseConventionViolation {
        /// Lowest populated basis index.
        index: u64,
        /// Its amplitude.
        amplitude: Complex64,
    },

    /// Gate name is not part of the gate table.
    #[error("unknown gate '{0}'")]
    UnknownGate(String),

    /// Instruction text could not be parsed.
    #[error("malformed gate instruction '{instruction}': {reason}")]
    MalformedInstruction {
        /// The raw instruction text.
        instruction: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Only qubits (2 levels) and qutrits (3 levels) are simulated.
    #[error("unsupported qudit dimension {0}, expected 2 or 3")]
    UnsupportedDimension(u64),

    /// d^n basis states do not fit a 64-bit index.
    #[error("a register of {num_qudits} {dimension}s does not fit a 64-bit basis index")]
    RegisterTooLarge {
        /// Requested register width.
        num_qudits: usize,
        /// Requested dimension.
        dimension: Dimension,
    },

    /// The initial state names a basis state the register cannot hold.
    #[error("basis index {index} is outside the register ({basis_size} basis states)")]
    BasisIndexOutOfRange {
        /// The offending index.
        index: u64,
        /// d^n for the register.
        basis_size: u64,
    },

    /// A stored amplitude is at or below the cleanup threshold.
    #[error("basis state {index} holds negligible amplitude {amplitude} (threshold {threshold})")]
    NegligibleAmplitude {
        /// Basis index of the stale entry.
        index: u64,
        /// Its amplitude.
        amplitude: Complex64,
        /// Cleanup threshold the entry should have been pruned at.
        threshold: f64,
    },

    /// A simulator tolerance is negative or not finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidTolerance {
        /// Which setting was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The caller-supplied initial state cannot be normalized.
    #[error("invalid initial state: {0}")]
    InvalidInitialState(String),

    /// A previous run failed part-way; its state is not resumable.
    #[error("a previous run aborted; the simulator state is not resumable")]
    RunAborted,
}

/// Result type for simulator operations.
pub type QuditResult<T> = Result<T, QuditError>;
