// src/simulation/config.rs

use crate::core::constants::{CLEANUP_THRESHOLD, NORM_TOLERANCE};
use crate::core::Dimension;

/// Settings fixed for the lifetime of one [`Simulator`](super::Simulator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// Levels per qudit; a register is all qubits or all qutrits.
    pub dimension: Dimension,
    /// Keep a snapshot of the state after every gate.
    pub track_history: bool,
    /// Amplitudes with magnitude at or below this are pruned after each gate.
    pub cleanup_threshold: f64,
    /// Allowed deviation of Σ|a|² from 1 after each gate.
    pub norm_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::Qubit,
            track_history: false,
            cleanup_threshold: CLEANUP_THRESHOLD,
            norm_tolerance: NORM_TOLERANCE,
        }
    }
}
