// src/validation/mod.rs

//! Checks for the invariants a simulated [`StateVector`] must hold.

use crate::core::constants::{CLEANUP_THRESHOLD, NORM_TOLERANCE};
use crate::core::{QuditError, QuditResult, StateVector};

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = NORM_TOLERANCE;
const DEFAULT_PHASE_TOLERANCE: f64 = 1e-12;

/// Checks that Σ|a|² is within `tolerance` of 1.
///
/// # Arguments
/// * `state` - The state to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to [`NORM_TOLERANCE`].
///
/// # Returns
/// * `Err(QuditError::NormalizationViolation)` if the deviation is larger.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> QuditResult<()> {
    let tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sqr = state.norm_sqr();
    if (norm_sqr - 1.0).abs() > tolerance || !norm_sqr.is_finite() {
        Err(QuditError::NormalizationViolation { norm_sqr, tolerance })
    } else {
        Ok(())
    }
}

/// Checks the global-phase convention: the amplitude at the lowest populated
/// basis index is real (imaginary part within `tolerance` of 0) and non-negative.
///
/// An empty state trivially satisfies the convention.
pub fn check_phase_convention(state: &StateVector, tolerance: Option<f64>) -> QuditResult<()> {
    let tolerance = tolerance.unwrap_or(DEFAULT_PHASE_TOLERANCE);
    let Some((index, amplitude)) = state.iter().next() else {
        return Ok(());
    };
    if amplitude.im.abs() > tolerance || amplitude.re < 0.0 {
        return Err(QuditError::PhaseConventionViolation { index, amplitude });
    }
    Ok(())
}

/// Checks that no stored amplitude is at or below the cleanup threshold.
fn check_no_debris(state: &StateVector, threshold: f64) -> QuditResult<()> {
    match state.iter().find(|(_, a)| a.norm() <= threshold) {
        Some((index, amplitude)) => Err(QuditError::NegligibleAmplitude {
            index,
            amplitude,
            threshold,
        }),
        None => Ok(()),
    }
}

/// Runs every state check: normalization, phase convention and absence of
/// negligible entries. Intended for canonical (freshly constructed) states;
/// states mid-circuit need not satisfy the phase convention.
pub fn validate_state(state: &StateVector) -> QuditResult<()> {
    check_normalization(state, None)?;
    check_phase_convention(state, None)?;
    check_no_debris(state, CLEANUP_THRESHOLD)?;
    Ok(())
}
