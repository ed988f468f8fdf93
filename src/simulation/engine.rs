// src/simulation/engine.rs
use super::config::SimulatorConfig;
use super::gates;
use crate::core::encoding;
use crate::core::{QuditError, QuditResult, StateVector};
use crate::operations::Operation;
use crate::validation;

/// Applies gates to a register and keeps the state valid between them.
///
/// The engine holds no state of its own: every step takes the current state
/// and returns the next one, leaving the input untouched.
/// (Internal visibility)
#[derive(Debug, Clone, Copy)]
pub(crate) struct SimulationEngine {
    num_qudits: usize,
    config: SimulatorConfig,
}

impl SimulationEngine {
    /// Checks that the register's basis fits a `u64` index.
    pub(crate) fn init(num_qudits: usize, config: SimulatorConfig) -> QuditResult<Self> {
        encoding::basis_size(num_qudits, config.dimension).ok_or(QuditError::RegisterTooLarge {
            num_qudits,
            dimension: config.dimension,
        })?;
        Ok(Self { num_qudits, config })
    }

    fn basis_size(&self) -> u64 {
        // init() already proved this fits
        encoding::basis_size(self.num_qudits, self.config.dimension).unwrap_or(u64::MAX)
    }

    /// Canonicalizes a caller-supplied initial state: range check, cleanup,
    /// normalization, then the global-phase fix.
    pub(crate) fn prepare(&self, mut state: StateVector) -> QuditResult<StateVector> {
        let basis_size = self.basis_size();
        if let Some(index) = state.indices().find(|i| *i >= basis_size) {
            return Err(QuditError::BasisIndexOutOfRange { index, basis_size });
        }
        state.cleanup(self.config.cleanup_threshold);
        if state.is_empty() {
            return Err(QuditError::InvalidInitialState(
                "no basis state has a non-negligible amplitude".to_string(),
            ));
        }
        state.normalize()?;
        state.fix_global_phase()?;
        validation::check_phase_convention(&state, None)?;
        Ok(state)
    }

    /// Applies one operation: register checks, the gate itself, cleanup and the
    /// normalization check.
    pub(crate) fn apply(&self, state: &StateVector, op: &Operation) -> QuditResult<StateVector> {
        op.validate(self.num_qudits, self.config.dimension)?;
        let mut next = gates::transform(state, op, self.config.dimension);
        next.cleanup(self.config.cleanup_threshold);
        validation::check_normalization(&next, Some(self.config.norm_tolerance))?;
        Ok(next)
    }
}
