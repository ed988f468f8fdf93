// src/simulation/mod.rs

//! Runs a [`Circuit`] against a sparse qubit or qutrit register.
//!
//! [`Simulator`] owns the circuit, the working state and (optionally) the
//! [`History`] of every intermediate state. The per-gate work is done by the
//! internal `SimulationEngine`, which returns a new state for each gate rather
//! than mutating the current one in place.

mod config;
pub(crate) mod engine;
pub(crate) mod gates;
mod results;

pub use config::SimulatorConfig;
pub use results::History;

use crate::circuits::Circuit;
use crate::core::{Amplitude, BasisIndex, Dimension, QuditError, QuditResult, StateVector};
use crate::operations::Operation;
use engine::SimulationEngine;
use num_complex::Complex64;
use std::fmt;
use tracing::{debug, warn};

/// Where a simulator is in its single pass over the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Ready,
    Done,
    Aborted,
}

/// A homogeneous qudit register with a circuit to run on it.
///
/// ```
/// use qudit_sim::{Simulator, QuditResult};
///
/// # fn main() -> QuditResult<()> {
/// let mut sim = Simulator::builder(2)
///     .instructions(["h-0", "cx-0,1"])
///     .build()?;
/// let state = sim.run()?;
/// assert!((state.probability(0b00) - 0.5).abs() < 1e-12);
/// assert!((state.probability(0b11) - 0.5).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    engine: SimulationEngine,
    config: SimulatorConfig,
    num_qudits: usize,
    circuit: Circuit,
    state: StateVector,
    history: Option<History>,
    status: RunStatus,
}

impl Simulator {
    /// Starts a [`SimulatorBuilder`] for a register of `num_qudits` qudits.
    pub fn builder(num_qudits: usize) -> SimulatorBuilder {
        SimulatorBuilder::new(num_qudits)
    }

    /// Creates a simulator ready to run `circuit` from `initial`.
    ///
    /// The initial state may be unnormalized. It is pruned, normalized and
    /// phase-fixed so that its lowest populated amplitude is real and positive.
    ///
    /// # Errors
    /// * `RegisterTooLarge` if d^num_qudits does not fit a 64-bit index.
    /// * `BasisIndexOutOfRange` if `initial` names a basis state outside the register.
    /// * `InvalidInitialState` if `initial` has no non-negligible amplitude.
    pub fn new(
        num_qudits: usize,
        config: SimulatorConfig,
        circuit: Circuit,
        initial: StateVector,
    ) -> QuditResult<Self> {
        let engine = SimulationEngine::init(num_qudits, config)?;
        let state = engine.prepare(initial)?;
        let history = config.track_history.then(|| History::new(state.clone()));
        debug!(
            num_qudits,
            dimension = %config.dimension,
            gates = circuit.len(),
            track_history = config.track_history,
            populated = state.len(),
            "simulator ready"
        );
        Ok(Self {
            engine,
            config,
            num_qudits,
            circuit,
            state,
            history,
            status: RunStatus::Ready,
        })
    }

    /// Applies every gate of the circuit in order and returns the final state.
    ///
    /// The first failing gate aborts the run: the error is returned, the state
    /// stays at the last successfully applied gate and the history (if kept)
    /// ends there too. An aborted simulator cannot be resumed; calling `run`
    /// again yields [`QuditError::RunAborted`]. Calling `run` after a
    /// successful run returns the final state without reapplying anything.
    pub fn run(&mut self) -> QuditResult<&StateVector> {
        match self.status {
            RunStatus::Done => return Ok(&self.state),
            RunStatus::Aborted => return Err(QuditError::RunAborted),
            RunStatus::Ready => {}
        }

        for (step, op) in self.circuit.operations().iter().enumerate() {
            let next = match self.engine.apply(&self.state, op) {
                Ok(next) => next,
                Err(e) => {
                    warn!(step = step + 1, gate = %op, error = %e, "run aborted");
                    self.status = RunStatus::Aborted;
                    return Err(e);
                }
            };
            debug!(step = step + 1, gate = %op, populated = next.len(), "applied gate");
            if let Some(history) = self.history.as_mut() {
                history.record(next.clone());
            }
            self.state = next;
        }

        self.status = RunStatus::Done;
        debug!(gates = self.circuit.len(), populated = self.state.len(), "run complete");
        Ok(&self.state)
    }

    /// The current state: initial before `run`, final after it.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Recorded snapshots, or `None` when history tracking is off.
    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn num_qudits(&self) -> usize {
        self.num_qudits
    }

    pub fn dimension(&self) -> Dimension {
        self.config.dimension
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}

/// Prints each recorded state followed by the instruction that produced the
/// next one. Without history only the current state is printed.
///
/// Basis states are labelled with base-d digits (qudit 0 rightmost); the
/// alternate form `{:#}` labels them with decimal indices instead.
impl fmt::Display for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshots: Vec<&StateVector> = match &self.history {
            Some(history) => history.iter().collect(),
            None => vec![&self.state],
        };
        let ops = self.circuit.operations();
        for (t, snapshot) in snapshots.iter().enumerate() {
            if t > 0 {
                writeln!(f)?;
            }
            if f.alternate() {
                write!(f, "{}", snapshot)?;
            } else {
                write!(f, "{}", snapshot.labelled(self.num_qudits, self.config.dimension))?;
            }
            if t + 1 < snapshots.len() {
                if let Some(op) = ops.get(t) {
                    write!(f, "\n{}", op)?;
                }
            }
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Simulator Builder
//-------------------------------------------------------------------------

/// Fluent construction of a [`Simulator`].
///
/// Defaults: qubits, the empty circuit, initial state |0...0>, no history.
#[derive(Debug)]
pub struct SimulatorBuilder {
    num_qudits: usize,
    config: SimulatorConfig,
    circuit: Circuit,
    initial: Option<StateVector>,
    error: Option<QuditError>,
}

impl SimulatorBuilder {
    pub fn new(num_qudits: usize) -> Self {
        Self {
            num_qudits,
            config: SimulatorConfig::default(),
            circuit: Circuit::new(),
            initial: None,
            error: None,
        }
    }

    /// Qudit dimension of the register.
    pub fn dimension(mut self, dimension: Dimension) -> Self {
        self.config.dimension = dimension;
        self
    }

    /// Sets the dimension from a level count; anything other than 2 or 3 is
    /// reported by [`build`](Self::build) as `UnsupportedDimension`.
    pub fn levels(mut self, levels: u64) -> Self {
        match Dimension::from_levels(levels) {
            Ok(dimension) => self.config.dimension = dimension,
            Err(e) => self.record_error(e),
        }
        self
    }

    /// Replaces the circuit.
    pub fn circuit(mut self, circuit: Circuit) -> Self {
        self.circuit = circuit;
        self
    }

    /// Appends one operation to the circuit.
    pub fn operation(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Parses and appends textual instructions, e.g. `["h3-0", "cswap3-0,1,2"]`.
    pub fn instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match Circuit::parse(instructions) {
            Ok(parsed) => self.circuit.add_operations(parsed.operations().iter().cloned()),
            Err(e) => self.record_error(e),
        }
        self
    }

    /// Initial state; it need not be normalized.
    pub fn initial_state(mut self, state: StateVector) -> Self {
        self.initial = Some(state);
        self
    }

    /// Initial state from `(index, amplitude)` pairs.
    pub fn initial_amplitudes<I>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (BasisIndex, Amplitude)>,
    {
        self.initial_state(StateVector::from_amplitudes(entries))
    }

    pub fn track_history(mut self, track: bool) -> Self {
        self.config.track_history = track;
        self
    }

    /// Magnitude at or below which amplitudes are pruned after each gate.
    /// A negative or non-finite value fails `build` with `InvalidTolerance`.
    pub fn cleanup_threshold(mut self, threshold: f64) -> Self {
        match check_tolerance("cleanup_threshold", threshold) {
            Ok(threshold) => self.config.cleanup_threshold = threshold,
            Err(e) => self.record_error(e),
        }
        self
    }

    /// Allowed |Σ|a|² - 1| after each gate.
    /// A negative or non-finite value fails `build` with `InvalidTolerance`.
    pub fn norm_tolerance(mut self, tolerance: f64) -> Self {
        match check_tolerance("norm_tolerance", tolerance) {
            Ok(tolerance) => self.config.norm_tolerance = tolerance,
            Err(e) => self.record_error(e),
        }
        self
    }

    fn record_error(&mut self, e: QuditError) {
        if self.error.is_none() {
            self.error = Some(e);
        }
    }

    /// Builds the simulator, reporting the first configuration error.
    pub fn build(self) -> QuditResult<Simulator> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let initial = self
            .initial
            .unwrap_or_else(|| StateVector::from_amplitudes([(0, Complex64::new(1.0, 0.0))]));
        Simulator::new(self.num_qudits, self.config, self.circuit, initial)
    }
}

fn check_tolerance(name: &'static str, value: f64) -> QuditResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(QuditError::InvalidTolerance { name, value })
    }
}
