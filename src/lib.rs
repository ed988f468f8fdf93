// src/lib.rs

//! `qudit_sim` - sparse state-vector simulation of qubit and qutrit circuits
//!
//! A register of n qudits (all qubits or all qutrits) is held as a sparse map
//! from basis index to complex amplitude. Qudit i occupies digit i of the
//! base-d index, so `index = Σ digit_i · d^i`. Each gate rewrites the populated
//! entries exactly; after every gate negligible amplitudes are pruned and the
//! norm is checked.

pub mod circuits;
pub mod core;
pub mod operations;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::{Circuit, CircuitBuilder};
pub use crate::core::{Amplitude, BasisIndex, Dimension, QuditError, QuditId, QuditResult, StateVector};
pub use operations::{GateKind, Operation};
pub use simulation::{History, Simulator, SimulatorBuilder, SimulatorConfig};
pub use validation::{check_normalization, check_phase_convention, validate_state};

// Example 1: Bell state
// Hadamard then CNOT entangles two qubits into (|00> + |11>)/√2.
/// ```
/// use qudit_sim::{CircuitBuilder, Operation, QuditId, QuditResult, Simulator};
/// use std::f64::consts::FRAC_1_SQRT_2;
///
/// fn qid(position: usize) -> QuditId { QuditId(position) }
///
/// # fn main() -> QuditResult<()> {
/// let circuit = CircuitBuilder::new()
///     .add_op(Operation::H { target: qid(0) })
///     .add_op(Operation::Cx { control: qid(0), target: qid(1) })
///     .build()?;
///
/// let mut sim = Simulator::builder(2).circuit(circuit).build()?;
/// let state = sim.run()?;
///
/// assert_eq!(state.len(), 2);
/// assert!((state.amplitude(0b00).re - FRAC_1_SQRT_2).abs() < 1e-12);
/// assert!((state.amplitude(0b11).re - FRAC_1_SQRT_2).abs() < 1e-12);
/// println!("{}", sim);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Qutrit superposition
// Two qutrit Hadamards and a qutrit-controlled swap spread |000> over nine basis states.
/// ```
/// use qudit_sim::{Dimension, QuditResult, Simulator};
///
/// # fn main() -> QuditResult<()> {
/// let mut sim = Simulator::builder(3)
///     .dimension(Dimension::Qutrit)
///     .instructions(["h3-0", "h3-2", "cswap3-0,1,2"])
///     .track_history(true)
///     .build()?;
/// let state = sim.run()?;
///
/// let populated: Vec<u64> = state.indices().collect();
/// assert_eq!(populated, vec![0, 1, 2, 4, 7, 9, 11, 18, 20]);
/// for (_, amplitude) in state.iter() {
///     assert!((amplitude.norm() - 1.0 / 3.0).abs() < 1e-9);
/// }
/// assert_eq!(sim.history().map(|h| h.len()), Some(4));
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();

// Example 3: Parametric and controlled instructions
/// ```
/// use qudit_sim::{QuditError, QuditResult, Simulator};
///
/// # fn main() -> QuditResult<()> {
/// // Rx(π) flips |0> to -i|1>; the controlled phase then adds e^(iπ/2) = i.
/// let mut sim = Simulator::builder(2)
///     .instructions(["rx(pi)-0", "x-1", "ctrl(0)-phase(pi/2)-1"])
///     .build()?;
/// let state = sim.run()?;
/// assert!((state.amplitude(0b11).re - 1.0).abs() < 1e-12);
///
/// // Qutrit-only gates on a qubit register fail at the offending gate.
/// let mut bad = Simulator::builder(1).instructions(["h3-0"]).build()?;
/// assert!(matches!(bad.run(), Err(QuditError::TypeMismatch { .. })));
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();
