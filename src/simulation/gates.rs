// src/simulation/gates.rs

//! The gate library: one sparse amplitude rewrite per supported gate.
//!
//! Every function reads the populated entries of the input state and
//! accumulates their contributions into a fresh [`StateVector`]. Nothing here
//! prunes or checks the result; the engine does that after each gate.
//!
//! Single-qudit gates are written as their small local matrix `m[out][in]`
//! over the target digit (2x2 for qubits, 3x3 for qutrits). A basis state with
//! target digit `in` sends `m[out][in] * amp` to the same index with the digit
//! rewritten to `out`; zero entries contribute nothing. Permutation gates
//! (swaps, controlled flips) move each amplitude to exactly one new index.

use crate::core::constants::{omega, FRAC_1_SQRT_3};
use crate::core::encoding::{self, BasisIndex};
use crate::core::{Dimension, QuditId, StateVector};
use crate::operations::Operation;
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;

/// Local matrix of a single-qudit gate, indexed `[out][in]`.
type LocalMatrix<const D: usize> = [[Complex64; D]; D];

/// Applies `op` to `state`. The operation must already be validated against
/// the register (targets in range and distinct, dimension matching).
pub(crate) fn transform(state: &StateVector, op: &Operation, dimension: Dimension) -> StateVector {
    match op {
        Operation::Z { target } => apply_local(state, *target, dimension, &pauli_z()),
        Operation::X { target } => apply_local(state, *target, dimension, &pauli_x()),
        Operation::Y { target } => apply_local(state, *target, dimension, &pauli_y()),
        Operation::H { target } => apply_local(state, *target, dimension, &hadamard()),
        Operation::Phase { target, phi } => apply_local(state, *target, dimension, &phase_matrix(*phi)),
        Operation::Rx { target, theta } => apply_local(state, *target, dimension, &rx_matrix(*theta)),
        Operation::Ry { target, theta } => apply_local(state, *target, dimension, &ry_matrix(*theta)),
        Operation::Rz { target, theta } => apply_local(state, *target, dimension, &rz_matrix(*theta)),
        Operation::H3 { target } => apply_local(state, *target, dimension, &hadamard3()),
        Operation::Swap { a, b } => permute(state, |i| swap_digits(i, *a, *b, dimension)),
        Operation::Cx { control, target } => permute(state, |i| {
            if digit_of(i, *control, dimension) == 1 {
                toggle_bit(i, *target, dimension)
            } else {
                i
            }
        }),
        Operation::CSwap { control, a, b } | Operation::CSwap3 { control, a, b } => {
            permute(state, |i| {
                if digit_of(i, *control, dimension) == 1 {
                    swap_digits(i, *a, *b, dimension)
                } else {
                    i
                }
            })
        }
        Operation::Ccx { control1, control2, target } => permute(state, |i| {
            if digit_of(i, *control1, dimension) == 1 && digit_of(i, *control2, dimension) == 1 {
                toggle_bit(i, *target, dimension)
            } else {
                i
            }
        }),
        Operation::Controlled { controls, gate } => controlled(state, controls, gate, dimension),
    }
}

fn digit_of(index: BasisIndex, qudit: QuditId, dimension: Dimension) -> u64 {
    encoding::digit(index, qudit.position(), dimension)
}

fn toggle_bit(index: BasisIndex, qudit: QuditId, dimension: Dimension) -> BasisIndex {
    let bit = digit_of(index, qudit, dimension);
    encoding::with_digit(index, qudit.position(), dimension, 1 - bit)
}

fn swap_digits(index: BasisIndex, a: QuditId, b: QuditId, dimension: Dimension) -> BasisIndex {
    let (da, db) = (digit_of(index, a, dimension), digit_of(index, b, dimension));
    let index = encoding::with_digit(index, a.position(), dimension, db);
    encoding::with_digit(index, b.position(), dimension, da)
}

/// Moves every amplitude to `destination(index)`.
fn permute<F>(state: &StateVector, destination: F) -> StateVector
where
    F: Fn(BasisIndex) -> BasisIndex,
{
    let mut out = StateVector::new();
    for (index, amp) in state.iter() {
        out.accumulate(destination(index), amp);
    }
    out
}

/// Applies a D-level local matrix to the digit of `target`.
fn apply_local<const D: usize>(
    state: &StateVector,
    target: QuditId,
    dimension: Dimension,
    matrix: &LocalMatrix<D>,
) -> StateVector {
    debug_assert_eq!(D as u64, dimension.levels(), "local matrix size must match the register dimension");
    let position = target.position();
    let mut out = StateVector::new();
    for (index, amp) in state.iter() {
        let input = encoding::digit(index, position, dimension) as usize;
        for (output, row) in matrix.iter().enumerate() {
            let coefficient = row[input];
            if coefficient.is_zero() {
                continue;
            }
            let destination = encoding::with_digit(index, position, dimension, output as u64);
            out.accumulate(destination, coefficient * amp);
        }
    }
    out
}

/// Applies `gate` to the basis states whose control digits are all 1; the rest pass through.
///
/// The wrapped gate never touches a control digit (targets and controls are
/// distinct), so the controlled subspace maps into itself and the two parts
/// can be summed back together.
fn controlled(state: &StateVector, controls: &[QuditId], gate: &Operation, dimension: Dimension) -> StateVector {
    let (active, passive): (Vec<_>, Vec<_>) = state
        .iter()
        .partition(|(index, _)| controls.iter().all(|c| digit_of(*index, *c, dimension) == 1));
    let mut out = transform(&StateVector::from_amplitudes(active), gate, dimension);
    for (index, amp) in passive {
        out.accumulate(index, amp);
    }
    out
}

// --- Local matrices ---

fn real(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

fn pauli_x() -> LocalMatrix<2> {
    [
        [Complex64::zero(), Complex64::one()],
        [Complex64::one(), Complex64::zero()],
    ]
}

fn pauli_y() -> LocalMatrix<2> {
    // |0> -> i|1>, |1> -> -i|0>
    [
        [Complex64::zero(), -Complex64::i()],
        [Complex64::i(), Complex64::zero()],
    ]
}

fn pauli_z() -> LocalMatrix<2> {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), real(-1.0)],
    ]
}

fn hadamard() -> LocalMatrix<2> {
    [
        [real(FRAC_1_SQRT_2), real(FRAC_1_SQRT_2)],
        [real(FRAC_1_SQRT_2), real(-FRAC_1_SQRT_2)],
    ]
}

/// diag(1, e^(iφ))
fn phase_matrix(phi: f64) -> LocalMatrix<2> {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::from_polar(1.0, phi)],
    ]
}

fn rx_matrix(theta: f64) -> LocalMatrix<2> {
    let (sin, cos) = (theta / 2.0).sin_cos();
    let minus_i_sin = Complex64::new(0.0, -sin);
    [[real(cos), minus_i_sin], [minus_i_sin, real(cos)]]
}

fn ry_matrix(theta: f64) -> LocalMatrix<2> {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [[real(cos), real(-sin)], [real(sin), real(cos)]]
}

/// diag(e^(-iθ/2), e^(iθ/2))
fn rz_matrix(theta: f64) -> LocalMatrix<2> {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), Complex64::zero()],
        [Complex64::zero(), Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// Column k sends |k> to Σ_j ω^(jk)/√3 |j>.
fn hadamard3() -> LocalMatrix<3> {
    let w = omega() * FRAC_1_SQRT_3;
    let w2 = omega().conj() * FRAC_1_SQRT_3;
    let s = real(FRAC_1_SQRT_3);
    [[s, s, s], [s, w, w2], [s, w2, w]]
}
