// tests/gate_tests.rs

use num_complex::Complex64;
use qudit_sim::core::encoding;
use qudit_sim::{BasisIndex, Dimension, QuditError, QuditResult, Simulator, StateVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

const TEST_TOLERANCE: f64 = 1e-9;
const SEED: u64 = 0x5eed_0001;

/// Dense state with random complex amplitudes; the simulator normalizes it.
fn random_state(rng: &mut StdRng, num_qudits: usize, dimension: Dimension) -> StateVector {
    let size = dimension.levels().pow(num_qudits as u32);
    (0..size)
        .map(|i| {
            let amplitude = Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
            (i, amplitude)
        })
        .collect()
}

/// Runs `instructions` from `initial`, returning the canonical initial state and the final one.
fn simulate(
    num_qudits: usize,
    dimension: Dimension,
    initial: &StateVector,
    instructions: &[&str],
) -> QuditResult<(StateVector, StateVector)> {
    let mut sim = Simulator::builder(num_qudits)
        .dimension(dimension)
        .initial_state(initial.clone())
        .instructions(instructions.iter().copied())
        .build()?;
    let start = sim.state().clone();
    let end = sim.run()?.clone();
    Ok((start, end))
}

fn assert_states_approx_eq(actual: &StateVector, expected: &StateVector, context: &str) {
    assert!(
        actual.approx_eq(expected, TEST_TOLERANCE),
        "state mismatch - Actual: {}, Expected: {}, Context: {}",
        actual,
        expected,
        context
    );
}

/// Applies a per-basis-state rule `index -> (new_index, factor)` to every entry.
fn expected_from_rule<F>(start: &StateVector, rule: F) -> StateVector
where
    F: Fn(BasisIndex) -> (BasisIndex, Complex64),
{
    start
        .iter()
        .map(|(index, amplitude)| {
            let (to, factor) = rule(index);
            (to, amplitude * factor)
        })
        .collect()
}

#[test]
fn test_z_negates_digit_one() -> QuditResult<()> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let (start, end) = simulate(3, Dimension::Qubit, &random_state(&mut rng, 3, Dimension::Qubit), &["z-1"])?;
    let expected = expected_from_rule(&start, |i| {
        let sign = if encoding::digit(i, 1, Dimension::Qubit) == 1 { -1.0 } else { 1.0 };
        (i, Complex64::new(sign, 0.0))
    });
    assert_states_approx_eq(&end, &expected, "z-1");
    Ok(())
}

#[test]
fn test_x_and_y_flip_the_target_bit() -> QuditResult<()> {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let initial = random_state(&mut rng, 3, Dimension::Qubit);

    let (start, end) = simulate(3, Dimension::Qubit, &initial, &["x-2"])?;
    let flip = |i: BasisIndex| i ^ 0b100;
    assert_states_approx_eq(&end, &expected_from_rule(&start, |i| (flip(i), Complex64::new(1.0, 0.0))), "x-2");

    let (start, end) = simulate(3, Dimension::Qubit, &initial, &["y-2"])?;
    let expected = expected_from_rule(&start, |i| {
        let factor = if i & 0b100 != 0 { -Complex64::i() } else { Complex64::i() };
        (flip(i), factor)
    });
    assert_states_approx_eq(&end, &expected, "y-2");
    Ok(())
}

#[test]
fn test_phase_and_rz() -> QuditResult<()> {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    let initial = random_state(&mut rng, 2, Dimension::Qubit);
    let phi = 0.731;

    let (start, end) = simulate(2, Dimension::Qubit, &initial, &["phase(0.731)-0"])?;
    let expected = expected_from_rule(&start, |i| {
        let factor = if i & 1 == 1 { Complex64::from_polar(1.0, phi) } else { Complex64::new(1.0, 0.0) };
        (i, factor)
    });
    assert_states_approx_eq(&end, &expected, "phase");

    // Rz(θ) = e^(-iθ/2) · Phase(θ)
    let (_, rz) = simulate(2, Dimension::Qubit, &initial, &["rz(0.731)-0"])?;
    let rephased: StateVector = end
        .iter()
        .map(|(i, a)| (i, a * Complex64::from_polar(1.0, -phi / 2.0)))
        .collect();
    assert_states_approx_eq(&rz, &rephased, "rz vs phase");
    Ok(())
}

#[test]
fn test_rotations_on_basis_states() -> QuditResult<()> {
    let zero = StateVector::basis(0);
    let one = StateVector::basis(1);
    let r = FRAC_1_SQRT_2;

    let (_, end) = simulate(1, Dimension::Qubit, &zero, &["ry(pi/2)-0"])?;
    let expected = StateVector::from_amplitudes([(0, Complex64::new(r, 0.0)), (1, Complex64::new(r, 0.0))]);
    assert_states_approx_eq(&end, &expected, "ry(pi/2)|0>");

    let (_, end) = simulate(1, Dimension::Qubit, &one, &["ry(pi/2)-0"])?;
    let expected = StateVector::from_amplitudes([(0, Complex64::new(-r, 0.0)), (1, Complex64::new(r, 0.0))]);
    assert_states_approx_eq(&end, &expected, "ry(pi/2)|1>");

    let (_, end) = simulate(1, Dimension::Qubit, &zero, &["rx(pi/2)-0"])?;
    let expected = StateVector::from_amplitudes([(0, Complex64::new(r, 0.0)), (1, Complex64::new(0.0, -r))]);
    assert_states_approx_eq(&end, &expected, "rx(pi/2)|0>");

    // Rx(π) is X up to a global -i, and the cos(π/2) debris is pruned
    let (_, end) = simulate(1, Dimension::Qubit, &zero, &["rx(pi)-0"])?;
    assert_eq!(end.indices().collect::<Vec<_>>(), vec![1]);
    assert!((end.amplitude(1) - Complex64::new(0.0, -1.0)).norm() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_self_inverse_gates() -> QuditResult<()> {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    let initial = random_state(&mut rng, 3, Dimension::Qubit);
    for gate in ["h-1", "x-0", "y-2", "z-1", "swap-0,2", "cx-2,0", "ccx-0,1,2", "cswap-1,0,2"] {
        let (start, end) = simulate(3, Dimension::Qubit, &initial, &[gate, gate])?;
        assert_states_approx_eq(&end, &start, gate);
    }

    let initial = random_state(&mut rng, 3, Dimension::Qutrit);
    for gate in ["swap-0,1", "cswap3-2,0,1", "cswap-1,2,0"] {
        let (start, end) = simulate(3, Dimension::Qutrit, &initial, &[gate, gate])?;
        assert_states_approx_eq(&end, &start, gate);
    }
    Ok(())
}

#[test]
fn test_h3_period_four() -> QuditResult<()> {
    let mut rng = StdRng::seed_from_u64(SEED + 4);
    let initial = random_state(&mut rng, 2, Dimension::Qutrit);
    let (start, end) = simulate(2, Dimension::Qutrit, &initial, &["h3-1", "h3-1", "h3-1", "h3-1"])?;
    assert_states_approx_eq(&end, &start, "h3^4");

    // H3² sends |k> to |-k mod 3>
    let (_, end) = simulate(1, Dimension::Qutrit, &StateVector::basis(1), &["h3-0", "h3-0"])?;
    assert_states_approx_eq(&end, &StateVector::basis(2), "h3^2 |1>");
    Ok(())
}

#[test]
fn test_cswap3_ignores_control_two() -> QuditResult<()> {
    // digits (q0, q1, q2) = (2, 1, 0) -> 2 + 3 = 5
    let (_, end) = simulate(3, Dimension::Qutrit, &StateVector::basis(5), &["cswap3-0,1,2"])?;
    assert_eq!(end, StateVector::basis(5));
    // digits (1, 1, 0) -> 4, swapped to (1, 0, 1) -> 10
    let (_, end) = simulate(3, Dimension::Qutrit, &StateVector::basis(4), &["cswap3-0,1,2"])?;
    assert_eq!(end, StateVector::basis(10));
    Ok(())
}

#[test]
fn test_controlled_matches_fixed_gates() -> QuditResult<()> {
    let mut rng = StdRng::seed_from_u64(SEED + 5);
    let qubits = random_state(&mut rng, 3, Dimension::Qubit);
    let pairs = [
        ("ctrl(0)-x-1", "cx-0,1"),
        ("ctrl(2,0)-x-1", "ccx-0,2,1"),
        ("ctrl(0)-ctrl(2)-x-1", "ccx-2,0,1"),
        ("ctrl(1)-swap-0,2", "cswap-1,0,2"),
    ];
    for (general, fixed) in pairs {
        let (_, a) = simulate(3, Dimension::Qubit, &qubits, &[general])?;
        let (_, b) = simulate(3, Dimension::Qubit, &qubits, &[fixed])?;
        assert_states_approx_eq(&a, &b, general);
    }

    let qutrits = random_state(&mut rng, 3, Dimension::Qutrit);
    let (_, a) = simulate(3, Dimension::Qutrit, &qutrits, &["ctrl(0)-swap-1,2"])?;
    let (_, b) = simulate(3, Dimension::Qutrit, &qutrits, &["cswap3-0,1,2"])?;
    assert_states_approx_eq(&a, &b, "qutrit ctrl swap");
    Ok(())
}

#[test]
fn test_controlled_parametric() -> QuditResult<()> {
    let mut rng = StdRng::seed_from_u64(SEED + 6);
    let initial = random_state(&mut rng, 2, Dimension::Qubit);
    let (start, end) = simulate(2, Dimension::Qubit, &initial, &["ctrl(1)-phase(-pi/3)-0"])?;
    let expected = expected_from_rule(&start, |i| {
        let factor = if i == 0b11 { Complex64::from_polar(1.0, -PI / 3.0) } else { Complex64::new(1.0, 0.0) };
        (i, factor)
    });
    assert_states_approx_eq(&end, &expected, "controlled phase");
    Ok(())
}

#[test]
fn test_every_gate_preserves_norm() -> QuditResult<()> {
    let mut rng = StdRng::seed_from_u64(SEED + 7);
    let qubits = random_state(&mut rng, 4, Dimension::Qubit);
    let qubit_gates = [
        "z-0", "x-1", "y-2", "h-3", "phase(1.1)-0", "rx(0.3)-1", "ry(-2.2)-2", "rz(pi/5)-3", "swap-0,3",
        "cx-1,2", "cswap-0,1,2", "ccx-3,1,0", "ctrl(0,1)-ry(0.9)-3",
    ];
    for gate in qubit_gates {
        let (_, end) = simulate(4, Dimension::Qubit, &qubits, &[gate])?;
        assert!((end.norm_sqr() - 1.0).abs() < 1e-8, "norm drift after {}", gate);
    }

    let qutrits = random_state(&mut rng, 3, Dimension::Qutrit);
    for gate in ["h3-0", "cswap3-1,2,0", "swap-2,0", "ctrl(2)-h3-1"] {
        let (_, end) = simulate(3, Dimension::Qutrit, &qutrits, &[gate])?;
        assert!((end.norm_sqr() - 1.0).abs() < 1e-8, "norm drift after {}", gate);
    }
    Ok(())
}

#[test]
fn test_dimension_rules() -> QuditResult<()> {
    for gate in ["z-0", "x-0", "y-0", "h-0", "phase(1)-0", "rx(1)-0", "ry(1)-0", "rz(1)-0", "cx-0,1", "ccx-0,1,2", "ctrl(1)-h-0"] {
        let result = simulate(3, Dimension::Qutrit, &StateVector::basis(0), &[gate]);
        assert!(matches!(result, Err(QuditError::TypeMismatch { .. })), "{} on qutrits: {:?}", gate, result);
    }
    for gate in ["h3-0", "cswap3-0,1,2", "ctrl(1)-h3-0"] {
        let result = simulate(3, Dimension::Qubit, &StateVector::basis(0), &[gate]);
        assert!(matches!(result, Err(QuditError::TypeMismatch { .. })), "{} on qubits: {:?}", gate, result);
    }
    Ok(())
}
