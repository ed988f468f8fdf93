// src/operations/mod.rs

//! Gate instructions understood by the simulator.
//!
//! Every supported gate is one variant of [`Operation`], carrying its typed
//! targets and, for rotations, its angle. [`GateKind`] is the closed table of
//! gate names; instruction text is resolved against it once, when a circuit
//! is loaded, so an unknown gate never reaches the simulator.

mod parse;

pub use parse::parse_angle;

use crate::core::{Dimension, QuditError, QuditId, QuditResult};
use std::fmt;

/// A single gate application.
///
/// Qubit gates act on d = 2 registers, `H3` and `CSwap3` on d = 3 registers.
/// `Swap`, `CSwap` and `Controlled` work in either dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Pauli Z: negates amplitudes whose target digit is 1.
    Z { target: QuditId },
    /// Pauli X: toggles the target bit.
    X { target: QuditId },
    /// Pauli Y: toggles the target bit, multiplying by +i from |0> and by -i from |1>.
    Y { target: QuditId },
    /// Hadamard.
    H { target: QuditId },
    /// Phase gate: multiplies |1> by e^(iφ).
    Phase {
        /// Target qubit.
        target: QuditId,
        /// Phase angle in radians.
        phi: f64,
    },
    /// Rotation about X by `theta`.
    Rx {
        /// Target qubit.
        target: QuditId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Rotation about Y by `theta`.
    Ry {
        /// Target qubit.
        target: QuditId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Rotation about Z by `theta`.
    Rz {
        /// Target qubit.
        target: QuditId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Exchanges the digits of `a` and `b`.
    Swap { a: QuditId, b: QuditId },
    /// Controlled X: toggles `target` when `control` is 1.
    Cx { control: QuditId, target: QuditId },
    /// Controlled swap of `a` and `b` when `control` is 1.
    CSwap {
        control: QuditId,
        a: QuditId,
        b: QuditId,
    },
    /// Toffoli: toggles `target` when both controls are 1.
    Ccx {
        control1: QuditId,
        control2: QuditId,
        target: QuditId,
    },
    /// Applies `gate` only on basis states where every control digit is 1.
    Controlled {
        /// Control qudits.
        controls: Vec<QuditId>,
        /// The wrapped gate.
        gate: Box<Operation>,
    },
    /// Qutrit Hadamard (the 3-point discrete Fourier transform).
    H3 { target: QuditId },
    /// Qutrit controlled swap of `a` and `b` when `control` is 1.
    CSwap3 {
        control: QuditId,
        a: QuditId,
        b: QuditId,
    },
}

impl Operation {
    /// The gate-table entry for this operation.
    pub fn kind(&self) -> GateKind {
        match self {
            Operation::Z { .. } => GateKind::Z,
            Operation::X { .. } => GateKind::X,
            Operation::Y { .. } => GateKind::Y,
            Operation::H { .. } => GateKind::H,
            Operation::Phase { .. } => GateKind::Phase,
            Operation::Rx { .. } => GateKind::Rx,
            Operation::Ry { .. } => GateKind::Ry,
            Operation::Rz { .. } => GateKind::Rz,
            Operation::Swap { .. } => GateKind::Swap,
            Operation::Cx { .. } => GateKind::Cx,
            Operation::CSwap { .. } => GateKind::CSwap,
            Operation::Ccx { .. } => GateKind::Ccx,
            Operation::Controlled { .. } => GateKind::Controlled,
            Operation::H3 { .. } => GateKind::H3,
            Operation::CSwap3 { .. } => GateKind::CSwap3,
        }
    }

    /// Qudits this operation touches, controls before targets.
    pub fn involved_qudits(&self) -> Vec<QuditId> {
        match self {
            Operation::Z { target }
            | Operation::X { target }
            | Operation::Y { target }
            | Operation::H { target }
            | Operation::Phase { target, .. }
            | Operation::Rx { target, .. }
            | Operation::Ry { target, .. }
            | Operation::Rz { target, .. }
            | Operation::H3 { target } => vec![*target],
            Operation::Swap { a, b } => vec![*a, *b],
            Operation::Cx { control, target } => vec![*control, *target],
            Operation::CSwap { control, a, b } | Operation::CSwap3 { control, a, b } => {
                vec![*control, *a, *b]
            }
            Operation::Ccx { control1, control2, target } => vec![*control1, *control2, *target],
            Operation::Controlled { controls, gate } => {
                let mut qudits = controls.clone();
                qudits.extend(gate.involved_qudits());
                qudits
            }
        }
    }

    /// Angles carried by parametric gates, in instruction order.
    pub fn params(&self) -> Vec<f64> {
        match self {
            Operation::Phase { phi, .. } => vec![*phi],
            Operation::Rx { theta, .. } | Operation::Ry { theta, .. } | Operation::Rz { theta, .. } => {
                vec![*theta]
            }
            _ => Vec::new(),
        }
    }

    /// Checks the operation against a register before it is applied.
    ///
    /// Fails with `TypeMismatch` when the gate (or a wrapped gate) needs another
    /// dimension, `QuditOutOfRange` for qudits beyond the register, and
    /// `DuplicateTarget` when two controls/targets coincide.
    pub fn validate(&self, num_qudits: usize, dimension: Dimension) -> QuditResult<()> {
        let mut seen = Vec::new();
        for qudit in self.involved_qudits() {
            if qudit.position() >= num_qudits {
                return Err(QuditError::QuditOutOfRange {
                    gate: self.to_string(),
                    qudit,
                    num_qudits,
                });
            }
            if seen.contains(&qudit) {
                return Err(QuditError::DuplicateTarget {
                    gate: self.to_string(),
                    qudit,
                });
            }
            seen.push(qudit);
        }
        self.check_dimension(dimension)
    }

    fn check_dimension(&self, dimension: Dimension) -> QuditResult<()> {
        if let Operation::Controlled { gate, .. } = self {
            return gate.check_dimension(dimension);
        }
        match self.kind().required_dimension() {
            Some(required) if required != dimension => Err(QuditError::TypeMismatch {
                gate: self.to_string(),
                required,
                actual: dimension,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Operation::Controlled { controls, gate } = self {
            write!(f, "ctrl(")?;
            write_positions(f, controls)?;
            return write!(f, ")-{}", gate);
        }
        write!(f, "{}", self.kind().name())?;
        let params = self.params();
        if !params.is_empty() {
            let rendered: Vec<String> = params.iter().map(|p| p.to_string()).collect();
            write!(f, "({})", rendered.join(","))?;
        }
        write!(f, "-")?;
        write_positions(f, &self.involved_qudits())
    }
}

fn write_positions(f: &mut fmt::Formatter<'_>, qudits: &[QuditId]) -> fmt::Result {
    for (i, q) in qudits.iter().enumerate() {
        write!(f, "{}{}", if i > 0 { "," } else { "" }, q.position())?;
    }
    Ok(())
}

/// The closed set of gate identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Z,
    X,
    Y,
    H,
    Phase,
    Rx,
    Ry,
    Rz,
    Swap,
    Cx,
    CSwap,
    Ccx,
    Controlled,
    H3,
    CSwap3,
}

impl GateKind {
    /// Every gate kind, in table order.
    pub const ALL: [GateKind; 15] = [
        GateKind::Z,
        GateKind::X,
        GateKind::Y,
        GateKind::H,
        GateKind::Phase,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Swap,
        GateKind::Cx,
        GateKind::CSwap,
        GateKind::Ccx,
        GateKind::Controlled,
        GateKind::H3,
        GateKind::CSwap3,
    ];

    /// Canonical instruction name.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Z => "z",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::H => "h",
            GateKind::Phase => "phase",
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::Rz => "rz",
            GateKind::Swap => "swap",
            GateKind::Cx => "cx",
            GateKind::CSwap => "cswap",
            GateKind::Ccx => "ccx",
            GateKind::Controlled => "ctrl",
            GateKind::H3 => "h3",
            GateKind::CSwap3 => "cswap3",
        }
    }

    /// Resolves an instruction name (case-insensitive, with a few common aliases).
    pub fn from_name(name: &str) -> QuditResult<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let alias = match lowered.as_str() {
            "p" => Some(GateKind::Phase),
            "cnot" => Some(GateKind::Cx),
            "toffoli" => Some(GateKind::Ccx),
            "fredkin" => Some(GateKind::CSwap),
            _ => None,
        };
        alias
            .or_else(|| GateKind::ALL.into_iter().find(|k| k.name() == lowered))
            .ok_or_else(|| QuditError::UnknownGate(name.trim().to_string()))
    }

    /// Number of target qudits; for `Controlled` this is the control count and is not fixed.
    pub fn arity(self) -> Option<usize> {
        match self {
            GateKind::Z
            | GateKind::X
            | GateKind::Y
            | GateKind::H
            | GateKind::Phase
            | GateKind::Rx
            | GateKind::Ry
            | GateKind::Rz
            | GateKind::H3 => Some(1),
            GateKind::Swap | GateKind::Cx => Some(2),
            GateKind::CSwap | GateKind::Ccx | GateKind::CSwap3 => Some(3),
            GateKind::Controlled => None,
        }
    }

    /// Number of angle parameters.
    pub fn num_params(self) -> usize {
        match self {
            GateKind::Phase | GateKind::Rx | GateKind::Ry | GateKind::Rz => 1,
            _ => 0,
        }
    }

    /// Dimension the gate is restricted to, if any.
    pub fn required_dimension(self) -> Option<Dimension> {
        match self {
            GateKind::Swap | GateKind::CSwap | GateKind::Controlled => None,
            GateKind::H3 | GateKind::CSwap3 => Some(Dimension::Qutrit),
            _ => Some(Dimension::Qubit),
        }
    }

    /// Assembles a fixed-arity operation. Callers have already checked the
    /// target and parameter counts against [`arity`](Self::arity) and
    /// [`num_params`](Self::num_params). `Controlled` wraps another
    /// operation and cannot be built from targets alone.
    pub(crate) fn build(self, t: &[QuditId], p: &[f64]) -> Option<Operation> {
        let op = match self {
            GateKind::Z => Operation::Z { target: t[0] },
            GateKind::X => Operation::X { target: t[0] },
            GateKind::Y => Operation::Y { target: t[0] },
            GateKind::H => Operation::H { target: t[0] },
            GateKind::Phase => Operation::Phase { target: t[0], phi: p[0] },
            GateKind::Rx => Operation::Rx { target: t[0], theta: p[0] },
            GateKind::Ry => Operation::Ry { target: t[0], theta: p[0] },
            GateKind::Rz => Operation::Rz { target: t[0], theta: p[0] },
            GateKind::Swap => Operation::Swap { a: t[0], b: t[1] },
            GateKind::Cx => Operation::Cx { control: t[0], target: t[1] },
            GateKind::CSwap => Operation::CSwap { control: t[0], a: t[1], b: t[2] },
            GateKind::Ccx => Operation::Ccx {
                control1: t[0],
                control2: t[1],
                target: t[2],
            },
            GateKind::H3 => Operation::H3 { target: t[0] },
            GateKind::CSwap3 => Operation::CSwap3 { control: t[0], a: t[1], b: t[2] },
            GateKind::Controlled => return None,
        };
        Some(op)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(position: usize) -> QuditId {
        QuditId(position)
    }

    #[test]
    fn test_involved_qudits_controls_first() {
        let op = Operation::Controlled {
            controls: vec![qid(3), qid(0)],
            gate: Box::new(Operation::Swap { a: qid(1), b: qid(2) }),
        };
        assert_eq!(op.involved_qudits(), vec![qid(3), qid(0), qid(1), qid(2)]);
    }

    #[test]
    fn test_display_canonical_text() {
        assert_eq!(Operation::Cx { control: qid(0), target: qid(1) }.to_string(), "cx-0,1");
        assert_eq!(Operation::Rx { target: qid(2), theta: 0.5 }.to_string(), "rx(0.5)-2");
        let op = Operation::Controlled {
            controls: vec![qid(0), qid(1)],
            gate: Box::new(Operation::Phase { target: qid(2), phi: -1.25 }),
        };
        assert_eq!(op.to_string(), "ctrl(0,1)-phase(-1.25)-2");
    }

    #[test]
    fn test_from_name() -> QuditResult<()> {
        assert_eq!(GateKind::from_name("H")?, GateKind::H);
        assert_eq!(GateKind::from_name("Rx")?, GateKind::Rx);
        assert_eq!(GateKind::from_name("cnot")?, GateKind::Cx);
        assert_eq!(GateKind::from_name("cswap3")?, GateKind::CSwap3);
        assert_eq!(
            GateKind::from_name("qft"),
            Err(QuditError::UnknownGate("qft".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_validate_dimension() {
        let h = Operation::H { target: qid(0) };
        assert!(h.validate(2, Dimension::Qubit).is_ok());
        assert!(matches!(
            h.validate(2, Dimension::Qutrit),
            Err(QuditError::TypeMismatch { required: Dimension::Qubit, actual: Dimension::Qutrit, .. })
        ));
        let swap = Operation::Swap { a: qid(0), b: qid(1) };
        assert!(swap.validate(2, Dimension::Qutrit).is_ok());
        let ctrl_h3 = Operation::Controlled {
            controls: vec![qid(0)],
            gate: Box::new(Operation::H3 { target: qid(1) }),
        };
        assert!(ctrl_h3.validate(2, Dimension::Qutrit).is_ok());
        assert!(matches!(
            ctrl_h3.validate(2, Dimension::Qubit),
            Err(QuditError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_targets() {
        let cx = Operation::Cx { control: qid(1), target: qid(1) };
        assert_eq!(
            cx.validate(3, Dimension::Qubit),
            Err(QuditError::DuplicateTarget { gate: "cx-1,1".to_string(), qudit: qid(1) })
        );
        let x = Operation::X { target: qid(3) };
        assert!(matches!(
            x.validate(3, Dimension::Qubit),
            Err(QuditError::QuditOutOfRange { num_qudits: 3, .. })
        ));
        let ctrl = Operation::Controlled {
            controls: vec![qid(0)],
            gate: Box::new(Operation::X { target: qid(0) }),
        };
        assert!(matches!(ctrl.validate(2, Dimension::Qubit), Err(QuditError::DuplicateTarget { .. })));
    }
}
