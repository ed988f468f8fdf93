// src/core/qudit.rs

use super::error::{QuditError, QuditResult};
use std::fmt;

/// Position of a qudit inside the register.
///
/// Qudit `i` owns digit `i` of every basis index, so `QuditId(0)` is the least
/// significant digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuditId(pub usize);

impl QuditId {
    /// Digit position of this qudit.
    pub fn position(self) -> usize {
        self.0
    }
}

impl fmt::Display for QuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QuditId {
    fn from(position: usize) -> Self {
        Self(position)
    }
}

/// Number of levels every qudit of a register has.
///
/// A simulator is homogeneous: all of its qudits share one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    /// Two levels, d = 2.
    #[default]
    Qubit,
    /// Three levels, d = 3.
    Qutrit,
}

impl Dimension {
    /// The base `d` of the positional basis encoding.
    pub const fn levels(self) -> u64 {
        match self {
            Dimension::Qubit => 2,
            Dimension::Qutrit => 3,
        }
    }

    /// Looks up the dimension with `levels` levels.
    pub fn from_levels(levels: u64) -> QuditResult<Self> {
        match levels {
            2 => Ok(Dimension::Qubit),
            3 => Ok(Dimension::Qutrit),
            other => Err(QuditError::UnsupportedDimension(other)),
        }
    }
}

impl TryFrom<u64> for Dimension {
    type Error = QuditError;

    fn try_from(levels: u64) -> Result<Self, Self::Error> {
        Dimension::from_levels(levels)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Qubit => write!(f, "qubit"),
            Dimension::Qutrit => write!(f, "qutrit"),
        }
    }
}
