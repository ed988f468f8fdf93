// src/core/state.rs

use super::encoding::{self, BasisIndex};
use super::error::{QuditError, QuditResult};
use super::qudit::Dimension;
use num_complex::Complex64;
use num_traits::Zero;
use std::collections::BTreeMap;
use std::fmt;

/// Complex coefficient of a basis state.
pub type Amplitude = Complex64;

/// Sparse superposition over basis states.
///
/// Only populated basis states are stored; an absent index has amplitude zero.
/// Entries iterate in ascending basis-index order, which keeps printing and
/// snapshot comparison deterministic.
///
/// Invariants maintained by the simulator (not by this type on its own):
/// - every stored amplitude has magnitude above the cleanup threshold,
/// - Σ|a|² = 1 within the normalization tolerance,
/// - the amplitude at the smallest populated index is real and non-negative
///   right after construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateVector {
    amplitudes: BTreeMap<BasisIndex, Amplitude>,
}

impl StateVector {
    /// Creates an empty (all-zero, unnormalized) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The computational basis state `|index>` with amplitude 1.
    pub fn basis(index: BasisIndex) -> Self {
        let mut state = Self::new();
        state.amplitudes.insert(index, Complex64::new(1.0, 0.0));
        state
    }

    /// Builds a state from `(index, amplitude)` pairs. Repeated indices are summed.
    pub fn from_amplitudes<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (BasisIndex, Amplitude)>,
    {
        let mut state = Self::new();
        for (index, amplitude) in entries {
            state.accumulate(index, amplitude);
        }
        state
    }

    /// Adds `amplitude` to whatever is already stored at `index`.
    pub(crate) fn accumulate(&mut self, index: BasisIndex, amplitude: Amplitude) {
        *self.amplitudes.entry(index).or_insert_with(Complex64::zero) += amplitude;
    }

    /// Amplitude of `|index>`; zero when the basis state is not populated.
    pub fn amplitude(&self, index: BasisIndex) -> Amplitude {
        self.amplitudes.get(&index).copied().unwrap_or_else(Complex64::zero)
    }

    /// Stored amplitude of `|index>`, if populated.
    pub fn get(&self, index: BasisIndex) -> Option<&Amplitude> {
        self.amplitudes.get(&index)
    }

    /// Measurement probability |a|² of `|index>`.
    pub fn probability(&self, index: BasisIndex) -> f64 {
        self.amplitude(index).norm_sqr()
    }

    /// Populated entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (BasisIndex, Amplitude)> + '_ {
        self.amplitudes.iter().map(|(i, a)| (*i, *a))
    }

    /// Populated basis indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = BasisIndex> + '_ {
        self.amplitudes.keys().copied()
    }

    /// Number of populated basis states.
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// `true` when no basis state is populated.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Smallest populated basis index.
    pub fn lowest_index(&self) -> Option<BasisIndex> {
        self.amplitudes.keys().next().copied()
    }

    /// Total probability Σ|a|².
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.values().map(|a| a.norm_sqr()).sum()
    }

    /// Drops every entry whose magnitude is at or below `threshold`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self, threshold: f64) -> usize {
        let before = self.amplitudes.len();
        self.amplitudes.retain(|_, a| a.norm() > threshold);
        let removed = before - self.amplitudes.len();
        if removed > 0 {
            tracing::trace!(removed, remaining = self.amplitudes.len(), "pruned negligible amplitudes");
        }
        removed
    }

    /// Divides every amplitude by √(Σ|a|²).
    ///
    /// Only used on caller-supplied initial states; gates are expected to keep
    /// the norm on their own. Amplitudes are first scaled by the largest
    /// magnitude so that Σ|a|² cannot overflow or underflow.
    pub fn normalize(&mut self) -> QuditResult<()> {
        if let Some((index, amplitude)) = self.amplitudes.iter().find(|(_, a)| !a.is_finite()) {
            return Err(QuditError::InvalidInitialState(format!(
                "basis state {} has non-finite amplitude {}",
                index, amplitude
            )));
        }
        let largest = self.amplitudes.values().map(|a| a.norm()).fold(0.0, f64::max);
        if largest == 0.0 || !largest.is_finite() {
            return Err(QuditError::InvalidInitialState(format!(
                "cannot normalize a state whose largest amplitude has magnitude {}",
                largest
            )));
        }
        let scaled_norm = self
            .amplitudes
            .values()
            .map(|a| (a / largest).norm_sqr())
            .sum::<f64>()
            .sqrt();
        for amplitude in self.amplitudes.values_mut() {
            *amplitude = *amplitude / largest / scaled_norm;
        }
        Ok(())
    }

    /// Rotates the global phase so the lowest populated amplitude becomes real and positive.
    pub fn fix_global_phase(&mut self) -> QuditResult<()> {
        let (lowest, phi) = match self.amplitudes.iter().next() {
            Some((i, a)) => (*i, *a),
            None => {
                return Err(QuditError::InvalidInitialState(
                    "cannot fix the global phase of an empty state".to_string(),
                ));
            }
        };
        let magnitude = phi.norm();
        if magnitude == 0.0 {
            return Err(QuditError::InvalidInitialState(format!(
                "lowest basis state {} has zero amplitude",
                lowest
            )));
        }
        let factor = Complex64::new(magnitude, 0.0) / phi;
        for amplitude in self.amplitudes.values_mut() {
            *amplitude *= factor;
        }
        // |φ|/φ · φ only equals |φ| up to rounding.
        self.amplitudes.insert(lowest, Complex64::new(magnitude, 0.0));
        Ok(())
    }

    /// `true` when both states agree entry-wise within `tolerance`, treating absent entries as zero.
    pub fn approx_eq(&self, other: &StateVector, tolerance: f64) -> bool {
        self.amplitudes
            .keys()
            .chain(other.amplitudes.keys())
            .all(|i| (self.amplitude(*i) - other.amplitude(*i)).norm() <= tolerance)
    }

    /// Renders the state with base-d digit labels, e.g. `0.7071|00> + 0.7071|11>`.
    pub fn labelled(&self, num_qudits: usize, dimension: Dimension) -> LabelledState<'_> {
        LabelledState {
            state: self,
            labels: BasisLabels::Digits { num_qudits, dimension },
        }
    }
}

impl FromIterator<(BasisIndex, Amplitude)> for StateVector {
    fn from_iter<I: IntoIterator<Item = (BasisIndex, Amplitude)>>(iter: I) -> Self {
        StateVector::from_amplitudes(iter)
    }
}

impl<'a> IntoIterator for &'a StateVector {
    type Item = (&'a BasisIndex, &'a Amplitude);
    type IntoIter = std::collections::btree_map::Iter<'a, BasisIndex, Amplitude>;

    fn into_iter(self) -> Self::IntoIter {
        self.amplitudes.iter()
    }
}

/// How basis states are named when a state is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BasisLabels {
    Decimal,
    Digits { num_qudits: usize, dimension: Dimension },
}

/// Display adapter returned by [`StateVector::labelled`].
#[derive(Debug, Clone, Copy)]
pub struct LabelledState<'a> {
    state: &'a StateVector,
    labels: BasisLabels,
}

impl fmt::Display for LabelledState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|Psi> =")?;
        if self.state.is_empty() {
            return write!(f, " 0");
        }
        for (n, (index, amplitude)) in self.state.iter().enumerate() {
            let label = match self.labels {
                BasisLabels::Decimal => index.to_string(),
                BasisLabels::Digits { num_qudits, dimension } => {
                    encoding::format_digits(index, num_qudits, dimension)
                }
            };
            write!(f, "{}{}|{}>", if n > 0 { " + " } else { " " }, RoundedAmplitude(amplitude), label)?;
        }
        Ok(())
    }
}

/// Amplitude rounded to 4 decimals; purely real values drop the imaginary part.
struct RoundedAmplitude(Amplitude);

impl fmt::Display for RoundedAmplitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let round = |x: f64| {
            let r = (x * 1e4).round() / 1e4;
            if r == 0.0 { 0.0 } else { r }
        };
        let (re, im) = (round(self.0.re), round(self.0.im));
        if im == 0.0 {
            write!(f, "{}", re)
        } else if im < 0.0 {
            write!(f, "({}-{}i)", re, -im)
        } else {
            write!(f, "({}+{}i)", re, im)
        }
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labelled = LabelledState {
            state: self,
            labels: BasisLabels::Decimal,
        };
        write!(f, "{}", labelled)
    }
}
