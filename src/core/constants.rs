//! Numerical constants shared by the state and the gate library.

use num_complex::Complex64;

/// Amplitudes whose magnitude is at or below this value are treated as rounding debris.
pub const CLEANUP_THRESHOLD: f64 = 1e-8;

/// Allowed deviation of Σ|a|² from 1 after a gate.
pub const NORM_TOLERANCE: f64 = 1e-8;

/// 1/√3, the magnitude of every qutrit Hadamard entry.
pub const FRAC_1_SQRT_3: f64 = 0.577_350_269_189_625_8;

/// The primitive cube root of unity ω = e^(i2π/3).
pub fn omega() -> Complex64 {
    Complex64::from_polar(1.0, 2.0 * std::f64::consts::PI / 3.0)
}
