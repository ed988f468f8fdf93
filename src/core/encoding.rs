//! Positional base-d encoding of a register into a single basis index.
//!
//! Qudit `i` occupies digit `i`: `index = Σ digit_i * d^i`. Every gate locates
//! and rewrites per-qudit values through these helpers, which is what lets a
//! gate act on a sparse map of integers instead of a tensor product.
//!
//! None of these functions validate positions against a register width; the
//! simulator checks targets before a gate runs and bounds the register so that
//! `d^n` fits a `u64`.

use super::qudit::Dimension;

/// A joint basis state of the whole register.
pub type BasisIndex = u64;

/// Weight `d^position` of a digit position.
pub fn place_value(position: usize, dimension: Dimension) -> BasisIndex {
    dimension.levels().pow(position as u32)
}

/// Digit held by the qudit at `position`: `⌊index / d^position⌋ mod d`.
pub fn digit(index: BasisIndex, position: usize, dimension: Dimension) -> u64 {
    (index / place_value(position, dimension)) % dimension.levels()
}

/// Replaces the digit at `position` with `value`, leaving every other digit untouched.
pub fn with_digit(index: BasisIndex, position: usize, dimension: Dimension, value: u64) -> BasisIndex {
    let weight = place_value(position, dimension);
    let current = (index / weight) % dimension.levels();
    index - current * weight + value * weight
}

/// Builds the index whose digit `i` is `digits[i]`.
pub fn compose(digits: &[u64], dimension: Dimension) -> BasisIndex {
    digits
        .iter()
        .rev()
        .fold(0, |acc, &d| acc * dimension.levels() + d)
}

/// Splits `index` into `num_qudits` digits, least significant (qudit 0) first.
pub fn decompose(index: BasisIndex, num_qudits: usize, dimension: Dimension) -> Vec<u64> {
    let mut rest = index;
    (0..num_qudits)
        .map(|_| {
            let d = rest % dimension.levels();
            rest /= dimension.levels();
            d
        })
        .collect()
}

/// Number of basis states `d^num_qudits`, or `None` when it does not fit a `u64`.
pub fn basis_size(num_qudits: usize, dimension: Dimension) -> Option<u64> {
    let exp = u32::try_from(num_qudits).ok()?;
    dimension.levels().checked_pow(exp)
}

/// Base-d label of `index`, zero-padded to the register width with qudit 0 rightmost.
pub fn format_digits(index: BasisIndex, num_qudits: usize, dimension: Dimension) -> String {
    let digits = decompose(index, num_qudits, dimension);
    let mut label: String = digits
        .iter()
        .rev()
        .map(|d| char::from_digit(*d as u32, 10).unwrap_or('?'))
        .collect();
    if label.is_empty() {
        label.push('0');
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_digits_match_bits() {
        let index = 0b1011;
        for position in 0..4 {
            assert_eq!(digit(index, position, Dimension::Qubit), (index >> position) & 1);
        }
    }

    #[test]
    fn test_qutrit_digits() {
        // 20 = 2*9 + 0*3 + 2
        assert_eq!(digit(20, 0, Dimension::Qutrit), 2);
        assert_eq!(digit(20, 1, Dimension::Qutrit), 0);
        assert_eq!(digit(20, 2, Dimension::Qutrit), 2);
        assert_eq!(digit(20, 3, Dimension::Qutrit), 0);
    }

    #[test]
    fn test_compose_inverts_decompose() {
        for index in 0..81 {
            let digits = decompose(index, 4, Dimension::Qutrit);
            assert_eq!(compose(&digits, Dimension::Qutrit), index);
        }
        assert_eq!(compose(&[1, 0, 1, 1], Dimension::Qubit), 13);
    }

    #[test]
    fn test_with_digit_only_touches_one_position() {
        let index = compose(&[2, 1, 0], Dimension::Qutrit);
        let rewritten = with_digit(index, 1, Dimension::Qutrit, 2);
        assert_eq!(decompose(rewritten, 3, Dimension::Qutrit), vec![2, 2, 0]);
        assert_eq!(with_digit(0b0101, 0, Dimension::Qubit, 0), 0b0100);
    }

    #[test]
    fn test_basis_size_ceiling() {
        assert_eq!(basis_size(10, Dimension::Qutrit), Some(59_049));
        assert_eq!(basis_size(63, Dimension::Qubit), Some(1 << 63));
        assert_eq!(basis_size(64, Dimension::Qubit), None);
        assert_eq!(basis_size(41, Dimension::Qutrit), None);
    }

    #[test]
    fn test_format_digits() {
        assert_eq!(format_digits(3, 4, Dimension::Qubit), "0011");
        assert_eq!(format_digits(11, 3, Dimension::Qutrit), "102");
        assert_eq!(format_digits(0, 0, Dimension::Qubit), "0");
    }
}
