//! Generic [Float] type which acts as a stand-in for `f32` or `f64`.
use num_traits::Float as NumFloat;
use rustfft::FftNum;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Signals are processed as arrays of [Float]s. A [Float] is normally `f32` or `f64`.
pub trait Float: Display + Debug + NumFloat + FftNum + Sum {}

impl Float for f64 {}
impl Float for f32 {}

/// Convert a count or index to `T`. Saturates at `T::max_value()`.
pub fn from_usize<T: Float>(n: usize) -> T {
    T::from_usize(n).unwrap_or_else(T::max_value)
}

/// Convert a literal constant to `T`.
pub fn from_f64<T: Float>(x: f64) -> T {
    T::from_f64(x).unwrap_or_else(T::nan)
}

/// `|x|`. `num_traits::Signed` and `num_traits::Float` both provide `abs`,
/// so it has to be called through one of them explicitly.
pub fn abs<T: Float>(x: T) -> T {
    NumFloat::abs(x)
}

/// Round to the nearest integer with halves going towards positive infinity.
pub fn round_half_up<T: Float>(x: T) -> T {
    (x + from_f64(0.5)).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5f64), 3.0);
        assert_eq!(round_half_up(-2.5f64), -2.0);
        assert_eq!(round_half_up(-2.6f32), -3.0);
        assert_eq!(round_half_up(0.49f64), 0.0);
    }
}
