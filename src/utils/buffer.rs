use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::float::Float;

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

pub fn new_complex_buffer<T: Float>(size: usize) -> Vec<Complex<T>> {
    vec![Complex::zero(); size]
}

/// Copy `input` into the real part of `output` and zero everything else,
/// including the tail of `output` past `input.len()`.
pub fn copy_real_to_complex<T: Float>(input: &[T], output: &mut [Complex<T>]) {
    input.iter().zip(output.iter_mut()).for_each(|(i, o)| {
        o.re = *i;
        o.im = T::zero();
    });
    output
        .iter_mut()
        .skip(input.len())
        .for_each(|o| *o = Complex::zero())
}

/// Copy the real part of `input` into `output`, scaled by `scale`. Only the
/// overlapping prefix is written.
pub fn copy_complex_to_real<T: Float>(input: &[Complex<T>], output: &mut [T], scale: T) {
    input
        .iter()
        .map(|c| c.re)
        .zip(output.iter_mut())
        .for_each(|(i, o)| *o = i * scale);
}

/// Computes |x|^2 for each complex value x in `arr`. This function
/// modifies `arr` in place and leaves the complex component zero.
pub fn modulus_squared<T: Float>(arr: &mut [Complex<T>]) {
    for s in arr.iter_mut() {
        s.re = s.re * s.re + s.im * s.im;
        s.im = T::zero();
    }
}

/// Compute the sum of the square of each element of `arr`.
pub fn square_sum<T: Float>(arr: &[T]) -> T {
    arr.iter().map(|&s| s * s).sum::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_to_complex_zero_pads() {
        let mut out = new_complex_buffer::<f64>(4);
        out[3] = Complex::new(9.0, 9.0);
        copy_real_to_complex(&[1.0, 2.0], &mut out);
        assert_eq!(out[1], Complex::new(2.0, 0.0));
        assert_eq!(out[3], Complex::zero());
    }

    #[test]
    fn complex_to_real_scales_prefix() {
        let input = [Complex::new(2.0, 1.0), Complex::new(4.0, 3.0)];
        let mut out = new_real_buffer::<f32>(3);
        out[2] = 7.0;
        copy_complex_to_real(&input, &mut out, 0.5);
        assert_eq!(out, vec![1.0, 2.0, 7.0]);
    }

    #[test]
    fn modulus_squared_in_place() {
        let mut arr = [Complex::new(3.0f64, 4.0)];
        modulus_squared(&mut arr);
        assert_eq!(arr[0], Complex::new(25.0, 0.0));
    }
}
