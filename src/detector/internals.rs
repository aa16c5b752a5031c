use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use log::trace;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::float::{abs, from_usize, Float};
use crate::utils::buffer::{copy_complex_to_real, copy_real_to_complex, modulus_squared};
use crate::utils::buffer::{new_complex_buffer, new_real_buffer, square_sum};
use crate::utils::peak::{correct_peak, find_max, skip_initial_descent};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pitch<T>
where
    T: Float,
{
    pub frequency: T,
    pub clarity: T,
}

/// Planned transforms and scratch space for the FFT correlation method.
struct FftBuffers<T: Float> {
    forward: Arc<dyn Fft<T>>,
    inverse: Arc<dyn Fft<T>>,
    spectrum: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T: Float> FftBuffers<T> {
    fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        FftBuffers {
            forward,
            inverse,
            spectrum: new_complex_buffer(len),
            scratch: new_complex_buffer(scratch_len),
        }
    }
}

/// Data structure to hold any buffers needed for pitch computation.
/// Buffers are allocated once, when the detector is created, and are
/// overwritten on every call.
pub struct DetectorInternals<T>
where
    T: Float,
{
    pub size: usize,
    correlation: Vec<T>,
    fft: Option<FftBuffers<T>>,
}

impl<T> DetectorInternals<T>
where
    T: Float,
{
    /// Internals for buffers of `size` samples. The FFT is only planned
    /// when `with_fft` is set; it is zero padded to twice `size` so the
    /// circular correlation equals the linear one.
    pub fn new(size: usize, with_fft: bool) -> Self {
        DetectorInternals {
            size,
            correlation: new_real_buffer(size),
            fft: with_fft.then(|| FftBuffers::new(2 * size.max(1))),
        }
    }

    /// Autocorrelation of `signal` using the direct sum, or the FFT when it
    /// was planned. Returns the `signal.len()` lags computed.
    pub fn autocorrelation(&mut self, signal: &[T]) -> &[T] {
        let len = signal.len().min(self.correlation.len());
        let signal = &signal[..len];
        let result = &mut self.correlation[..len];
        match self.fft.as_mut() {
            Some(fft) => fft_autocorrelation(signal, fft, result),
            None => autocorrelation(signal, result),
        }
        result
    }
}

impl<T: Float> fmt::Debug for DetectorInternals<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorInternals")
            .field("size", &self.size)
            .field("fft", &self.fft.is_some())
            .finish()
    }
}

/// Root mean square amplitude of `signal`. Zero for an empty signal.
pub fn get_power_level<T: Float>(signal: &[T]) -> T {
    if signal.is_empty() {
        return T::zero();
    }
    (square_sum(signal) / from_usize(signal.len())).sqrt()
}

/// The sub-range of `signal` left once loud onset and decay edges are cut.
///
/// The start is the first index in the first half of `signal` whose
/// magnitude is below `threshold`, or 0. The end (exclusive) is the first
/// such index counting back from the last sample, or `len - 1`.
pub fn trim_range<T: Float>(signal: &[T], threshold: T) -> Range<usize> {
    let len = signal.len();
    if len == 0 {
        return 0..0;
    }
    let half = (len + 1) / 2;
    let quiet = |&i: &usize| abs(signal[i]) < threshold;

    let start = (0..half).find(quiet).unwrap_or(0);
    let end = (1..half).map(|i| len - i).find(quiet).unwrap_or(len - 1);

    start..end.max(start)
}

/// Compute the autocorrelation of `signal` to `result`:
///
/// > r(t) = sum_{j=0}^{N-1-t} x_j*x_{j+t}
///
/// for every lag `t` in `0..signal.len()`. This is O(N^2).
pub fn autocorrelation<T: Float>(signal: &[T], result: &mut [T]) {
    result
        .iter_mut()
        .take(signal.len())
        .enumerate()
        .for_each(|(lag, r)| {
            *r = signal[..signal.len() - lag]
                .iter()
                .zip(&signal[lag..])
                .map(|(&a, &b)| a * b)
                .sum();
        });
}

/// Same values as [autocorrelation], computed through the power spectrum.
fn fft_autocorrelation<T: Float>(signal: &[T], fft: &mut FftBuffers<T>, result: &mut [T]) {
    let FftBuffers {
        forward,
        inverse,
        spectrum,
        scratch,
    } = fft;

    copy_real_to_complex(signal, spectrum);
    forward.process_with_scratch(spectrum, scratch);
    modulus_squared(spectrum);
    inverse.process_with_scratch(spectrum, scratch);
    // rustfft doesn't normalize, and forward followed by inverse scales by the length.
    let normalization_const = T::one() / from_usize::<T>(spectrum.len());
    copy_complex_to_real(&spectrum[..signal.len()], result, normalization_const);
}

/// Turn an autocorrelation into a pitch: skip the descent from lag 0, take
/// the highest remaining lag, refine it and convert it to Hz.
pub fn pitch_from_autocorrelation<T>(input: &[T], sample_rate: usize) -> Option<Pitch<T>>
where
    T: Float,
{
    let start = skip_initial_descent(input);
    let peak = find_max(input, start)?;
    let (lag, value) = correct_peak(peak, input);
    trace!("peak at lag {} (raw {}), descent ended at {}", lag, peak.0, start);

    if !(lag > T::zero()) {
        return None;
    }
    let frequency = from_usize::<T>(sample_rate) / lag;
    if !frequency.is_finite() {
        return None;
    }
    let clarity = if input[0] > T::zero() {
        value / input[0]
    } else {
        T::zero()
    };

    Some(Pitch { frequency, clarity })
}
