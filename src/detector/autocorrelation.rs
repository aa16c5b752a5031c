//! Time-domain autocorrelation pitch detection.
//!
//! For a signal $x$ of $N$ samples the (unnormalized) autocorrelation at lag $t$ is
//! $$ r(t) = \sum_{j=0}^{N-1-t} x_j x_{j+t}. $$
//! It peaks at lag 0 and again at every multiple of the period of $x$.
//!
//! ## Implementation
//! 1. Signals whose RMS amplitude is below `power_threshold` are rejected.
//! 2. Loud samples at either edge of the buffer are trimmed: analysis starts at the
//!    first sample (in the first half) quieter than `trim_threshold` and ends at the
//!    last such sample (in the second half). This drops onset and decay transients.
//! 3. $r(t)$ is computed for every lag of the trimmed signal.
//! 4. The descent from the trivial peak at lag 0 is skipped and the largest
//!    remaining value of $r$ is taken as the period.
//! 5. The period is refined by fitting a parabola through the peak and its two
//!    neighbours, then converted to a frequency.

use log::{debug, trace, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::detector::internals::get_power_level;
use crate::detector::internals::pitch_from_autocorrelation;
use crate::detector::internals::trim_range;
use crate::detector::internals::DetectorInternals;
use crate::detector::internals::Pitch;
use crate::detector::{PitchDetector, MIN_SIGNAL_LEN};
use crate::float::{from_f64, Float};

/// RMS amplitude below which a buffer is treated as silence.
pub const POWER_THRESHOLD: f64 = 0.005;
/// Amplitude below which an edge sample counts as quiet when trimming.
pub const TRIM_THRESHOLD: f64 = 0.2;

/// How the autocorrelation is computed. Both give the same values up to rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    /// Direct O(N^2) sum.
    #[default]
    Direct,
    /// Through the power spectrum, O(N log N). Faster for large buffers.
    Fft,
}

/// Tunable parameters of an [AutocorrelationDetector].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig<T> {
    /// Buffers with a lower RMS amplitude are treated as silence.
    pub power_threshold: T,
    /// Edge samples with a lower amplitude count as quiet when trimming.
    pub trim_threshold: T,
    /// How the autocorrelation is computed.
    pub method: Method,
}

impl<T: Float> Default for DetectorConfig<T> {
    fn default() -> Self {
        DetectorConfig {
            power_threshold: from_f64(POWER_THRESHOLD),
            trim_threshold: from_f64(TRIM_THRESHOLD),
            method: Method::Direct,
        }
    }
}

#[derive(Debug)]
pub struct AutocorrelationDetector<T>
where
    T: Float,
{
    internals: DetectorInternals<T>,
    config: DetectorConfig<T>,
}

impl<T> AutocorrelationDetector<T>
where
    T: Float,
{
    /// A detector for buffers of exactly `size` samples with the default thresholds.
    pub fn new(size: usize) -> Self {
        Self::with_config(size, DetectorConfig::default())
    }

    /// A detector for buffers of exactly `size` samples using `config`.
    pub fn with_config(size: usize, config: DetectorConfig<T>) -> Self {
        let internals = DetectorInternals::new(size, config.method == Method::Fft);
        AutocorrelationDetector { internals, config }
    }

    pub fn size(&self) -> usize {
        self.internals.size
    }

    pub fn config(&self) -> &DetectorConfig<T> {
        &self.config
    }
}

impl<T> PitchDetector<T> for AutocorrelationDetector<T>
where
    T: Float,
{
    fn get_pitch(&mut self, signal: &[T], sample_rate: usize) -> Option<Pitch<T>> {
        if signal.len() != self.internals.size {
            warn!(
                "expected a buffer of {} samples, got {}",
                self.internals.size,
                signal.len()
            );
            return None;
        }
        if sample_rate == 0 || signal.len() < MIN_SIGNAL_LEN {
            return None;
        }

        let rms = get_power_level(signal);
        if !rms.is_finite() || rms < self.config.power_threshold {
            trace!("rms {} below threshold, no pitch", rms);
            return None;
        }

        let range = trim_range(signal, self.config.trim_threshold);
        if range.len() < MIN_SIGNAL_LEN {
            trace!("trimmed range {:?} too short", range);
            return None;
        }

        let autocorr = self.internals.autocorrelation(&signal[range]);
        let pitch = pitch_from_autocorrelation(autocorr, sample_rate);
        if let Some(pitch) = &pitch {
            debug!(
                "pitch {} Hz (clarity {}) from {} samples",
                pitch.frequency,
                pitch.clarity,
                autocorr.len()
            );
        }
        pitch
    }
}

/// Estimate the fundamental frequency of `signal` in Hz with the default
/// thresholds, or `None` when there is not enough signal.
///
/// This allocates its working storage on every call. Use an
/// [AutocorrelationDetector] to reuse it across buffers.
pub fn estimate<T: Float>(signal: &[T], sample_rate: usize) -> Option<T> {
    AutocorrelationDetector::new(signal.len())
        .get_pitch(signal, sample_rate)
        .map(|pitch| pitch.frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, size: usize, sample_rate: usize) -> Vec<f64> {
        let dx = 2.0 * std::f64::consts::PI * freq / sample_rate as f64;
        (0..size).map(|i| (i as f64 * dx).sin()).collect()
    }

    #[test]
    fn silence_is_indeterminate() {
        for size in [0, 1, 2, 3, 512] {
            assert_eq!(estimate(&vec![0.0f64; size], 44100), None);
        }
    }

    #[test]
    fn short_buffers_are_indeterminate() {
        assert_eq!(estimate(&[0.1f64, 0.9], 44100), None);
    }

    #[test]
    fn zero_sample_rate_is_indeterminate() {
        assert_eq!(estimate(&sine(440.0, 1024, 44100), 0), None);
    }

    #[test]
    fn wrong_size_is_indeterminate() {
        let mut detector = AutocorrelationDetector::<f64>::new(1024);
        assert!(detector.get_pitch(&sine(440.0, 512, 44100), 44100).is_none());
    }

    #[test]
    fn non_finite_samples_are_indeterminate() {
        let mut signal = sine(440.0, 1024, 44100);
        signal[10] = f64::NAN;
        assert_eq!(estimate(&signal, 44100), None);
        signal[10] = f64::INFINITY;
        assert_eq!(estimate(&signal, 44100), None);
    }

    #[test]
    fn quiet_tone_is_gated() {
        let signal: Vec<f64> = sine(440.0, 2048, 44100).iter().map(|s| s * 0.001).collect();
        assert_eq!(estimate(&signal, 44100), None);
    }

    #[test]
    fn custom_threshold_lets_quiet_tone_through() {
        let signal: Vec<f64> = sine(440.0, 2048, 44100).iter().map(|s| s * 0.001).collect();
        let config = DetectorConfig {
            power_threshold: 0.0001,
            ..DetectorConfig::default()
        };
        let mut detector = AutocorrelationDetector::with_config(signal.len(), config);
        let pitch = detector.get_pitch(&signal, 44100).unwrap();
        assert!((pitch.frequency - 440.0).abs() < 4.4);
    }

    #[test]
    fn clarity_of_pure_tone_is_high() {
        let mut detector = AutocorrelationDetector::new(2048);
        let pitch = detector.get_pitch(&sine(440.0, 2048, 44100), 44100).unwrap();
        assert!(pitch.clarity > 0.8 && pitch.clarity <= 1.0, "{}", pitch.clarity);
    }
}
