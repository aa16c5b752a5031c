use crate::detector::internals::Pitch;
use crate::float::Float;

pub mod autocorrelation;
pub mod internals;

/// Buffers shorter than this cannot hold a lag with two neighbours.
pub const MIN_SIGNAL_LEN: usize = 3;

pub trait PitchDetector<T>
where
    T: Float,
{
    /// Estimate the pitch of `signal`. `None` means the estimate is
    /// indeterminate, usually because the signal is too quiet.
    fn get_pitch(&mut self, signal: &[T], sample_rate: usize) -> Option<Pitch<T>>;
}
