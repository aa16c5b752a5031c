//! A tuner session: one detector plus one tuning, turning each incoming
//! buffer into a [Reading].
//!
//! The session owns only configuration and scratch storage. The caller
//! decides when to pull a buffer and what to do with the reading.

use std::fmt;

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::detector::autocorrelation::{AutocorrelationDetector, DetectorConfig};
use crate::detector::PitchDetector;
use crate::float::Float;
use crate::note::{note_name, octave, Deviation, Tuning};

/// What the tuner heard in one buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading<T> {
    pub frequency: T,
    pub clarity: T,
    pub note: i32,
    pub cents: i32,
}

impl<T: Float> Reading<T> {
    pub fn name(&self) -> &'static str {
        note_name(self.note)
    }

    pub fn octave(&self) -> i32 {
        octave(self.note)
    }

    pub fn deviation(&self) -> Deviation {
        Deviation::from_cents(self.cents)
    }
}

impl<T: Float> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {:.1} Hz {:+} cents",
            self.name(),
            self.octave(),
            self.frequency,
            self.cents
        )
    }
}

#[derive(Debug)]
pub struct Tuner<T>
where
    T: Float,
{
    detector: AutocorrelationDetector<T>,
    tuning: Tuning<T>,
}

impl<T> Tuner<T>
where
    T: Float,
{
    /// A tuner for buffers of `size` samples, A4 = 440 Hz, equal temperament.
    pub fn new(size: usize) -> Self {
        Self::with_parts(AutocorrelationDetector::new(size), Tuning::default())
    }

    /// A tuner for buffers of `size` samples with custom detector settings and tuning.
    pub fn with_config(size: usize, config: DetectorConfig<T>, tuning: Tuning<T>) -> Self {
        Self::with_parts(AutocorrelationDetector::with_config(size, config), tuning)
    }

    /// A tuner from an already built detector and a tuning.
    pub fn with_parts(detector: AutocorrelationDetector<T>, tuning: Tuning<T>) -> Self {
        Tuner { detector, tuning }
    }

    pub fn tuning(&self) -> &Tuning<T> {
        &self.tuning
    }

    pub fn buffer_size(&self) -> usize {
        self.detector.size()
    }

    /// Estimate the pitch of `signal` and place it on the tuning. `None`
    /// when no pitch could be estimated.
    pub fn process(&mut self, signal: &[T], sample_rate: usize) -> Option<Reading<T>> {
        let pitch = self.detector.get_pitch(signal, sample_rate)?;
        match self.tuning.note_and_cents(pitch.frequency) {
            Ok((note, cents)) => {
                let reading = Reading {
                    frequency: pitch.frequency,
                    clarity: pitch.clarity,
                    note,
                    cents,
                };
                debug!("{}", reading);
                Some(reading)
            }
            Err(err) => {
                warn!("cannot place {} Hz on the tuning: {}", pitch.frequency, err);
                None
            }
        }
    }
}
