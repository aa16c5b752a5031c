//! # Pitch Tuner
//! *pitch_tuner* estimates the fundamental frequency of a sound wave stored in a
//! buffer and places it on a musical scale: the nearest note and how many cents
//! sharp or flat the sound is. It is meant to be called once per incoming audio
//! buffer by a tuner application.
//!
//!   * [Pitch estimation][detector::autocorrelation]: time-domain autocorrelation
//!     with a silence gate and parabolic peak refinement.
//!   * [Note mapping][note]: note index, cents, note names and tuning bands.
//!   * [Tuner sessions][tuner]: both of the above over reusable buffers.
//!
//! # Examples
//! ```
//! use pitch_tuner::detector::autocorrelation::AutocorrelationDetector;
//! use pitch_tuner::detector::PitchDetector;
//! use pitch_tuner::note::{cents_off_from_pitch, note_from_frequency, note_name};
//!
//! fn main() {
//!     const SAMPLE_RATE: usize = 44100;
//!     const SIZE: usize = 2048;
//!
//!     // Signal coming from some source (microphone, generated, etc...)
//!     let dt = 1.0 / SAMPLE_RATE as f64;
//!     let freq = 440.0;
//!     let signal: Vec<f64> = (0..SIZE)
//!         .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
//!         .collect();
//!
//!     let mut detector = AutocorrelationDetector::new(SIZE);
//!
//!     let pitch = detector.get_pitch(&signal, SAMPLE_RATE).unwrap();
//!     let note = note_from_frequency(pitch.frequency).unwrap();
//!     let cents = cents_off_from_pitch(pitch.frequency, note).unwrap();
//!
//!     assert_eq!(note_name(note), "A");
//!     println!("Frequency: {}, Note: {}, Cents: {}", pitch.frequency, note, cents);
//! }
//! ```

pub use detector::autocorrelation::estimate;
pub use detector::internals::Pitch;
pub use error::{Error, Result};
pub use tuner::{Reading, Tuner};

pub mod detector;
pub mod error;
pub mod float;
pub mod note;
pub mod tuner;
pub mod utils;
