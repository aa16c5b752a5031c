//! Mapping between frequencies, note indices and cents.
//!
//! Note indices follow MIDI numbering: 69 is A4 and, with the default
//! [Tuning], sounds at 440 Hz. Cents are hundredths of a semitone.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::float::{from_f64, round_half_up, Float};

pub const A4_HZ: f64 = 440.0;
pub const MIDI_A4: i32 = 69;

pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// How note indices and cents relate to frequency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Temperament {
    /// Twelve-tone equal temperament with logarithmic cents. A note is a
    /// factor of 2^(1/12) above the previous one and every frequency is within
    /// `[-50, 50)` cents of the note it maps to.
    #[default]
    Equal,
    /// Compatibility mode for readings taken with older browser tuners. Note
    /// frequencies grow by 2^(1/24) per index, so an octave spans 24 indices,
    /// and cents are the linear ratio `100 * (f - target) / (target / 4)`.
    /// Cents are not bounded to `[-50, 50)` in this mode. Frequencies still
    /// map to the nearest equal-tempered note.
    Legacy,
}

/// Reference pitch and temperament used to map frequencies onto notes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tuning<T> {
    reference_frequency: T,
    reference_note: i32,
    temperament: Temperament,
}

impl<T: Float> Default for Tuning<T> {
    fn default() -> Self {
        Tuning {
            reference_frequency: from_f64(A4_HZ),
            reference_note: MIDI_A4,
            temperament: Temperament::Equal,
        }
    }
}

impl<T: Float> Tuning<T> {
    /// `reference_note` sounds at `reference_frequency`, which must be
    /// finite and positive.
    pub fn new(
        reference_frequency: T,
        reference_note: i32,
        temperament: Temperament,
    ) -> Result<Self> {
        check_frequency(reference_frequency)?;
        Ok(Tuning {
            reference_frequency,
            reference_note,
            temperament,
        })
    }

    /// A4 = 440 Hz with [Temperament::Legacy].
    pub fn legacy() -> Self {
        Tuning {
            temperament: Temperament::Legacy,
            ..Tuning::default()
        }
    }

    pub fn reference_frequency(&self) -> T {
        self.reference_frequency
    }

    pub fn reference_note(&self) -> i32 {
        self.reference_note
    }

    pub fn temperament(&self) -> Temperament {
        self.temperament
    }

    /// The note nearest to `frequency`.
    ///
    /// The continuous note number is rounded first. Near the midpoint between
    /// two notes that rounding can disagree with the cents computed against
    /// the rounded note, so the note is moved by one when those cents fall
    /// outside `[-50, 50)`. Both steps use semitones and logarithmic cents
    /// whatever the temperament.
    pub fn note_from_frequency(&self, frequency: T) -> Result<i32> {
        check_frequency(frequency)?;
        let semitones = from_f64::<T>(12.0) * (frequency / self.reference_frequency).log2();
        let continuous = from_f64::<T>(f64::from(self.reference_note)) + semitones;
        let rounded = round_half_up(continuous);
        let mut note = rounded
            .to_i32()
            .ok_or_else(|| Error::NoteOutOfRange(continuous.to_f64().unwrap_or(f64::NAN)))?;

        let cents = to_cents(self.semitone_cents(frequency, note))?;
        if cents < -50 {
            note -= 1;
        } else if cents >= 50 {
            note += 1;
        }
        Ok(note)
    }

    /// The exact frequency of `note`.
    pub fn frequency_from_note(&self, note: i32) -> T {
        let steps = from_f64::<T>(f64::from(note) - f64::from(self.reference_note));
        let divisor = match self.temperament {
            Temperament::Equal => 12.0,
            Temperament::Legacy => 24.0,
        };
        self.reference_frequency * from_f64::<T>(2.0).powf(steps / from_f64(divisor))
    }

    /// Signed distance of `frequency` from `note`, in cents, rounded to the
    /// nearest integer.
    pub fn cents_off_from_pitch(&self, frequency: T, note: i32) -> Result<i32> {
        check_frequency(frequency)?;
        let cents = match self.temperament {
            Temperament::Equal => self.semitone_cents(frequency, note),
            Temperament::Legacy => {
                let target = self.frequency_from_note(note);
                let quarter_tone_diff = (frequency - target) / (target / from_f64(4.0));
                quarter_tone_diff * from_f64(100.0)
            }
        };
        to_cents(cents)
    }

    /// Unrounded logarithmic cents of `frequency` above the equal-tempered
    /// `note`.
    fn semitone_cents(&self, frequency: T, note: i32) -> T {
        let steps = from_f64::<T>(f64::from(note) - f64::from(self.reference_note));
        let target = self.reference_frequency * from_f64::<T>(2.0).powf(steps / from_f64(12.0));
        from_f64::<T>(1200.0) * (frequency / target).log2()
    }

    /// The nearest note to `frequency` and the cents offset from it.
    pub fn note_and_cents(&self, frequency: T) -> Result<(i32, i32)> {
        let note = self.note_from_frequency(frequency)?;
        let cents = self.cents_off_from_pitch(frequency, note)?;
        Ok((note, cents))
    }
}

fn to_cents<T: Float>(cents: T) -> Result<i32> {
    let rounded = round_half_up(cents);
    rounded
        .to_i32()
        .ok_or_else(|| Error::NoteOutOfRange(rounded.to_f64().unwrap_or(f64::NAN)))
}

fn check_frequency<T: Float>(frequency: T) -> Result<()> {
    if frequency.is_finite() && frequency > T::zero() {
        Ok(())
    } else {
        Err(Error::InvalidFrequency(frequency.to_f64().unwrap_or(f64::NAN)))
    }
}

/// [Tuning::note_from_frequency] for A4 = 440 Hz, equal temperament.
pub fn note_from_frequency<T: Float>(frequency: T) -> Result<i32> {
    Tuning::default().note_from_frequency(frequency)
}

/// [Tuning::frequency_from_note] for A4 = 440 Hz, equal temperament.
pub fn frequency_from_note<T: Float>(note: i32) -> T {
    Tuning::default().frequency_from_note(note)
}

/// [Tuning::cents_off_from_pitch] for A4 = 440 Hz, equal temperament.
pub fn cents_off_from_pitch<T: Float>(frequency: T, note: i32) -> Result<i32> {
    Tuning::default().cents_off_from_pitch(frequency, note)
}

/// Pitch class name of `note`, e.g. `"A"` for 69.
pub fn note_name(note: i32) -> &'static str {
    NOTE_NAMES[note.rem_euclid(12) as usize]
}

/// Scientific pitch notation octave of `note`; 60 is C4.
pub fn octave(note: i32) -> i32 {
    note.div_euclid(12) - 1
}

/// Where a cents offset falls on a tuning indicator with five bands of ten
/// cents on either side of the center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Deviation {
    InTune,
    /// Below the note; band 1 is 1 to 9 cents flat, band 5 is 40 to 49.
    Flat(u8),
    /// Above the note; band 1 is 1 to 9 cents sharp, band 5 is 40 to 49.
    Sharp(u8),
    /// 50 cents or more away.
    OutOfRange,
}

impl Deviation {
    pub fn from_cents(cents: i32) -> Self {
        let band = (cents.unsigned_abs() / 10 + 1) as u8;
        match cents {
            0 => Deviation::InTune,
            -49..=-1 => Deviation::Flat(band),
            1..=49 => Deviation::Sharp(band),
            _ => Deviation::OutOfRange,
        }
    }
}
