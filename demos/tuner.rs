//! Tuner Example
//!
//! Feeds buffers to a tuner session and logs each reading. With a `.wav`
//! path as the first argument the file is read in consecutive buffers;
//! otherwise a test oscillator plays the open strings of a guitar.
//!
//! Run with `RUST_LOG=info cargo run --example tuner [file.wav]`.

use log::{error, info};
use pitch_tuner::note::frequency_from_note;
use pitch_tuner::Tuner;

const BUFFER_SIZE: usize = 2048;

fn main() {
    env_logger::init();

    let (sample_rate, signal) = match std::env::args().nth(1) {
        Some(path) => match read_wav(&path) {
            Ok(wav) => wav,
            Err(e) => {
                error!("Failed to read {}: {}", path, e);
                return;
            }
        },
        None => (44100, oscillator(44100)),
    };

    info!(
        "Tuning {} samples at {} Hz in buffers of {}",
        signal.len(),
        sample_rate,
        BUFFER_SIZE
    );

    let mut tuner = Tuner::new(BUFFER_SIZE);
    for (i, buffer) in signal.chunks_exact(BUFFER_SIZE).enumerate() {
        match tuner.process(buffer, sample_rate) {
            Some(reading) => info!(
                "buffer {:4}: {} (clarity {:.2}, {:?})",
                i,
                reading,
                reading.clarity,
                reading.deviation()
            ),
            None => info!("buffer {:4}: --", i),
        }
    }
}

/// Half a second of each open guitar string, slightly detuned, with a short
/// silence between strings.
fn oscillator(sample_rate: usize) -> Vec<f32> {
    let mut signal = Vec::new();
    let strings = [(40, -12.0), (45, 3.0), (50, 0.0), (55, 21.0), (59, -33.0), (64, 8.0)];
    for (note, detune_cents) in strings {
        let freq = frequency_from_note::<f64>(note) * 2f64.powf(detune_cents / 1200.0);
        let dx = 2.0 * std::f64::consts::PI * freq / sample_rate as f64;
        signal.extend((0..sample_rate / 2).map(|i| (0.6 * (i as f64 * dx).sin()) as f32));
        signal.extend(std::iter::repeat(0.0).take(BUFFER_SIZE));
    }
    signal
}

fn read_wav(path: &str) -> Result<(usize, Vec<f32>), hound::Error> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };
    // Keep the first channel only.
    let mono = samples.into_iter().step_by(channels.max(1)).collect();
    Ok((spec.sample_rate as usize, mono))
}
