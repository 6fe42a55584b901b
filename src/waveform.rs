use std::f64::consts::PI;

pub const DEFAULT_DURATION_SECS: f64 = 3.0;
pub const DEFAULT_SAMPLES: usize = 1000;
pub const AMPLITUDE_BOUND: f64 = 1.5;

/// Decorative trace standing in for the captured audio.
///
/// `samples` points evenly spaced over `[0, duration * PI]` of a fundamental
/// plus its third and fifth harmonics.
pub fn waveform(duration_secs: f64, samples: usize) -> Vec<(f64, f64)> {
    let end = duration_secs.max(0.0) * PI;
    let step = if samples > 1 {
        end / (samples - 1) as f64
    } else {
        0.0
    };

    (0..samples)
        .map(|i| {
            let x = i as f64 * step;
            (x, x.sin() + 0.3 * (3.0 * x).sin() + 0.1 * (5.0 * x).sin())
        })
        .collect()
}

pub fn default_waveform() -> Vec<(f64, f64)> {
    waveform(DEFAULT_DURATION_SECS, DEFAULT_SAMPLES)
}
