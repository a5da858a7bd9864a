use crate::config::FeatureConfig;

use super::{EnergyPoint, PitchPoint};

/// Fixed-length analysis frames with a 50% overlapping hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub sample_rate: u32,
    pub frame_len: usize,
    pub hop: usize,
}

impl FrameLayout {
    pub fn new(sample_rate: u32, frame_ms: f64) -> Self {
        let frame_len = ((sample_rate as f64 * frame_ms / 1000.0).round() as usize).max(2);
        Self {
            sample_rate,
            frame_len,
            hop: (frame_len / 2).max(1),
        }
    }

    /// Start offsets of every complete frame in a buffer of `len` samples.
    pub fn frame_starts(&self, len: usize) -> impl Iterator<Item = usize> {
        let last = len.checked_sub(self.frame_len);
        let hop = self.hop;
        (0..).map(move |idx| idx * hop).take_while(move |start| match last {
            Some(last) => *start <= last,
            None => false,
        })
    }

    fn time_of(&self, start: usize) -> f64 {
        start as f64 / self.sample_rate as f64
    }
}

/// Candidate peaks within this fraction of the strongest one count as equally good,
/// so the shortest period among them wins over its multiples.
const OCTAVE_TOLERANCE: f64 = 0.9;

/// Autocorrelation pitch estimate per frame.
///
/// This is a threshold-based approximation. Each frame sums `frame_len` lagged
/// products, reading up to `sample_rate / min_pitch_hz` samples past the frame end so
/// every lag in the pitch range is compared over the same number of terms as the frame
/// energy. A frame is voiced when its energy clears `energy_floor` and the chosen
/// autocorrelation peak exceeds `voicing_ratio` times that energy. Frames too close to
/// the end of the buffer search only the lags that still fit.
pub fn pitch_contour(
    samples: &[f32],
    layout: &FrameLayout,
    config: &FeatureConfig,
) -> Vec<PitchPoint> {
    let sample_rate = layout.sample_rate as f64;
    let min_lag = (sample_rate / config.max_pitch_hz).ceil().max(1.0) as usize;
    let max_lag = (sample_rate / config.min_pitch_hz).floor() as usize;

    layout
        .frame_starts(samples.len())
        .map(|start| {
            let window_end = (start + layout.frame_len + max_lag).min(samples.len());
            let window = &samples[start..window_end];
            let reachable_lag = max_lag.min(window.len() - layout.frame_len);
            let energy = lagged_sum(window, layout.frame_len, 0);
            let peak = best_lag(window, layout.frame_len, min_lag, reachable_lag);
            let voiced = match peak {
                Some((_, correlation)) => {
                    energy > config.energy_floor && correlation > config.voicing_ratio * energy
                }
                None => false,
            };
            let frequency = match (voiced, peak) {
                (true, Some((lag, _))) => sample_rate / lag as f64,
                _ => 0.0,
            };
            PitchPoint {
                time: layout.time_of(start),
                frequency,
                voiced,
            }
        })
        .collect()
}

/// Root-mean-square amplitude per frame.
pub fn energy_contour(samples: &[f32], layout: &FrameLayout) -> Vec<EnergyPoint> {
    layout
        .frame_starts(samples.len())
        .map(|start| {
            let frame = &samples[start..start + layout.frame_len];
            let mean_square = lagged_sum(frame, frame.len(), 0) / frame.len() as f64;
            EnergyPoint {
                time: layout.time_of(start),
                energy: mean_square.sqrt(),
            }
        })
        .collect()
}

/// Sum of `terms` products `x[n] * x[n + lag]`; `window` must hold `terms + lag` samples.
fn lagged_sum(window: &[f32], terms: usize, lag: usize) -> f64 {
    window[..terms]
        .iter()
        .zip(&window[lag..lag + terms])
        .map(|(a, b)| *a as f64 * *b as f64)
        .sum()
}

/// Shortest lag holding an interior local maximum of the autocorrelation that reaches
/// `OCTAVE_TOLERANCE` of the strongest one. `None` when the range has no interior peak.
fn best_lag(window: &[f32], terms: usize, min_lag: usize, max_lag: usize) -> Option<(usize, f64)> {
    if min_lag + 2 > max_lag {
        return None;
    }
    let correlations: Vec<f64> = (min_lag..=max_lag)
        .map(|lag| lagged_sum(window, terms, lag))
        .collect();
    let peaks: Vec<usize> = (1..correlations.len() - 1)
        .filter(|&idx| {
            correlations[idx] >= correlations[idx - 1] && correlations[idx] >= correlations[idx + 1]
        })
        .collect();
    let strongest = peaks
        .iter()
        .map(|&idx| correlations[idx])
        .fold(f64::NEG_INFINITY, f64::max);
    peaks
        .into_iter()
        .find(|&idx| correlations[idx] >= OCTAVE_TOLERANCE * strongest)
        .map(|idx| (min_lag + idx, correlations[idx]))
}
