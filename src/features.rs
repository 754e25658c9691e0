//! Audio feature extraction for the reactive core.
//!
//! Per captured block the tracker computes peak amplitude, RMS loudness and
//! bass energy (FFT magnitude summed over the 20-150 Hz band), maintains
//! fixed-capacity rolling windows of recent readings, and derives a kick
//! flag by comparing the current bass energy against a high percentile of
//! the window. The published snapshot carries medians over the windows so a
//! single noisy block cannot spike the visuals.

use std::collections::VecDeque;

use rustfft::{num_complex::Complex as FftComplex, FftPlanner};
use serde::{Deserialize, Serialize};

/// Bass band lower bound in Hz.
pub const BASS_LOW_HZ: f64 = 20.0;
/// Bass band upper bound in Hz.
pub const BASS_HIGH_HZ: f64 = 150.0;
/// Rolling window capacity for bass-energy history.
pub const BASS_WINDOW: usize = 200;
/// Rolling window capacity for amplitude and RMS history.
pub const LOUDNESS_WINDOW: usize = 50;
/// Percentile of the bass window a kick must beat.
pub const KICK_PERCENTILE: f64 = 80.0;
/// Margin factor applied to the current bass energy before the comparison.
pub const KICK_MARGIN: f64 = 0.9;

/// One published audio feature snapshot; immutable once emitted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatureSample {
    pub amplitude: f64,
    pub rms: f64,
    pub kick_detected: bool,
    pub bass_density: f64,
}

/// Peak absolute sample value, clamped to 1. Empty blocks read as silence.
pub fn amplitude(block: &[f32]) -> f64 {
    block
        .iter()
        .fold(0.0_f64, |peak, &s| peak.max((s as f64).abs()))
        .min(1.0)
}

/// Root-mean-square loudness, clamped to 1.
pub fn rms(block: &[f32]) -> f64 {
    if block.is_empty() {
        return 0.0;
    }
    let energy: f64 = block.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (energy / block.len() as f64).sqrt().min(1.0)
}

/// Bass-energy analyzer over raw capture blocks.
pub struct BassAnalyzer {
    sample_rate: u32,
    planner: FftPlanner<f64>,
}

impl BassAnalyzer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            planner: FftPlanner::new(),
        }
    }

    /// Sum of FFT magnitudes over bins whose frequency lies in the bass
    /// band. Blocks shorter than two samples carry no band information.
    pub fn bass_density(&mut self, block: &[f32]) -> f64 {
        if block.len() < 2 {
            return 0.0;
        }
        let n = block.len();
        let fft = self.planner.plan_fft_forward(n);
        let mut buffer: Vec<FftComplex<f64>> = block
            .iter()
            .map(|&s| FftComplex::new(s as f64, 0.0))
            .collect();
        fft.process(&mut buffer);

        let bin_hz = self.sample_rate as f64 / n as f64;
        let mut density = 0.0;
        for (i, value) in buffer.iter().take(n / 2 + 1).enumerate() {
            let freq = i as f64 * bin_hz;
            if (BASS_LOW_HZ..=BASS_HIGH_HZ).contains(&freq) {
                density += (value.re * value.re + value.im * value.im).sqrt();
            }
        }
        density
    }
}

/// Fixed-capacity window of recent readings, oldest evicted first.
#[derive(Clone, Debug)]
pub struct RollingWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "window capacity must be positive");
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Median of the window; 0 for an empty window.
    pub fn median(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.values.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        }
    }

    /// Linearly interpolated percentile, `p` in [0, 100].
    pub fn percentile(&self, p: f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.values.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
        let lo = rank.floor() as usize;
        let frac = rank - lo as f64;
        if lo + 1 < sorted.len() {
            sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac
        } else {
            sorted[lo]
        }
    }
}

/// Rolling feature state for one capture stream.
///
/// Kick detection only activates once the bass window has filled; while the
/// history is still warming up "no kick" is the definite answer, not an
/// error.
pub struct FeatureTracker {
    analyzer: BassAnalyzer,
    bass_window: RollingWindow,
    amplitude_window: RollingWindow,
    rms_window: RollingWindow,
}

impl FeatureTracker {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            analyzer: BassAnalyzer::new(sample_rate),
            bass_window: RollingWindow::new(BASS_WINDOW),
            amplitude_window: RollingWindow::new(LOUDNESS_WINDOW),
            rms_window: RollingWindow::new(LOUDNESS_WINDOW),
        }
    }

    /// Fold one capture block into the windows and emit a snapshot.
    pub fn process_block(&mut self, block: &[f32]) -> AudioFeatureSample {
        let bass = self.analyzer.bass_density(block);
        self.bass_window.push(bass);
        self.amplitude_window.push(amplitude(block));
        self.rms_window.push(rms(block));

        let kick_detected = self.bass_window.is_full()
            && bass * KICK_MARGIN > self.bass_window.percentile(KICK_PERCENTILE);

        AudioFeatureSample {
            amplitude: self.amplitude_window.median(),
            rms: self.rms_window.median(),
            kick_detected,
            bass_density: self.bass_window.median(),
        }
    }
}
