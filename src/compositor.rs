//! Iteration-grid to pixel-buffer composition, with the kick pulse.
//!
//! Composition is a direct table lookup per cell. While a kick is active a
//! brightness-boosted copy of the table is derived for that frame only; the
//! boost follows a parabolic envelope that is zero at both ends of the pulse
//! and maximal halfway through, so the flash swells and fades instead of
//! stepping.

use ndarray::Array2;

use crate::palette::ColorTable;

/// Exponential gain applied to the kick boost.
pub const KICK_GAIN: f64 = 0.7;

/// Transient brightness pulse, triggered by audio onset or user input.
#[derive(Clone, Copy, Debug)]
pub struct KickState {
    ticks_remaining: u32,
    kick_max: u32,
}

impl KickState {
    pub fn new(kick_max: u32) -> Self {
        debug_assert!(kick_max > 0, "kick duration must be positive");
        Self {
            ticks_remaining: 0,
            kick_max,
        }
    }

    /// Restart the pulse at full duration.
    pub fn trigger(&mut self) {
        self.ticks_remaining = self.kick_max;
    }

    pub fn is_active(&self) -> bool {
        self.ticks_remaining > 0
    }

    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    pub fn kick_max(&self) -> u32 {
        self.kick_max
    }

    /// Parabolic envelope over the pulse: zero at `ticks_remaining` 0 and
    /// `kick_max`, maximal (1.0) at `kick_max / 2`.
    pub fn envelope(&self) -> f64 {
        let k = self.ticks_remaining as f64;
        let m = self.kick_max as f64;
        (4.0 * k * (m - k)) / (m * m)
    }

    /// Consume one tick of the pulse.
    pub fn decay(&mut self) {
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
    }
}

/// Compose the iteration grid and color table into a row-major RGB8 buffer.
///
/// Cells are looked up as `table[min(count, len - 1)]`, so the
/// `max_iterations` sentinel shares the last table entry. When the kick is
/// active the boosted table is used for this frame and the pulse decays by
/// one tick.
pub fn compose(
    grid: &Array2<u32>,
    table: &ColorTable,
    kick: &mut KickState,
    frame: &mut Vec<u8>,
) {
    debug_assert!(!table.is_empty(), "color table must not be empty");
    let (height, width) = grid.dim();
    frame.clear();
    frame.reserve(width * height * 3);

    let lookup: Vec<[u8; 3]> = if kick.is_active() {
        let pulse = kick.envelope();
        table
            .colors()
            .iter()
            .map(|color| boost_color(*color, pulse))
            .collect()
    } else {
        table.colors().iter().map(|color| quantize(*color)).collect()
    };

    let last = lookup.len() - 1;
    for &count in grid.iter() {
        let color = lookup[(count as usize).min(last)];
        frame.extend_from_slice(&color);
    }

    if kick.is_active() {
        kick.decay();
    }
}

/// `clamp(c * exp(gain * pulse * c / 255), 0, 255)` per channel: brighter
/// colors are boosted harder, dark cells stay dark.
fn boost_color(color: [f32; 3], pulse: f64) -> [u8; 3] {
    let mut out = [0u8; 3];
    for (ch, value) in color.iter().enumerate() {
        let c = *value as f64;
        let boosted = c * (KICK_GAIN * pulse * c / 255.0).exp();
        out[ch] = boosted.clamp(0.0, 255.0) as u8;
    }
    out
}

fn quantize(color: [f32; 3]) -> [u8; 3] {
    [
        color[0].round().clamp(0.0, 255.0) as u8,
        color[1].round().clamp(0.0, 255.0) as u8,
        color[2].round().clamp(0.0, 255.0) as u8,
    ]
}
