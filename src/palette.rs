//! Color table construction and palette morphing.
//!
//! A `ColorTable` holds one color per iteration count. Tables are built from
//! a handful of control points: the points are ordered by perceptual
//! luminance and the table is filled by linear interpolation across the
//! segments between consecutive points. `step_morph` then blends the active
//! table toward a target table a little each frame, which is what makes the
//! palette drift visibly over time instead of snapping.
//!
//! Channels are stored as `f32` in 0..=255 so the iterative morph converges
//! exactly; quantization to 8-bit happens at composition time.

use tracing::debug;

/// One color, channels in 0..=255.
pub type Rgb = [f32; 3];

/// Perceptual luminance used to order control points.
#[inline]
pub fn luminance(color: Rgb) -> f32 {
    0.2126 * color[0] + 0.7152 * color[1] + 0.0722 * color[2]
}

/// A discrete color table indexable by iteration count.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTable {
    colors: Vec<Rgb>,
}

impl ColorTable {
    /// Build a table of `table_size` colors from at least two control
    /// points.
    ///
    /// Control points are stable-sorted by luminance (ties keep input
    /// order), then the `N-1` segments between consecutive points are each
    /// filled by linear interpolation including both endpoints. Segment
    /// lengths are `table_size / (N-1)` with one extra slot for the first
    /// `table_size % (N-1)` segments, so the segments partition the output
    /// exactly.
    pub fn from_control_points(points: &[Rgb], table_size: usize) -> Self {
        debug_assert!(points.len() >= 2, "need at least two control points");
        debug_assert!(table_size >= 1, "table size must be positive");

        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| luminance(*a).total_cmp(&luminance(*b)));

        let segments = sorted.len() - 1;
        let per_segment = table_size / segments;
        let remainder = table_size % segments;

        let mut colors = Vec::with_capacity(table_size);
        for i in 0..segments {
            let a = sorted[i];
            let b = sorted[i + 1];
            let count = per_segment + usize::from(i < remainder);
            for k in 0..count {
                let t = if count > 1 {
                    k as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                colors.push([
                    a[0] + (b[0] - a[0]) * t,
                    a[1] + (b[1] - a[1]) * t,
                    a[2] + (b[2] - a[2]) * t,
                ]);
            }
        }
        debug_assert_eq!(colors.len(), table_size);
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

/// Move every channel of `current` a fraction `1/steps_remaining` of the
/// remaining distance toward `target`.
///
/// Callers guarantee `steps_remaining >= 1`; with the counter decremented
/// after each call the final step (`steps_remaining == 1`) closes the whole
/// remaining gap, so repeated application converges to `target` exactly and
/// never overshoots.
pub fn step_morph(current: &mut ColorTable, target: &ColorTable, steps_remaining: u32) {
    debug_assert!(steps_remaining >= 1, "morph requires at least one step");
    debug_assert_eq!(current.colors.len(), target.colors.len());
    let steps = steps_remaining as f32;
    for (cur, tgt) in current.colors.iter_mut().zip(target.colors.iter()) {
        for ch in 0..3 {
            cur[ch] -= (cur[ch] - tgt[ch]) / steps;
        }
    }
}

/// Drives the endless blend from one color table to the next.
///
/// Holds a fixed cycle of prebuilt target tables; when `steps_remaining`
/// reaches zero the next target in the cycle is selected and the counter
/// resets, so `step_morph` never sees a zero step count.
#[derive(Clone, Debug)]
pub struct PaletteMorphState {
    targets: Vec<ColorTable>,
    current: ColorTable,
    target_index: usize,
    steps_remaining: u32,
    morph_steps: u32,
}

impl PaletteMorphState {
    /// The cycle starts on the first table, morphing toward the second.
    pub fn new(targets: Vec<ColorTable>, morph_steps: u32) -> Self {
        debug_assert!(!targets.is_empty(), "palette cycle must not be empty");
        debug_assert!(morph_steps >= 1, "morph step count must be positive");
        let current = targets[0].clone();
        let target_index = 1 % targets.len();
        Self {
            targets,
            current,
            target_index,
            steps_remaining: morph_steps,
            morph_steps,
        }
    }

    /// Advance the morph by one frame.
    pub fn tick(&mut self) {
        if self.steps_remaining == 0 {
            self.target_index = (self.target_index + 1) % self.targets.len();
            self.steps_remaining = self.morph_steps;
            debug!(target = self.target_index, "palette morph target advanced");
        }
        step_morph(
            &mut self.current,
            &self.targets[self.target_index],
            self.steps_remaining,
        );
        self.steps_remaining -= 1;
    }

    pub fn current_table(&self) -> &ColorTable {
        &self.current
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn steps_remaining(&self) -> u32 {
        self.steps_remaining
    }
}
