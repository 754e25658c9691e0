//! Escape-time kernels for the Mandelbrot and Julia families.
//!
//! `escape_grid` samples the viewport uniformly into a row-major grid of
//! complex points and iterates each one independently. Rows are computed in
//! parallel; there is no cross-pixel state, so the kernel is a plain
//! parallel map.
//!
//! Count convention: a cell holds the last iteration index at which the
//! orbit had *not* yet escaped, so escaping cells lie in
//! `[0, max_iterations - 1]` and a point that never escapes within the loop
//! bound reads `max_iterations - 1`. The value `max_iterations` itself is a
//! reserved sentinel set only by the Julia fixed-point check.

use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::complex::Complex;
use crate::viewport::Viewport;

/// Squared escape radius for the Mandelbrot recurrence.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Component escape bound for the Julia recurrence. Testing the real and
/// imaginary parts separately is cheaper than the modulus and bounds the
/// same orbits.
pub const ESCAPE_COMPONENT: f64 = 2.0;

/// Family-specific parameters, dispatched once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FamilyParams {
    Mandelbrot,
    Julia { constant: Complex },
}

/// Per-frame fractal parameters owned by the animation context.
#[derive(Clone, Copy, Debug)]
pub struct FractalParams {
    pub max_iterations: u32,
    /// Rotation applied to Julia sample coordinates, wraps mod 360.
    pub rotation_degrees: f64,
    /// Degrees added to `rotation_degrees` each tick; user adjustable.
    pub rotation_speed: f64,
    pub family: FamilyParams,
}

impl FractalParams {
    /// Advance the rotation by one tick, wrapping into [0, 360).
    pub fn tick_rotation(&mut self) {
        self.rotation_degrees = (self.rotation_degrees + self.rotation_speed).rem_euclid(360.0);
    }
}

/// Compute the iteration grid for the current viewport.
///
/// The grid has shape `(height, width)` and samples both bounds
/// inclusively, matching a uniform `linspace` over each axis.
pub fn escape_grid(
    view: &Viewport,
    width: usize,
    height: usize,
    params: &FractalParams,
) -> Array2<u32> {
    debug_assert!(params.max_iterations > 0, "validated at construction");
    let dx = if width > 1 {
        view.width() / (width - 1) as f64
    } else {
        0.0
    };
    let dy = if height > 1 {
        view.height() / (height - 1) as f64
    } else {
        0.0
    };
    let rotation = Complex::from_angle(params.rotation_degrees.to_radians());
    let max_iterations = params.max_iterations;
    let family = params.family;
    let x_min = view.x_min;
    let y_min = view.y_min;

    let mut grid = Array2::<u32>::zeros((height, width));
    grid.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            let im = y_min + y as f64 * dy;
            for (x, cell) in row.iter_mut().enumerate() {
                let sample = Complex::new(x_min + x as f64 * dx, im);
                *cell = match family {
                    FamilyParams::Mandelbrot => mandelbrot_cell(sample, max_iterations),
                    FamilyParams::Julia { constant } => {
                        julia_cell(sample, constant, rotation, max_iterations)
                    }
                };
            }
        });
    grid
}

/// Iterate `z <- z^2 + c` from `z = 0`, recording the last non-escaping
/// iteration index.
#[inline]
fn mandelbrot_cell(c: Complex, max_iterations: u32) -> u32 {
    let mut zx = 0.0_f64;
    let mut zy = 0.0_f64;
    let mut count = 0;
    for i in 0..max_iterations {
        let next_zx = zx * zx - zy * zy + c.re;
        zy = 2.0 * zx * zy + c.im;
        zx = next_zx;
        if zx * zx + zy * zy > ESCAPE_RADIUS_SQ {
            break;
        }
        count = i;
    }
    count
}

/// Iterate `z <- z^2 + constant` from the rotated sample coordinate.
///
/// Escape uses independent real/imaginary bounds. If the orbit returns to
/// the unrotated sample point after the first iteration the cell is in the
/// fixed-point basin and is flagged with the `max_iterations` sentinel.
#[inline]
fn julia_cell(sample: Complex, constant: Complex, rotation: Complex, max_iterations: u32) -> u32 {
    let mut z = sample.mul(rotation);
    let mut count = 0;
    for i in 0..max_iterations {
        z = z.mul(z).add(constant);
        if z.re.abs() > ESCAPE_COMPONENT || z.im.abs() > ESCAPE_COMPONENT {
            break;
        }
        if i > 0 && z == sample {
            return max_iterations;
        }
        count = i;
    }
    count
}
