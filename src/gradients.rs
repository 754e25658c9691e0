//! Builtin named gradients.
//!
//! Each gradient is a short list of anchor colors sampled from a well known
//! colormap. `control_points` appends black and white endpoints around the
//! anchors, yielding the control-point list `ColorTable::from_control_points`
//! expects.

use crate::palette::Rgb;

const VIRIDIS: &[[u8; 3]] = &[
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

const PLASMA: &[[u8; 3]] = &[
    [13, 8, 135],
    [126, 3, 168],
    [204, 71, 120],
    [248, 149, 64],
    [240, 249, 33],
];

const INFERNO: &[[u8; 3]] = &[
    [0, 0, 4],
    [87, 16, 110],
    [188, 55, 84],
    [249, 142, 9],
    [252, 255, 164],
];

const MAGMA: &[[u8; 3]] = &[
    [0, 0, 4],
    [81, 18, 124],
    [183, 55, 121],
    [254, 159, 109],
    [252, 253, 191],
];

const CIVIDIS: &[[u8; 3]] = &[
    [0, 32, 76],
    [58, 72, 108],
    [124, 123, 120],
    [187, 173, 108],
    [255, 234, 70],
];

const TWILIGHT: &[[u8; 3]] = &[
    [226, 217, 226],
    [108, 148, 191],
    [67, 49, 126],
    [140, 47, 86],
    [189, 141, 100],
];

const OCEAN: &[[u8; 3]] = &[
    [0, 0, 0],
    [0, 0, 255],
    [0, 255, 255],
];

const SUNSET: &[[u8; 3]] = &[
    [255, 140, 0],
    [255, 0, 0],
    [255, 0, 200],
    [55, 0, 255],
];

const NAMES: &[(&str, &[[u8; 3]])] = &[
    ("viridis", VIRIDIS),
    ("plasma", PLASMA),
    ("inferno", INFERNO),
    ("magma", MAGMA),
    ("cividis", CIVIDIS),
    ("twilight", TWILIGHT),
    ("ocean", OCEAN),
    ("sunset", SUNSET),
];

/// Every builtin gradient name, in default cycle order.
pub fn builtin_names() -> Vec<&'static str> {
    NAMES.iter().map(|(name, _)| *name).collect()
}

/// Control points for a named gradient, with black and white endpoints
/// appended. Returns `None` for an unknown name.
pub fn control_points(name: &str) -> Option<Vec<Rgb>> {
    let anchors = NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, anchors)| *anchors)?;
    let mut points = Vec::with_capacity(anchors.len() + 2);
    points.push([0.0, 0.0, 0.0]);
    for anchor in anchors {
        points.push([anchor[0] as f32, anchor[1] as f32, anchor[2] as f32]);
    }
    points.push([255.0, 255.0, 255.0]);
    Some(points)
}
