//! Inputs for soil identification built from a site's recorded soil data.
//!
//! Soil matching takes one slope value for the site and, per depth, texture, rock
//! fragment volume and color in CIELAB. Munsell colors are converted here: lightness
//! follows the ASTM D1535 value scale, hue and chroma are mapped through the CIELAB
//! hue angle of each principal Munsell hue.

use serde::{Deserialize, Serialize};

use crate::models::{DepthDependentSoilData, DepthInterval, RockFragmentVolume, SoilData, SoilTexture};
use crate::slope::soil_data_slope_percent;

/// CIELAB hue angle (degrees) at each principal Munsell hue, 5R through 5RP,
/// bracketed by 5RP on both ends of the circle.
const HUE_ANGLES: [(f64, f64); 11] = [
    (-5.0, -8.0),
    (5.0, 24.0),
    (15.0, 58.0),
    (25.0, 92.0),
    (35.0, 120.0),
    (45.0, 162.0),
    (55.0, 198.0),
    (65.0, 238.0),
    (75.0, 280.0),
    (85.0, 320.0),
    (95.0, 352.0),
];

/// CIELAB chroma per Munsell chroma step.
const CHROMA_SCALE: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct LabColor {
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct IdInputDepthDependentData {
    pub depth_interval: DepthInterval,
    #[serde(rename = "colorLAB")]
    pub color_lab: Option<LabColor>,
    pub rock_fragment_volume: Option<RockFragmentVolume>,
    pub texture: Option<SoilTexture>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct IdInput {
    pub depth_dependent_data: Vec<IdInputDepthDependentData>,
    /// Percent grade, see [`soil_data_slope_percent`].
    pub slope: Option<f64>,
}

/// Luminance factor (0-100) of a Munsell value, ASTM D1535.
fn munsell_value_to_luminance(v: f64) -> f64 {
    1.1914 * v - 0.22533 * v.powi(2) + 0.23352 * v.powi(3) - 0.020484 * v.powi(4)
        + 0.00081939 * v.powi(5)
}

fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA.powi(3) {
        t.cbrt()
    } else {
        t / (3.0 * DELTA.powi(2)) + 4.0 / 29.0
    }
}

fn hue_angle(hue: f64) -> f64 {
    let mut h = hue.rem_euclid(100.0);
    if h >= 95.0 {
        h -= 100.0;
    }
    HUE_ANGLES
        .windows(2)
        .find(|w| h <= w[1].0)
        .map(|w| {
            let (h0, a0) = w[0];
            let (h1, a1) = w[1];
            a0 + (a1 - a0) * (h - h0) / (h1 - h0)
        })
        .unwrap_or(0.0)
        .rem_euclid(360.0)
}

/// Approximate CIELAB (D65) coordinates of a Munsell color.
///
/// `hue` is on the 0-100 circle; neutral colors have chroma 0 and any hue.
pub fn munsell_to_lab(hue: f64, value: f64, chroma: f64) -> LabColor {
    let luminance = munsell_value_to_luminance(value.clamp(0.0, 10.0)) / 100.0;
    let l = 116.0 * lab_f(luminance) - 16.0;
    let c = chroma.max(0.0) * CHROMA_SCALE;
    let angle = hue_angle(hue).to_radians();
    LabColor {
        l,
        a: c * angle.cos(),
        b: c * angle.sin(),
    }
}

/// Color of a measurement, only when hue, value and chroma were all recorded.
pub fn lab_color(data: &DepthDependentSoilData) -> Option<LabColor> {
    match (data.color_hue, data.color_value, data.color_chroma) {
        (Some(hue), Some(value), Some(chroma)) => Some(munsell_to_lab(hue, value, chroma)),
        _ => None,
    }
}

pub fn depth_dependent_data_to_id_input(data: &DepthDependentSoilData) -> IdInputDepthDependentData {
    IdInputDepthDependentData {
        depth_interval: data.depth_interval,
        color_lab: lab_color(data),
        rock_fragment_volume: data.rock_fragment_volume,
        texture: data.texture,
    }
}

/// Soil identification input for a site, one entry per measured depth.
pub fn soil_data_to_id_input(data: &SoilData) -> IdInput {
    IdInput {
        depth_dependent_data: data
            .depth_dependent_data
            .iter()
            .map(depth_dependent_data_to_id_input)
            .collect(),
        slope: soil_data_slope_percent(data),
    }
}
