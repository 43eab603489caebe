use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SoilError;
use crate::methods::{MethodRequirements, SoilPitMethodFlags};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        ProjectId(id.to_string())
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        SiteId(id.to_string())
    }
}

/// Depth range `[start, end)` in centimeters below the soil surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record)]
pub struct DepthInterval {
    pub start: i32,
    pub end: i32,
}

impl fmt::Display for DepthInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} cm", self.start, self.end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepthIntervalPreset {
    Landpks,
    Nrcs,
    Custom,
    None,
}

impl DepthIntervalPreset {
    pub const ALL: [DepthIntervalPreset; 4] = [
        DepthIntervalPreset::Landpks,
        DepthIntervalPreset::Nrcs,
        DepthIntervalPreset::Custom,
        DepthIntervalPreset::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DepthIntervalPreset::Landpks => "LANDPKS",
            DepthIntervalPreset::Nrcs => "NRCS",
            DepthIntervalPreset::Custom => "CUSTOM",
            DepthIntervalPreset::None => "NONE",
        }
    }
}

impl fmt::Display for DepthIntervalPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepthIntervalPreset {
    type Err = SoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DepthIntervalPreset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SoilError::UnknownPreset {
                value: s.to_string(),
            })
    }
}

/// Depth interval implied by a preset, before reconciliation with collected data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDepthInterval {
    #[serde(default)]
    pub label: Option<String>,
    pub depth_interval: DepthInterval,
}

impl ProjectDepthInterval {
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            label: None,
            depth_interval: DepthInterval { start, end },
        }
    }

    pub fn labelled(start: i32, end: i32, label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            depth_interval: DepthInterval { start, end },
        }
    }
}

/// Stored, site-specific depth interval record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct SoilDataDepthInterval {
    #[serde(default)]
    pub label: Option<String>,
    pub depth_interval: DepthInterval,
    #[serde(flatten)]
    pub enabled: SoilPitMethodFlags,
}

impl SoilDataDepthInterval {
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            label: None,
            depth_interval: DepthInterval { start, end },
            enabled: SoilPitMethodFlags::default(),
        }
    }

    pub fn with_flags(start: i32, end: i32, enabled: SoilPitMethodFlags) -> Self {
        Self {
            enabled,
            ..Self::new(start, end)
        }
    }
}

/// Per-project soil collection settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSoilSettings {
    pub depth_interval_preset: DepthIntervalPreset,
    /// Only meaningful when the preset is `Custom`.
    #[serde(default)]
    pub depth_intervals: Vec<ProjectDepthInterval>,
    #[serde(flatten)]
    pub requirements: MethodRequirements,
}

impl Default for ProjectSoilSettings {
    fn default() -> Self {
        Self {
            depth_interval_preset: DepthIntervalPreset::Landpks,
            depth_intervals: Vec::new(),
            requirements: MethodRequirements::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoilTexture {
    Clay,
    ClayLoam,
    Loam,
    LoamySand,
    Sand,
    SandyClay,
    SandyClayLoam,
    SandyLoam,
    Silt,
    SiltyClay,
    SiltyClayLoam,
    SiltLoam,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlopeSteepness {
    Flat,
    Gentle,
    Moderate,
    Rolling,
    Hilly,
    Steep,
    ModeratelySteep,
    VerySteep,
    Steepest,
}

/// Share of a horizon occupied by rock fragments, in volume percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum RockFragmentVolume {
    #[serde(rename = "VOLUME_0_1")]
    Volume0To1,
    #[serde(rename = "VOLUME_1_15")]
    Volume1To15,
    #[serde(rename = "VOLUME_15_35")]
    Volume15To35,
    #[serde(rename = "VOLUME_35_60")]
    Volume35To60,
    #[serde(rename = "VOLUME_60")]
    Volume60Plus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceCracks {
    NoCracking,
    SurfaceCrackingOnly,
    DeepVerticalCracks,
}

/// Curvature of the slope, along or across the fall line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlopeShape {
    Concave,
    Convex,
    Linear,
}

/// Measurements recorded for one depth interval of a site.
///
/// Free-text choice fields are kept as strings so they survive a load and save
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase", default)]
pub struct DepthDependentSoilData {
    pub depth_interval: DepthInterval,
    pub texture: Option<SoilTexture>,
    pub rock_fragment_volume: Option<RockFragmentVolume>,
    pub clay_percent: Option<i32>,
    /// Munsell hue on the 0-100 circle (2.5R = 2.5, 10YR = 20).
    pub color_hue: Option<f64>,
    pub color_value: Option<f64>,
    pub color_chroma: Option<f64>,
    pub color_photo_used: Option<bool>,
    pub color_photo_soil_condition: Option<String>,
    pub color_photo_lighting_condition: Option<String>,
    pub conductivity: Option<f64>,
    pub conductivity_test: Option<String>,
    pub conductivity_unit: Option<String>,
    pub structure: Option<String>,
    pub ph: Option<f64>,
    pub ph_testing_solution: Option<String>,
    pub ph_testing_method: Option<String>,
    pub soil_organic_carbon: Option<f64>,
    pub soil_organic_matter: Option<f64>,
    pub soil_organic_carbon_testing: Option<String>,
    pub soil_organic_matter_testing: Option<String>,
    pub sodium_absorption_ratio: Option<f64>,
    pub carbonates: Option<String>,
}

/// Soil data recorded for one site.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase", default)]
pub struct SoilData {
    pub down_slope: Option<SlopeShape>,
    pub cross_slope: Option<SlopeShape>,
    /// Depth to bedrock (cm).
    pub bedrock: Option<i32>,
    /// Fallback preset, only consulted when the site has no project.
    pub depth_interval_preset: Option<DepthIntervalPreset>,
    pub slope_landscape_position: Option<String>,
    pub slope_aspect: Option<i32>,
    pub slope_steepness_select: Option<SlopeSteepness>,
    pub slope_steepness_percent: Option<i32>,
    pub slope_steepness_degree: Option<i32>,
    pub surface_cracks_select: Option<SurfaceCracks>,
    pub surface_salt_select: Option<String>,
    pub flooding_select: Option<String>,
    pub lime_requirements_select: Option<String>,
    pub surface_stoniness_select: Option<String>,
    pub water_table_depth_select: Option<String>,
    pub soil_depth_select: Option<String>,
    pub land_cover_select: Option<String>,
    pub grazing_select: Option<String>,
    /// Unordered; may contain overlaps and duplicates.
    pub depth_intervals: Vec<SoilDataDepthInterval>,
    pub depth_dependent_data: Vec<DepthDependentSoilData>,
}

/// Reconciled interval as presented to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct AggregatedInterval {
    /// `false` when the bounds are fixed by a preset.
    pub mutable: bool,
    pub interval: SoilDataDepthInterval,
}
