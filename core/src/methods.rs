//! Soil measurement methods and the per-method flags attached to intervals and projects.
//!
//! A [`SoilPitMethod`] is measured within a depth interval; a [`CollectionMethod`]
//! additionally covers site-level techniques (slope, photos, notes, ...). Projects
//! mark collection methods as required, stored intervals mark soil-pit methods as
//! enabled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SoilError;

/// Measurement technique applied within a depth interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "camelCase")]
pub enum SoilPitMethod {
    SoilTexture,
    SoilColor,
    Carbonates,
    Ph,
    SoilOrganicCarbonMatter,
    ElectricalConductivity,
    SodiumAdsorptionRatio,
    SoilStructure,
}

impl SoilPitMethod {
    pub const ALL: [SoilPitMethod; 8] = [
        SoilPitMethod::SoilTexture,
        SoilPitMethod::SoilColor,
        SoilPitMethod::Carbonates,
        SoilPitMethod::Ph,
        SoilPitMethod::SoilOrganicCarbonMatter,
        SoilPitMethod::ElectricalConductivity,
        SoilPitMethod::SodiumAdsorptionRatio,
        SoilPitMethod::SoilStructure,
    ];

    pub fn as_str(&self) -> &'static str {
        CollectionMethod::from(*self).as_str()
    }
}

impl fmt::Display for SoilPitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoilPitMethod {
    type Err = SoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoilPitMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SoilError::UnknownMethod {
                value: s.to_string(),
            })
    }
}

/// Any technique a project can require, depth-scoped or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "camelCase")]
pub enum CollectionMethod {
    Slope,
    VerticalCracking,
    SoilTexture,
    SoilColor,
    Carbonates,
    Ph,
    SoilOrganicCarbonMatter,
    ElectricalConductivity,
    SodiumAdsorptionRatio,
    SoilStructure,
    LandUseLandCover,
    SoilLimitations,
    Photos,
    Notes,
}

impl CollectionMethod {
    pub const ALL: [CollectionMethod; 14] = [
        CollectionMethod::Slope,
        CollectionMethod::VerticalCracking,
        CollectionMethod::SoilTexture,
        CollectionMethod::SoilColor,
        CollectionMethod::Carbonates,
        CollectionMethod::Ph,
        CollectionMethod::SoilOrganicCarbonMatter,
        CollectionMethod::ElectricalConductivity,
        CollectionMethod::SodiumAdsorptionRatio,
        CollectionMethod::SoilStructure,
        CollectionMethod::LandUseLandCover,
        CollectionMethod::SoilLimitations,
        CollectionMethod::Photos,
        CollectionMethod::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionMethod::Slope => "slope",
            CollectionMethod::VerticalCracking => "verticalCracking",
            CollectionMethod::SoilTexture => "soilTexture",
            CollectionMethod::SoilColor => "soilColor",
            CollectionMethod::Carbonates => "carbonates",
            CollectionMethod::Ph => "ph",
            CollectionMethod::SoilOrganicCarbonMatter => "soilOrganicCarbonMatter",
            CollectionMethod::ElectricalConductivity => "electricalConductivity",
            CollectionMethod::SodiumAdsorptionRatio => "sodiumAdsorptionRatio",
            CollectionMethod::SoilStructure => "soilStructure",
            CollectionMethod::LandUseLandCover => "landUseLandCover",
            CollectionMethod::SoilLimitations => "soilLimitations",
            CollectionMethod::Photos => "photos",
            CollectionMethod::Notes => "notes",
        }
    }

    /// The soil-pit method this collection method corresponds to, if it is depth-scoped.
    pub fn soil_pit_method(&self) -> Option<SoilPitMethod> {
        SoilPitMethod::ALL
            .into_iter()
            .find(|m| CollectionMethod::from(*m) == *self)
    }
}

impl From<SoilPitMethod> for CollectionMethod {
    fn from(method: SoilPitMethod) -> Self {
        match method {
            SoilPitMethod::SoilTexture => CollectionMethod::SoilTexture,
            SoilPitMethod::SoilColor => CollectionMethod::SoilColor,
            SoilPitMethod::Carbonates => CollectionMethod::Carbonates,
            SoilPitMethod::Ph => CollectionMethod::Ph,
            SoilPitMethod::SoilOrganicCarbonMatter => CollectionMethod::SoilOrganicCarbonMatter,
            SoilPitMethod::ElectricalConductivity => CollectionMethod::ElectricalConductivity,
            SoilPitMethod::SodiumAdsorptionRatio => CollectionMethod::SodiumAdsorptionRatio,
            SoilPitMethod::SoilStructure => CollectionMethod::SoilStructure,
        }
    }
}

impl fmt::Display for CollectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionMethod {
    type Err = SoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SoilError::UnknownMethod {
                value: s.to_string(),
            })
    }
}

/// Methods enabled on a fresh interval when the site belongs to no project.
pub const DEFAULT_ENABLED_SOIL_PIT_METHODS: [SoilPitMethod; 3] = [
    SoilPitMethod::SoilTexture,
    SoilPitMethod::SoilStructure,
    SoilPitMethod::SoilColor,
];

/// Wire name of the per-interval flag for `method`, e.g. `soilTextureEnabled`.
pub fn method_enabled(method: SoilPitMethod) -> String {
    format!("{}Enabled", method.as_str())
}

/// Wire name of the per-project flag for `method`, e.g. `slopeRequired`.
pub fn method_required(method: CollectionMethod) -> String {
    format!("{}Required", method.as_str())
}

/// Payloads may carry `null` for a flag that was never set.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// One `<method>Enabled` flag per soil-pit method.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record,
)]
#[serde(rename_all = "camelCase", default)]
pub struct SoilPitMethodFlags {
    #[serde(deserialize_with = "null_as_false")]
    pub soil_texture_enabled: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub soil_color_enabled: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub carbonates_enabled: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub ph_enabled: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub soil_organic_carbon_matter_enabled: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub electrical_conductivity_enabled: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub sodium_adsorption_ratio_enabled: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub soil_structure_enabled: bool,
}

impl SoilPitMethodFlags {
    pub fn from_fn(mut enabled: impl FnMut(SoilPitMethod) -> bool) -> Self {
        let mut flags = Self::default();
        for method in SoilPitMethod::ALL {
            flags.set(method, enabled(method));
        }
        flags
    }

    /// Flags with exactly the given methods enabled.
    pub fn with_enabled(methods: &[SoilPitMethod]) -> Self {
        Self::from_fn(|m| methods.contains(&m))
    }

    pub fn get(&self, method: SoilPitMethod) -> bool {
        match method {
            SoilPitMethod::SoilTexture => self.soil_texture_enabled,
            SoilPitMethod::SoilColor => self.soil_color_enabled,
            SoilPitMethod::Carbonates => self.carbonates_enabled,
            SoilPitMethod::Ph => self.ph_enabled,
            SoilPitMethod::SoilOrganicCarbonMatter => self.soil_organic_carbon_matter_enabled,
            SoilPitMethod::ElectricalConductivity => self.electrical_conductivity_enabled,
            SoilPitMethod::SodiumAdsorptionRatio => self.sodium_adsorption_ratio_enabled,
            SoilPitMethod::SoilStructure => self.soil_structure_enabled,
        }
    }

    pub fn set(&mut self, method: SoilPitMethod, enabled: bool) {
        let slot = match method {
            SoilPitMethod::SoilTexture => &mut self.soil_texture_enabled,
            SoilPitMethod::SoilColor => &mut self.soil_color_enabled,
            SoilPitMethod::Carbonates => &mut self.carbonates_enabled,
            SoilPitMethod::Ph => &mut self.ph_enabled,
            SoilPitMethod::SoilOrganicCarbonMatter => {
                &mut self.soil_organic_carbon_matter_enabled
            }
            SoilPitMethod::ElectricalConductivity => &mut self.electrical_conductivity_enabled,
            SoilPitMethod::SodiumAdsorptionRatio => &mut self.sodium_adsorption_ratio_enabled,
            SoilPitMethod::SoilStructure => &mut self.soil_structure_enabled,
        };
        *slot = enabled;
    }

    pub fn enabled_methods(&self) -> Vec<SoilPitMethod> {
        SoilPitMethod::ALL
            .into_iter()
            .filter(|m| self.get(*m))
            .collect()
    }
}

/// Project-level `<method>Required` flags.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record,
)]
#[serde(rename_all = "camelCase", default)]
pub struct MethodRequirements {
    /// Whether a soil pit must be dug at all; not tied to a single method.
    #[serde(deserialize_with = "null_as_false")]
    pub soil_pit_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub slope_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub vertical_cracking_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub soil_texture_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub soil_color_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub carbonates_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub ph_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub soil_organic_carbon_matter_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub electrical_conductivity_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub sodium_adsorption_ratio_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub soil_structure_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub land_use_land_cover_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub soil_limitations_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub photos_required: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub notes_required: bool,
}

impl MethodRequirements {
    pub fn is_required(&self, method: CollectionMethod) -> bool {
        match method {
            CollectionMethod::Slope => self.slope_required,
            CollectionMethod::VerticalCracking => self.vertical_cracking_required,
            CollectionMethod::SoilTexture => self.soil_texture_required,
            CollectionMethod::SoilColor => self.soil_color_required,
            CollectionMethod::Carbonates => self.carbonates_required,
            CollectionMethod::Ph => self.ph_required,
            CollectionMethod::SoilOrganicCarbonMatter => self.soil_organic_carbon_matter_required,
            CollectionMethod::ElectricalConductivity => self.electrical_conductivity_required,
            CollectionMethod::SodiumAdsorptionRatio => self.sodium_adsorption_ratio_required,
            CollectionMethod::SoilStructure => self.soil_structure_required,
            CollectionMethod::LandUseLandCover => self.land_use_land_cover_required,
            CollectionMethod::SoilLimitations => self.soil_limitations_required,
            CollectionMethod::Photos => self.photos_required,
            CollectionMethod::Notes => self.notes_required,
        }
    }

    pub fn set_required(&mut self, method: CollectionMethod, required: bool) {
        let slot = match method {
            CollectionMethod::Slope => &mut self.slope_required,
            CollectionMethod::VerticalCracking => &mut self.vertical_cracking_required,
            CollectionMethod::SoilTexture => &mut self.soil_texture_required,
            CollectionMethod::SoilColor => &mut self.soil_color_required,
            CollectionMethod::Carbonates => &mut self.carbonates_required,
            CollectionMethod::Ph => &mut self.ph_required,
            CollectionMethod::SoilOrganicCarbonMatter => {
                &mut self.soil_organic_carbon_matter_required
            }
            CollectionMethod::ElectricalConductivity => {
                &mut self.electrical_conductivity_required
            }
            CollectionMethod::SodiumAdsorptionRatio => &mut self.sodium_adsorption_ratio_required,
            CollectionMethod::SoilStructure => &mut self.soil_structure_required,
            CollectionMethod::LandUseLandCover => &mut self.land_use_land_cover_required,
            CollectionMethod::SoilLimitations => &mut self.soil_limitations_required,
            CollectionMethod::Photos => &mut self.photos_required,
            CollectionMethod::Notes => &mut self.notes_required,
        };
        *slot = required;
    }

    /// Soil-pit flags implied by these requirements: enabled iff required.
    pub fn required_soil_pit_flags(&self) -> SoilPitMethodFlags {
        SoilPitMethodFlags::from_fn(|m| self.is_required(m.into()))
    }
}
