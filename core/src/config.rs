//! Defaults used when a site has no owning project.

use serde::{Deserialize, Serialize};

use crate::methods::{SoilPitMethod, DEFAULT_ENABLED_SOIL_PIT_METHODS};
use crate::models::DepthIntervalPreset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputeConfig {
    /// Preset applied to a project-less site that has not chosen one (default: LANDPKS)
    pub default_site_preset: DepthIntervalPreset,

    /// Methods enabled on fresh intervals of a project-less site
    /// (default: soilTexture, soilStructure, soilColor)
    pub default_enabled_methods: Vec<SoilPitMethod>,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            default_site_preset: DepthIntervalPreset::Landpks,
            default_enabled_methods: DEFAULT_ENABLED_SOIL_PIT_METHODS.to_vec(),
        }
    }
}

impl ComputeConfig {
    /// Load configuration from environment variables with fallback to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("SOIL_DEFAULT_SITE_PRESET") {
            match val.trim().parse::<DepthIntervalPreset>() {
                Ok(preset) => config.default_site_preset = preset,
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid SOIL_DEFAULT_SITE_PRESET, using default")
                }
            }
        }

        if let Some(val) = lookup("SOIL_DEFAULT_ENABLED_METHODS") {
            let parsed: Result<Vec<_>, _> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse::<SoilPitMethod>)
                .collect();
            match parsed {
                Ok(methods) => config.default_enabled_methods = methods,
                Err(err) => {
                    tracing::warn!(value = %val, error = %err, "Invalid SOIL_DEFAULT_ENABLED_METHODS, using default")
                }
            }
        }

        config
    }
}
