//! Expansion of a depth interval preset into concrete intervals.

use crate::config::ComputeConfig;
use crate::models::{
    DepthInterval, DepthIntervalPreset, ProjectDepthInterval, ProjectSoilSettings, SoilData,
};

/// LandPKS standard depths (cm).
pub const LANDPKS_INTERVALS: [DepthInterval; 6] = [
    DepthInterval { start: 0, end: 10 },
    DepthInterval { start: 10, end: 20 },
    DepthInterval { start: 20, end: 50 },
    DepthInterval { start: 50, end: 70 },
    DepthInterval { start: 70, end: 100 },
    DepthInterval { start: 100, end: 200 },
];

/// NRCS standard depths (cm).
pub const NRCS_INTERVALS: [DepthInterval; 6] = [
    DepthInterval { start: 0, end: 5 },
    DepthInterval { start: 5, end: 15 },
    DepthInterval { start: 15, end: 30 },
    DepthInterval { start: 30, end: 60 },
    DepthInterval { start: 60, end: 100 },
    DepthInterval { start: 100, end: 200 },
];

/// Where the preset comes from.
#[derive(Debug, Clone, Copy)]
pub enum PresetSource<'a> {
    /// The site's owning project.
    Project(&'a ProjectSoilSettings),
    /// A site without a project, using its own fallback preset.
    Site(&'a SoilData),
}

/// The fixed table for a named standard, `None` for `Custom` and `None`.
pub fn standard_intervals(preset: DepthIntervalPreset) -> Option<&'static [DepthInterval]> {
    match preset {
        DepthIntervalPreset::Landpks => Some(&LANDPKS_INTERVALS),
        DepthIntervalPreset::Nrcs => Some(&NRCS_INTERVALS),
        DepthIntervalPreset::Custom | DepthIntervalPreset::None => None,
    }
}

fn from_standard(intervals: &[DepthInterval]) -> Vec<ProjectDepthInterval> {
    intervals
        .iter()
        .map(|&depth_interval| ProjectDepthInterval {
            label: None,
            depth_interval,
        })
        .collect()
}

/// Intervals implied by a project's settings.
pub fn project_intervals(settings: &ProjectSoilSettings) -> Vec<ProjectDepthInterval> {
    match settings.depth_interval_preset {
        DepthIntervalPreset::Custom => settings.depth_intervals.clone(),
        preset => standard_intervals(preset)
            .map(from_standard)
            .unwrap_or_default(),
    }
}

/// Intervals implied by a project-less site's own preset.
///
/// A site has nowhere to keep a custom list, so `Custom` implies nothing.
pub fn site_intervals(soil_data: &SoilData, config: &ComputeConfig) -> Vec<ProjectDepthInterval> {
    let preset = soil_data
        .depth_interval_preset
        .unwrap_or(config.default_site_preset);
    standard_intervals(preset)
        .map(from_standard)
        .unwrap_or_default()
}

/// Expand a preset source into its ordered list of intervals.
pub fn generate_intervals(
    source: PresetSource<'_>,
    config: &ComputeConfig,
) -> Vec<ProjectDepthInterval> {
    match source {
        PresetSource::Project(settings) => project_intervals(settings),
        PresetSource::Site(soil_data) => site_intervals(soil_data, config),
    }
}
