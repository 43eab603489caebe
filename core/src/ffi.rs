//! Entry points exported to the mobile apps.
//!
//! Arguments are taken by value since they cross the foreign boundary anyway.

use crate::aggregate::{self, MethodDefaults};
use crate::config::ComputeConfig;
use crate::error::SoilError;
use crate::interval::check_no_overlap;
use crate::methods::MethodRequirements;
use crate::models::{
    AggregatedInterval, DepthInterval, DepthIntervalPreset, ProjectDepthInterval,
    ProjectSoilSettings, SoilData, SoilDataDepthInterval,
};
use crate::preset;
use crate::slope;
use crate::soil_id::{self, IdInput};

#[uniffi::export]
pub fn default_compute_config() -> ComputeConfig {
    ComputeConfig::default()
}

#[uniffi::export]
pub fn parse_depth_interval_preset(value: String) -> Result<DepthIntervalPreset, SoilError> {
    value.parse()
}

#[uniffi::export]
pub fn generate_project_intervals(settings: ProjectSoilSettings) -> Vec<ProjectDepthInterval> {
    preset::project_intervals(&settings)
}

#[uniffi::export]
pub fn generate_site_intervals(
    soil_data: SoilData,
    config: ComputeConfig,
) -> Vec<ProjectDepthInterval> {
    preset::site_intervals(&soil_data, &config)
}

/// Merge with flags derived from `requirements`, or all disabled when absent.
#[uniffi::export]
pub fn merge_depth_intervals(
    presets: Vec<ProjectDepthInterval>,
    stored: Vec<SoilDataDepthInterval>,
    requirements: Option<MethodRequirements>,
) -> Vec<AggregatedInterval> {
    let defaults = match &requirements {
        Some(requirements) => MethodDefaults::Project(requirements),
        None => MethodDefaults::Disabled,
    };
    aggregate::merge_intervals(&presets, &stored, &defaults)
}

#[uniffi::export]
pub fn aggregate_site_intervals(
    project: Option<ProjectSoilSettings>,
    soil_data: SoilData,
    config: ComputeConfig,
) -> Vec<AggregatedInterval> {
    aggregate::aggregate_site_intervals(project.as_ref(), &soil_data, &config)
}

/// Check a user-entered interval against the intervals already present.
#[uniffi::export]
pub fn validate_depth_interval(
    interval: DepthInterval,
    existing: Vec<DepthInterval>,
) -> Result<(), SoilError> {
    interval.validate()?;
    check_no_overlap(&interval, &existing)
}

#[uniffi::export]
pub fn slope_percent(soil_data: SoilData) -> Option<f64> {
    slope::soil_data_slope_percent(&soil_data)
}

/// Soil identification input for a site's recorded data.
#[uniffi::export]
pub fn soil_data_to_id_input(soil_data: SoilData) -> IdInput {
    soil_id::soil_data_to_id_input(&soil_data)
}
