pub mod aggregate;
pub mod config;
pub mod error;
pub mod ffi;
pub mod interval;
pub mod methods;
pub mod models;
pub mod preset;
pub mod selectors;
pub mod slope;
pub mod soil_id;
pub mod store;

uniffi::setup_scaffolding!();

pub use aggregate::{aggregate_site_intervals, merge_intervals, synthesize_from_preset, MethodDefaults};
pub use config::ComputeConfig;
pub use error::SoilError;
pub use interval::{check_no_overlap, compare_by_start, overlaps, same_depth, HasDepthInterval};
pub use methods::{
    CollectionMethod, MethodRequirements, SoilPitMethod, SoilPitMethodFlags,
    DEFAULT_ENABLED_SOIL_PIT_METHODS,
};
pub use models::{
    AggregatedInterval, DepthDependentSoilData, DepthInterval, DepthIntervalPreset,
    ProjectDepthInterval, ProjectId, ProjectSoilSettings, RockFragmentVolume, SiteId, SlopeShape,
    SlopeSteepness, SoilData, SoilDataDepthInterval, SoilTexture, SurfaceCracks,
};
pub use preset::{generate_intervals, PresetSource};
pub use soil_id::{munsell_to_lab, soil_data_to_id_input, IdInput, IdInputDepthDependentData, LabColor};
pub use store::{InMemorySoilStore, SoilDataProvider, UserSoilSnapshot};
