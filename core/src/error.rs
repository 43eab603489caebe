use thiserror::Error;

/// Error type for depth interval parsing, validation and soil data edits.
#[derive(Error, Debug, Clone, PartialEq, Eq, uniffi::Error)]
pub enum SoilError {
    #[error("unknown depth interval preset: {value}")]
    UnknownPreset { value: String },

    #[error("unknown collection method: {value}")]
    UnknownMethod { value: String },

    #[error("invalid depth interval {start}-{end}: {reason}")]
    InvalidInterval { start: i32, end: i32, reason: String },

    #[error("depth interval {start}-{end} overlaps existing interval {existing_start}-{existing_end}")]
    OverlappingInterval {
        start: i32,
        end: i32,
        existing_start: i32,
        existing_end: i32,
    },

    #[error("no depth interval {start}-{end}")]
    IntervalNotFound { start: i32, end: i32 },

    #[error("depth interval {start}-{end} is fixed by the depth interval preset")]
    ImmutableInterval { start: i32, end: i32 },

    #[error("project depth interval preset is {preset}, not CUSTOM")]
    PresetNotCustom { preset: String },

    #[error("invalid soil data snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}
