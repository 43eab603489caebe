//! Reconciliation of preset depth intervals with a site's stored intervals.
//!
//! Presets and stored records are swept together in ascending start order:
//!
//! - a stored interval lying entirely before the current preset passes through as
//!   a mutable, user-owned interval;
//! - a stored interval with exactly the preset's bounds is the materialization of
//!   that preset and is emitted immutable, keeping its own method flags;
//! - a stored interval that partially overlaps a preset is dropped;
//! - a preset without an exact stored match is synthesized from [`MethodDefaults`].
//!
//! Inputs are never reordered in place; the sweep works on sorted copies.
//!
//! # Example
//!
//! ```
//! use soil_compute::{merge_intervals, MethodDefaults, ProjectDepthInterval, SoilDataDepthInterval};
//!
//! let presets = vec![ProjectDepthInterval::new(2, 3), ProjectDepthInterval::new(5, 6)];
//! let stored = vec![
//!     SoilDataDepthInterval::new(7, 10),
//!     SoilDataDepthInterval::new(4, 6),
//!     SoilDataDepthInterval::new(1, 2),
//! ];
//! let merged = merge_intervals(&presets, &stored, &MethodDefaults::Disabled);
//! let shown: Vec<_> = merged
//!     .iter()
//!     .map(|a| (a.interval.depth_interval.start, a.mutable))
//!     .collect();
//! assert_eq!(shown, vec![(1, true), (2, false), (5, false), (7, true)]);
//! ```

use crate::config::ComputeConfig;
use crate::interval::{compare_by_start, overlaps, same_depth};
use crate::methods::{MethodRequirements, SoilPitMethod, SoilPitMethodFlags};
use crate::models::{
    AggregatedInterval, ProjectDepthInterval, ProjectSoilSettings, SoilData,
    SoilDataDepthInterval,
};
use crate::preset::{generate_intervals, PresetSource};

/// How method flags are filled in for an interval with no stored record.
#[derive(Debug, Clone, Copy)]
pub enum MethodDefaults<'a> {
    /// Enabled iff the project requires the method.
    Project(&'a MethodRequirements),
    /// Site without a project: a fixed set of methods is enabled.
    NoProject(&'a [SoilPitMethod]),
    /// Nothing enabled.
    Disabled,
}

impl MethodDefaults<'_> {
    pub fn flags(&self) -> SoilPitMethodFlags {
        match self {
            MethodDefaults::Project(requirements) => requirements.required_soil_pit_flags(),
            MethodDefaults::NoProject(methods) => SoilPitMethodFlags::with_enabled(methods),
            MethodDefaults::Disabled => SoilPitMethodFlags::default(),
        }
    }
}

/// Materialize a preset interval that has no stored record yet.
pub fn synthesize_from_preset(
    preset: &ProjectDepthInterval,
    defaults: &MethodDefaults<'_>,
) -> SoilDataDepthInterval {
    SoilDataDepthInterval {
        label: preset.label.clone(),
        depth_interval: preset.depth_interval,
        enabled: defaults.flags(),
    }
}

/// Merge preset intervals with stored intervals into one list ordered by start.
pub fn merge_intervals(
    presets: &[ProjectDepthInterval],
    stored: &[SoilDataDepthInterval],
    defaults: &MethodDefaults<'_>,
) -> Vec<AggregatedInterval> {
    let mut presets: Vec<&ProjectDepthInterval> = presets.iter().collect();
    presets.sort_by(|a, b| compare_by_start(a, b));
    let mut stored: Vec<&SoilDataDepthInterval> = stored.iter().collect();
    stored.sort_by(|a, b| compare_by_start(a, b));

    let mut merged = Vec::with_capacity(presets.len() + stored.len());
    let mut dropped = 0usize;
    let mut j = 0;

    for preset in presets {
        let mut covered = false;

        while let Some(&candidate) = stored.get(j) {
            if candidate.depth_interval.end <= preset.depth_interval.start {
                merged.push(AggregatedInterval {
                    mutable: true,
                    interval: candidate.clone(),
                });
            } else if same_depth(candidate, preset) {
                if covered {
                    tracing::debug!(
                        start = candidate.depth_interval.start,
                        end = candidate.depth_interval.end,
                        "dropping duplicate stored interval"
                    );
                    dropped += 1;
                } else {
                    merged.push(AggregatedInterval {
                        mutable: false,
                        interval: candidate.clone(),
                    });
                    covered = true;
                }
            } else if overlaps(candidate, preset) {
                tracing::debug!(
                    start = candidate.depth_interval.start,
                    end = candidate.depth_interval.end,
                    preset_start = preset.depth_interval.start,
                    preset_end = preset.depth_interval.end,
                    "dropping stored interval partially overlapping preset"
                );
                dropped += 1;
            } else {
                break;
            }
            j += 1;
        }

        if !covered {
            merged.push(AggregatedInterval {
                mutable: false,
                interval: synthesize_from_preset(preset, defaults),
            });
        }
    }

    merged.extend(stored[j..].iter().map(|&interval| AggregatedInterval {
        mutable: true,
        interval: interval.clone(),
    }));

    tracing::debug!(
        merged = merged.len(),
        dropped,
        "merged preset and stored depth intervals"
    );
    merged
}

/// Aggregated intervals for a site, given its project settings (if any) and soil data.
///
/// With a project, the project's preset and requirements govern; without one the
/// site's own preset applies and fresh intervals get the configured default methods.
pub fn aggregate_site_intervals(
    project: Option<&ProjectSoilSettings>,
    soil_data: &SoilData,
    config: &ComputeConfig,
) -> Vec<AggregatedInterval> {
    match project {
        Some(settings) => merge_intervals(
            &generate_intervals(PresetSource::Project(settings), config),
            &soil_data.depth_intervals,
            &MethodDefaults::Project(&settings.requirements),
        ),
        None => merge_intervals(
            &generate_intervals(PresetSource::Site(soil_data), config),
            &soil_data.depth_intervals,
            &MethodDefaults::NoProject(&config.default_enabled_methods),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::CollectionMethod;
    use crate::models::DepthIntervalPreset;

    fn bounds(merged: &[AggregatedInterval]) -> Vec<(i32, i32, bool)> {
        merged
            .iter()
            .map(|a| {
                (
                    a.interval.depth_interval.start,
                    a.interval.depth_interval.end,
                    a.mutable,
                )
            })
            .collect()
    }

    #[test]
    fn test_synthesize_from_project_requirements() {
        let mut requirements = MethodRequirements::default();
        requirements.set_required(CollectionMethod::Ph, true);
        requirements.set_required(CollectionMethod::Photos, true);

        let preset = ProjectDepthInterval::labelled(0, 10, "A horizon");
        let interval = synthesize_from_preset(&preset, &MethodDefaults::Project(&requirements));
        assert_eq!(interval.label.as_deref(), Some("A horizon"));
        assert_eq!(interval.depth_interval, preset.depth_interval);
        assert_eq!(interval.enabled.enabled_methods(), vec![SoilPitMethod::Ph]);
    }

    #[test]
    fn test_synthesize_defaults() {
        let preset = ProjectDepthInterval::new(0, 10);
        let interval = synthesize_from_preset(
            &preset,
            &MethodDefaults::NoProject(&[SoilPitMethod::SoilColor]),
        );
        assert_eq!(interval.enabled.enabled_methods(), vec![SoilPitMethod::SoilColor]);
        assert_eq!(interval.label, None);

        let interval = synthesize_from_preset(&preset, &MethodDefaults::Disabled);
        assert!(interval.enabled.enabled_methods().is_empty());
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge_intervals(&[], &[], &MethodDefaults::Disabled).is_empty());
    }

    #[test]
    fn test_merge_unsorted_inputs() {
        let presets = vec![ProjectDepthInterval::new(20, 30), ProjectDepthInterval::new(0, 10)];
        let stored = vec![
            SoilDataDepthInterval::new(40, 50),
            SoilDataDepthInterval::new(10, 20),
        ];
        let merged = merge_intervals(&presets, &stored, &MethodDefaults::Disabled);
        assert_eq!(
            bounds(&merged),
            vec![(0, 10, false), (10, 20, true), (20, 30, false), (40, 50, true)]
        );
        // inputs keep their original order
        assert_eq!(presets[0].depth_interval.start, 20);
        assert_eq!(stored[0].depth_interval.start, 40);
    }

    #[test]
    fn test_merge_drops_duplicate_exact_matches() {
        let presets = vec![ProjectDepthInterval::new(0, 10)];
        let first = SoilDataDepthInterval::with_flags(
            0,
            10,
            SoilPitMethodFlags::with_enabled(&[SoilPitMethod::Ph]),
        );
        let stored = vec![first.clone(), SoilDataDepthInterval::new(0, 10)];
        let merged = merge_intervals(&presets, &stored, &MethodDefaults::Disabled);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].interval, first);
        assert!(!merged[0].mutable);
    }

    #[test]
    fn test_merge_stored_spanning_several_presets_is_dropped() {
        let presets = vec![ProjectDepthInterval::new(0, 10), ProjectDepthInterval::new(10, 20)];
        let stored = vec![SoilDataDepthInterval::new(5, 15)];
        let merged = merge_intervals(&presets, &stored, &MethodDefaults::Disabled);
        assert_eq!(bounds(&merged), vec![(0, 10, false), (10, 20, false)]);
    }

    #[test]
    fn test_merge_overlapping_stored_outside_presets_both_pass() {
        let presets = vec![ProjectDepthInterval::new(100, 200)];
        let stored = vec![
            SoilDataDepthInterval::new(0, 30),
            SoilDataDepthInterval::new(20, 40),
        ];
        let merged = merge_intervals(&presets, &stored, &MethodDefaults::Disabled);
        assert_eq!(
            bounds(&merged),
            vec![(0, 30, true), (20, 40, true), (100, 200, false)]
        );
    }

    #[test]
    fn test_aggregate_uses_project_over_site_preset() {
        let settings = ProjectSoilSettings {
            depth_interval_preset: DepthIntervalPreset::None,
            ..Default::default()
        };
        let soil_data = SoilData {
            depth_interval_preset: Some(DepthIntervalPreset::Nrcs),
            depth_intervals: vec![SoilDataDepthInterval::new(3, 4)],
            ..Default::default()
        };
        let merged =
            aggregate_site_intervals(Some(&settings), &soil_data, &ComputeConfig::default());
        assert_eq!(bounds(&merged), vec![(3, 4, true)]);

        let merged = aggregate_site_intervals(None, &soil_data, &ComputeConfig::default());
        assert_eq!(merged.len(), 6);
        assert!(merged.iter().all(|a| !a.mutable));
    }
}
