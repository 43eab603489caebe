use serde_json::json;
use soil_compute::{
    aggregate_site_intervals, merge_intervals, AggregatedInterval, CollectionMethod,
    ComputeConfig, DepthInterval, DepthIntervalPreset, MethodDefaults, MethodRequirements,
    ProjectDepthInterval, ProjectSoilSettings, RockFragmentVolume, SoilData, SoilDataDepthInterval,
    SoilPitMethod, SoilPitMethodFlags,
};

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

fn requirements(methods: &[CollectionMethod]) -> MethodRequirements {
    let mut requirements = MethodRequirements::default();
    for method in methods {
        requirements.set_required(*method, true);
    }
    requirements
}

#[test]
fn named_standard_without_stored_intervals() {
    let settings = ProjectSoilSettings {
        depth_interval_preset: DepthIntervalPreset::Landpks,
        requirements: requirements(&[
            CollectionMethod::SoilTexture,
            CollectionMethod::Ph,
            CollectionMethod::Slope,
        ]),
        ..Default::default()
    };
    let merged =
        aggregate_site_intervals(Some(&settings), &SoilData::default(), &ComputeConfig::default());

    assert_eq!(
        bounds(&merged),
        vec![
            (0, 10, false),
            (10, 20, false),
            (20, 50, false),
            (50, 70, false),
            (70, 100, false),
            (100, 200, false),
        ]
    );
    for aggregated in &merged {
        for method in SoilPitMethod::ALL {
            assert_eq!(
                aggregated.interval.enabled.get(method),
                settings.requirements.is_required(method.into())
            );
        }
    }
}

#[test]
fn custom_preset_with_partial_overlap_is_dropped() {
    let settings = ProjectSoilSettings {
        depth_interval_preset: DepthIntervalPreset::Custom,
        depth_intervals: vec![ProjectDepthInterval::new(2, 3), ProjectDepthInterval::new(5, 6)],
        ..Default::default()
    };
    let soil_data = SoilData {
        depth_intervals: vec![
            SoilDataDepthInterval::new(1, 2),
            SoilDataDepthInterval::new(4, 6),
            SoilDataDepthInterval::new(7, 10),
        ],
        ..Default::default()
    };
    let merged = aggregate_site_intervals(Some(&settings), &soil_data, &ComputeConfig::default());

    // {4, 6} overlaps the preset {5, 6} without matching it and never shows up
    assert_eq!(
        bounds(&merged),
        vec![(1, 2, true), (2, 3, false), (5, 6, false), (7, 10, true)]
    );
}

#[test]
fn site_without_project_uses_default_standard_and_methods() {
    let merged = aggregate_site_intervals(None, &SoilData::default(), &ComputeConfig::default());

    assert_eq!(merged.len(), 6);
    assert!(merged.iter().all(|a| !a.mutable));
    assert_eq!(
        merged[3].interval.depth_interval,
        DepthInterval { start: 50, end: 70 }
    );
    for aggregated in &merged {
        assert_eq!(
            aggregated.interval.enabled,
            SoilPitMethodFlags::with_enabled(&[
                SoilPitMethod::SoilTexture,
                SoilPitMethod::SoilStructure,
                SoilPitMethod::SoilColor,
            ])
        );
    }
}

#[test]
fn exact_match_keeps_stored_flags() {
    let settings = ProjectSoilSettings {
        depth_interval_preset: DepthIntervalPreset::Nrcs,
        requirements: requirements(&[CollectionMethod::SoilTexture, CollectionMethod::SoilColor]),
        ..Default::default()
    };
    let stored = SoilDataDepthInterval {
        label: Some("plow layer".to_string()),
        ..SoilDataDepthInterval::with_flags(
            5,
            15,
            SoilPitMethodFlags::with_enabled(&[SoilPitMethod::Carbonates]),
        )
    };
    let soil_data = SoilData {
        depth_intervals: vec![stored.clone()],
        ..Default::default()
    };
    let merged = aggregate_site_intervals(Some(&settings), &soil_data, &ComputeConfig::default());

    assert_eq!(merged.len(), 6);
    assert!(!merged[1].mutable);
    assert_eq!(merged[1].interval, stored);
    assert_eq!(
        merged[0].interval.enabled.enabled_methods(),
        vec![SoilPitMethod::SoilTexture, SoilPitMethod::SoilColor]
    );
}

#[test]
fn none_preset_passes_stored_intervals_through() {
    let settings = ProjectSoilSettings {
        depth_interval_preset: DepthIntervalPreset::None,
        requirements: requirements(&[CollectionMethod::SoilTexture]),
        ..Default::default()
    };
    let flags = SoilPitMethodFlags::with_enabled(&[SoilPitMethod::Ph]);
    let soil_data = SoilData {
        depth_intervals: vec![
            SoilDataDepthInterval::with_flags(30, 40, flags),
            SoilDataDepthInterval::new(0, 15),
        ],
        ..Default::default()
    };
    let merged = aggregate_site_intervals(Some(&settings), &soil_data, &ComputeConfig::default());

    assert_eq!(bounds(&merged), vec![(0, 15, true), (30, 40, true)]);
    assert!(merged[0].interval.enabled.enabled_methods().is_empty());
    assert_eq!(merged[1].interval.enabled, flags);
}

#[test]
fn no_presets_and_no_stored_is_empty() {
    assert!(merge_intervals(&[], &[], &MethodDefaults::Disabled).is_empty());
}

#[test]
fn backend_payloads_deserialize() {
    let settings: ProjectSoilSettings = serde_json::from_value(json!({
        "depthIntervals": [
            {"depthInterval": {"start": 0, "end": 15}, "label": "Topsoil"},
            {"depthInterval": {"start": 15, "end": 40}, "label": "Subsoil"}
        ],
        "depthIntervalPreset": "CUSTOM",
        "soilPitRequired": true,
        "slopeRequired": false,
        "soilTextureRequired": true,
        "soilColorRequired": false,
        "photosRequired": true
    }))
    .unwrap();
    assert_eq!(settings.depth_interval_preset, DepthIntervalPreset::Custom);
    assert!(settings.requirements.soil_pit_required);
    assert!(settings.requirements.is_required(CollectionMethod::Photos));

    let soil_data: SoilData = serde_json::from_value(json!({
        "depthIntervalPreset": null,
        "slopeSteepnessSelect": "ROLLING",
        "depthIntervals": [
            {
                "label": null,
                "depthInterval": {"start": 0, "end": 15},
                "soilTextureEnabled": false,
                "soilColorEnabled": true
            },
            {
                "label": "Hardpan",
                "depthInterval": {"start": 60, "end": 80},
                "soilTextureEnabled": true
            }
        ],
        "depthDependentData": [
            {"depthInterval": {"start": 0, "end": 15}, "texture": "SANDY_LOAM", "ph": 6.8}
        ]
    }))
    .unwrap();

    let merged = aggregate_site_intervals(Some(&settings), &soil_data, &ComputeConfig::default());
    assert_eq!(bounds(&merged), vec![(0, 15, false), (15, 40, false), (60, 80, true)]);
    assert_eq!(
        merged[0].interval.enabled.enabled_methods(),
        vec![SoilPitMethod::SoilColor]
    );
    assert_eq!(merged[1].interval.label.as_deref(), Some("Subsoil"));
    assert_eq!(
        merged[1].interval.enabled.enabled_methods(),
        vec![SoilPitMethod::SoilTexture]
    );

    let out = serde_json::to_value(&merged[2]).unwrap();
    assert_eq!(out["mutable"], true);
    assert_eq!(out["interval"]["label"], "Hardpan");
    assert_eq!(out["interval"]["depthInterval"]["start"], 60);
    assert_eq!(out["interval"]["soilTextureEnabled"], true);
}

#[test]
fn unknown_preset_is_rejected_not_defaulted() {
    let result: Result<ProjectSoilSettings, _> =
        serde_json::from_value(json!({"depthIntervalPreset": "USDA"}));
    assert!(result.is_err());

    assert!("USDA".parse::<DepthIntervalPreset>().is_err());
}

#[test]
fn site_fields_survive_load_and_save() {
    let payload = json!({
        "downSlope": "CONCAVE",
        "crossSlope": "LINEAR",
        "bedrock": 80,
        "surfaceCracksSelect": "DEEP_VERTICAL_CRACKS",
        "floodingSelect": "RARE",
        "slopeAspect": 270,
        "depthDependentData": [{
            "depthInterval": {"start": 0, "end": 10},
            "rockFragmentVolume": "VOLUME_15_35",
            "colorPhotoUsed": true,
            "conductivityTest": "SATURATED_PASTE",
            "phTestingMethod": "METER"
        }]
    });
    let soil_data: SoilData = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(soil_data.bedrock, Some(80));
    assert_eq!(
        soil_data.depth_dependent_data[0].rock_fragment_volume,
        Some(RockFragmentVolume::Volume15To35)
    );

    let saved = serde_json::to_value(&soil_data).unwrap();
    let site_keys = [
        "downSlope",
        "crossSlope",
        "bedrock",
        "surfaceCracksSelect",
        "floodingSelect",
        "slopeAspect",
    ];
    for key in site_keys {
        assert_eq!(saved[key], payload[key], "{key}");
    }
    let depth = &saved["depthDependentData"][0];
    let depth_keys = [
        "rockFragmentVolume",
        "colorPhotoUsed",
        "conductivityTest",
        "phTestingMethod",
    ];
    for key in depth_keys {
        assert_eq!(depth[key], payload["depthDependentData"][0][key], "{key}");
    }
}
