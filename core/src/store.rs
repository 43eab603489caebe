use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::ComputeConfig;
use crate::error::SoilError;
use crate::interval::{check_no_overlap, compare_by_start, same_depth};
use crate::methods::SoilPitMethod;
use crate::models::{
    AggregatedInterval, DepthDependentSoilData, DepthInterval, DepthIntervalPreset,
    ProjectDepthInterval, ProjectId, ProjectSoilSettings, SiteId, SoilData,
    SoilDataDepthInterval,
};
use crate::preset::{generate_intervals, PresetSource};
use crate::selectors;

/// Read access to fetched project settings and site soil data.
pub trait SoilDataProvider {
    fn project_soil_settings(&self, project: &ProjectId) -> Option<&ProjectSoilSettings>;
    fn soil_data(&self, site: &SiteId) -> Option<&SoilData>;
    fn site_project(&self, site: &SiteId) -> Option<&ProjectId>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSummary {
    pub project_id: Option<ProjectId>,
}

/// Soil data pulled for one user, keyed the way the backend returns it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSoilSnapshot {
    pub project_soil_settings: HashMap<ProjectId, Option<ProjectSoilSettings>>,
    pub soil_data: HashMap<SiteId, Option<SoilData>>,
    pub sites: HashMap<SiteId, SiteSummary>,
}

impl UserSoilSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SoilError> {
        serde_json::from_str(json).map_err(|err| SoilError::InvalidSnapshot {
            reason: err.to_string(),
        })
    }
}

/// Normalized in-memory store of project settings and site soil data.
#[derive(Clone, Debug, Default)]
pub struct InMemorySoilStore {
    config: ComputeConfig,
    projects: HashMap<ProjectId, ProjectSoilSettings>,
    soil_data: HashMap<SiteId, SoilData>,
    site_projects: HashMap<SiteId, ProjectId>,
}

impl SoilDataProvider for InMemorySoilStore {
    fn project_soil_settings(&self, project: &ProjectId) -> Option<&ProjectSoilSettings> {
        self.projects.get(project)
    }

    fn soil_data(&self, site: &SiteId) -> Option<&SoilData> {
        self.soil_data.get(site)
    }

    fn site_project(&self, site: &SiteId) -> Option<&ProjectId> {
        self.site_projects.get(site)
    }
}

impl InMemorySoilStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ComputeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn from_snapshot(snapshot: UserSoilSnapshot, config: ComputeConfig) -> Self {
        let mut store = Self::with_config(config);
        store.load_snapshot(snapshot);
        store
    }

    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }

    /// Replace every entry with the contents of `snapshot`.
    pub fn load_snapshot(&mut self, snapshot: UserSoilSnapshot) {
        self.projects = snapshot
            .project_soil_settings
            .into_iter()
            .filter_map(|(id, settings)| settings.map(|s| (id, s)))
            .collect();
        self.soil_data = snapshot
            .soil_data
            .into_iter()
            .filter_map(|(id, data)| data.map(|d| (id, d)))
            .collect();
        self.site_projects = snapshot
            .sites
            .into_iter()
            .filter_map(|(id, site)| site.project_id.map(|p| (id, p)))
            .collect();
        tracing::info!(
            projects = self.projects.len(),
            sites = self.soil_data.len(),
            "loaded soil data snapshot"
        );
    }

    pub fn set_project_settings(&mut self, project: ProjectId, settings: ProjectSoilSettings) {
        self.projects.insert(project, settings);
    }

    pub fn set_soil_data(&mut self, site: SiteId, data: SoilData) {
        self.soil_data.insert(site, data);
    }

    pub fn set_site_project(&mut self, site: SiteId, project: ProjectId) {
        self.site_projects.insert(site, project);
    }

    pub fn remove_site_project(&mut self, site: &SiteId) -> Option<ProjectId> {
        self.site_projects.remove(site)
    }

    /// Reconciled intervals for `site` under the store's configuration.
    pub fn site_intervals(&self, site: &SiteId) -> Vec<AggregatedInterval> {
        selectors::site_soil_intervals(self, site, &self.config)
    }

    fn preset_intervals(&self, site: &SiteId) -> Vec<ProjectDepthInterval> {
        match self.site_projects.get(site) {
            Some(project) => {
                let settings = selectors::project_soil_settings(self, project);
                generate_intervals(PresetSource::Project(&settings), &self.config)
            }
            None => {
                let data = selectors::soil_data(self, site);
                generate_intervals(PresetSource::Site(&data), &self.config)
            }
        }
    }

    /// Reject edits to bounds that a preset fixes.
    fn ensure_mutable(&self, site: &SiteId, depth: &DepthInterval) -> Result<(), SoilError> {
        if self
            .preset_intervals(site)
            .iter()
            .any(|preset| same_depth(preset, depth))
        {
            return Err(SoilError::ImmutableInterval {
                start: depth.start,
                end: depth.end,
            });
        }
        Ok(())
    }

    /// Insert or replace the stored interval with the same depth.
    ///
    /// A new interval may match a preset exactly; otherwise it must not overlap a
    /// preset interval or another stored interval.
    pub fn update_soil_data_depth_interval(
        &mut self,
        site: &SiteId,
        interval: SoilDataDepthInterval,
    ) -> Result<(), SoilError> {
        interval.depth_interval.validate()?;
        let presets = self.preset_intervals(site);
        if !presets.iter().any(|preset| same_depth(preset, &interval)) {
            check_no_overlap(&interval, &presets)?;
        }

        let data = self.soil_data.entry(site.clone()).or_default();
        match data
            .depth_intervals
            .iter()
            .position(|existing| same_depth(existing, &interval))
        {
            Some(index) => data.depth_intervals[index] = interval,
            None => {
                check_no_overlap(&interval, &data.depth_intervals)?;
                tracing::debug!(
                    site = %site,
                    start = interval.depth_interval.start,
                    end = interval.depth_interval.end,
                    "adding soil data depth interval"
                );
                data.depth_intervals.push(interval);
            }
        }
        Ok(())
    }

    /// Change the bounds of a user-created interval, carrying its measurements along.
    pub fn move_soil_data_depth_interval(
        &mut self,
        site: &SiteId,
        from: DepthInterval,
        to: DepthInterval,
    ) -> Result<(), SoilError> {
        to.validate()?;
        self.ensure_mutable(site, &from)?;
        let presets = self.preset_intervals(site);
        if !presets.iter().any(|preset| same_depth(preset, &to)) {
            check_no_overlap(&to, &presets)?;
        }

        let not_found = SoilError::IntervalNotFound {
            start: from.start,
            end: from.end,
        };
        let data = self.soil_data.get_mut(site).ok_or_else(|| not_found.clone())?;
        let index = data
            .depth_intervals
            .iter()
            .position(|existing| same_depth(existing, &from))
            .ok_or(not_found)?;
        if from == to {
            return Ok(());
        }
        if let Some(existing) = data
            .depth_intervals
            .iter()
            .find(|existing| same_depth(*existing, &to))
        {
            return Err(SoilError::OverlappingInterval {
                start: to.start,
                end: to.end,
                existing_start: existing.depth_interval.start,
                existing_end: existing.depth_interval.end,
            });
        }

        let others: Vec<&SoilDataDepthInterval> = data
            .depth_intervals
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, interval)| interval)
            .collect();
        check_no_overlap(&to, &others)?;

        data.depth_intervals[index].depth_interval = to;
        data.depth_dependent_data.retain(|d| !same_depth(d, &to));
        for measurements in data.depth_dependent_data.iter_mut() {
            if measurements.depth_interval == from {
                measurements.depth_interval = to;
            }
        }
        tracing::debug!(site = %site, from = %from, to = %to, "moved soil data depth interval");
        Ok(())
    }

    /// Delete a user-created interval and the measurements recorded for it.
    pub fn delete_soil_data_depth_interval(
        &mut self,
        site: &SiteId,
        depth: DepthInterval,
    ) -> Result<(), SoilError> {
        self.ensure_mutable(site, &depth)?;
        let data = self
            .soil_data
            .get_mut(site)
            .ok_or(SoilError::IntervalNotFound {
                start: depth.start,
                end: depth.end,
            })?;
        let before = data.depth_intervals.len();
        data.depth_intervals.retain(|i| !same_depth(i, &depth));
        if data.depth_intervals.len() == before {
            return Err(SoilError::IntervalNotFound {
                start: depth.start,
                end: depth.end,
            });
        }
        data.depth_dependent_data.retain(|d| !same_depth(d, &depth));
        tracing::debug!(site = %site, depth = %depth, "deleted soil data depth interval");
        Ok(())
    }

    /// Enable or disable a method for one depth of a site.
    ///
    /// A preset interval with no stored record yet is materialized first, keeping
    /// the flags it is currently shown with.
    pub fn set_method_enabled(
        &mut self,
        site: &SiteId,
        depth: DepthInterval,
        method: SoilPitMethod,
        enabled: bool,
    ) -> Result<(), SoilError> {
        if let Some(data) = self.soil_data.get_mut(site) {
            if let Some(index) = data
                .depth_intervals
                .iter()
                .position(|i| same_depth(i, &depth))
            {
                data.depth_intervals[index].enabled.set(method, enabled);
                return Ok(());
            }
        }

        let mut interval = self
            .site_intervals(site)
            .into_iter()
            .find(|aggregated| same_depth(aggregated, &depth))
            .map(|aggregated| aggregated.interval)
            .ok_or(SoilError::IntervalNotFound {
                start: depth.start,
                end: depth.end,
            })?;
        interval.enabled.set(method, enabled);
        tracing::debug!(site = %site, depth = %depth, method = %method, "materialized preset depth interval");
        self.soil_data
            .entry(site.clone())
            .or_default()
            .depth_intervals
            .push(interval);
        Ok(())
    }

    /// Insert or replace the measurements recorded at one depth.
    pub fn update_depth_dependent_data(
        &mut self,
        site: &SiteId,
        measurements: DepthDependentSoilData,
    ) -> Result<(), SoilError> {
        measurements.depth_interval.validate()?;
        let data = self.soil_data.entry(site.clone()).or_default();
        match data
            .depth_dependent_data
            .iter()
            .position(|d| same_depth(d, &measurements))
        {
            Some(index) => data.depth_dependent_data[index] = measurements,
            None => data.depth_dependent_data.push(measurements),
        }
        Ok(())
    }

    fn custom_project_settings(
        &mut self,
        project: &ProjectId,
    ) -> Result<&mut ProjectSoilSettings, SoilError> {
        let preset = self
            .projects
            .get(project)
            .map(|s| s.depth_interval_preset)
            .unwrap_or(ProjectSoilSettings::default().depth_interval_preset);
        if preset != DepthIntervalPreset::Custom {
            return Err(SoilError::PresetNotCustom {
                preset: preset.to_string(),
            });
        }
        Ok(self.projects.entry(project.clone()).or_default())
    }

    /// Insert or relabel an interval of a project's custom preset.
    pub fn update_project_depth_interval(
        &mut self,
        project: &ProjectId,
        interval: ProjectDepthInterval,
    ) -> Result<(), SoilError> {
        interval.depth_interval.validate()?;
        let settings = self.custom_project_settings(project)?;
        match settings
            .depth_intervals
            .iter()
            .position(|existing| same_depth(existing, &interval))
        {
            Some(index) => settings.depth_intervals[index] = interval,
            None => {
                check_no_overlap(&interval, &settings.depth_intervals)?;
                settings.depth_intervals.push(interval);
                settings.depth_intervals.sort_by(compare_by_start);
            }
        }
        tracing::debug!(project = %project, "updated project depth interval");
        Ok(())
    }

    pub fn delete_project_depth_interval(
        &mut self,
        project: &ProjectId,
        depth: DepthInterval,
    ) -> Result<(), SoilError> {
        let settings = self.custom_project_settings(project)?;
        let before = settings.depth_intervals.len();
        settings.depth_intervals.retain(|i| !same_depth(i, &depth));
        if settings.depth_intervals.len() == before {
            return Err(SoilError::IntervalNotFound {
                start: depth.start,
                end: depth.end,
            });
        }
        tracing::debug!(project = %project, depth = %depth, "deleted project depth interval");
        Ok(())
    }
}
