//! Derived reads over a [`SoilDataProvider`].
//!
//! Nothing here is stored; every call recomputes from the provider's current state.

use std::borrow::Cow;

use crate::aggregate::aggregate_site_intervals;
use crate::config::ComputeConfig;
use crate::interval::{same_depth, HasDepthInterval};
use crate::models::{
    AggregatedInterval, DepthDependentSoilData, ProjectId, ProjectSoilSettings, SiteId, SoilData,
};
use crate::preset::project_intervals;
use crate::store::SoilDataProvider;

/// Settings of a project as stored, or the defaults when none were fetched.
fn stored_project_settings<'a, P>(provider: &'a P, project: &ProjectId) -> Cow<'a, ProjectSoilSettings>
where
    P: SoilDataProvider + ?Sized,
{
    match provider.project_soil_settings(project) {
        Some(settings) => Cow::Borrowed(settings),
        None => Cow::Owned(ProjectSoilSettings::default()),
    }
}

/// Project settings with `depth_intervals` replaced by the intervals the preset implies.
pub fn project_soil_settings<P>(provider: &P, project: &ProjectId) -> ProjectSoilSettings
where
    P: SoilDataProvider + ?Sized,
{
    let mut settings = stored_project_settings(provider, project).into_owned();
    settings.depth_intervals = project_intervals(&settings);
    settings
}

/// Resolved settings of the project owning `site`, `None` for a project-less site.
pub fn site_project_soil_settings<P>(provider: &P, site: &SiteId) -> Option<ProjectSoilSettings>
where
    P: SoilDataProvider + ?Sized,
{
    provider
        .site_project(site)
        .map(|project| project_soil_settings(provider, project))
}

/// Soil data of a site, empty when none was fetched.
pub fn soil_data<'a, P>(provider: &'a P, site: &SiteId) -> Cow<'a, SoilData>
where
    P: SoilDataProvider + ?Sized,
{
    match provider.soil_data(site) {
        Some(data) => Cow::Borrowed(data),
        None => Cow::Owned(SoilData::default()),
    }
}

/// The reconciled depth intervals shown for a site.
pub fn site_soil_intervals<P>(
    provider: &P,
    site: &SiteId,
    config: &ComputeConfig,
) -> Vec<AggregatedInterval>
where
    P: SoilDataProvider + ?Sized,
{
    let settings = provider
        .site_project(site)
        .map(|project| stored_project_settings(provider, project));
    let data = soil_data(provider, site);
    aggregate_site_intervals(settings.as_deref(), &data, config)
}

/// Measurements recorded at exactly the given depth.
pub fn depth_dependent_data<'a, D>(
    soil_data: &'a SoilData,
    depth: &D,
) -> Option<&'a DepthDependentSoilData>
where
    D: HasDepthInterval + ?Sized,
{
    soil_data
        .depth_dependent_data
        .iter()
        .find(|data| same_depth(*data, depth))
}

pub fn site_depth_dependent_data<'a, P, D>(
    provider: &'a P,
    site: &SiteId,
    depth: &D,
) -> Option<&'a DepthDependentSoilData>
where
    P: SoilDataProvider + ?Sized,
    D: HasDepthInterval + ?Sized,
{
    provider
        .soil_data(site)
        .and_then(|data| depth_dependent_data(data, depth))
}
