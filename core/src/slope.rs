//! Slope steepness normalization.
//!
//! A site's slope may be recorded as a coarse class, in degrees, or directly as a
//! percent grade. Soil identification wants a single percent value.

use crate::models::{SlopeSteepness, SoilData};

impl SlopeSteepness {
    /// Lower bound of the class as a fraction of 100% grade.
    pub fn percent_fraction(&self) -> f64 {
        match self {
            // 0 - 2%
            SlopeSteepness::Flat => 0.0,
            // 2 - 5%
            SlopeSteepness::Gentle => 0.02,
            // 5 - 10%
            SlopeSteepness::Moderate => 0.05,
            // 10 - 15%
            SlopeSteepness::Rolling => 0.1,
            // 15 - 30%
            SlopeSteepness::Hilly => 0.15,
            // 30 - 50%
            SlopeSteepness::Steep => 0.3,
            // 50 - 60%
            SlopeSteepness::ModeratelySteep => 0.5,
            // 60 - 100%
            SlopeSteepness::VerySteep => 0.6,
            // 100%+
            SlopeSteepness::Steepest => 1.0,
        }
    }
}

/// Percent grade of a slope given in degrees, rounded to the nearest integer.
pub fn degree_to_percent(degrees: f64) -> f64 {
    ((degrees.to_radians()).tan() * 100.0).round()
}

/// Slope of a site: the selected class wins, then degrees, then the stored percent.
pub fn soil_data_slope_percent(data: &SoilData) -> Option<f64> {
    if let Some(select) = data.slope_steepness_select {
        Some(select.percent_fraction())
    } else if let Some(degrees) = data.slope_steepness_degree {
        Some(degree_to_percent(f64::from(degrees)))
    } else {
        data.slope_steepness_percent.map(f64::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_to_percent() {
        assert_eq!(degree_to_percent(0.0), 0.0);
        assert_eq!(degree_to_percent(45.0), 100.0);
        assert_eq!(degree_to_percent(10.0), 18.0);
        assert_eq!(degree_to_percent(30.0), 58.0);
    }

    #[test]
    fn test_slope_precedence() {
        let mut data = SoilData {
            slope_steepness_select: Some(SlopeSteepness::Hilly),
            slope_steepness_degree: Some(45),
            slope_steepness_percent: Some(12),
            ..Default::default()
        };
        assert_eq!(soil_data_slope_percent(&data), Some(0.15));

        data.slope_steepness_select = None;
        assert_eq!(soil_data_slope_percent(&data), Some(100.0));

        data.slope_steepness_degree = None;
        assert_eq!(soil_data_slope_percent(&data), Some(12.0));

        data.slope_steepness_percent = None;
        assert_eq!(soil_data_slope_percent(&data), None);
    }

    #[test]
    fn test_steepness_classes_are_monotonic() {
        let classes = [
            SlopeSteepness::Flat,
            SlopeSteepness::Gentle,
            SlopeSteepness::Moderate,
            SlopeSteepness::Rolling,
            SlopeSteepness::Hilly,
            SlopeSteepness::Steep,
            SlopeSteepness::ModeratelySteep,
            SlopeSteepness::VerySteep,
            SlopeSteepness::Steepest,
        ];
        for pair in classes.windows(2) {
            assert!(pair[0].percent_fraction() < pair[1].percent_fraction());
        }
    }
}
