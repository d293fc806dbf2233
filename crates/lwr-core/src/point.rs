//! A single measured quantity tagged with a feature name.

/// One measurement: a value with uncertainty, a unit string, and the 3-D
/// position it was taken at.
///
/// Points are grouped by feature name and timestep inside a
/// [`TimeSeriesStore`](crate::TimeSeriesStore); the point itself carries no
/// time.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePoint {
    /// Name of the measured physical quantity (e.g. a flux channel).
    pub feature: String,
    pub value: f64,
    pub uncertainty: f64,
    pub units: String,
    /// Cartesian position of the measurement, in the units of `units`' frame.
    pub position: [f64; 3],
}

impl FeaturePoint {
    /// A zeroed point for the given feature.
    pub fn new(feature: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            value: 0.0,
            uncertainty: 0.0,
            units: "No Units".to_string(),
            position: [0.0; 3],
        }
    }

    /// Builder-style value setter.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = uncertainty;
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_point_is_zeroed() {
        let p = FeaturePoint::new("Axial Flux");
        assert_eq!(p.feature, "Axial Flux");
        assert_eq!(p.value, 0.0);
        assert_eq!(p.uncertainty, 0.0);
        assert_eq!(p.units, "No Units");
        assert_eq!(p.position, [0.0; 3]);
    }

    #[test]
    fn builder_chain() {
        let p = FeaturePoint::new("Temperature")
            .with_value(565.0)
            .with_uncertainty(1.5)
            .with_units("K")
            .with_position([0.0, 0.5, 1.0]);
        assert_eq!(p.value, 565.0);
        assert_eq!(p.uncertainty, 1.5);
        assert_eq!(p.units, "K");
        assert_eq!(p.position[2], 1.0);
    }
}
