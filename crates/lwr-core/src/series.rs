//! Time-keyed measurement storage.
//!
//! A [`TimeSeriesStore`] aggregates [`FeaturePoint`]s by feature name and
//! timestep. Timesteps are kept in insertion order, not sorted by time, and
//! points for the same feature at the same timestep accumulate rather than
//! replace each other.

use crate::point::FeaturePoint;

/// All points recorded for one feature at one timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    feature: String,
    points: Vec<FeaturePoint>,
}

impl FeatureSet {
    pub fn new(feature: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            points: Vec::new(),
        }
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn points(&self) -> &[FeaturePoint] {
        &self.points
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TimeStep {
    time: f64,
    sets: Vec<FeatureSet>,
}

/// Measurement provider attached to a component or grid cell.
#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    time_units: String,
    source_info: String,
    current: f64,
    steps: Vec<TimeStep>,
}

impl Default for TimeSeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self {
            time_units: "seconds".to_string(),
            source_info: "No Source Available".to_string(),
            current: 0.0,
            steps: Vec::new(),
        }
    }

    /// Record a point at the given time.
    ///
    /// Appends to the feature's set at that timestep, creating the timestep
    /// and set entries on first use. Negative or non-finite times are
    /// ignored.
    pub fn add(&mut self, point: FeaturePoint, time: f64) {
        if !time.is_finite() || time < 0.0 {
            return;
        }

        let index = match self.steps.iter().position(|s| s.time == time) {
            Some(index) => index,
            None => {
                self.steps.push(TimeStep {
                    time,
                    sets: Vec::new(),
                });
                self.steps.len() - 1
            }
        };
        let step = &mut self.steps[index];

        match step.sets.iter_mut().find(|s| s.feature == point.feature) {
            Some(set) => set.points.push(point),
            None => {
                let mut set = FeatureSet::new(point.feature.clone());
                set.points.push(point);
                step.sets.push(set);
            }
        }
    }

    /// Drop the feature's points at every timestep. Returns true when
    /// anything was removed. Timesteps left empty are retained.
    pub fn remove_feature(&mut self, feature: &str) -> bool {
        let mut removed = false;
        for step in &mut self.steps {
            let before = step.sets.len();
            step.sets.retain(|s| s.feature != feature);
            removed |= step.sets.len() != before;
        }
        removed
    }

    /// Times in insertion order.
    pub fn times(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.time).collect()
    }

    /// Index of the timestep holding `time`, if any.
    pub fn time_step(&self, time: f64) -> Option<usize> {
        self.steps.iter().position(|s| s.time == time)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total number of points across all features and timesteps.
    pub fn point_count(&self) -> usize {
        self.steps
            .iter()
            .flat_map(|s| &s.sets)
            .map(|set| set.points.len())
            .sum()
    }

    /// Feature names recorded at `time`, in insertion order.
    pub fn features_at(&self, time: f64) -> Vec<String> {
        self.steps
            .iter()
            .find(|s| s.time == time)
            .map(|s| s.sets.iter().map(|set| set.feature.clone()).collect())
            .unwrap_or_default()
    }

    /// Points recorded for `feature` at `time`; empty when absent.
    pub fn data_at(&self, time: f64, feature: &str) -> &[FeaturePoint] {
        self.steps
            .iter()
            .find(|s| s.time == time)
            .and_then(|s| s.sets.iter().find(|set| set.feature == feature))
            .map(|set| set.points.as_slice())
            .unwrap_or(&[])
    }

    /// All feature names across every timestep, deduplicated, in first-seen
    /// order.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for step in &self.steps {
            for set in &step.sets {
                if !names.iter().any(|n| n == &set.feature) {
                    names.push(set.feature.clone());
                }
            }
        }
        names
    }

    /// The current-time cursor. The cursor need not name an existing
    /// timestep; lookups at a time with no data come back empty.
    pub fn current_time(&self) -> f64 {
        self.current
    }

    /// Move the cursor. Negative or non-finite times are ignored.
    pub fn set_time(&mut self, time: f64) {
        if time.is_finite() && time >= 0.0 {
            self.current = time;
        }
    }

    pub fn features_at_current(&self) -> Vec<String> {
        self.features_at(self.current)
    }

    pub fn data_at_current(&self, feature: &str) -> &[FeaturePoint] {
        self.data_at(self.current, feature)
    }

    pub fn time_units(&self) -> &str {
        &self.time_units
    }

    /// Set the unit string for the time axis. Empty or whitespace-only
    /// strings are rejected; the kept value is trimmed.
    pub fn set_time_units(&mut self, units: &str) {
        let trimmed = units.trim();
        if !trimmed.is_empty() {
            self.time_units = trimmed.to_string();
        }
    }

    pub fn source_info(&self) -> &str {
        &self.source_info
    }

    /// Set the free-text provenance note. Empty or whitespace-only strings
    /// are rejected; the kept value is trimmed.
    pub fn set_source_info(&mut self, source: &str) {
        let trimmed = source.trim();
        if !trimmed.is_empty() {
            self.source_info = trimmed.to_string();
        }
    }
}

/// Equality covers the persisted content (time units and the timestep data),
/// not the runtime cursor or the provenance note.
impl PartialEq for TimeSeriesStore {
    fn eq(&self, other: &Self) -> bool {
        self.time_units == other.time_units && self.steps == other.steps
    }
}
