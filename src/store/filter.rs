use super::types::PlanetRecord;
use crate::scoring::Label;

/// Criteria for listing stored planets. Unset fields match everything;
/// all bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanetFilter {
    /// Accepted labels; empty accepts all
    pub labels: Vec<Label>,
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

impl PlanetFilter {
    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_radius(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_radius = min;
        self.max_radius = max;
        self
    }

    pub fn with_score(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_score = min;
        self.max_score = max;
        self
    }

    /// A record with no radius fails any active radius bound
    pub fn matches(&self, record: &PlanetRecord) -> bool {
        let result = &record.result;

        if !self.labels.is_empty() && !self.labels.contains(&result.label) {
            return false;
        }

        if self.min_radius.is_some() || self.max_radius.is_some() {
            match result.radius_re {
                Some(r) if within(r, self.min_radius, self.max_radius) => {}
                _ => return false,
            }
        }

        within(result.score, self.min_score, self.max_score)
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
}
