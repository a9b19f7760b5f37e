use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A weight and/or temperature reading taken at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Body temperature in °C.
    pub temperature: Option<f64>,
    /// Weight in kg.
    pub weight: Option<f64>,
    pub measured_at: DateTime<Utc>,
}

impl Measurement {
    pub fn new(temperature: Option<f64>, weight: Option<f64>) -> Self {
        Self {
            temperature,
            weight,
            measured_at: Utc::now(),
        }
    }

    pub fn at(mut self, measured_at: DateTime<Utc>) -> Self {
        self.measured_at = measured_at;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.weight.is_none()
    }

    pub fn to_log_entry(&self, animal_id: &str) -> HealthLogEntry {
        HealthLogEntry::new(animal_id, self.weight, self.temperature).measured_at(self.measured_at)
    }
}

/// One dated weight/temperature measurement for an animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthLogEntry {
    pub id: Option<i64>,
    pub animal_id: String,
    pub weight: Option<f64>,
    pub temperature: Option<f64>,
    /// Baseline the weight was classified against when it was recorded.
    pub reference_weight: Option<f64>,
    pub measured_at: DateTime<Utc>,
}

impl HealthLogEntry {
    pub fn new(animal_id: &str, weight: Option<f64>, temperature: Option<f64>) -> Self {
        Self {
            id: None,
            animal_id: animal_id.to_string(),
            weight,
            temperature,
            reference_weight: None,
            measured_at: Utc::now(),
        }
    }

    pub fn with_reference_weight(mut self, kg: Option<f64>) -> Self {
        self.reference_weight = kg;
        self
    }

    pub fn measured_at(mut self, at: DateTime<Utc>) -> Self {
        self.measured_at = at;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.temperature.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
    Unknown,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "↑ Rising",
            Trend::Falling => "↓ Falling",
            Trend::Stable => "→ Stable",
            Trend::Unknown => "? Unknown",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySummary {
    pub entries: usize,
    pub latest_weight: Option<f64>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    /// Change from the first to the last weighed entry, in kg.
    pub weight_change: Option<f64>,
    pub weight_trend: Trend,
    pub avg_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entry_detection() {
        assert!(HealthLogEntry::new("a", None, None).is_empty());
        assert!(!HealthLogEntry::new("a", Some(400.0), None).is_empty());
        assert!(!HealthLogEntry::new("a", None, Some(38.0)).is_empty());
    }

    #[test]
    fn trend_display() {
        assert!(Trend::Rising.as_str().contains("Rising"));
        assert!(Trend::Falling.as_str().contains("Falling"));
        assert!(Trend::Stable.as_str().contains("Stable"));
        assert!(Trend::Unknown.as_str().contains("Unknown"));
    }
}
