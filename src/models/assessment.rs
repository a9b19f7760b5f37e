use super::HealthStatus;
use serde::{Deserialize, Serialize};

/// Outcome of a single classifier.
///
/// `Unknown` means the inputs were insufficient to decide. It is not a
/// health signal and never maps onto `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Good,
    Warning,
    Critical,
    Unknown,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Good => "Good",
            Classification::Warning => "Warning",
            Classification::Critical => "Critical",
            Classification::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightDirection {
    Loss,
    Gain,
    Stable,
}

impl WeightDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightDirection::Loss => "Loss",
            WeightDirection::Gain => "Gain",
            WeightDirection::Stable => "Stable",
        }
    }
}

impl std::fmt::Display for WeightDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: Classification,
    pub message: String,
    /// Measured value that drove the decision.
    pub metric_value: Option<f64>,
    /// Threshold or baseline the measurement was compared against.
    pub reference_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<WeightDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

impl ClassificationResult {
    pub fn new(status: Classification, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            metric_value: None,
            reference_value: None,
            direction: None,
            change_percent: None,
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Classification::Unknown, message)
    }

    pub fn with_metric(mut self, value: f64) -> Self {
        self.metric_value = Some(value);
        self
    }

    pub fn with_reference(mut self, value: f64) -> Self {
        self.reference_value = Some(value);
        self
    }

    pub fn with_change(mut self, direction: WeightDirection, percent: f64) -> Self {
        self.direction = Some(direction);
        self.change_percent = Some(percent);
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.status == Classification::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Warning => "WARNING",
            AlertLevel::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertIcon {
    Fire,
    Thermometer,
    Scale,
}

impl AlertIcon {
    pub fn symbol(&self) -> &'static str {
        match self {
            AlertIcon::Fire => "🔥",
            AlertIcon::Thermometer => "🌡️",
            AlertIcon::Scale => "⚖️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub icon: AlertIcon,
    pub message: String,
}

impl Alert {
    pub fn new(level: AlertLevel, icon: AlertIcon, message: impl Into<String>) -> Self {
        Self {
            level,
            icon,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub overall_status: HealthStatus,
    /// Temperature alert first, then weight alert.
    pub alerts: Vec<Alert>,
    pub temperature_result: ClassificationResult,
    pub weight_result: ClassificationResult,
}

impl HealthAssessment {
    /// True when neither classifier had enough data to decide.
    ///
    /// The overall status is still `Good` in that case, so callers should
    /// present it as "no data" rather than as verified good health.
    pub fn has_no_data(&self) -> bool {
        self.temperature_result.is_unknown() && self.weight_result.is_unknown()
    }
}
