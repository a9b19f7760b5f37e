use super::{classify_temperature, classify_weight};
use crate::models::{
    Alert, AlertIcon, AlertLevel, Animal, Classification, HealthAssessment, HealthStatus,
};

/// Combine the temperature and weight classifiers into one assessment.
///
/// Temperature dominates: a Critical temperature makes the whole assessment
/// Critical whatever the weight says. A Warning from either check gives Warning.
/// Unknown results add no alert and leave the overall status alone, so an
/// animal with no readings at all comes out Good with no alerts.
///
/// The temperature alert, when present, always precedes the weight alert.
pub fn analyze_health(
    animal: &Animal,
    current_temperature: Option<f64>,
    current_weight: Option<f64>,
) -> HealthAssessment {
    let temperature_result = classify_temperature(current_temperature);
    let weight_result = classify_weight(current_weight, animal.baseline_weight, animal.weight);

    let mut overall_status = HealthStatus::Good;
    let mut alerts = Vec::new();

    match temperature_result.status {
        Classification::Critical => {
            overall_status = HealthStatus::Critical;
            alerts.push(Alert::new(
                AlertLevel::Critical,
                AlertIcon::Fire,
                format!(
                    "CRITICAL: body temperature is {}. Immediate intervention required!",
                    describe_temperature(temperature_result.metric_value)
                ),
            ));
        }
        Classification::Warning => {
            overall_status = HealthStatus::Warning;
            alerts.push(Alert::new(
                AlertLevel::Warning,
                AlertIcon::Thermometer,
                format!(
                    "Warning: body temperature is elevated: {}",
                    describe_temperature(temperature_result.metric_value)
                ),
            ));
        }
        Classification::Good | Classification::Unknown => {}
    }

    if weight_result.status == Classification::Warning {
        if overall_status != HealthStatus::Critical {
            overall_status = HealthStatus::Warning;
        }
        alerts.push(Alert::new(
            AlertLevel::Warning,
            AlertIcon::Scale,
            format!("Warning: {}", weight_result.message),
        ));
    }

    HealthAssessment {
        overall_status,
        alerts,
        temperature_result,
        weight_result,
    }
}

fn describe_temperature(value: Option<f64>) -> String {
    value
        .map(|t| format!("{:.2}°C", t))
        .unwrap_or_else(|| "unavailable".to_string())
}
