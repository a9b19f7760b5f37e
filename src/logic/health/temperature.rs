use crate::models::{Classification, ClassificationResult};

/// Below this body temperature (°C) the animal is hypothermic.
pub const HYPOTHERMIA_THRESHOLD_C: f64 = 36.0;

/// Above this body temperature (°C) the animal has a critical fever.
pub const CRITICAL_FEVER_THRESHOLD_C: f64 = 39.5;

/// Above this body temperature (°C) the reading is elevated but not critical.
pub const ELEVATED_THRESHOLD_C: f64 = 38.5;

/// Classify a body temperature reading in °C.
///
/// Rules, first match wins:
/// - No reading: Unknown
/// - Below 36.0: Critical (hypothermia)
/// - Above 39.5: Critical (fever)
/// - Above 38.5: Warning
/// - Otherwise: Good
///
/// All comparisons are strict, so 36.0 and 38.5 are Good and 39.5 is Warning.
/// Values are not range checked.
pub fn classify_temperature(temperature: Option<f64>) -> ClassificationResult {
    let Some(temp) = temperature else {
        return ClassificationResult::unknown("no temperature data available");
    };

    if temp < HYPOTHERMIA_THRESHOLD_C {
        ClassificationResult::new(
            Classification::Critical,
            format!(
                "Hypothermia: {:.2}°C (threshold {:.1}°C)",
                temp, HYPOTHERMIA_THRESHOLD_C
            ),
        )
        .with_metric(temp)
        .with_reference(HYPOTHERMIA_THRESHOLD_C)
    } else if temp > CRITICAL_FEVER_THRESHOLD_C {
        ClassificationResult::new(
            Classification::Critical,
            format!(
                "Critical fever: {:.2}°C (threshold {:.1}°C)",
                temp, CRITICAL_FEVER_THRESHOLD_C
            ),
        )
        .with_metric(temp)
        .with_reference(CRITICAL_FEVER_THRESHOLD_C)
    } else if temp > ELEVATED_THRESHOLD_C {
        ClassificationResult::new(
            Classification::Warning,
            format!("Elevated temperature: {:.2}°C", temp),
        )
        .with_metric(temp)
        .with_reference(ELEVATED_THRESHOLD_C)
    } else {
        ClassificationResult::new(
            Classification::Good,
            format!("Normal temperature: {:.2}°C", temp),
        )
        .with_metric(temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(temp: Option<f64>) -> Classification {
        classify_temperature(temp).status
    }

    #[test]
    fn missing_reading_is_unknown() {
        let result = classify_temperature(None);
        assert_eq!(result.status, Classification::Unknown);
        assert!(result.metric_value.is_none());
        assert_eq!(result.message, "no temperature data available");
    }

    #[test]
    fn hypothermia_boundary() {
        assert_eq!(status(Some(36.0)), Classification::Good);
        assert_eq!(status(Some(35.999)), Classification::Critical);
        assert_eq!(status(Some(30.0)), Classification::Critical);
    }

    #[test]
    fn elevated_boundary() {
        assert_eq!(status(Some(38.5)), Classification::Good);
        assert_eq!(status(Some(38.51)), Classification::Warning);
    }

    #[test]
    fn fever_boundary() {
        assert_eq!(status(Some(39.5)), Classification::Warning);
        assert_eq!(status(Some(39.51)), Classification::Critical);
        assert_eq!(status(Some(41.0)), Classification::Critical);
    }

    #[test]
    fn normal_range() {
        for temp in [36.0, 37.0, 38.0, 38.5] {
            assert_eq!(status(Some(temp)), Classification::Good, "temp {}", temp);
        }
    }

    #[test]
    fn implausible_values_pass_through() {
        assert_eq!(status(Some(-10.0)), Classification::Critical);
        assert_eq!(status(Some(120.0)), Classification::Critical);
    }

    #[test]
    fn critical_messages_report_value_and_threshold() {
        let fever = classify_temperature(Some(40.0));
        assert!(fever.message.contains("40.00"));
        assert!(fever.message.contains("39.5"));
        assert_eq!(fever.metric_value, Some(40.0));
        assert_eq!(fever.reference_value, Some(CRITICAL_FEVER_THRESHOLD_C));

        let cold = classify_temperature(Some(35.0));
        assert!(cold.message.contains("35.00"));
        assert!(cold.message.contains("36.0"));
        assert_eq!(cold.reference_value, Some(HYPOTHERMIA_THRESHOLD_C));
    }

    #[test]
    fn warning_message_reports_value() {
        let result = classify_temperature(Some(39.0));
        assert!(result.message.contains("39.00"));
        assert_eq!(result.metric_value, Some(39.0));
    }
}
