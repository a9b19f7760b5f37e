use crate::models::{Classification, ClassificationResult, WeightDirection};

/// At or below this fraction of the baseline the animal has lost too much weight.
pub const LOSS_RATIO: f64 = 0.90;

/// At or above this fraction of the baseline the animal has gained too much weight.
pub const GAIN_RATIO: f64 = 1.10;

/// Classify a weight reading against the animal's baseline.
///
/// The baseline is `baseline_weight` unless it is missing or zero, in which case
/// `stored_weight_fallback` is used under the same rule. With no usable baseline,
/// or no current reading, the result is Unknown.
///
/// A change of 10% or more in either direction is a Warning. Weight alone never
/// produces Critical.
pub fn classify_weight(
    current_weight: Option<f64>,
    baseline_weight: Option<f64>,
    stored_weight_fallback: Option<f64>,
) -> ClassificationResult {
    let Some(baseline) = resolve_baseline(baseline_weight, stored_weight_fallback) else {
        let result = ClassificationResult::unknown("no profile weight available");
        return match current_weight {
            Some(current) => result.with_metric(current),
            None => result,
        };
    };

    let Some(current) = current_weight else {
        return ClassificationResult::unknown("no current weight data").with_reference(baseline);
    };

    let ratio = current / baseline;
    let change_percent = (ratio - 1.0).abs() * 100.0;

    if ratio <= LOSS_RATIO {
        ClassificationResult::new(
            Classification::Warning,
            format!(
                "Weight loss detected: {:.1} kg (baseline {:.1} kg, loss {:.1}%)",
                current, baseline, change_percent
            ),
        )
        .with_metric(current)
        .with_reference(baseline)
        .with_change(WeightDirection::Loss, change_percent)
    } else if ratio >= GAIN_RATIO {
        ClassificationResult::new(
            Classification::Warning,
            format!(
                "Weight gain detected: {:.1} kg (baseline {:.1} kg, gain {:.1}%)",
                current, baseline, change_percent
            ),
        )
        .with_metric(current)
        .with_reference(baseline)
        .with_change(WeightDirection::Gain, change_percent)
    } else {
        ClassificationResult::new(
            Classification::Good,
            format!(
                "Weight normal: {:.1} kg (baseline {:.1} kg)",
                current, baseline
            ),
        )
        .with_metric(current)
        .with_reference(baseline)
        .with_change(WeightDirection::Stable, change_percent)
    }
}

/// Zero is treated the same as missing for both candidates.
fn resolve_baseline(baseline: Option<f64>, fallback: Option<f64>) -> Option<f64> {
    baseline
        .filter(|w| *w != 0.0)
        .or_else(|| fallback.filter(|w| *w != 0.0))
}
