use crate::models::{HealthLogEntry, HistorySummary, Trend};

/// Weight changes smaller than this fraction of the first reading count as stable.
const STABLE_WEIGHT_FRACTION: f64 = 0.01;

/// Summarize a window of health log entries, ordered oldest first.
pub fn summarize_history(entries: &[HealthLogEntry]) -> HistorySummary {
    let weights: Vec<f64> = entries.iter().filter_map(|e| e.weight).collect();
    let temps: Vec<f64> = entries.iter().filter_map(|e| e.temperature).collect();

    let weight_change = match (weights.first(), weights.last()) {
        (Some(first), Some(last)) if weights.len() >= 2 => Some(last - first),
        _ => None,
    };

    HistorySummary {
        entries: entries.len(),
        latest_weight: weights.last().copied(),
        min_weight: min(&weights),
        max_weight: max(&weights),
        weight_change,
        weight_trend: weight_trend(weights.first().copied(), weight_change),
        avg_temperature: average(&temps),
        min_temperature: min(&temps),
        max_temperature: max(&temps),
    }
}

fn weight_trend(first: Option<f64>, change: Option<f64>) -> Trend {
    match (first, change) {
        (Some(first), Some(change)) if first != 0.0 => {
            if (change / first).abs() < STABLE_WEIGHT_FRACTION {
                Trend::Stable
            } else if change > 0.0 {
                Trend::Rising
            } else {
                Trend::Falling
            }
        }
        _ => Trend::Unknown,
    }
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(weight: Option<f64>, temperature: Option<f64>) -> HealthLogEntry {
        HealthLogEntry::new("a", weight, temperature)
    }

    #[test]
    fn empty_history() {
        let summary = summarize_history(&[]);
        assert_eq!(summary.entries, 0);
        assert!(summary.latest_weight.is_none());
        assert!(summary.avg_temperature.is_none());
        assert_eq!(summary.weight_trend, Trend::Unknown);
    }

    #[test]
    fn weight_and_temperature_stats() {
        let entries = [
            entry(Some(500.0), Some(38.0)),
            entry(None, Some(39.0)),
            entry(Some(470.0), None),
            entry(Some(450.0), Some(37.0)),
        ];
        let summary = summarize_history(&entries);

        assert_eq!(summary.entries, 4);
        assert_eq!(summary.latest_weight, Some(450.0));
        assert_eq!(summary.min_weight, Some(450.0));
        assert_eq!(summary.max_weight, Some(500.0));
        assert_eq!(summary.weight_change, Some(-50.0));
        assert_eq!(summary.weight_trend, Trend::Falling);
        assert!((summary.avg_temperature.unwrap() - 38.0).abs() < 1e-9);
        assert_eq!(summary.min_temperature, Some(37.0));
        assert_eq!(summary.max_temperature, Some(39.0));
    }

    #[test]
    fn small_change_is_stable() {
        let entries = [entry(Some(500.0), None), entry(Some(503.0), None)];
        assert_eq!(summarize_history(&entries).weight_trend, Trend::Stable);

        let entries = [entry(Some(500.0), None), entry(Some(520.0), None)];
        assert_eq!(summarize_history(&entries).weight_trend, Trend::Rising);
    }

    #[test]
    fn single_weight_has_no_trend() {
        let entries = [entry(Some(500.0), Some(38.0))];
        let summary = summarize_history(&entries);
        assert!(summary.weight_change.is_none());
        assert_eq!(summary.weight_trend, Trend::Unknown);
    }
}
