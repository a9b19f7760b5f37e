//! Plain-text rendering for command output.

use crate::error::Result;
use crate::models::{
    Animal, AnimalPhoto, ClassificationResult, HealthAssessment, HealthLogEntry, HistorySummary,
};
use serde::Serialize;
use std::fmt::Write;

/// Pretty-printed JSON for `--json` output.
pub fn json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn animal_row(animal: &Animal) -> String {
    format!(
        "{} {:<36} {:<10} {:<16} {:<12} {:<7} {}",
        animal.health_status.symbol(),
        animal.id.as_deref().unwrap_or("-"),
        animal.rfid_tag,
        animal.name,
        animal.species,
        animal.gender.as_str(),
        kg(animal.weight),
    )
}

pub fn animal_details(animal: &Animal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", animal);
    let _ = writeln!(out, "  ID:              {}", animal.id.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "  RFID:            {}", animal.rfid_tag);
    let _ = writeln!(out, "  Gender:          {}", animal.gender);
    let _ = writeln!(out, "  Age:             {} years", animal.age);
    let _ = writeln!(out, "  Weight:          {}", kg(animal.weight));
    let _ = writeln!(out, "  Baseline weight: {}", kg(animal.baseline_weight));
    let _ = writeln!(
        out,
        "  Height:          {}",
        animal
            .height_cm
            .map(|h| format!("{:.0} cm", h))
            .unwrap_or_else(|| "-".into())
    );
    if let Some(color) = &animal.color {
        let _ = writeln!(out, "  Color:           {}", color);
    }
    if let Some(date) = animal.birth_date {
        let _ = writeln!(out, "  Born:            {}", date);
    }
    let _ = writeln!(
        out,
        "  Health status:   {} {} ({})",
        animal.health_status.symbol(),
        animal.health_status,
        animal.health_status.as_stored()
    );
    if let Some(notes) = &animal.notes {
        let _ = writeln!(out, "  Notes:           {}", notes);
    }
    out
}

pub fn assessment(assessment: &HealthAssessment) -> String {
    let mut out = String::new();

    if assessment.has_no_data() {
        let _ = writeln!(out, "Assessment: no data");
    } else {
        let _ = writeln!(
            out,
            "Assessment: {} {}",
            assessment.overall_status.symbol(),
            assessment.overall_status
        );
    }

    let _ = writeln!(out, "  Temperature: {}", classification(&assessment.temperature_result));
    let _ = writeln!(out, "  Weight:      {}", classification(&assessment.weight_result));

    for alert in &assessment.alerts {
        let _ = writeln!(
            out,
            "  {} [{}] {}",
            alert.icon.symbol(),
            alert.level.as_str(),
            alert.message
        );
    }
    out
}

fn classification(result: &ClassificationResult) -> String {
    format!("{:<8} {}", result.status.as_str(), result.message)
}

pub fn history(entries: &[HealthLogEntry], summary: &HistorySummary, days: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Last {} days: {} entries", days, summary.entries);

    for entry in entries {
        let _ = writeln!(
            out,
            "  {}  {:>10}  {:>8}",
            entry.measured_at.format("%Y-%m-%d %H:%M"),
            kg(entry.weight),
            celsius(entry.temperature),
        );
    }

    if summary.entries > 0 {
        let _ = writeln!(
            out,
            "  Weight: latest {}, range {} – {}, trend {}",
            kg(summary.latest_weight),
            kg(summary.min_weight),
            kg(summary.max_weight),
            summary.weight_trend
        );
        let _ = writeln!(
            out,
            "  Temperature: avg {}, range {} – {}",
            celsius(summary.avg_temperature),
            celsius(summary.min_temperature),
            celsius(summary.max_temperature)
        );
    }
    out
}

pub fn photo_row(photo: &AnimalPhoto) -> String {
    format!(
        "{:>6}  {}  {}",
        photo.id.unwrap_or_default(),
        photo.taken_on,
        photo.filename
    )
}

fn kg(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1} kg", v))
        .unwrap_or_else(|| "-".into())
}

fn celsius(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}°C", v))
        .unwrap_or_else(|| "-".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::health::analyze_health;
    use crate::models::{Gender, HealthStatus};

    #[test]
    fn no_data_is_not_rendered_as_good() {
        let animal = Animal::new("RF-1", "Bella", "Cow", Gender::Female);
        let out = assessment(&analyze_health(&animal, None, None));
        assert!(out.contains("no data"));
        assert!(!out.contains("Assessment: ✅"));
    }

    #[test]
    fn alerts_rendered_in_order() {
        let animal = Animal::new("RF-1", "Bella", "Cow", Gender::Female).with_baseline_weight(500.0);
        let out = assessment(&analyze_health(&animal, Some(40.0), Some(400.0)));

        let fire = out.find("🔥").unwrap();
        let scale = out.find("⚖️").unwrap();
        assert!(fire < scale);
        assert!(out.contains("Critical"));
    }

    #[test]
    fn json_output_names_variants() {
        let animal = Animal::new("RF-1", "Bella", "Cow", Gender::Female).with_baseline_weight(500.0);
        let out = json(&analyze_health(&animal, Some(37.0), Some(440.0))).unwrap();
        assert!(out.contains("\"overall_status\": \"Warning\""));
        assert!(out.contains("\"direction\": \"Loss\""));
        assert!(out.contains("Scale"));
    }

    #[test]
    fn details_show_stored_status() {
        let animal = Animal::new("RF-1", "Bella", "Cow", Gender::Female)
            .with_status(HealthStatus::Critical);
        let out = animal_details(&animal);
        assert!(out.contains("KRİTİK"));
        assert!(out.contains("Bella (Cow)"));
    }
}
