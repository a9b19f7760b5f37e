use super::analyze_health;
use crate::models::{Animal, HealthAssessment, HealthStatus};

/// Assess the animal and write the result into its stored health status.
///
/// The stored status only ever moves to an equal or worse value here:
/// - Critical always overwrites.
/// - Warning overwrites unless the record is already Critical.
/// - Good is only written over Good.
///
/// Clearing a Warning or Critical flag needs [`reset_health_status`].
/// The caller persists the animal afterwards.
pub fn update_animal_health_status(
    animal: &mut Animal,
    temperature: Option<f64>,
    current_weight: Option<f64>,
) -> HealthAssessment {
    let assessment = analyze_health(animal, temperature, current_weight);
    animal.health_status = ratchet(animal.health_status, assessment.overall_status);
    assessment
}

/// Explicitly set the stored status, bypassing the ratchet.
pub fn reset_health_status(animal: &mut Animal, status: HealthStatus) {
    animal.health_status = status;
}

fn ratchet(stored: HealthStatus, overall: HealthStatus) -> HealthStatus {
    match overall {
        HealthStatus::Critical => HealthStatus::Critical,
        HealthStatus::Warning if stored == HealthStatus::Critical => stored,
        HealthStatus::Warning => HealthStatus::Warning,
        HealthStatus::Good if stored != HealthStatus::Good => stored,
        HealthStatus::Good => HealthStatus::Good,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn cow(status: HealthStatus) -> Animal {
        Animal::new("RF-1", "Bella", "Cow", Gender::Female)
            .with_baseline_weight(500.0)
            .with_status(status)
    }

    #[test]
    fn ratchet_table() {
        use HealthStatus::*;
        let cases = [
            (Good, Good, Good),
            (Good, Warning, Warning),
            (Good, Critical, Critical),
            (Warning, Good, Warning),
            (Warning, Warning, Warning),
            (Warning, Critical, Critical),
            (Critical, Good, Critical),
            (Critical, Warning, Critical),
            (Critical, Critical, Critical),
        ];
        for (stored, overall, expected) in cases {
            assert_eq!(
                ratchet(stored, overall),
                expected,
                "stored {:?} overall {:?}",
                stored,
                overall
            );
        }
    }

    #[test]
    fn good_reading_does_not_clear_critical() {
        let mut animal = cow(HealthStatus::Critical);
        let assessment = update_animal_health_status(&mut animal, Some(37.5), Some(500.0));

        assert_eq!(assessment.overall_status, HealthStatus::Good);
        assert_eq!(animal.health_status, HealthStatus::Critical);
        assert_eq!(animal.health_status.as_stored(), "KRİTİK");
    }

    #[test]
    fn good_reading_does_not_clear_warning() {
        let mut animal = cow(HealthStatus::Warning);
        update_animal_health_status(&mut animal, Some(37.5), Some(500.0));
        assert_eq!(animal.health_status.as_stored(), "UYARI");
    }

    #[test]
    fn warning_reading_raises_good() {
        let mut animal = cow(HealthStatus::Good);
        update_animal_health_status(&mut animal, Some(39.0), None);
        assert_eq!(animal.health_status.as_stored(), "UYARI");
    }

    #[test]
    fn warning_reading_keeps_critical() {
        let mut animal = cow(HealthStatus::Critical);
        update_animal_health_status(&mut animal, Some(39.0), None);
        assert_eq!(animal.health_status, HealthStatus::Critical);
    }

    #[test]
    fn critical_reading_overrides_warning() {
        let mut animal = cow(HealthStatus::Warning);
        update_animal_health_status(&mut animal, Some(40.0), None);
        assert_eq!(animal.health_status, HealthStatus::Critical);
    }

    #[test]
    fn weight_loss_scenario_sets_warning() {
        let mut animal = cow(HealthStatus::Good);
        let assessment = update_animal_health_status(&mut animal, Some(37.0), Some(440.0));

        assert_eq!(assessment.overall_status, HealthStatus::Warning);
        assert_eq!(assessment.alerts.len(), 1);
        assert_eq!(animal.health_status.as_stored(), "UYARI");
    }

    #[test]
    fn no_data_does_not_downgrade_critical() {
        let mut animal = Animal::new("RF-2", "Kara", "Cow", Gender::Female)
            .with_baseline_weight(0.0)
            .with_status(HealthStatus::Critical);
        let assessment = update_animal_health_status(&mut animal, None, None);

        assert!(assessment.has_no_data());
        assert_eq!(assessment.overall_status, HealthStatus::Good);
        assert!(assessment.alerts.is_empty());
        assert_eq!(animal.health_status, HealthStatus::Critical);
    }

    #[test]
    fn update_leaves_other_fields_untouched() {
        let mut animal = cow(HealthStatus::Good).with_weight(480.0);
        update_animal_health_status(&mut animal, Some(37.0), Some(300.0));

        assert_eq!(animal.weight, Some(480.0));
        assert_eq!(animal.baseline_weight, Some(500.0));
    }

    #[test]
    fn reset_clears_flag() {
        let mut animal = cow(HealthStatus::Critical);
        reset_health_status(&mut animal, HealthStatus::Good);
        assert_eq!(animal.health_status, HealthStatus::Good);

        update_animal_health_status(&mut animal, Some(37.0), Some(500.0));
        assert_eq!(animal.health_status, HealthStatus::Good);
    }
}
