use crate::db::Database;
use crate::error::{HerdOpsError, Result};
use crate::logic::health::{analyze_health, update_animal_health_status};
use crate::logic::validation::validate_measurement;
use crate::models::{Animal, HealthAssessment, HealthStatus, Measurement};

#[derive(Debug, Clone)]
pub struct MeasurementOutcome {
    /// The animal as persisted after the measurement.
    pub animal: Animal,
    pub previous_status: HealthStatus,
    pub assessment: HealthAssessment,
    pub log_id: Option<i64>,
}

impl MeasurementOutcome {
    pub fn status_changed(&self) -> bool {
        self.previous_status != self.animal.health_status
    }
}

/// Evaluate a measurement, commit the resulting status and record it in the
/// health history.
///
/// The engine compares the new weight against the animal's previous last-known
/// weight; only afterwards does the new weight replace it. The weight it was
/// compared against is kept on the log entry. The animal update and the log
/// entry are written in one transaction.
pub fn record_measurement(
    db: &Database,
    animal_id: &str,
    measurement: Measurement,
    append_log: bool,
) -> Result<MeasurementOutcome> {
    if measurement.is_empty() {
        return Err(HerdOpsError::InvalidData(
            "a measurement needs a temperature or a weight".into(),
        ));
    }
    validate_measurement(&measurement)?;

    let mut animal = db.require_animal(animal_id)?;
    let previous_status = animal.health_status;

    let assessment =
        update_animal_health_status(&mut animal, measurement.temperature, measurement.weight);

    if let Some(weight) = measurement.weight {
        animal.weight = Some(weight);
    }
    let entry = append_log.then(|| {
        measurement
            .to_log_entry(animal_id)
            .with_reference_weight(assessment.weight_result.reference_value)
    });
    let log_id = db.commit_measurement(&animal, entry.as_ref())?;

    if previous_status != animal.health_status {
        tracing::info!(
            animal_id = %animal_id,
            from = %previous_status,
            to = %animal.health_status,
            "Health status changed"
        );
    }

    Ok(MeasurementOutcome {
        animal,
        previous_status,
        assessment,
        log_id,
    })
}

/// Assess an animal against its most recent logged measurement, without
/// changing anything. `None` when nothing has been logged yet.
///
/// The logged weight is compared against the reference recorded with it, not
/// the animal's current weight, which by now is that same reading.
pub fn latest_assessment(db: &Database, animal: &Animal) -> Result<Option<HealthAssessment>> {
    let Some(id) = animal.id.as_deref() else {
        return Ok(None);
    };
    Ok(db.latest_health_log(id)?.map(|entry| {
        let mut profile = animal.clone();
        profile.baseline_weight = entry.reference_weight.or(animal.baseline_weight);
        profile.weight = None;
        analyze_health(&profile, entry.temperature, entry.weight)
    }))
}
