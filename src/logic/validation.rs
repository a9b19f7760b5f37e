use crate::error::{HerdOpsError, Result};
use crate::models::{Animal, Measurement};

pub const MAX_AGE_YEARS: u32 = 50;
pub const MAX_WEIGHT_KG: f64 = 2000.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;

/// Check an animal record before it is written.
///
/// `species` is the configured species list; an empty list accepts anything.
pub fn validate_animal(animal: &Animal, species: &[String]) -> Result<()> {
    require_text("rfid_tag", &animal.rfid_tag)?;
    require_text("name", &animal.name)?;
    require_text("species", &animal.species)?;

    if animal.age > MAX_AGE_YEARS {
        return Err(invalid(format!(
            "age must be between 0 and {} years",
            MAX_AGE_YEARS
        )));
    }

    check_range("weight", animal.weight, MAX_WEIGHT_KG, "kg")?;
    check_range("baseline_weight", animal.baseline_weight, MAX_WEIGHT_KG, "kg")?;
    check_range("height", animal.height_cm, MAX_HEIGHT_CM, "cm")?;

    if !species.is_empty() && !species.iter().any(|s| s == &animal.species) {
        return Err(invalid(format!(
            "species '{}' is not one of: {}",
            animal.species,
            species.join(", ")
        )));
    }

    Ok(())
}

/// Check readings before they touch a stored record.
///
/// Weights follow the same limits as the animal record. Temperatures only
/// need to be real numbers; the classifier decides what is implausible.
pub fn validate_measurement(measurement: &Measurement) -> Result<()> {
    check_range("weight", measurement.weight, MAX_WEIGHT_KG, "kg")?;
    if measurement.temperature.is_some_and(|t| !t.is_finite()) {
        return Err(invalid("temperature must be a number".into()));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} is required", field)));
    }
    Ok(())
}

fn check_range(field: &str, value: Option<f64>, max: f64, unit: &str) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=max).contains(&v) => Err(invalid(format!(
            "{} must be between 0 and {} {}",
            field, max, unit
        ))),
        _ => Ok(()),
    }
}

fn invalid(msg: String) -> HerdOpsError {
    HerdOpsError::InvalidData(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn valid_cow() -> Animal {
        Animal::new("RF-0001", "Bella", "Cow", Gender::Female)
            .with_age(4)
            .with_weight(520.0)
            .with_height(140.0)
    }

    fn species() -> Vec<String> {
        vec!["Cow".to_string(), "Sheep".to_string()]
    }

    #[test]
    fn valid_animal_passes() {
        assert!(validate_animal(&valid_cow(), &species()).is_ok());
        assert!(validate_animal(&valid_cow(), &[]).is_ok());
    }

    #[test]
    fn required_fields() {
        let mut animal = valid_cow();
        animal.name = "  ".into();
        let err = validate_animal(&animal, &species()).unwrap_err();
        assert!(err.to_string().contains("name"));

        let mut animal = valid_cow();
        animal.rfid_tag = String::new();
        let err = validate_animal(&animal, &species()).unwrap_err();
        assert!(err.to_string().contains("rfid_tag"));
    }

    #[test]
    fn age_limit() {
        let animal = valid_cow().with_age(51);
        assert!(validate_animal(&animal, &species()).is_err());
        let animal = valid_cow().with_age(50);
        assert!(validate_animal(&animal, &species()).is_ok());
    }

    #[test]
    fn weight_and_height_limits() {
        assert!(validate_animal(&valid_cow().with_weight(2000.0), &species()).is_ok());
        assert!(validate_animal(&valid_cow().with_weight(2000.1), &species()).is_err());
        assert!(validate_animal(&valid_cow().with_weight(-1.0), &species()).is_err());
        assert!(validate_animal(&valid_cow().with_height(301.0), &species()).is_err());
        assert!(validate_animal(&valid_cow().with_baseline_weight(f64::NAN), &species()).is_err());
    }

    #[test]
    fn measurement_limits() {
        assert!(validate_measurement(&Measurement::new(Some(38.0), Some(2000.0))).is_ok());
        assert!(validate_measurement(&Measurement::new(Some(45.0), None)).is_ok());

        let err = validate_measurement(&Measurement::new(None, Some(5000.0))).unwrap_err();
        assert!(err.to_string().contains("weight"));
        assert!(validate_measurement(&Measurement::new(None, Some(f64::NAN))).is_err());
        assert!(validate_measurement(&Measurement::new(None, Some(-3.0))).is_err());

        let err = validate_measurement(&Measurement::new(Some(f64::INFINITY), None)).unwrap_err();
        assert!(err.to_string().contains("temperature"));
        assert!(validate_measurement(&Measurement::new(Some(f64::NAN), None)).is_err());
    }

    #[test]
    fn unknown_species_rejected() {
        let mut animal = valid_cow();
        animal.species = "Llama".into();
        let err = validate_animal(&animal, &species()).unwrap_err();
        assert!(err.to_string().contains("Llama"));
        assert!(validate_animal(&animal, &[]).is_ok());
    }
}
