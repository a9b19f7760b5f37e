use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "erkek" => Some(Gender::Male),
            "female" | "f" | "dişi" | "disi" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health status committed on an animal record.
///
/// Variants are ordered by severity so `Good < Warning < Critical`. The stored
/// string forms are shared with the display layer and must not change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthStatus {
    #[default]
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Stored form persisted on the animal record.
    pub fn as_stored(&self) -> &'static str {
        match self {
            HealthStatus::Good => "İyi",
            HealthStatus::Warning => "UYARI",
            HealthStatus::Critical => "KRİTİK",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Good => "Good",
            HealthStatus::Warning => "Warning",
            HealthStatus::Critical => "Critical",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Good => "✅",
            HealthStatus::Warning => "🟡",
            HealthStatus::Critical => "🔴",
        }
    }

    /// Parses either the stored form or an English name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "İyi" | "İYİ" => return Some(HealthStatus::Good),
            "UYARI" => return Some(HealthStatus::Warning),
            "KRİTİK" => return Some(HealthStatus::Critical),
            _ => {}
        }
        match s.trim().to_lowercase().as_str() {
            "good" | "iyi" => Some(HealthStatus::Good),
            "warning" | "warn" | "uyari" => Some(HealthStatus::Warning),
            "critical" | "kritik" => Some(HealthStatus::Critical),
            _ => None,
        }
    }

    pub fn all() -> &'static [HealthStatus] {
        &[
            HealthStatus::Good,
            HealthStatus::Warning,
            HealthStatus::Critical,
        ]
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: Option<String>,
    pub rfid_tag: String,
    pub name: String,
    pub age: u32,
    /// Last known weight in kg. Doubles as the baseline when none is set.
    pub weight: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Gender,
    pub species: String,
    pub color: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub health_status: HealthStatus,
    pub baseline_weight: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Animal {
    pub fn new(rfid_tag: &str, name: &str, species: &str, gender: Gender) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            rfid_tag: rfid_tag.to_string(),
            name: name.to_string(),
            age: 0,
            weight: None,
            height_cm: None,
            gender,
            species: species.to_string(),
            color: None,
            birth_date: None,
            health_status: HealthStatus::Good,
            baseline_weight: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_weight(mut self, kg: f64) -> Self {
        self.weight = Some(kg);
        self
    }

    pub fn with_height(mut self, cm: f64) -> Self {
        self.height_cm = Some(cm);
        self
    }

    pub fn with_baseline_weight(mut self, kg: f64) -> Self {
        self.baseline_weight = Some(kg);
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn with_status(mut self, status: HealthStatus) -> Self {
        self.health_status = status;
        self
    }

    /// Case-insensitive substring match over name, species, color and RFID tag.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.species.to_lowercase().contains(&q)
            || self
                .color
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&q))
            || self.rfid_tag.to_lowercase().contains(&q)
    }
}

impl std::fmt::Display for Animal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.species)
    }
}

/// Optional exact-match filters applied on top of a text search.
#[derive(Debug, Clone, Default)]
pub struct AnimalFilter {
    pub species: Option<String>,
    pub gender: Option<Gender>,
    pub health_status: Option<HealthStatus>,
}

impl AnimalFilter {
    pub fn matches(&self, animal: &Animal) -> bool {
        self.species.as_ref().is_none_or(|s| &animal.species == s)
            && self.gender.is_none_or(|g| animal.gender == g)
            && self
                .health_status
                .is_none_or(|s| animal.health_status == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_stored_forms() {
        assert_eq!(HealthStatus::Good.as_stored(), "İyi");
        assert_eq!(HealthStatus::Warning.as_stored(), "UYARI");
        assert_eq!(HealthStatus::Critical.as_stored(), "KRİTİK");
    }

    #[test]
    fn health_status_from_stored_round_trip() {
        for status in HealthStatus::all() {
            assert_eq!(
                HealthStatus::from_str(status.as_stored()),
                Some(*status),
                "Round-trip failed for {:?}",
                status
            );
        }
    }

    #[test]
    fn health_status_from_english_names() {
        assert_eq!(HealthStatus::from_str("good"), Some(HealthStatus::Good));
        assert_eq!(HealthStatus::from_str("Warning"), Some(HealthStatus::Warning));
        assert_eq!(
            HealthStatus::from_str("CRITICAL"),
            Some(HealthStatus::Critical)
        );
        assert_eq!(HealthStatus::from_str("sick"), None);
        assert_eq!(HealthStatus::from_str(""), None);
    }

    #[test]
    fn health_status_severity_order() {
        assert!(HealthStatus::Good < HealthStatus::Warning);
        assert!(HealthStatus::Warning < HealthStatus::Critical);
    }

    #[test]
    fn gender_from_str() {
        assert_eq!(Gender::from_str("male"), Some(Gender::Male));
        assert_eq!(Gender::from_str("F"), Some(Gender::Female));
        assert_eq!(Gender::from_str("Erkek"), Some(Gender::Male));
        assert_eq!(Gender::from_str("Dişi"), Some(Gender::Female));
        assert_eq!(Gender::from_str("other"), None);
    }

    #[test]
    fn animal_query_matches_fields() {
        let animal = Animal::new("RF-0042", "Sarıkız", "Cow", Gender::Female).with_color("Brown");

        assert!(animal.matches_query("sarı"));
        assert!(animal.matches_query("cow"));
        assert!(animal.matches_query("brown"));
        assert!(animal.matches_query("rf-00"));
        assert!(!animal.matches_query("sheep"));
    }

    #[test]
    fn animal_filter_combines_fields() {
        let animal = Animal::new("RF-1", "Bella", "Cow", Gender::Female)
            .with_status(HealthStatus::Warning);

        assert!(AnimalFilter::default().matches(&animal));

        let filter = AnimalFilter {
            species: Some("Cow".into()),
            gender: Some(Gender::Female),
            health_status: Some(HealthStatus::Warning),
        };
        assert!(filter.matches(&animal));

        let filter = AnimalFilter {
            health_status: Some(HealthStatus::Good),
            ..Default::default()
        };
        assert!(!filter.matches(&animal));
    }
}
