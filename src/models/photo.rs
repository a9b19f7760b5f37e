use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalPhoto {
    pub id: Option<i64>,
    pub animal_id: String,
    /// File name inside the animal's photo directory.
    pub filename: String,
    pub taken_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl AnimalPhoto {
    pub fn new(animal_id: &str, filename: &str, taken_on: NaiveDate) -> Self {
        Self {
            id: None,
            animal_id: animal_id.to_string(),
            filename: filename.to_string(),
            taken_on,
            created_at: Utc::now(),
        }
    }
}
