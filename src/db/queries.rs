use crate::db::Database;
use crate::error::{HerdOpsError, Result};
use crate::models::{Animal, AnimalFilter, AnimalPhoto, Gender, HealthLogEntry, HealthStatus};
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed-width UTC timestamps so stored values compare correctly as text.
fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            warn!(timestamp = %s, "Unparseable timestamp in database, using now");
            Utc::now()
        })
}

// Animal Queries

impl Database {
    /// Insert an animal, assigning a UUID when it has no id yet. Returns the id.
    pub fn create_animal(&self, animal: &Animal) -> Result<String> {
        let id = animal
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO animals
                    (id, rfid_tag, name, age, weight_kg, height_cm, gender, species, color,
                     birth_date, health_status, baseline_weight_kg, notes, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                "#,
                params![
                    id,
                    animal.rfid_tag,
                    animal.name,
                    animal.age,
                    animal.weight,
                    animal.height_cm,
                    animal.gender.as_str(),
                    animal.species,
                    animal.color,
                    animal.birth_date.map(|d| d.format(DATE_FORMAT).to_string()),
                    animal.health_status.as_stored(),
                    animal.baseline_weight,
                    animal.notes,
                    timestamp(&animal.created_at),
                    timestamp(&animal.updated_at),
                ],
            )?;
            Ok(())
        })?;

        tracing::info!(animal_id = %id, name = %animal.name, "Created animal");
        Ok(id)
    }

    pub fn get_animal(&self, id: &str) -> Result<Option<Animal>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT * FROM animals WHERE id = ?1", [id], row_to_animal)
                .optional()
                .map_err(Into::into)
        })
    }

    /// Like [`Database::get_animal`] but a missing animal is an error.
    pub fn require_animal(&self, id: &str) -> Result<Animal> {
        self.get_animal(id)?
            .ok_or_else(|| HerdOpsError::NotFound(format!("animal {}", id)))
    }

    pub fn list_animals(&self) -> Result<Vec<Animal>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM animals ORDER BY name COLLATE NOCASE, id")?;
            let animals = stmt
                .query_map([], row_to_animal)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(animals)
        })
    }

    /// Text search over name, species, color and RFID tag, then exact filters.
    ///
    /// Matching happens in Rust rather than SQL so that case folding covers
    /// non-ASCII names.
    pub fn search_animals(&self, query: Option<&str>, filter: &AnimalFilter) -> Result<Vec<Animal>> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let animals = self
            .list_animals()?
            .into_iter()
            .filter(|a| query.is_none_or(|q| a.matches_query(q)))
            .filter(|a| filter.matches(a))
            .collect();
        Ok(animals)
    }

    pub fn update_animal(&self, animal: &Animal) -> Result<()> {
        self.with_conn(|conn| update_animal_row(conn, animal))
    }

    /// Persist an animal after a measurement together with its log entry.
    /// Either both land or neither does.
    pub fn commit_measurement(
        &self,
        animal: &Animal,
        entry: Option<&HealthLogEntry>,
    ) -> Result<Option<i64>> {
        self.with_transaction(|tx| {
            update_animal_row(tx, animal)?;
            entry.map(|e| insert_health_log(tx, e)).transpose()
        })
    }

    pub fn delete_animal(&self, id: &str) -> Result<()> {
        let deleted =
            self.with_conn(|conn| Ok(conn.execute("DELETE FROM animals WHERE id = ?1", [id])?))?;
        if deleted == 0 {
            return Err(HerdOpsError::NotFound(format!("animal {}", id)));
        }
        tracing::info!(animal_id = %id, "Deleted animal");
        Ok(())
    }
}

fn update_animal_row(conn: &Connection, animal: &Animal) -> Result<()> {
    let id = animal
        .id
        .as_deref()
        .ok_or_else(|| HerdOpsError::InvalidData("Animal has no ID".into()))?;

    let updated = conn.execute(
        r#"
        UPDATE animals SET
            rfid_tag = ?1, name = ?2, age = ?3, weight_kg = ?4, height_cm = ?5,
            gender = ?6, species = ?7, color = ?8, birth_date = ?9,
            health_status = ?10, baseline_weight_kg = ?11, notes = ?12, updated_at = ?13
        WHERE id = ?14
        "#,
        params![
            animal.rfid_tag,
            animal.name,
            animal.age,
            animal.weight,
            animal.height_cm,
            animal.gender.as_str(),
            animal.species,
            animal.color,
            animal.birth_date.map(|d| d.format(DATE_FORMAT).to_string()),
            animal.health_status.as_stored(),
            animal.baseline_weight,
            animal.notes,
            timestamp(&Utc::now()),
            id,
        ],
    )?;

    if updated == 0 {
        return Err(HerdOpsError::NotFound(format!("animal {}", id)));
    }
    tracing::debug!(animal_id = %id, status = %animal.health_status, "Updated animal");
    Ok(())
}

fn row_to_animal(row: &Row) -> rusqlite::Result<Animal> {
    let gender_str: String = row.get("gender")?;
    let status_str: String = row.get("health_status")?;
    let birth_date_str: Option<String> = row.get("birth_date")?;
    let created_at_str: String = row.get("created_at")?;
    let updated_at_str: String = row.get("updated_at")?;

    let gender = Gender::from_str(&gender_str).unwrap_or_else(|| {
        warn!(gender = %gender_str, "Unknown gender in database, defaulting to Female");
        Gender::Female
    });
    let health_status = HealthStatus::from_str(&status_str).unwrap_or_else(|| {
        warn!(
            health_status = %status_str,
            "Unknown health_status in database, defaulting to Good"
        );
        HealthStatus::Good
    });
    let birth_date = birth_date_str.as_ref().and_then(|s| {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|_| warn!(birth_date = %s, "Unparseable birth_date in database, ignoring"))
            .ok()
    });

    Ok(Animal {
        id: Some(row.get("id")?),
        rfid_tag: row.get("rfid_tag")?,
        name: row.get("name")?,
        age: row.get("age")?,
        weight: row.get("weight_kg")?,
        height_cm: row.get("height_cm")?,
        gender,
        species: row.get("species")?,
        color: row.get("color")?,
        birth_date,
        health_status,
        baseline_weight: row.get("baseline_weight_kg")?,
        notes: row.get("notes")?,
        created_at: parse_timestamp(&created_at_str),
        updated_at: parse_timestamp(&updated_at_str),
    })
}

// Health Log Queries

impl Database {
    pub fn add_health_log(&self, entry: &HealthLogEntry) -> Result<i64> {
        self.with_conn(|conn| insert_health_log(conn, entry))
    }

    /// Entries measured within the last `days` days, oldest first.
    ///
    /// A window reaching past the representable date range returns everything.
    pub fn get_health_logs(&self, animal_id: &str, days: u32) -> Result<Vec<HealthLogEntry>> {
        // An empty string sorts before every stored timestamp.
        let since = Duration::try_days(i64::from(days))
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .map(|dt| timestamp(&dt))
            .unwrap_or_default();
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT * FROM health_logs
                WHERE animal_id = ?1 AND measured_at >= ?2
                ORDER BY measured_at ASC, id ASC
                "#,
            )?;
            let entries = stmt
                .query_map(params![animal_id, since], row_to_health_log)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
    }

    pub fn latest_health_log(&self, animal_id: &str) -> Result<Option<HealthLogEntry>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM health_logs WHERE animal_id = ?1 ORDER BY measured_at DESC, id DESC LIMIT 1",
                [animal_id],
                row_to_health_log,
            )
            .optional()
            .map_err(Into::into)
        })
    }
}

fn insert_health_log(conn: &Connection, entry: &HealthLogEntry) -> Result<i64> {
    if entry.is_empty() {
        return Err(HerdOpsError::InvalidData(
            "a health log entry needs a weight or a temperature".into(),
        ));
    }

    conn.execute(
        r#"
        INSERT INTO health_logs
            (animal_id, weight_kg, temperature_c, reference_weight_kg, measured_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            entry.animal_id,
            entry.weight,
            entry.temperature,
            entry.reference_weight,
            timestamp(&entry.measured_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_health_log(row: &Row) -> rusqlite::Result<HealthLogEntry> {
    let measured_at_str: String = row.get("measured_at")?;
    Ok(HealthLogEntry {
        id: Some(row.get("id")?),
        animal_id: row.get("animal_id")?,
        weight: row.get("weight_kg")?,
        temperature: row.get("temperature_c")?,
        reference_weight: row.get("reference_weight_kg")?,
        measured_at: parse_timestamp(&measured_at_str),
    })
}

// Photo Queries

impl Database {
    pub fn add_photo(&self, photo: &AnimalPhoto) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO animal_photos (animal_id, filename, taken_on, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    photo.animal_id,
                    photo.filename,
                    photo.taken_on.format(DATE_FORMAT).to_string(),
                    timestamp(&photo.created_at),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Photos for an animal, most recently taken first.
    pub fn list_photos(&self, animal_id: &str) -> Result<Vec<AnimalPhoto>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM animal_photos WHERE animal_id = ?1 ORDER BY taken_on DESC, id DESC",
            )?;
            let photos = stmt
                .query_map([animal_id], row_to_photo)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(photos)
        })
    }

    pub fn get_photo(&self, id: i64) -> Result<Option<AnimalPhoto>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM animal_photos WHERE id = ?1",
                [id],
                row_to_photo,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn delete_photo(&self, id: i64) -> Result<()> {
        let deleted = self.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM animal_photos WHERE id = ?1", [id])?)
        })?;
        if deleted == 0 {
            return Err(HerdOpsError::NotFound(format!("photo {}", id)));
        }
        Ok(())
    }
}

fn row_to_photo(row: &Row) -> rusqlite::Result<AnimalPhoto> {
    let taken_on_str: String = row.get("taken_on")?;
    let created_at_str: String = row.get("created_at")?;

    let taken_on = NaiveDate::parse_from_str(&taken_on_str, DATE_FORMAT).unwrap_or_else(|_| {
        warn!(taken_on = %taken_on_str, "Unparseable taken_on in database, using today");
        Utc::now().date_naive()
    });

    Ok(AnimalPhoto {
        id: Some(row.get("id")?),
        animal_id: row.get("animal_id")?,
        filename: row.get("filename")?,
        taken_on,
        created_at: parse_timestamp(&created_at_str),
    })
}
