use crate::db::Database;
use crate::error::{HerdOpsError, Result};
use crate::models::AnimalPhoto;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Dated photos stored under `<root>/<animal_id>/` with an index in the database.
pub struct PhotoLibrary {
    db: Database,
    root: PathBuf,
}

impl PhotoLibrary {
    pub fn new(db: Database, root: PathBuf) -> Self {
        Self { db, root }
    }

    pub fn path_for(&self, photo: &AnimalPhoto) -> PathBuf {
        self.root.join(&photo.animal_id).join(&photo.filename)
    }

    /// Copy `source` into the library and record it against the animal.
    pub fn attach(&self, animal_id: &str, source: &Path, taken_on: NaiveDate) -> Result<AnimalPhoto> {
        self.db.require_animal(animal_id)?;

        if !source.is_file() {
            return Err(HerdOpsError::NotFound(format!(
                "photo file {}",
                source.display()
            )));
        }

        let filename = match source.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}_{}.{}", taken_on, uuid::Uuid::new_v4(), ext.to_lowercase()),
            None => format!("{}_{}", taken_on, uuid::Uuid::new_v4()),
        };

        let mut photo = AnimalPhoto::new(animal_id, &filename, taken_on);
        let target = self.path_for(&photo);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, &target)?;

        match self.db.add_photo(&photo) {
            Ok(id) => photo.id = Some(id),
            Err(e) => {
                let _ = std::fs::remove_file(&target);
                return Err(e);
            }
        }

        tracing::info!(
            animal_id = %animal_id,
            file = %target.display(),
            "Attached photo"
        );
        Ok(photo)
    }

    pub fn list(&self, animal_id: &str) -> Result<Vec<AnimalPhoto>> {
        self.db.list_photos(animal_id)
    }

    /// Remove the index entry and the file. A file that is already gone only
    /// produces a warning.
    pub fn remove(&self, photo_id: i64) -> Result<AnimalPhoto> {
        let photo = self
            .db
            .get_photo(photo_id)?
            .ok_or_else(|| HerdOpsError::NotFound(format!("photo {}", photo_id)))?;

        self.db.delete_photo(photo_id)?;

        let path = self.path_for(&photo);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(file = %path.display(), "Photo file already missing");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(photo)
    }

    /// Drop an animal's photo directory. Index rows go with the animal via
    /// the cascade, so this runs after `delete_animal`.
    pub fn purge_animal(&self, animal_id: &str) -> Result<()> {
        let dir = self.root.join(animal_id);
        if dir.is_dir() {
            std::fs::remove_dir_all(&dir)?;
            tracing::debug!(dir = %dir.display(), "Removed photo directory");
        }
        Ok(())
    }
}
