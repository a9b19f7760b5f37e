use crate::db::Database;
use crate::error::Result;

const MIGRATIONS: &[&str] = &[
    // Migration 1: Initial schema
    r#"
    CREATE TABLE IF NOT EXISTS animals (
        id TEXT PRIMARY KEY,
        rfid_tag TEXT NOT NULL,
        name TEXT NOT NULL,
        age INTEGER NOT NULL DEFAULT 0,
        weight_kg REAL,
        height_cm REAL,
        gender TEXT NOT NULL,
        species TEXT NOT NULL,
        color TEXT,
        birth_date TEXT,
        health_status TEXT NOT NULL DEFAULT 'İyi',
        baseline_weight_kg REAL,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS health_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        animal_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
        weight_kg REAL,
        temperature_c REAL,
        measured_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS animal_photos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        animal_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
        filename TEXT NOT NULL,
        taken_on TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(animal_id, filename)
    );

    CREATE TABLE IF NOT EXISTS schema_migrations (
        version INTEGER PRIMARY KEY,
        applied_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    // Migration 2: Add indexes
    r#"
    CREATE INDEX IF NOT EXISTS idx_animals_rfid_tag
        ON animals(rfid_tag);
    CREATE INDEX IF NOT EXISTS idx_health_logs_animal_measured
        ON health_logs(animal_id, measured_at);
    CREATE INDEX IF NOT EXISTS idx_animal_photos_animal_id
        ON animal_photos(animal_id);
    "#,
    // Migration 3: Weight each logged reading was compared against
    r#"
    ALTER TABLE health_logs ADD COLUMN reference_weight_kg REAL;
    "#,
];

pub fn run(db: &Database) -> Result<()> {
    db.with_conn_mut(|conn| {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;

        let current_version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            let version = (i + 1) as i32;
            if version > current_version {
                tracing::info!("Applying migration {}", version);
                let tx = conn.transaction()?;
                tx.execute_batch(migration)?;
                tx.execute(
                    "INSERT INTO schema_migrations (version) VALUES (?1)",
                    [version],
                )?;
                tx.commit()?;
            }
        }

        Ok(())
    })
}
