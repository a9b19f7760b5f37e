mod cli;
mod config;
mod db;
mod error;
mod logic;
mod models;
mod report;

use anyhow::Context;
use clap::Parser;
use cli::{AnimalCommand, AnimalEdits, AnimalFields, Cli, Commands, PhotoCommand, StatusCommand};
use config::Config;
use db::Database;
use error::HerdOpsError;
use logic::health::{analyze_health, reset_health_status};
use logic::{latest_assessment, record_measurement, summarize_history, validate_animal, PhotoLibrary};
use models::{Animal, AnimalFilter, Gender, HealthAssessment, HealthStatus, Measurement};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins over -v flags
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir.as_ref();

    match cli.command {
        Commands::Init => {
            let (config, path) = Config::setup_interactive(cli.config.as_ref())?;
            let db = Database::open(data_dir).context("Failed to create database")?;
            println!(
                "Herd '{}' ready. Config: {}, database: {}",
                config.herd.name,
                path.display(),
                db.path().display()
            );
        }
        Commands::Check => run_check(cli.config.as_ref(), data_dir)?,
        command => {
            let config = Config::load_or_default(cli.config.as_ref())?;
            let db = Database::open(data_dir).context("Failed to open database")?;
            run_command(command, &config, &db, data_dir)?;
        }
    }

    Ok(())
}

fn run_check(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_path).context("Configuration check failed")?;
    println!("Config OK: herd '{}'", config.herd.name);
    if config.herd.species.is_empty() {
        println!("  Species: any");
    } else {
        println!("  Species: {}", config.herd.species.join(", "));
    }
    println!("  History window: {} days", config.history.default_days);

    let db = Database::open(data_dir).context("Database check failed")?;
    let animals = db.list_animals()?;
    println!("Database OK: {}", db.path().display());
    println!("  Animals: {}", animals.len());
    for status in HealthStatus::all() {
        let count = animals.iter().filter(|a| a.health_status == *status).count();
        println!("  {} {}: {}", status.symbol(), status, count);
    }
    Ok(())
}

fn run_command(
    command: Commands,
    config: &Config,
    db: &Database,
    data_dir: Option<&PathBuf>,
) -> anyhow::Result<()> {
    match command {
        Commands::Animal(cmd) => run_animal(cmd, config, db, data_dir)?,
        Commands::Measure(args) => {
            let mut measurement = Measurement::new(args.temperature, args.weight);
            if let Some(at) = args.at {
                measurement = measurement.at(at);
            }
            let outcome = record_measurement(db, &args.id, measurement, !args.no_log)?;

            println!("{}", outcome.animal);
            print!("{}", report::assessment(&outcome.assessment));
            if outcome.status_changed() {
                println!(
                    "Stored status: {} -> {}",
                    outcome.previous_status, outcome.animal.health_status
                );
            } else {
                println!("Stored status: {} (unchanged)", outcome.animal.health_status);
            }
        }
        Commands::Assess(args) => {
            let animal = db.require_animal(&args.id)?;
            let assessment = analyze_health(&animal, args.temperature, args.weight);
            print_assessment(&animal, &assessment, args.json)?;
        }
        Commands::History { id, days } => {
            let animal = db.require_animal(&id)?;
            let days = days.unwrap_or(config.history.default_days);
            let entries = db.get_health_logs(&id, days)?;
            let summary = summarize_history(&entries);
            println!("{}", animal);
            print!("{}", report::history(&entries, &summary, days));
        }
        Commands::Status(StatusCommand::Reset { id, to }) => {
            let status = parse_status(&to)?;
            let mut animal = db.require_animal(&id)?;
            let previous = animal.health_status;
            reset_health_status(&mut animal, status);
            db.update_animal(&animal)?;
            tracing::info!(animal_id = %id, from = %previous, to = %status, "Health status reset");
            println!("{}: {} -> {}", animal, previous, status);
        }
        Commands::Photo(cmd) => {
            let library = PhotoLibrary::new(db.clone(), Config::photos_dir(data_dir)?);
            run_photo(cmd, &library)?;
        }
        Commands::Init | Commands::Check => unreachable!("handled in main"),
    }
    Ok(())
}

fn run_animal(
    command: AnimalCommand,
    config: &Config,
    db: &Database,
    data_dir: Option<&PathBuf>,
) -> anyhow::Result<()> {
    match command {
        AnimalCommand::Add(fields) => {
            let animal = animal_from_fields(fields)?;
            validate_animal(&animal, &config.herd.species)?;
            let id = db.create_animal(&animal)?;
            println!("Added {} with id {}", animal, id);
        }
        AnimalCommand::List {
            query,
            species,
            gender,
            status,
        } => {
            let filter = AnimalFilter {
                species,
                gender: gender.as_deref().map(parse_gender).transpose()?,
                health_status: status.as_deref().map(parse_status).transpose()?,
            };
            let animals = db.search_animals(query.as_deref(), &filter)?;
            for animal in &animals {
                println!("{}", report::animal_row(animal));
            }
            println!("{} animal(s)", animals.len());
        }
        AnimalCommand::Show { id, json } => {
            let animal = db.require_animal(&id)?;
            let assessment = latest_assessment(db, &animal)?;
            if json {
                println!("{}", report::json(&assessment)?);
                return Ok(());
            }
            print!("{}", report::animal_details(&animal));
            match assessment {
                Some(assessment) => {
                    println!("Latest measurement:");
                    print!("{}", report::assessment(&assessment));
                }
                None => println!("No measurements recorded"),
            }
            let photos = db.list_photos(&id)?;
            if !photos.is_empty() {
                println!("Photos: {}", photos.len());
            }
        }
        AnimalCommand::Edit { id, fields } => {
            let mut animal = db.require_animal(&id)?;
            apply_edits(&mut animal, fields)?;
            validate_animal(&animal, &config.herd.species)?;
            db.update_animal(&animal)?;
            println!("Updated {}", animal);
        }
        AnimalCommand::Delete { id } => {
            let animal = db.require_animal(&id)?;
            db.delete_animal(&id)?;
            PhotoLibrary::new(db.clone(), Config::photos_dir(data_dir)?).purge_animal(&id)?;
            println!("Deleted {}", animal);
        }
    }
    Ok(())
}

fn run_photo(command: PhotoCommand, library: &PhotoLibrary) -> anyhow::Result<()> {
    match command {
        PhotoCommand::Add { id, file, date } => {
            let taken_on = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let photo = library.attach(&id, &file, taken_on)?;
            println!(
                "Attached photo {} ({})",
                photo.id.unwrap_or_default(),
                library.path_for(&photo).display()
            );
        }
        PhotoCommand::List { id } => {
            let photos = library.list(&id)?;
            for photo in &photos {
                println!("{}", report::photo_row(photo));
            }
            println!("{} photo(s)", photos.len());
        }
        PhotoCommand::Delete { photo_id } => {
            let photo = library.remove(photo_id)?;
            println!("Deleted photo {} ({})", photo_id, photo.filename);
        }
    }
    Ok(())
}

fn print_assessment(
    animal: &Animal,
    assessment: &HealthAssessment,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", report::json(assessment)?);
    } else {
        println!("{}", animal);
        print!("{}", report::assessment(assessment));
    }
    Ok(())
}

fn animal_from_fields(fields: AnimalFields) -> error::Result<Animal> {
    let gender = parse_gender(&fields.gender)?;
    let mut animal = Animal::new(&fields.rfid, &fields.name, &fields.species, gender)
        .with_age(fields.age);
    animal.weight = fields.weight;
    animal.height_cm = fields.height;
    animal.baseline_weight = fields.baseline_weight;
    animal.color = fields.color;
    animal.birth_date = fields.birth_date;
    animal.notes = fields.notes;
    Ok(animal)
}

fn apply_edits(animal: &mut Animal, edits: AnimalEdits) -> error::Result<()> {
    if let Some(rfid) = edits.rfid {
        animal.rfid_tag = rfid;
    }
    if let Some(name) = edits.name {
        animal.name = name;
    }
    if let Some(species) = edits.species {
        animal.species = species;
    }
    if let Some(gender) = edits.gender {
        animal.gender = parse_gender(&gender)?;
    }
    if let Some(age) = edits.age {
        animal.age = age;
    }
    if edits.weight.is_some() {
        animal.weight = edits.weight;
    }
    if edits.height.is_some() {
        animal.height_cm = edits.height;
    }
    if edits.baseline_weight.is_some() {
        animal.baseline_weight = edits.baseline_weight;
    }
    if edits.color.is_some() {
        animal.color = edits.color;
    }
    if edits.birth_date.is_some() {
        animal.birth_date = edits.birth_date;
    }
    if edits.notes.is_some() {
        animal.notes = edits.notes;
    }
    Ok(())
}

fn parse_gender(s: &str) -> error::Result<Gender> {
    Gender::from_str(s)
        .ok_or_else(|| HerdOpsError::InvalidData(format!("unknown gender '{}'", s)))
}

fn parse_status(s: &str) -> error::Result<HealthStatus> {
    HealthStatus::from_str(s)
        .ok_or_else(|| HerdOpsError::InvalidData(format!("unknown health status '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> AnimalFields {
        AnimalFields {
            rfid: "RF-1".into(),
            name: "Bella".into(),
            species: "Cow".into(),
            gender: "female".into(),
            age: 4,
            weight: Some(500.0),
            height: None,
            baseline_weight: None,
            color: None,
            birth_date: None,
            notes: None,
        }
    }

    fn no_edits() -> AnimalEdits {
        AnimalEdits {
            rfid: None,
            name: None,
            species: None,
            gender: None,
            age: None,
            weight: None,
            height: None,
            baseline_weight: None,
            color: None,
            birth_date: None,
            notes: None,
        }
    }

    #[test]
    fn animal_from_fields_parses_gender() {
        let animal = animal_from_fields(fields()).unwrap();
        assert_eq!(animal.gender, Gender::Female);
        assert_eq!(animal.age, 4);
        assert_eq!(animal.health_status, HealthStatus::Good);

        let bad = AnimalFields {
            gender: "unknown".into(),
            ..fields()
        };
        assert!(animal_from_fields(bad).is_err());
    }

    #[test]
    fn edits_only_touch_given_fields() {
        let mut animal = animal_from_fields(fields())
            .unwrap()
            .with_status(HealthStatus::Warning);
        let edits = AnimalEdits {
            baseline_weight: Some(520.0),
            name: Some("Bella II".into()),
            ..no_edits()
        };
        apply_edits(&mut animal, edits).unwrap();

        assert_eq!(animal.name, "Bella II");
        assert_eq!(animal.baseline_weight, Some(520.0));
        assert_eq!(animal.weight, Some(500.0));
        assert_eq!(animal.health_status, HealthStatus::Warning);
    }

    #[test]
    fn status_parsing() {
        assert_eq!(parse_status("critical").unwrap(), HealthStatus::Critical);
        assert_eq!(parse_status("UYARI").unwrap(), HealthStatus::Warning);
        assert!(parse_status("fine").is_err());
    }
}
