use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "herdops",
    version,
    about = "Livestock records with rule-based health tracking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup and write config.yaml
    Init,
    /// Validate config and open the database
    Check,
    /// Manage animal records
    #[command(subcommand)]
    Animal(AnimalCommand),
    /// Record a measurement, update the stored health status and log it
    Measure(MeasureArgs),
    /// Assess readings against an animal without saving anything
    Assess(AssessArgs),
    /// Show logged measurements for an animal
    History {
        id: String,
        /// Window in days (defaults to the configured value)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Stored health status operations
    #[command(subcommand)]
    Status(StatusCommand),
    /// Manage dated photos
    #[command(subcommand)]
    Photo(PhotoCommand),
}

#[derive(Subcommand)]
pub enum AnimalCommand {
    /// Add a new animal
    Add(AnimalFields),
    /// List animals, optionally searching and filtering
    List {
        /// Text matched against name, species, color and RFID tag
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        species: Option<String>,
        /// male or female
        #[arg(long)]
        gender: Option<String>,
        /// good, warning or critical
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one animal with its latest assessment
    Show {
        id: String,
        /// Print the latest assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit fields of an existing animal
    Edit {
        id: String,
        #[command(flatten)]
        fields: AnimalEdits,
    },
    /// Delete an animal with its history and photos
    Delete { id: String },
}

#[derive(Args)]
pub struct AnimalFields {
    #[arg(long)]
    pub rfid: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub species: String,
    /// male or female
    #[arg(long)]
    pub gender: String,
    /// Age in years
    #[arg(long, default_value_t = 0)]
    pub age: u32,
    /// Weight in kg
    #[arg(long)]
    pub weight: Option<f64>,
    /// Height in cm
    #[arg(long)]
    pub height: Option<f64>,
    /// Reference weight in kg for weight-change checks
    #[arg(long)]
    pub baseline_weight: Option<f64>,
    #[arg(long)]
    pub color: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<NaiveDate>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct AnimalEdits {
    #[arg(long)]
    pub rfid: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub species: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub weight: Option<f64>,
    #[arg(long)]
    pub height: Option<f64>,
    #[arg(long)]
    pub baseline_weight: Option<f64>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub birth_date: Option<NaiveDate>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct MeasureArgs {
    pub id: String,
    /// Body temperature in °C
    #[arg(short, long)]
    pub temperature: Option<f64>,
    /// Weight in kg
    #[arg(short, long)]
    pub weight: Option<f64>,
    /// Measurement time (RFC 3339), defaults to now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
    /// Update the status without appending to the health history
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Args)]
pub struct AssessArgs {
    pub id: String,
    /// Body temperature in °C
    #[arg(short, long)]
    pub temperature: Option<f64>,
    /// Weight in kg
    #[arg(short, long)]
    pub weight: Option<f64>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum StatusCommand {
    /// Explicitly set the stored status, clearing a Warning or Critical flag
    Reset {
        id: String,
        /// good, warning or critical
        #[arg(long, default_value = "good")]
        to: String,
    },
}

#[derive(Subcommand)]
pub enum PhotoCommand {
    /// Attach a photo file to an animal
    Add {
        id: String,
        file: PathBuf,
        /// Date the photo was taken (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List an animal's photos
    List { id: String },
    /// Delete a photo by its id
    Delete { photo_id: i64 },
}
