pub mod calculations;
pub mod health;
pub mod measurement;
pub mod photo_library;
pub mod validation;

pub use calculations::summarize_history;
pub use measurement::{latest_assessment, record_measurement};
pub use photo_library::PhotoLibrary;
pub use validation::validate_animal;
