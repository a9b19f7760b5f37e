//! Rule-based health classification for livestock.
//!
//! Fixed thresholds, no learned model. Every function here is a pure
//! computation over a handful of scalars; the only side effect is the
//! status write in [`update_animal_health_status`].

pub mod analyzer;
pub mod status;
pub mod temperature;
pub mod weight;

pub use analyzer::analyze_health;
pub use status::{reset_health_status, update_animal_health_status};
pub use temperature::classify_temperature;
pub use weight::classify_weight;
