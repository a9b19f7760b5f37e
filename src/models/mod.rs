pub mod animal;
pub mod assessment;
pub mod health_log;
pub mod photo;

pub use animal::*;
pub use assessment::*;
pub use health_log::*;
pub use photo::*;
