pub mod geo;
pub mod model;
pub mod seed;
pub mod store;


pub use geo::distance_miles;
pub use model::*;
pub use seed::default_reference_data;
pub use store::{DirectoryError, ReferenceStore, SeededStore, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
