pub mod columns;
pub mod demo;
pub mod ingest;
pub mod types;

pub use columns::Column;
pub use demo::demo_catalog;
pub use ingest::{load_csv, read_catalog};
pub use types::PlanetInput;
