pub mod filter;
pub mod storage;
pub mod types;

pub use filter::PlanetFilter;
pub use storage::{get_store_path, load_store, write_store};
pub use types::{Note, PlanetRecord, StoreState};
