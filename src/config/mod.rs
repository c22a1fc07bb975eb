pub mod loader;
pub mod schema;

pub use loader::{init_config, load_config, parse_config, resolve_config};
pub use schema::{FetchConfig, Hosts};
