pub mod config;
pub mod discovery;
pub mod error;
pub mod validation;

pub use config::*;
pub use error::*;

pub use discovery::{ConfigDiscovery, discover, discover_with_profile, load_file};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
