pub mod catalog;
pub mod config;
pub mod conflicts;
pub mod fetch;
pub mod installer;
pub mod parser;
pub mod paths;
pub mod registry;
pub mod source;
pub mod store;

pub mod reporter;

pub use config::Config;
pub use reporter::{NullReporter, Reporter};

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("bashmod-core/", env!("CARGO_PKG_VERSION"));
