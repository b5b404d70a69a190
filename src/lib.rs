pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::lookup::LookupConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use self::core::{etl::EtlEngine, etl::EtlOutcome, mapper::RowMapper, pipeline::ImportPipeline};
pub use domain::lookup::LookupTables;
pub use domain::rules::FlightFormat;
pub use domain::schema::ColumnSchema;
pub use utils::error::{ImportError, Result};
