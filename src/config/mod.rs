pub mod cli;
pub mod lookup;
#[cfg(feature = "cli")]
mod options;

#[cfg(feature = "cli")]
pub use options::{CliConfig, MAX_PREVIEW_ROWS};
