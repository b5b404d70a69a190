pub mod error;
pub mod logger;
pub mod monitor;
#[cfg(feature = "cli")]
pub mod preview;
pub mod validation;
