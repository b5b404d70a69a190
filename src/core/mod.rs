pub mod etl;
pub mod mapper;
pub mod pipeline;

pub use crate::domain::model::{ConversionResult, RawTable, Record};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
