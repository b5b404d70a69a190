use crate::domain::model::{ConversionResult, RawTable};
use crate::domain::rules::FlightFormat;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn template_path(&self) -> Option<&str>;
    fn lookup_path(&self) -> Option<&str>;
    /// `None` defers to the lookup file, then to the built-in default.
    fn flight_format(&self) -> Option<FlightFormat>;
    fn preview_rows(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawTable>;
    async fn transform(&self, table: RawTable) -> Result<ConversionResult>;
    async fn load(&self, result: &ConversionResult) -> Result<String>;
}
