use crate::core::{ConversionResult, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// What a finished run reports back to the caller.
#[derive(Debug, Clone)]
pub struct EtlOutcome {
    pub output_path: String,
    pub row_count: usize,
    pub column_count: usize,
    pub preview: Option<String>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
    preview_rows: usize,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
            preview_rows: 0,
        }
    }

    /// Rows rendered into [`EtlOutcome::preview`] and logged from the raw input
    /// at debug level; 0 disables both.
    pub fn with_preview(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub async fn run(&self) -> Result<EtlOutcome> {
        let mut monitor = SystemMonitor::new(self.monitor_enabled);
        tracing::info!("Starting conversion");

        let table = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} bookings with {} columns",
            table.records.len(),
            table.columns.len()
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            for line in table.preview_lines(self.preview_rows) {
                tracing::debug!("Raw row {}", line);
            }
        }
        monitor.log_phase("Extract");

        let result = self.pipeline.transform(table).await?;
        tracing::info!(
            "Converted {} rows into the {}-column layout",
            result.row_count(),
            result.schema.len()
        );
        monitor.log_phase("Transform");

        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("Import file saved to: {}", output_path);
        monitor.log_phase("Load");
        monitor.log_final_stats();

        Ok(EtlOutcome {
            output_path,
            row_count: result.row_count(),
            column_count: result.schema.len(),
            preview: self.render_preview(&result),
        })
    }

    #[cfg(feature = "cli")]
    fn render_preview(&self, result: &ConversionResult) -> Option<String> {
        (self.preview_rows > 0 && !result.records.is_empty())
            .then(|| crate::utils::preview::render_preview(result, self.preview_rows))
    }

    #[cfg(not(feature = "cli"))]
    fn render_preview(&self, _result: &ConversionResult) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RawTable, Record};
    use crate::domain::model::OutputRecord;
    use crate::domain::schema::ColumnSchema;
    use crate::utils::error::ImportError;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubPipeline {
        fail_transform: bool,
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<RawTable> {
            Ok(RawTable {
                columns: vec!["PASSENGER_NAME".to_string()],
                records: vec![Record::default(), Record::default()],
            })
        }

        async fn transform(&self, table: RawTable) -> Result<ConversionResult> {
            if self.fail_transform {
                return Err(ImportError::MissingColumnError {
                    column: "COST".to_string(),
                });
            }
            let schema = Arc::new(ColumnSchema::fallback());
            let records = table
                .records
                .iter()
                .map(|_| OutputRecord::builder(Arc::clone(&schema)).build())
                .collect();
            Ok(ConversionResult {
                schema,
                records,
                csv_output: String::new(),
            })
        }

        async fn load(&self, _result: &ConversionResult) -> Result<String> {
            Ok("out/GETE_Import.csv".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_reports_rows_and_columns() {
        let engine = EtlEngine::new(StubPipeline {
            fail_transform: false,
        });
        let outcome = engine.run().await.unwrap();
        assert_eq!(outcome.row_count, 2);
        assert_eq!(outcome.column_count, 98);
        assert_eq!(outcome.output_path, "out/GETE_Import.csv");
        assert!(outcome.preview.is_none());
    }

    #[tokio::test]
    async fn test_transform_failure_stops_the_run() {
        let engine = EtlEngine::new(StubPipeline {
            fail_transform: true,
        });
        assert!(matches!(
            engine.run().await,
            Err(ImportError::MissingColumnError { .. })
        ));
    }
}
