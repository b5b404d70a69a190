use crate::core::mapper::RowMapper;
use crate::core::{ConfigProvider, ConversionResult, Pipeline, RawTable, Record, Storage};
use crate::domain::model::OutputRecord;
use crate::domain::schema::{dedupe_names, ColumnSchema, FALLBACK_WIDTH};
use crate::utils::error::{ImportError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Fixed name of the file the dispatch platform imports.
pub const OUTPUT_FILE_NAME: &str = "GETE_Import.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ImportError::InputFormatError {
                message: format!("'{}' is neither a .csv nor a .json file", path),
            }),
        }
    }
}

/// Loads the template header when one is configured, else the fallback schema.
pub async fn load_schema<S: Storage>(storage: &S, template: Option<&str>) -> Result<ColumnSchema> {
    match template {
        Some(path) => {
            tracing::debug!("Reading column template from: {}", path);
            let data = storage.read_file(path).await?;
            let schema = ColumnSchema::from_template_csv(&data)?;
            tracing::info!("Using {}-column template from {}", schema.len(), path);
            Ok(schema)
        }
        None => {
            tracing::info!("No template given, using built-in {}-column layout", FALLBACK_WIDTH);
            Ok(ColumnSchema::fallback())
        }
    }
}

/// Parses a CSV export. Header names are trimmed, repeated ones get `.1`,
/// `.2` suffixes, and empty cells become null.
pub fn parse_csv_table(data: &[u8]) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let header: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = dedupe_names(header.clone());
    for (original, renamed) in header.iter().zip(&columns).filter(|(o, r)| o != r) {
        tracing::warn!("Duplicate input column '{}' renamed to '{}'", original, renamed);
    }
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let data: HashMap<String, Value> = columns
            .iter()
            .zip(row.iter())
            .map(|(column, cell)| {
                let value = if cell.trim().is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (column.clone(), value)
            })
            .collect();
        records.push(Record::new(data));
    }

    Ok(RawTable { columns, records })
}

/// Parses a JSON array of row objects. The column set is the union of keys.
pub fn parse_json_table(data: &[u8]) -> Result<RawTable> {
    let json_data: Value = serde_json::from_slice(data)?;
    let Value::Array(items) = json_data else {
        return Err(ImportError::InputFormatError {
            message: "expected a JSON array of booking objects".to_string(),
        });
    };

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(items.len());

    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(obj) = item else {
            return Err(ImportError::InputFormatError {
                message: format!("row {} is not a JSON object", idx + 1),
            });
        };

        let mut data = HashMap::new();
        for (key, value) in obj {
            if !columns.contains(&key) {
                columns.push(key.clone());
            }
            data.insert(key, value);
        }
        records.push(Record::new(data));
    }

    Ok(RawTable { columns, records })
}

/// Writes the header and rows with `\n` line endings and minimal quoting.
pub fn write_csv(schema: &ColumnSchema, records: &[OutputRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(schema.columns())?;
    for record in records {
        writer.write_record(record.values())?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| ImportError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| ImportError::InputFormatError {
        message: format!("output is not valid UTF-8: {}", e),
    })
}

pub struct ImportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    mapper: RowMapper,
}

impl<S: Storage, C: ConfigProvider> ImportPipeline<S, C> {
    pub fn new(storage: S, config: C, mapper: RowMapper) -> Self {
        Self {
            storage,
            config,
            mapper,
        }
    }

    pub fn output_file(&self) -> String {
        Path::new(self.config.output_path())
            .join(OUTPUT_FILE_NAME)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ImportPipeline<S, C> {
    async fn extract(&self) -> Result<RawTable> {
        let input = self.config.input_path();
        let format = InputFormat::from_path(input)?;

        tracing::debug!("Reading {:?} bookings from: {}", format, input);
        let data = self.storage.read_file(input).await?;

        let table = match format {
            InputFormat::Csv => parse_csv_table(&data)?,
            InputFormat::Json => parse_json_table(&data)?,
        };

        tracing::debug!("Input columns: {:?}", table.columns);
        Ok(table)
    }

    async fn transform(&self, table: RawTable) -> Result<ConversionResult> {
        tracing::debug!(
            "Mapping {} rows with flight format '{}'",
            table.records.len(),
            self.mapper.flight_format()
        );
        let records = self.mapper.map_table(&table)?;
        let schema = self.mapper.schema().clone();
        let csv_output = write_csv(&schema, &records)?;

        Ok(ConversionResult {
            schema,
            records,
            csv_output,
        })
    }

    async fn load(&self, result: &ConversionResult) -> Result<String> {
        let output_file = self.output_file();

        tracing::debug!(
            "Writing {} bytes to storage at {}",
            result.csv_output.len(),
            output_file
        );
        self.storage
            .write_file(&output_file, result.csv_output.as_bytes())
            .await?;

        Ok(output_file)
    }
}
