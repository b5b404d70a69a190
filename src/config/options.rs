use crate::core::ConfigProvider;
use crate::domain::rules::FlightFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, validate_range, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const MAX_PREVIEW_ROWS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gete-import")]
#[command(about = "Convert a GET-E booking export into a dispatch import file")]
pub struct CliConfig {
    /// Raw booking table (.csv export or .json array of rows)
    #[arg(long)]
    pub input: String,

    /// Directory receiving GETE_Import.csv
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// CSV template whose header row defines the output columns
    #[arg(long)]
    pub template: Option<String>,

    /// TOML file with hotel, crew and phone lookup tables
    #[arg(long)]
    pub lookups: Option<String>,

    /// Flight number style for airport pickups: raw or spaced
    #[arg(long)]
    pub flight_format: Option<FlightFormat>,

    /// Rows shown in the preview table, 0 to disable
    #[arg(long, default_value = "10")]
    pub preview_rows: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn template_path(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn lookup_path(&self) -> Option<&str> {
        self.lookups.as_deref()
    }

    fn flight_format(&self) -> Option<FlightFormat> {
        self.flight_format
    }

    fn preview_rows(&self) -> usize {
        self.preview_rows
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_file_extension("input", &self.input, &["csv", "json"])?;
        validate_path("output_path", &self.output_path)?;

        if let Some(template) = &self.template {
            validate_path("template", template)?;
            validate_file_extension("template", template, &["csv"])?;
        }

        if let Some(lookups) = &self.lookups {
            validate_path("lookups", lookups)?;
            validate_file_extension("lookups", lookups, &["toml"])?;
        }

        validate_range("preview_rows", self.preview_rows, 0, MAX_PREVIEW_ROWS)
    }
}
