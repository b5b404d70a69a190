use anyhow::Result;
use gete_import::core::pipeline::{load_schema, OUTPUT_FILE_NAME};
use gete_import::{
    CliConfig, ColumnSchema, EtlEngine, FlightFormat, ImportError, ImportPipeline, LocalStorage,
    LookupTables, RowMapper,
};
use tempfile::TempDir;

const HEADER: &str = "PASSENGER_NAME,CUSTOMER_CONTACT_NUMBER,PICKUP_ADDRESS,DROP_OFF_ADDRESS,\
PICKUP_TIME,FLIGHT_NUMBER,VEHICLE_TYPE,AMOUNT_PASSENGERS,AMOUNT_LUGGAGE,CLIENT_INSTRUCTIONS,COST,BOOKING_NUMBER";

fn config(temp_dir: &TempDir, input: &str) -> CliConfig {
    CliConfig {
        input: temp_dir.path().join(input).to_string_lossy().into_owned(),
        output_path: temp_dir.path().join("out").to_string_lossy().into_owned(),
        template: None,
        lookups: None,
        flight_format: None,
        preview_rows: 5,
        verbose: false,
        json_logs: false,
        monitor: false,
    }
}

async fn run(
    config: CliConfig,
    flight_format: FlightFormat,
) -> std::result::Result<gete_import::EtlOutcome, ImportError> {
    let storage = LocalStorage::default();
    let schema = load_schema(&storage, config.template.as_deref()).await?;
    let mapper = RowMapper::new(schema, LookupTables::builtin()?, flight_format);
    let pipeline = ImportPipeline::new(storage, config, mapper);
    EtlEngine::new(pipeline).with_preview(5).run().await
}

fn read_output(temp_dir: &TempDir) -> Result<Vec<csv::StringRecord>> {
    let path = temp_dir.path().join("out").join(OUTPUT_FILE_NAME);
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = vec![reader.headers()?.clone()];
    for row in reader.records() {
        rows.push(row?);
    }
    Ok(rows)
}

fn column(rows: &[csv::StringRecord], row: usize, name: &str) -> String {
    let idx = rows[0]
        .iter()
        .position(|h| h == name)
        .unwrap_or_else(|| panic!("no column {name}"));
    rows[row][idx].to_string()
}

#[tokio::test]
async fn test_airport_crew_booking_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let csv = format!(
        "{HEADER}\n\
Lufthansa Crew A,4520304050,Copenhagen Airport,Vester Søgade 6,44000.5,LH441,Sedan,3,2,Crew bus,512.5,778899\n"
    );
    std::fs::write(temp_dir.path().join("bookings.csv"), csv)?;

    let outcome = run(config(&temp_dir, "bookings.csv"), FlightFormat::Spaced).await?;
    assert_eq!(outcome.row_count, 1);
    assert_eq!(outcome.column_count, 98);
    assert!(outcome.output_path.ends_with(OUTPUT_FILE_NAME));
    assert!(outcome.preview.as_deref().unwrap_or_default().contains("LH Crew"));

    let rows = read_output(&temp_dir)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 98);
    assert_eq!(column(&rows, 1, "Customer"), "LH Crew");
    assert_eq!(column(&rows, 1, "Customer Code"), "Get-e Lufthansa");
    assert_eq!(column(&rows, 1, "Flight"), "LH 441");
    assert_eq!(column(&rows, 1, "Pick Up"), "CPH Airport, Copenhagen Airport");
    assert_eq!(column(&rows, 1, "Drop Off"), "Scandic Copenhagen, Vester Søgade 6");
    assert_eq!(column(&rows, 1, "Pickup Time"), "18/06/2020 11:50");
    assert_eq!(column(&rows, 1, "Vehicle Type"), "Standard");
    assert_eq!(column(&rows, 1, "Adults"), "3");
    assert_eq!(column(&rows, 1, "Bags"), "2");
    assert_eq!(column(&rows, 1, "Base Rate"), "512");
    assert_eq!(column(&rows, 1, "Customer Reference No"), "778899");
    assert!(rows[1].iter().skip(19).all(|v| v.is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_template_defines_output_columns() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("template.csv"),
        "Pax Name,Flight,Notes,Mobile 1\n",
    )?;
    let csv = format!(
        "{HEADER}\n\
John Doe,442038568655,Copenhagen Airport,Falkoner Alle 9,,SK1234,,1,,,40,A-1\n"
    );
    std::fs::write(temp_dir.path().join("bookings.csv"), csv)?;

    let mut config = config(&temp_dir, "bookings.csv");
    config.template = Some(
        temp_dir
            .path()
            .join("template.csv")
            .to_string_lossy()
            .into_owned(),
    );
    run(config, FlightFormat::Raw).await?;

    let written = std::fs::read_to_string(temp_dir.path().join("out").join(OUTPUT_FILE_NAME))?;
    assert_eq!(
        written,
        "Pax Name,Flight,Notes,Mobile 1,Customer Reference No\nJohn Doe,SK1234,,,A-1\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_json_input_keeps_numeric_cells() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let json = serde_json::json!([
        {
            "PASSENGER_NAME": "SK 1234",
            "CUSTOMER_CONTACT_NUMBER": 4520304050u64,
            "PICKUP_ADDRESS": "Amager Boulevard 70",
            "DROP_OFF_ADDRESS": "Copenhagen Airport",
            "PICKUP_TIME": "2024-03-05 06:15:00",
            "FLIGHT_NUMBER": null,
            "VEHICLE_TYPE": "Minivan",
            "AMOUNT_PASSENGERS": 2.0,
            "AMOUNT_LUGGAGE": null,
            "COST": 310,
            "BOOKING_NUMBER": 5150
        }
    ]);
    std::fs::write(temp_dir.path().join("bookings.json"), json.to_string())?;

    run(config(&temp_dir, "bookings.json"), FlightFormat::Spaced).await?;

    let rows = read_output(&temp_dir)?;
    assert_eq!(column(&rows, 1, "Customer"), "SK Crew");
    assert_eq!(column(&rows, 1, "Mobile 1"), "4520304050");
    assert_eq!(
        column(&rows, 1, "Pick Up"),
        "Radisson Blu Scandinavia Hotel, Amager Boulevard 70"
    );
    assert_eq!(column(&rows, 1, "Drop Off"), "CPH Airport, Copenhagen Airport");
    assert_eq!(column(&rows, 1, "Pickup Time"), "05/03/2024 06:05");
    assert_eq!(column(&rows, 1, "Flight"), "");
    assert_eq!(column(&rows, 1, "Vehicle Type"), "People Carrier");
    assert_eq!(column(&rows, 1, "Adults"), "2");
    assert_eq!(column(&rows, 1, "Bags"), "0");
    assert_eq!(column(&rows, 1, "Pick Up Instructions"), "");
    assert_eq!(column(&rows, 1, "Customer Reference No"), "5150");
    Ok(())
}

#[tokio::test]
async fn test_bad_cost_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let csv = format!(
        "{HEADER}\n\
John Doe,1,Nørrebrogade 1,Falkoner Alle 9,,,,1,,,40,A-1\n\
Jane Doe,2,Nørrebrogade 2,Falkoner Alle 9,,,,1,,,forty,A-2\n"
    );
    std::fs::write(temp_dir.path().join("bookings.csv"), csv)?;

    let err = run(config(&temp_dir, "bookings.csv"), FlightFormat::Spaced)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::CoercionError { row: 2, ref column, .. } if column == "COST"
    ));
    assert!(!temp_dir.path().join("out").join(OUTPUT_FILE_NAME).exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_column_is_reported_by_name() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("bookings.csv"),
        "PASSENGER_NAME,COST\nJohn Doe,40\n",
    )?;

    let err = run(config(&temp_dir, "bookings.csv"), FlightFormat::Spaced)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("CUSTOMER_CONTACT_NUMBER"));
    Ok(())
}

#[test]
fn test_fallback_schema_is_default() {
    assert_eq!(ColumnSchema::default(), ColumnSchema::fallback());
}
