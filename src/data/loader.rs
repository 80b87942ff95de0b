use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray,
};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Dataset, OpenedYear, Record};

/// Columns every source table must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Company",
    "Country",
    "Continent",
    "City",
    "Location",
    "Latitude",
    "Longitude",
    "Opened",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a location table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, any column order, extra columns ignored
/// * `.json`    – `[{ "Company": "...", "Opened": "2010-05-01", ... }, ...]`
/// * `.parquet` – string columns plus float coordinates, `Opened` as text or Date32
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let unknown = dataset.unknown_year_count();
    if unknown > 0 {
        log::warn!(
            "{unknown} of {} rows in {} have no parseable opening date",
            dataset.len(),
            path.display()
        );
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row, matched to columns by header name.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Continent")]
    continent: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
    #[serde(rename = "Opened")]
    opened: String,
}

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers().map_err(csv_err)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        let row = result.map_err(csv_err)?;
        records.push(Record {
            company: row.company,
            country: row.country,
            continent: row.continent,
            city: row.city,
            location: row.location,
            lat: row.latitude.unwrap_or(f64::NAN),
            lon: row.longitude.unwrap_or(f64::NAN),
            opened_year: parse_opened_year(&row.opened),
            opened_raw: row.opened,
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Company": "Google",
///     "Country": "Ireland",
///     "Continent": "Europe",
///     "City": "Dublin",
///     "Location": "Grange Castle Business Park",
///     "Latitude": 53.32,
///     "Longitude": -6.44,
///     "Opened": "2012-09-01"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = root.as_array().ok_or_else(|| LoadError::InvalidRow {
        path: path.to_path_buf(),
        row: 0,
        reason: "expected a top-level JSON array".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| LoadError::InvalidRow {
            path: path.to_path_buf(),
            row: i,
            reason: "not a JSON object".to_string(),
        })?;

        for column in REQUIRED_COLUMNS {
            if !obj.contains_key(column) {
                return Err(LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                });
            }
        }

        let text = |key: &str| json_to_text(&obj[key]);
        let coord = |key: &str| -> Result<f64, LoadError> {
            match &obj[key] {
                JsonValue::Null => Ok(f64::NAN),
                JsonValue::Number(n) => Ok(n.as_f64().unwrap_or(f64::NAN)),
                JsonValue::String(s) if s.trim().is_empty() => Ok(f64::NAN),
                JsonValue::String(s) => s.trim().parse().map_err(|_| LoadError::InvalidRow {
                    path: path.to_path_buf(),
                    row: i,
                    reason: format!("'{key}' value '{s}' is not a number"),
                }),
                other => Err(LoadError::InvalidRow {
                    path: path.to_path_buf(),
                    row: i,
                    reason: format!("'{key}' value {other} is not a number"),
                }),
            }
        };

        let opened_raw = text("Opened");
        records.push(Record {
            company: text("Company"),
            country: text("Country"),
            continent: text("Continent"),
            city: text("City"),
            location: text("Location"),
            lat: coord("Latitude")?,
            lon: coord("Longitude")?,
            opened_year: parse_opened_year(&opened_raw),
            opened_raw,
        });
    }

    Ok(Dataset::from_records(records))
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one row per location.
///
/// Expected schema:
/// - text columns: Utf8 or LargeUtf8
/// - `Latitude` / `Longitude`: Float64, Float32 or integer
/// - `Opened`: Utf8 / LargeUtf8 date strings, Date32, or a Timestamp of any unit
///
/// Works with files written by both **Pandas** (`df.to_parquet()`, where a
/// parsed date column lands as `Timestamp(ns)`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let parquet_err = |source| LoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;

    let schema = builder.schema().clone();
    let mut idx = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = schema
            .index_of(column)
            .map_err(|_| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })?;
    }
    let [company, country, continent, city, location, latitude, longitude, opened] = idx;

    let reader = builder.build().map_err(parquet_err)?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|source| LoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;
        let base = records.len();

        for row in 0..batch.num_rows() {
            let text = |col: usize| -> Result<String, LoadError> {
                extract_text(batch.column(col), row).ok_or_else(|| LoadError::InvalidRow {
                    path: path.to_path_buf(),
                    row: base + row,
                    reason: format!(
                        "column '{}' has unsupported type {:?}",
                        schema.field(col).name(),
                        batch.column(col).data_type()
                    ),
                })
            };

            let (opened_raw, opened_year) = match extract_date(batch.column(opened), row) {
                Some(Some(date)) => (date.to_string(), calendar_year(date.year())),
                Some(None) => (String::new(), OpenedYear::UNKNOWN),
                None => {
                    let raw = text(opened)?;
                    let year = parse_opened_year(&raw);
                    (raw, year)
                }
            };

            records.push(Record {
                company: text(company)?,
                country: text(country)?,
                continent: text(continent)?,
                city: text(city)?,
                location: text(location)?,
                lat: extract_f64(batch.column(latitude), row),
                lon: extract_f64(batch.column(longitude), row),
                opened_raw,
                opened_year,
            });
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Read a string cell; nulls become empty strings. `None` for non-text columns.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Some(if arr.is_null(row) { String::new() } else { arr.value(row).to_string() })
    } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        Some(if arr.is_null(row) { String::new() } else { arr.value(row).to_string() })
    } else {
        None
    }
}

/// Read a numeric cell as `f64`; nulls and non-numeric columns give NaN.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> f64 {
    if col.is_null(row) {
        return f64::NAN;
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        arr.value(row)
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        arr.value(row) as f64
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        arr.value(row) as f64
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        arr.value(row) as f64
    } else {
        f64::NAN
    }
}

/// Read a Date32 or Timestamp cell.
///
/// `None` when the column holds neither (the caller falls back to text);
/// `Some(None)` for nulls.
fn extract_date(col: &Arc<dyn Array>, row: usize) -> Option<Option<NaiveDate>> {
    let any = col.as_any();
    if col.is_null(row) {
        let temporal = any.is::<Date32Array>()
            || any.is::<TimestampNanosecondArray>()
            || any.is::<TimestampMicrosecondArray>()
            || any.is::<TimestampMillisecondArray>()
            || any.is::<TimestampSecondArray>();
        return temporal.then_some(None);
    }

    if let Some(arr) = any.downcast_ref::<Date32Array>() {
        Some(arr.value_as_date(row))
    } else if let Some(arr) = any.downcast_ref::<TimestampNanosecondArray>() {
        Some(arr.value_as_datetime(row).map(|dt| dt.date()))
    } else if let Some(arr) = any.downcast_ref::<TimestampMicrosecondArray>() {
        Some(arr.value_as_datetime(row).map(|dt| dt.date()))
    } else if let Some(arr) = any.downcast_ref::<TimestampMillisecondArray>() {
        Some(arr.value_as_datetime(row).map(|dt| dt.date()))
    } else if let Some(arr) = any.downcast_ref::<TimestampSecondArray>() {
        Some(arr.value_as_datetime(row).map(|dt| dt.date()))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// "Opened" normalization
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Years a nanosecond timestamp can represent; dates outside are not
/// plausible openings and count as unknown.
const YEAR_BOUNDS: RangeInclusive<i32> = 1677..=2262;

fn calendar_year(year: i32) -> OpenedYear {
    if YEAR_BOUNDS.contains(&year) {
        OpenedYear::new(year)
    } else {
        OpenedYear::UNKNOWN
    }
}

/// Parse an "Opened" cell into a calendar year.
///
/// Anything that is not a recognizable date (including an empty cell or a
/// year outside 1677..=2262) maps to [`OpenedYear::UNKNOWN`]; this never fails.
pub fn parse_opened_year(raw: &str) -> OpenedYear {
    let s = raw.trim();
    if s.is_empty() {
        return OpenedYear::UNKNOWN;
    }

    // Bare year.
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().map(calendar_year).unwrap_or(OpenedYear::UNKNOWN);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return calendar_year(dt.year());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return calendar_year(dt.year());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return calendar_year(d.year());
        }
    }

    // Year-month: "2014-07"
    if s.len() == 7 {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return calendar_year(d.year());
        }
    }
    // Month-year: "July 2014"
    if let Ok(d) = NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y") {
        return calendar_year(d.year());
    }

    log::debug!("unparseable opening date '{s}'");
    OpenedYear::UNKNOWN
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::ArrayRef;
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;

    const HEADER: &str = "Company,Country,Continent,City,Location,Latitude,Longitude,Opened";

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn text(values: &[&str]) -> ArrayRef {
        Arc::new(StringArray::from(values.to_vec()))
    }

    /// Two Nordic sites with every column but `Opened`.
    fn nordic_columns() -> Vec<(&'static str, ArrayRef)> {
        vec![
            ("Company", text(&["Google", "Meta"])),
            ("Country", text(&["Finland", "Sweden"])),
            ("Continent", text(&["Europe", "Europe"])),
            ("City", text(&["Hamina", "Lulea"])),
            ("Location", text(&["Summa mill", "Lulea campus"])),
            ("Latitude", Arc::new(Float64Array::from(vec![60.5, 65.6])) as ArrayRef),
            ("Longitude", Arc::new(Float64Array::from(vec![27.2, 22.1])) as ArrayRef),
        ]
    }

    fn write_parquet(batch: &RecordBatch) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn parses_common_date_shapes() {
        let cases = [
            ("2010-05-17", 2010),
            ("2010/05/17", 2010),
            ("5/17/2010", 2010),
            ("17/05/2010", 2010),
            ("2011-03-01 00:00:00", 2011),
            ("2011-03-01T08:30:00", 2011),
            ("2012-06-01T00:00:00Z", 2012),
            ("May 17, 2013", 2013),
            ("Sep 3, 2014", 2014),
            ("3 September 2015", 2015),
            ("July 2016", 2016),
            ("2017-07", 2017),
            ("2018", 2018),
            ("  2019-01-01  ", 2019),
        ];
        for (raw, year) in cases {
            assert_eq!(parse_opened_year(raw).get(), year, "input {raw:?}");
        }
    }

    #[test]
    fn garbage_dates_become_sentinel() {
        let cases = [
            "",
            "   ",
            "TBD",
            "coming soon",
            "2020-13-45",
            "0000",
            "n/a",
            "0999",
            "0201-05-01",
            "1500-01-01",
            "2300-01-01",
        ];
        for raw in cases {
            assert_eq!(parse_opened_year(raw), OpenedYear::UNKNOWN, "input {raw:?}");
        }
    }

    #[test]
    fn loads_csv_with_renamed_coordinates() {
        let file = write_file(
            ".csv",
            &format!(
                "{HEADER},Extra\n\
                 Google,Ireland,Europe,Dublin,Grange Castle,53.32,-6.44,2012-09-01,x\n\
                 Meta,USA,North America,Prineville,\"Prineville, OR\",44.29,-120.83,unknown,y\n\
                 Amazon,USA,North America,Ashburn,Loudoun,,,2015,z\n"
            ),
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);

        let google = &ds.records[0];
        assert_eq!(google.company, "Google");
        assert_eq!(google.lat, 53.32);
        assert_eq!(google.lon, -6.44);
        assert_eq!(google.opened_year.get(), 2012);

        let meta = &ds.records[1];
        assert_eq!(meta.location, "Prineville, OR");
        assert_eq!(meta.opened_raw, "unknown");
        assert_eq!(meta.opened_year, OpenedYear::UNKNOWN);

        let amazon = &ds.records[2];
        assert!(!amazon.has_coordinates());
        assert_eq!(amazon.opened_year.get(), 2015);
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let file = write_file(
            ".csv",
            "Company,Country,Continent,City,Location,Latitude,Longitude\nGoogle,Ireland,Europe,Dublin,x,1,2\n",
        );
        match load_file(file.path()) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "Opened"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_file(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_file(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_json_records() {
        let file = write_file(
            ".json",
            r#"[
                {"Company": "Microsoft", "Country": "Netherlands", "Continent": "Europe",
                 "City": "Middenmeer", "Location": "Agriport", "Latitude": 52.8,
                 "Longitude": 4.99, "Opened": "March 2019"},
                {"Company": "Apple", "Country": "Denmark", "Continent": "Europe",
                 "City": "Viborg", "Location": "Foulum", "Latitude": null,
                 "Longitude": "9.4", "Opened": null}
            ]"#,
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].opened_year.get(), 2019);
        assert!(ds.records[1].lat.is_nan());
        assert_eq!(ds.records[1].lon, 9.4);
        assert_eq!(ds.records[1].opened_year, OpenedYear::UNKNOWN);
    }

    #[test]
    fn json_row_without_column_is_an_error() {
        let file = write_file(".json", r#"[{"Company": "Apple"}]"#);
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumn { column: "Country", .. })
        ));
    }

    #[test]
    fn loads_parquet_with_date32_opened() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let days = |y, m, d| {
            (NaiveDate::from_ymd_opt(y, m, d).unwrap() - epoch).num_days() as i32
        };

        let mut columns = nordic_columns();
        columns.push((
            "Opened",
            Arc::new(Date32Array::from(vec![Some(days(2011, 9, 1)), None])) as ArrayRef,
        ));
        let batch = RecordBatch::try_from_iter(columns).unwrap();

        let file = write_parquet(&batch);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].opened_year.get(), 2011);
        assert_eq!(ds.records[0].opened_raw, "2011-09-01");
        assert_eq!(ds.records[1].opened_year, OpenedYear::UNKNOWN);
        assert_eq!(ds.records[1].lat, 65.6);
    }

    #[test]
    fn loads_parquet_with_timestamp_opened() {
        let opened = NaiveDate::from_ymd_opt(2013, 5, 17)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_nanos_opt()
            .unwrap();

        let mut columns = nordic_columns();
        columns.push((
            "Opened",
            Arc::new(TimestampNanosecondArray::from(vec![Some(opened), None])) as ArrayRef,
        ));
        let batch = RecordBatch::try_from_iter(columns).unwrap();

        let file = write_parquet(&batch);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].opened_year.get(), 2013);
        assert_eq!(ds.records[0].opened_raw, "2013-05-17");
        assert_eq!(ds.records[1].opened_year, OpenedYear::UNKNOWN);
    }

    #[test]
    fn loads_parquet_with_text_opened() {
        let mut columns = nordic_columns();
        columns.push(("Opened", text(&["May 17, 2013", "TBD"])));
        let batch = RecordBatch::try_from_iter(columns).unwrap();

        let file = write_parquet(&batch);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].opened_raw, "May 17, 2013");
        assert_eq!(ds.records[0].opened_year.get(), 2013);
        assert_eq!(ds.records[1].opened_raw, "TBD");
        assert_eq!(ds.records[1].opened_year, OpenedYear::UNKNOWN);
    }

    #[test]
    fn parquet_missing_column_is_an_error() {
        let batch = RecordBatch::try_from_iter(nordic_columns()).unwrap();
        let file = write_parquet(&batch);
        match load_file(file.path()) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "Opened"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn padded_cells_are_trimmed() {
        let file = write_file(
            ".csv",
            &format!(
                "{HEADER}\n\
                 Google , Ireland ,Europe,Dublin,Grange Castle, 53.32 , -6.44 , 2012-09-01 \n\
                 Meta,USA,North America,Prineville,Prineville, 44.29,-120.83, TBD\n"
            ),
        );

        let ds = load_file(file.path()).unwrap();
        let google = &ds.records[0];
        assert_eq!(google.company, "Google");
        assert_eq!(google.country, "Ireland");
        assert_eq!(google.lat, 53.32);
        assert_eq!(google.lon, -6.44);
        assert_eq!(google.opened_year.get(), 2012);

        let meta = &ds.records[1];
        assert_eq!(meta.lat, 44.29);
        assert_eq!(meta.opened_year, OpenedYear::UNKNOWN);
        assert_eq!(ds.companies, ["Google", "Meta"]);
    }

    #[test]
    fn csv_non_numeric_latitude_is_a_csv_error() {
        let file = write_file(
            ".csv",
            &format!("{HEADER}\nGoogle,Ireland,Europe,Dublin,Grange,north,-6.44,2012\n"),
        );
        assert!(matches!(load_file(file.path()), Err(LoadError::Csv { .. })));
    }

    #[test]
    fn json_top_level_must_be_an_array() {
        let file = write_file(".json", r#"{"Company": "Google"}"#);
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidRow { row: 0, .. })
        ));
    }

    #[test]
    fn json_rows_must_be_objects() {
        let file = write_file(".json", "[1]");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidRow { row: 0, .. })
        ));
    }

    #[test]
    fn json_non_numeric_coordinate_is_invalid() {
        let file = write_file(
            ".json",
            r#"[{"Company": "Apple", "Country": "Denmark", "Continent": "Europe",
                 "City": "Viborg", "Location": "Foulum", "Latitude": "north",
                 "Longitude": 9.4, "Opened": "2020"}]"#,
        );
        match load_file(file.path()) {
            Err(LoadError::InvalidRow { row, reason, .. }) => {
                assert_eq!(row, 0);
                assert!(reason.contains("Latitude"), "{reason}");
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }
}
