use std::collections::BTreeSet;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
};
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::LoadError;
use super::model::{
    ColumnPresence, LiftResult, LiftTable, COL_BENCH, COL_DATE, COL_DEADLIFT, COL_FEDERATION,
    COL_NAME, COL_SEX, COL_SQUAT, COL_WEIGHT_CLASS, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a results table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the OpenPowerlifting / OpenIPF bulk export (recommended)
/// * `.json`    – `[{ "Name": ..., "Date": ..., ... }, ...]`
/// * `.parquet` – one column per field, as written by Pandas or Polars
pub fn load_file(path: &Path) -> Result<LiftTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::debug!(
        "Parsed {} rows from {} ({:?})",
        table.len(),
        path.display(),
        table.columns()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// Parse an ISO-8601 date or date-time, keeping only the calendar date.
fn parse_date(value: &str, row: usize) -> Result<NaiveDate, LoadError> {
    let v = value.trim();
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(v).map(|dt| dt.date_naive()))
        .map_err(|_| LoadError::InvalidDate {
            row,
            value: v.to_string(),
        })
}

/// Blank (or NaN) cells are missing lifts.
fn parse_lift(value: &str, row: usize, column: &'static str) -> Result<Option<f64>, LoadError> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(None);
    }
    v.parse::<f64>()
        .map(|kg| (!kg.is_nan()).then_some(kg))
        .map_err(|_| LoadError::InvalidNumber {
            row,
            column,
            value: v.to_string(),
        })
}

fn check_required<S: AsRef<str>>(headers: &[S]) -> Result<(), LoadError> {
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.as_ref() == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; any columns beyond the known ones are
/// ignored. The OpenIPF export carries ~40 of them.
fn load_csv(path: &Path) -> Result<LiftTable, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    check_required(&headers)?;
    let columns = ColumnPresence::from_headers(&headers);
    let position = |name: &str| headers.iter().position(|h| h == name);

    let name_idx = position(COL_NAME);
    let sex_idx = position(COL_SEX);
    let date_idx = position(COL_DATE);
    let fed_idx = position(COL_FEDERATION);
    let class_idx = position(COL_WEIGHT_CLASS);
    let squat_idx = position(COL_SQUAT);
    let bench_idx = position(COL_BENCH);
    let deadlift_idx = position(COL_DEADLIFT);

    let mut rows = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row_no = i + 1;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").trim();

        rows.push(LiftResult {
            name: cell(name_idx).to_string(),
            sex: cell(sex_idx).to_string(),
            date: parse_date(cell(date_idx), row_no)?,
            federation: cell(fed_idx).to_string(),
            weight_class: cell(class_idx).to_string(),
            squat: parse_lift(cell(squat_idx), row_no, COL_SQUAT)?,
            bench: parse_lift(cell(bench_idx), row_no, COL_BENCH)?,
            deadlift: parse_lift(cell(deadlift_idx), row_no, COL_DEADLIFT)?,
        });
    }

    Ok(LiftTable::new(rows, columns))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Name": "Jane Doe", "Sex": "F", "Date": "2023-05-14",
///     "Federation": "IPF", "WeightClassKg": "63", "Best3SquatKg": 150.0, ... },
///   ...
/// ]
/// ```
///
/// `Date` may also be epoch milliseconds, which is what Pandas writes for
/// datetime columns.
fn load_json(path: &Path) -> Result<LiftTable, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or_else(|| LoadError::InvalidRecord {
        row: 0,
        reason: "expected a top-level JSON array".to_string(),
    })?;
    // `to_json` of an empty frame carries no keys to resolve a schema from.
    if records.is_empty() {
        return Ok(LiftTable::default());
    }

    let mut objects = Vec::with_capacity(records.len());
    let mut keys: BTreeSet<&str> = BTreeSet::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::InvalidRecord {
            row: i + 1,
            reason: "not a JSON object".to_string(),
        })?;
        keys.extend(obj.keys().map(String::as_str));
        objects.push(obj);
    }

    let headers: Vec<&str> = keys.into_iter().collect();
    check_required(&headers)?;
    let columns = ColumnPresence::from_headers(&headers);

    let rows = objects
        .into_iter()
        .enumerate()
        .map(|(i, obj)| json_row(obj, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LiftTable::new(rows, columns))
}

fn json_row(obj: &Map<String, JsonValue>, row: usize) -> Result<LiftResult, LoadError> {
    Ok(LiftResult {
        name: json_text(obj.get(COL_NAME)),
        sex: json_text(obj.get(COL_SEX)),
        date: json_date(obj.get(COL_DATE), row)?,
        federation: json_text(obj.get(COL_FEDERATION)),
        weight_class: json_text(obj.get(COL_WEIGHT_CLASS)),
        squat: json_lift(obj.get(COL_SQUAT), row, COL_SQUAT)?,
        bench: json_lift(obj.get(COL_BENCH), row, COL_BENCH)?,
        deadlift: json_lift(obj.get(COL_DEADLIFT), row, COL_DEADLIFT)?,
    })
}

fn json_text(val: Option<&JsonValue>) -> String {
    match val {
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn json_date(val: Option<&JsonValue>, row: usize) -> Result<NaiveDate, LoadError> {
    match val {
        Some(JsonValue::String(s)) => parse_date(s, row),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| LoadError::InvalidDate {
                row,
                value: n.to_string(),
            }),
        other => Err(LoadError::InvalidDate {
            row,
            value: other.map(JsonValue::to_string).unwrap_or_default(),
        }),
    }
}

fn json_lift(
    val: Option<&JsonValue>,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    match val {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) => parse_lift(s, row, column),
        Some(other) => Err(LoadError::InvalidNumber {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Accepted column types:
/// - text columns: Utf8 / LargeUtf8 (anything else is rendered to text)
/// - `Date`: Date32, Date64, or an ISO-8601 string
/// - lifts: any float or integer type, or numeric strings; nulls are missing
fn load_parquet(path: &Path) -> Result<LiftTable, LoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_required(&headers)?;
    let columns = ColumnPresence::from_headers(&headers);

    let reader = builder.build()?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let column = |name: &str| batch.column_by_name(name);
        let required = |name: &'static str| column(name).ok_or(LoadError::MissingColumn(name));

        let name_col = required(COL_NAME)?;
        let date_col = required(COL_DATE)?;
        let fed_col = required(COL_FEDERATION)?;
        let class_col = required(COL_WEIGHT_CLASS)?;
        let sex_col = column(COL_SEX);
        let squat_col = column(COL_SQUAT);
        let bench_col = column(COL_BENCH);
        let deadlift_col = column(COL_DEADLIFT);

        let offset = rows.len();
        for i in 0..batch.num_rows() {
            let row_no = offset + i + 1;
            rows.push(LiftResult {
                name: text_cell(name_col, i)?,
                sex: sex_col.map(|c| text_cell(c, i)).transpose()?.unwrap_or_default(),
                date: date_cell(date_col, i, row_no)?,
                federation: text_cell(fed_col, i)?,
                weight_class: text_cell(class_col, i)?,
                squat: float_cell(squat_col, i, row_no, COL_SQUAT)?,
                bench: float_cell(bench_col, i, row_no, COL_BENCH)?,
                deadlift: float_cell(deadlift_col, i, row_no, COL_DEADLIFT)?,
            });
        }
    }

    Ok(LiftTable::new(rows, columns))
}

// -- Arrow cell helpers --

fn text_cell(col: &ArrayRef, row: usize) -> Result<String, LoadError> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        _ => array_value_to_string(col, row)?,
    };
    Ok(text.trim().to_string())
}

fn date_cell(col: &ArrayRef, row: usize, row_no: usize) -> Result<NaiveDate, LoadError> {
    let invalid = |value: String| LoadError::InvalidDate { row: row_no, value };
    if col.is_null(row) {
        return Err(invalid(String::new()));
    }
    match col.data_type() {
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .ok_or_else(|| invalid(array_value_to_string(col, row).unwrap_or_default())),
        DataType::Date64 => col
            .as_primitive::<Date64Type>()
            .value_as_date(row)
            .ok_or_else(|| invalid(array_value_to_string(col, row).unwrap_or_default())),
        _ => parse_date(&text_cell(col, row)?, row_no),
    }
}

fn float_cell(
    col: Option<&ArrayRef>,
    row: usize,
    row_no: usize,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    let Some(col) = col else {
        return Ok(None);
    };
    if col.is_null(row) {
        return Ok(None);
    }
    let kg = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Int16 => col.as_primitive::<Int16Type>().value(row) as f64,
        DataType::Utf8 | DataType::LargeUtf8 => {
            return parse_lift(&text_cell(col, row)?, row_no, column);
        }
        other => {
            return Err(LoadError::InvalidRecord {
                row: row_no,
                reason: format!("column {column} has unsupported type {other:?}"),
            });
        }
    };
    Ok((!kg.is_nan()).then_some(kg))
}
