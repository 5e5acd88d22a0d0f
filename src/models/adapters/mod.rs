//! Utilities for adapting record batch columns to domain model fields
//!
//! Columns are looked up by name and converted to the expected Arrow type
//! before downcasting, so a table whose integer keys were inferred as
//! strings (or whose timestamps were inferred as Arrow timestamps) still
//! adapts cleanly. Date and datetime fields are parsed from their string
//! form against an ordered list of accepted formats.

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Accepted datetime formats, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Accepted date-only formats, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

fn column_as(
    batch: &RecordBatch,
    table: &str,
    column: &str,
    to_type: &DataType,
) -> Result<arrow::array::ArrayRef> {
    let array = batch
        .column_by_name(column)
        .ok_or_else(|| Error::missing_column(table, column))?;
    cast(array.as_ref(), to_type).map_err(Error::from)
}

/// Extract a column as `Int64`, adapting the stored type if necessary
pub fn i64_column(batch: &RecordBatch, table: &str, column: &str) -> Result<Int64Array> {
    let array = column_as(batch, table, column, &DataType::Int64)?;
    array
        .as_any()
        .downcast_ref::<Int64Array>()
        .cloned()
        .ok_or_else(|| Error::schema(table, format!("column '{column}' is not convertible to Int64")))
}

/// Extract a column as `Float64`, adapting the stored type if necessary
pub fn f64_column(batch: &RecordBatch, table: &str, column: &str) -> Result<Float64Array> {
    let array = column_as(batch, table, column, &DataType::Float64)?;
    array
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .ok_or_else(|| {
            Error::schema(table, format!("column '{column}' is not convertible to Float64"))
        })
}

/// Extract a column as UTF-8 strings, adapting the stored type if necessary
pub fn string_column(batch: &RecordBatch, table: &str, column: &str) -> Result<StringArray> {
    let array = column_as(batch, table, column, &DataType::Utf8)?;
    array
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| Error::schema(table, format!("column '{column}' is not convertible to Utf8")))
}

/// Read one string cell, normalizing empty and whitespace-only values to `None`
#[must_use]
pub fn opt_string(array: &StringArray, row: usize) -> Option<String> {
    if array.is_null(row) {
        return None;
    }
    let value = array.value(row).trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Read one integer cell that the table schema requires to be present
pub fn require_i64(array: &Int64Array, table: &str, column: &str, row: usize) -> Result<i64> {
    if array.is_null(row) {
        return Err(Error::schema(
            table,
            format!("column '{column}' has a null or unparseable value at row {row}"),
        ));
    }
    Ok(array.value(row))
}

/// Parse a datetime string against the accepted formats, falling back to
/// date-only values at midnight
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    parse_date(raw).and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a date string against the accepted formats, accepting a leading
/// datetime by truncation
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.date());
        }
    }
    None
}

/// Extract a column of nullable datetimes
pub fn datetime_column(
    batch: &RecordBatch,
    table: &str,
    column: &str,
) -> Result<Vec<Option<NaiveDateTime>>> {
    let array = string_column(batch, table, column)?;
    let mut values = Vec::with_capacity(array.len());
    for row in 0..array.len() {
        let parsed = match opt_string(&array, row) {
            Some(raw) => {
                let parsed = parse_datetime(&raw);
                if parsed.is_none() {
                    return Err(Error::schema(
                        table,
                        format!("column '{column}' has unparseable datetime '{raw}' at row {row}"),
                    ));
                }
                parsed
            }
            None => None,
        };
        values.push(parsed);
    }
    Ok(values)
}

/// Extract a column of nullable dates
pub fn date_column(
    batch: &RecordBatch,
    table: &str,
    column: &str,
) -> Result<Vec<Option<NaiveDate>>> {
    let array = string_column(batch, table, column)?;
    let mut values = Vec::with_capacity(array.len());
    for row in 0..array.len() {
        let parsed = match opt_string(&array, row) {
            Some(raw) => {
                let parsed = parse_date(&raw);
                if parsed.is_none() {
                    return Err(Error::schema(
                        table,
                        format!("column '{column}' has unparseable date '{raw}' at row {row}"),
                    ));
                }
                parsed
            }
            None => None,
        };
        values.push(parsed);
    }
    Ok(values)
}
