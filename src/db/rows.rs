//! Dynamic row decoding for the raw-query endpoint.
//!
//! Raw queries have no compile-time shape, so each column is decoded by its
//! runtime SQLite type and rendered into the same positional JSON tuples the
//! typed endpoints produce.

use serde_json::{Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

/// Converts one result row into a JSON array of column values.
pub fn row_to_json(row: &SqliteRow) -> Result<Value, sqlx::Error> {
    let mut out = Vec::with_capacity(row.len());
    for i in 0..row.len() {
        out.push(column_to_json(row, i)?);
    }
    Ok(Value::Array(out))
}

fn column_to_json(row: &SqliteRow, i: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(i)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    // Value-level type, not the declared column type; an expression column
    // still reports what it actually holds.
    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(i)?),
        "REAL" | "NUMERIC" => {
            let v = row.try_get::<f64, _>(i)?;
            Number::from_f64(v).map_or(Value::Null, Value::Number)
        }
        "BLOB" => Value::Array(
            row.try_get::<Vec<u8>, _>(i)?
                .into_iter()
                .map(Value::from)
                .collect(),
        ),
        // TEXT and anything SQLite reports with a textual affinity.
        _ => Value::from(row.try_get::<String, _>(i)?),
    };
    Ok(value)
}
