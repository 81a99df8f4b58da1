use crate::db::Record;
use crate::error::CatalogError;
use crate::server::router::CatalogState;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

/// `GET /library`: every record, in storage order.
pub async fn list_catalog(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Record>>, CatalogError> {
    let mut conn = state.connect().await?;
    let records = sqlx::query_as::<_, Record>("SELECT * FROM lib")
        .fetch_all(&mut conn)
        .await?;
    Ok(Json(records))
}

/// `GET /library/{name}`: every record whose name matches exactly.
///
/// The path segment is taken literally after the router's percent-decoding;
/// it is never interpreted as a pattern. Zero matches is a 404, not `[]`.
pub async fn fetch_by_name(
    State(state): State<CatalogState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Record>>, CatalogError> {
    debug!(%name, "catalog lookup");
    let mut conn = state.connect().await?;
    let records = sqlx::query_as::<_, Record>("SELECT * FROM lib WHERE name = ?")
        .bind(&name)
        .fetch_all(&mut conn)
        .await?;

    if records.is_empty() {
        return Err(CatalogError::NotFound(name));
    }
    Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct AddRecordBody {
    pub book: String,
}

/// `POST /library/add`: insert a new record with `max(id) + 1` and no holder.
///
/// Not idempotent: the same name twice creates two rows. On an empty table
/// the max(id) decode fails (NULL is not an integer) and surfaces as a 400;
/// that failure mode is contractual, not a bug to fix. Two concurrent adds
/// can race on max(id) and collide on the primary key; the loser gets the
/// constraint error back as a 400.
pub async fn add_record(
    State(state): State<CatalogState>,
    Json(body): Json<AddRecordBody>,
) -> Result<Json<Value>, CatalogError> {
    let mut conn = state.connect().await?;

    let max_id: i64 = sqlx::query_scalar("SELECT max(id) FROM lib")
        .fetch_one(&mut conn)
        .await?;

    sqlx::query("INSERT INTO lib VALUES (?, ?, ?)")
        .bind(max_id + 1)
        .bind(&body.book)
        .bind(Option::<String>::None)
        .execute(&mut conn)
        .await?;

    Ok(Json(json!({
        "Response": format!("Successfully added {} to the catalog", body.book)
    })))
}
