use crate::db::rows::row_to_json;
use crate::error::CatalogError;
use crate::server::router::CatalogState;
use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    pub query: String,
}

/// `POST /query`: execute a caller-supplied SQL statement verbatim.
///
/// There is deliberately no validation or sanitization here. Any statement
/// type is allowed, including writes and schema changes; the capability
/// boundary sits at the API edge, not inside this call. Statements that
/// produce no rows return `[]`; execution failures return 400 with the
/// underlying error text.
pub async fn run_query(
    State(state): State<CatalogState>,
    Json(body): Json<QueryBody>,
) -> Result<Json<Value>, CatalogError> {
    let mut conn = state.connect().await?;

    let rows = sqlx::query(&body.query).fetch_all(&mut conn).await?;
    let tuples = rows
        .iter()
        .map(row_to_json)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Value::Array(tuples)))
}
