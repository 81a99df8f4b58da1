use crate::db;
use crate::error::CatalogError;
use crate::server::routes::{library, query};

use axum::{
    Router,
    extract::Request,
    http::{StatusCode, Version},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use std::time::Instant;
use tracing::{error, info, warn};

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Shared router state: the connect options handlers use to open their
/// per-request connection. No pooled or long-lived handle is kept.
#[derive(Clone)]
pub struct CatalogState {
    connect_opts: SqliteConnectOptions,
}

impl CatalogState {
    pub fn new(database_url: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            connect_opts: db::connect_options(database_url)?,
        })
    }

    /// Opens a fresh connection for one request. Dropping the returned
    /// connection closes it on every exit path, including `?` returns.
    pub async fn connect(&self) -> Result<SqliteConnection, CatalogError> {
        db::connect(&self.connect_opts).await
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let start = Instant::now();
    let resp = next.run(req).await;

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {:^7} | {:<8} | {} | {}ms",
            status.as_u16(),
            method.as_str(),
            protocol,
            path,
            latency_ms
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {:^7} | {:<8} | {} | {}ms",
            status.as_u16(),
            method.as_str(),
            protocol,
            path,
            latency_ms
        );
    } else {
        info!(
            "| {:>3} | {:^7} | {:<8} | {} | {}ms",
            status.as_u16(),
            method.as_str(),
            protocol,
            path,
            latency_ms
        );
    }

    resp
}

pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route("/library", get(library::list_catalog))
        .route("/library/add", post(library::add_record))
        .route("/library/{name}", get(library::fetch_by_name))
        .route("/query", post(query::run_query))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
