//! Health check endpoint.

use actix_web::{get, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{AppState, TrackCounts};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the library could not be scanned.
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Service version.
    pub version: &'static str,
    pub tracks: TrackCounts,
    /// Files with cached metadata.
    pub cached: usize,
}

/// Health check endpoint.
///
/// GET /api/health
///
/// Always answers 200. Track counts come from a (cache-assisted) scan.
#[get("/api/health")]
pub async fn health(data: web::Data<AppState>) -> HttpResponse {
    let library = data.library.clone();

    let (status, tracks) = match web::block(move || library.scan()).await {
        Ok(Ok(playlists)) => ("ok", playlists.counts()),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Library scan failed during health check");
            ("degraded", TrackCounts::default())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Health check scan did not run");
            ("degraded", TrackCounts::default())
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        tracks,
        cached: data.library.cache().len(),
    })
}

/// Configure health routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
