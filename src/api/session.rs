//! Session endpoints.

use actix_web::{get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::models::AppState;
use crate::session::SessionUpdate;

/// Request body for toggling tape mode.
#[derive(Debug, Deserialize)]
pub struct TapeModeRequest {
    pub enabled: bool,
}

/// Request body for setting the volume.
#[derive(Debug, Deserialize)]
pub struct VolumeRequest {
    pub volume: i32,
}

/// Get the current session.
///
/// GET /api/session
#[get("/api/session")]
pub async fn get_session(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.session.get())
}

/// Merge a partial session into the current one.
///
/// POST /api/session
#[post("/api/session")]
pub async fn update_session(
    data: web::Data<AppState>,
    body: web::Json<SessionUpdate>,
) -> AppResult<HttpResponse> {
    let session = data.session.merge(body.into_inner())?;

    tracing::debug!(
        side = %session.side,
        track = ?session.current_track_id,
        time = session.current_time,
        playing = session.is_playing,
        "Session updated"
    );

    Ok(HttpResponse::Ok().json(json!({ "success": true, "session": session })))
}

/// PUT /api/session/tape-mode
#[put("/api/session/tape-mode")]
pub async fn set_tape_mode(
    data: web::Data<AppState>,
    body: web::Json<TapeModeRequest>,
) -> HttpResponse {
    let tape_mode = data.session.set_tape_mode(body.enabled);
    tracing::info!(tape_mode, "Tape mode changed");

    HttpResponse::Ok().json(json!({ "success": true, "tapeMode": tape_mode }))
}

/// PUT /api/session/volume
///
/// Rejects volumes outside 0..=100 with a 400.
#[put("/api/session/volume")]
pub async fn set_volume(
    data: web::Data<AppState>,
    body: web::Json<VolumeRequest>,
) -> AppResult<HttpResponse> {
    let volume = data.session.set_volume(body.volume)?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "volume": volume })))
}

/// Restore the default session.
///
/// POST /api/session/reset
#[post("/api/session/reset")]
pub async fn reset_session(data: web::Data<AppState>) -> HttpResponse {
    let session = data.session.reset();
    tracing::info!("Session reset");

    HttpResponse::Ok().json(json!({ "success": true, "session": session }))
}

/// Configure session routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_session)
        .service(update_session)
        .service(set_tape_mode)
        .service(set_volume)
        .service(reset_session);
}
