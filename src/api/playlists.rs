//! Playlist endpoints.

use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::error::AppResult;
use crate::models::{AppState, Side, Track};

/// Response for a single side.
#[derive(Debug, Serialize)]
pub struct SidePlaylist {
    pub side: Side,
    pub tracks: Vec<Track>,
}

/// List both sides of the tape.
///
/// GET /api/playlists
#[get("/api/playlists")]
pub async fn list_playlists(data: web::Data<AppState>) -> AppResult<HttpResponse> {
    let library = data.library.clone();
    let playlists = web::block(move || library.scan()).await??;

    Ok(HttpResponse::Ok().json(playlists))
}

/// List one side of the tape.
///
/// GET /api/playlists/{side}
///
/// `side` is `A` or `B`, in any case. Anything else is a 404.
#[get("/api/playlists/{side}")]
pub async fn side_playlist(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let side: Side = path.parse()?;

    let library = data.library.clone();
    let tracks = web::block(move || library.scan_side(side)).await??;

    Ok(HttpResponse::Ok().json(SidePlaylist { side, tracks }))
}

/// Clear the metadata cache and rescan.
///
/// POST /api/refresh
#[post("/api/refresh")]
pub async fn refresh(data: web::Data<AppState>) -> AppResult<HttpResponse> {
    let library = data.library.clone();
    let playlists = web::block(move || library.refresh()).await??;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "counts": playlists.counts(),
    })))
}

/// Configure playlist routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_playlists)
        .service(side_playlist)
        .service(refresh);
}
