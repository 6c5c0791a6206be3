//! HTTP API.

pub mod files;
pub mod health;
pub mod playlists;
pub mod session;

use actix_web::web;

use crate::error::AppError;

/// JSON body extractor settings: malformed bodies become `400 BAD_REQUEST`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure every `/api` route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(playlists::configure)
        .configure(session::configure);
}
