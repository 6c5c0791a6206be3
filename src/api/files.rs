//! Static byte serving: audio files, extracted covers and the player UI.

use actix_files::Files;
use actix_web::web;

use crate::config::Config;

/// Configure file routes.
///
/// Must be registered after the API routes: the UI is mounted at `/`.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(Files::new("/musics", &config.music_dir).use_last_modified(true))
        // Covers are rewritten in place on refresh.
        .service(Files::new("/covers", &config.covers_dir).use_etag(true))
        .service(Files::new("/", &config.public_dir).index_file("index.html"));
}
