//! Playback session state shared with the player UI.

use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::models::Side;

const DEFAULT_VOLUME: u8 = 75;

/// Playback state of the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub side: Side,
    pub current_track_id: Option<String>,
    /// Elapsed time in the current track, in seconds.
    pub current_time: f64,
    /// Volume percentage, 0 to 100.
    pub volume: u8,
    /// Flip to the other side at the end of a side instead of stopping.
    pub tape_mode: bool,
    pub is_playing: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            side: Side::A,
            current_track_id: None,
            current_time: 0.0,
            volume: DEFAULT_VOLUME,
            tape_mode: true,
            is_playing: false,
        }
    }
}

impl Session {
    /// Overwrite every field present in `update`.
    fn apply(&mut self, update: SessionUpdate) {
        if let Some(side) = update.side {
            self.side = side;
        }
        if let Some(track_id) = update.current_track_id {
            self.current_track_id = track_id;
        }
        if let Some(time) = update.current_time {
            self.current_time = time;
        }
        if let Some(volume) = update.volume {
            self.volume = volume as u8;
        }
        if let Some(tape_mode) = update.tape_mode {
            self.tape_mode = tape_mode;
        }
        if let Some(is_playing) = update.is_playing {
            self.is_playing = is_playing;
        }
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Partial session update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    pub side: Option<Side>,
    /// `Some(None)` clears the current track.
    #[serde(default, deserialize_with = "present")]
    pub current_track_id: Option<Option<String>>,
    #[validate(range(min = 0.0, message = "Current time cannot be negative"))]
    pub current_time: Option<f64>,
    #[validate(range(min = 0, max = 100, message = "Volume must be between 0 and 100"))]
    pub volume: Option<i32>,
    pub tape_mode: Option<bool>,
    pub is_playing: Option<bool>,
}

/// Owner of the single process-wide session.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Mutex<Session>,
}

impl SessionStore {
    pub fn get(&self) -> Session {
        self.state.lock().clone()
    }

    /// Apply a partial update and return the new snapshot.
    ///
    /// An invalid update is rejected whole, leaving the session untouched.
    pub fn merge(&self, update: SessionUpdate) -> AppResult<Session> {
        update.validate()?;

        let mut state = self.state.lock();
        state.apply(update);
        Ok(state.clone())
    }

    pub fn reset(&self) -> Session {
        let mut state = self.state.lock();
        *state = Session::default();
        state.clone()
    }

    pub fn set_volume(&self, volume: i32) -> AppResult<u8> {
        let session = self.merge(SessionUpdate {
            volume: Some(volume),
            ..Default::default()
        })?;
        Ok(session.volume)
    }

    pub fn set_tape_mode(&self, enabled: bool) -> bool {
        let mut state = self.state.lock();
        state.tape_mode = enabled;
        state.tape_mode
    }
}
