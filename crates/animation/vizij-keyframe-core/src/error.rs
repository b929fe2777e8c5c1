//! Errors for clip authoring and controller setup.
//!
//! Per-frame operations (ticking, evaluation) never fail; these errors only
//! cover indices that are out of range and authoring data that cannot be decoded.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyframeError {
    #[error("track index {index} out of range (clip has {track_count} tracks)")]
    TrackOutOfRange { index: usize, track_count: usize },
    #[error("slot index {index} out of range (controller has {slot_count} slots)")]
    SlotOutOfRange { index: usize, slot_count: usize },
    #[error("clip spec json error: {0}")]
    Json(String),
}
