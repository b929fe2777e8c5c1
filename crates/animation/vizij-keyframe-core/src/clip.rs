//! Animation clips: a name plus a fixed number of keyframe tracks.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::KeyframeError;
use crate::track::{Insertion, KeyTime, KeyframeTrack, PairsReport};
use crate::value::Scalar;

/// A named bundle of tracks. The track count never changes after creation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AnimationClip {
    name: String,
    tracks: Vec<KeyframeTrack>,
    /// Latest keyframe time across all tracks.
    duration: KeyTime,
}

impl AnimationClip {
    /// Create a clip with `track_count` empty tracks.
    pub fn new(name: impl Into<String>, track_count: usize) -> Self {
        Self {
            name: name.into(),
            tracks: vec![KeyframeTrack::Empty; track_count],
            duration: 0,
        }
    }

    /// Clip over already authored tracks; duration is derived from them.
    pub(crate) fn from_tracks(name: impl Into<String>, tracks: Vec<KeyframeTrack>) -> Self {
        let duration = tracks
            .iter()
            .filter_map(KeyframeTrack::last_time)
            .max()
            .unwrap_or(0);
        Self {
            name: name.into(),
            tracks,
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn track(&self, index: usize) -> Option<&KeyframeTrack> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[KeyframeTrack] {
        &self.tracks
    }

    /// Latest keyframe time over all tracks, 0 when the clip holds no keyframes.
    pub fn duration(&self) -> KeyTime {
        self.duration
    }

    /// True when no track holds a keyframe.
    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(KeyframeTrack::is_empty)
    }

    /// Insert one keyframe into track `index`.
    pub fn insert_frame(
        &mut self,
        index: usize,
        time: KeyTime,
        value: Scalar,
    ) -> Result<Insertion, KeyframeError> {
        let track_count = self.tracks.len();
        let track = self
            .tracks
            .get_mut(index)
            .ok_or(KeyframeError::TrackOutOfRange { index, track_count })?;
        let outcome = track.insert_frame(time, value);
        if outcome == Insertion::Added && time > self.duration {
            self.duration = time;
        }
        Ok(outcome)
    }

    /// Fill track `index` from a flat `[time, value, time, value, ...]` list.
    ///
    /// See [`KeyframeTrack::insert_pairs`] for the pair rules.
    pub fn set_track_from_pairs(
        &mut self,
        index: usize,
        pairs: &[Scalar],
    ) -> Result<PairsReport, KeyframeError> {
        let track_count = self.tracks.len();
        let track = self
            .tracks
            .get_mut(index)
            .ok_or(KeyframeError::TrackOutOfRange { index, track_count })?;
        let report = track.insert_pairs(pairs);
        if let Some(last) = track.last_time() {
            self.duration = self.duration.max(last);
        }
        if report.skipped > 0 {
            warn!(
                "clip '{}' track {}: skipped {} pairs with invalid time",
                self.name, index, report.skipped
            );
        }
        Ok(report)
    }
}
