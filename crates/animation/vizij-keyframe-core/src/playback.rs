//! Playback cursors and the simulation clock that drives them.
//!
//! A cursor keeps a controller's evaluation time and its loop bookkeeping.
//! It is advanced once per frame by the consumer that owns it:
//!
//! - `Idle` / `Finished`: time never advances.
//! - `Looping`: time wraps modulo the clip duration (a zero-length clip pins it to 0).
//! - `Repeating { remaining }`: every pass beyond the end consumes one repeat; when
//!   the last one is consumed the cursor freezes on the final frame and finishes.

use std::num::NonZeroU32;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::binding::{Controller, LinkReport};
use crate::clip::AnimationClip;
use crate::track::KeyTime;

/// Signed millisecond time used for evaluation and cursor bookkeeping.
pub type Millis = i64;

/// Frame timing shared by every cursor of one update loop.
///
/// While `paused`, [`PlaybackCursor::step`] does nothing, but controllers can still
/// be evaluated at the frozen cursor time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    pub paused: bool,
    /// Duration of the current frame in milliseconds.
    pub frame_ms: Millis,
}

impl SimClock {
    pub fn new(frame_ms: Millis) -> Self {
        Self {
            paused: false,
            frame_ms,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Idle,
    Looping,
    Repeating {
        remaining: NonZeroU32,
    },
    Finished,
}

impl PlaybackState {
    /// Repeat count for `play`: 0 loops forever, `n` plays `n` passes.
    pub fn from_repeats(repeats: u32) -> Self {
        match NonZeroU32::new(repeats) {
            None => PlaybackState::Looping,
            Some(remaining) => PlaybackState::Repeating { remaining },
        }
    }

    /// Legacy encoding: -1 idle or finished, 0 infinite, n > 0 repeats left.
    pub fn remaining_loops(&self) -> i64 {
        match self {
            PlaybackState::Idle | PlaybackState::Finished => -1,
            PlaybackState::Looping => 0,
            PlaybackState::Repeating { remaining } => i64::from(remaining.get()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackCursor {
    elapsed: Millis,
    duration: Millis,
    state: PlaybackState,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn remaining_loops(&self) -> i64 {
        self.state.remaining_loops()
    }

    /// True while the cursor still advances.
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Looping | PlaybackState::Repeating { .. }
        )
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Restart at `start` ms over a clip of `duration` ms.
    pub fn play(&mut self, start: Millis, repeats: u32, duration: KeyTime) {
        self.elapsed = start;
        self.duration = Millis::from(duration);
        self.state = PlaybackState::from_repeats(repeats);
    }

    /// Return to `Idle`, keeping the current time.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
    }

    /// Advance by `dt` ms according to the loop state.
    pub fn tick(&mut self, dt: Millis) {
        if !self.is_active() {
            return;
        }
        self.elapsed += dt;
        if self.elapsed < self.duration {
            return;
        }
        match self.state {
            PlaybackState::Looping => {
                self.elapsed = if self.duration == 0 {
                    0
                } else {
                    self.elapsed % self.duration
                };
            }
            PlaybackState::Repeating { remaining } => {
                let mut left = remaining.get();
                if self.duration == 0 {
                    if self.elapsed > 0 {
                        left = 0;
                    }
                } else {
                    // Passes strictly beyond the end; landing on it consumes nothing.
                    let passes = (self.elapsed - 1) / self.duration;
                    let consumed = passes.min(i64::from(left));
                    self.elapsed -= consumed * self.duration;
                    // `consumed <= left`, so it fits back into u32.
                    left -= consumed as u32;
                }
                match NonZeroU32::new(left) {
                    Some(remaining) => self.state = PlaybackState::Repeating { remaining },
                    None => {
                        self.elapsed = self.duration;
                        self.state = PlaybackState::Finished;
                    }
                }
            }
            PlaybackState::Idle | PlaybackState::Finished => {}
        }
    }

    /// Advance by one clock frame unless the clock is paused.
    pub fn step(&mut self, clock: &SimClock) {
        if !clock.paused {
            self.tick(clock.frame_ms);
        }
    }
}

/// Link `controller` to `clip` and restart `cursor` over the clip's duration.
pub fn start_playback(
    controller: &mut Controller,
    cursor: &mut PlaybackCursor,
    clip: &Arc<AnimationClip>,
    start: Millis,
    repeats: u32,
) -> LinkReport {
    let report = controller.link(Some(clip));
    cursor.play(start, repeats, report.duration);
    debug!(
        "playback: '{}' from {} ms, repeats={}, duration {} ms",
        clip.name(),
        start,
        repeats,
        report.duration
    );
    report
}
