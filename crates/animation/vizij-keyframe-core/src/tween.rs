//! Fire-and-forget tweens of fixed-size float attribute sets.
//!
//! A tween builds a transient two-keyframe clip (`0 ms -> from`, `duration -> to`),
//! links its persistent controller to it and plays it once. When the cursor
//! reaches the end the clip is dropped and the controller unlinked, leaving the
//! attribute static at the target value.

use std::sync::Arc;

use crate::binding::Controller;
use crate::clip::AnimationClip;
use crate::config::Config;
use crate::outputs::{OutputHandle, OutputSink};
use crate::playback::{start_playback, Millis, PlaybackCursor, SimClock};
use crate::track::{KeyTime, KeyframeTrack};
use crate::value::{Scalar, ScalarKind};

#[derive(Clone, Debug)]
pub struct AttributeTween<const N: usize> {
    handles: [OutputHandle; N],
    controller: Controller,
    clip: Option<Arc<AnimationClip>>,
    cursor: PlaybackCursor,
}

impl<const N: usize> AttributeTween<N> {
    /// Tween driving float outputs `handles[0..N]`.
    pub fn new(handles: [OutputHandle; N]) -> Self {
        Self {
            handles,
            controller: Controller::from_outputs(ScalarKind::Float, handles, &Config::default()),
            clip: None,
            cursor: PlaybackCursor::new(),
        }
    }

    pub fn handles(&self) -> &[OutputHandle; N] {
        &self.handles
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    /// The transient clip of the running tween.
    pub fn clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clip.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.clip.is_some()
    }

    /// Start animating from `from` to `to` over `duration` ms, replacing any
    /// running tween. A zero duration writes `to` at once.
    pub fn start<S: OutputSink + ?Sized>(
        &mut self,
        from: [f32; N],
        to: [f32; N],
        duration: KeyTime,
        sink: &mut S,
    ) {
        self.cancel();
        if duration == 0 {
            for (handle, value) in self.handles.iter().zip(to) {
                sink.write(*handle, Scalar::Float(value));
            }
            return;
        }

        let tracks = from
            .into_iter()
            .zip(to)
            .map(|(a, b)| {
                let mut track = KeyframeTrack::new();
                track.insert_frame(0, Scalar::Float(a));
                track.insert_frame(duration, Scalar::Float(b));
                track
            })
            .collect();
        let clip = Arc::new(AnimationClip::from_tracks("", tracks));
        start_playback(&mut self.controller, &mut self.cursor, &clip, 0, 1);
        self.clip = Some(clip);
    }

    /// Drop the running tween without writing anything.
    pub fn cancel(&mut self) {
        self.clip = None;
        self.controller.unlink();
        self.cursor.stop();
    }

    /// Advance by `dt` ms, write the attribute values, and finish the tween
    /// once the end is reached.
    pub fn update<S: OutputSink + ?Sized>(&mut self, dt: Millis, sink: &mut S) {
        if self.clip.is_none() {
            return;
        }
        self.cursor.tick(dt);
        self.controller.evaluate(self.cursor.elapsed(), sink);
        if self.cursor.is_finished() || self.cursor.elapsed() >= self.cursor.duration() {
            self.cancel();
        }
    }

    /// [`AttributeTween::update`] by one clock frame, skipped while paused.
    pub fn step<S: OutputSink + ?Sized>(&mut self, clock: &SimClock, sink: &mut S) {
        if !clock.paused {
            self.update(clock.frame_ms, sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::OutputBank;

    fn handles<const N: usize>() -> [OutputHandle; N] {
        std::array::from_fn(|i| OutputHandle(i as u32))
    }

    #[test]
    fn zero_duration_applies_immediately() {
        let mut bank = OutputBank::floats(2);
        let mut tween = AttributeTween::new(handles::<2>());
        tween.start([0.0, 0.0], [3.0, 4.0], 0, &mut bank);
        assert!(!tween.is_active());
        assert_eq!(bank.values(), &[Scalar::Float(3.0), Scalar::Float(4.0)]);
    }

    #[test]
    fn restart_replaces_running_tween() {
        let mut bank = OutputBank::floats(1);
        let mut tween = AttributeTween::new(handles::<1>());
        tween.start([0.0], [10.0], 100, &mut bank);
        tween.update(50, &mut bank);
        assert_eq!(bank.get(OutputHandle(0)), Some(Scalar::Float(5.0)));
        tween.start([5.0], [-5.0], 10, &mut bank);
        assert_eq!(tween.cursor().elapsed(), 0);
        tween.update(5, &mut bank);
        assert_eq!(bank.get(OutputHandle(0)), Some(Scalar::Float(0.0)));
    }

    #[test]
    fn overshoot_lands_on_target() {
        let mut bank = OutputBank::floats(1);
        let mut tween = AttributeTween::new(handles::<1>());
        tween.start([1.0], [2.0], 100, &mut bank);
        tween.update(250, &mut bank);
        assert_eq!(bank.get(OutputHandle(0)), Some(Scalar::Float(2.0)));
        assert!(!tween.is_active());
        assert!(!tween.controller().is_linked());
    }
}
