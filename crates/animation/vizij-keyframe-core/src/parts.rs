//! Named playback for objects made of independently placed parts.
//!
//! Each part exposes five float channels (x, y, z, horizontal angle, vertical
//! angle), so a player for `P` parts drives a controller of `P * 5` slots.
//! Switching clips goes through a [`ClipLibrary`] lookup by name; an unknown
//! name leaves the current binding and cursor untouched.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::binding::Controller;
use crate::config::Config;
use crate::library::ClipLibrary;
use crate::outputs::{OutputHandle, OutputSink};
use crate::playback::{start_playback, Millis, PlaybackCursor, SimClock};
use crate::value::{Scalar, ScalarKind};

/// Channels per part: x, y, z, angh, angv.
pub const PART_CHANNELS: usize = 5;

/// Placement of one part relative to its object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartPlacement {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub angh: f32,
    pub angv: f32,
}

impl PartPlacement {
    fn channel_mut(&mut self, channel: usize) -> Option<&mut f32> {
        match channel {
            0 => Some(&mut self.x),
            1 => Some(&mut self.y),
            2 => Some(&mut self.z),
            3 => Some(&mut self.angh),
            4 => Some(&mut self.angv),
            _ => None,
        }
    }
}

/// Handle `h` addresses part `h / 5`, channel `h % 5`.
impl OutputSink for [PartPlacement] {
    fn write(&mut self, handle: OutputHandle, value: Scalar) {
        let index = handle.0 as usize;
        if let Some(v) = self
            .get_mut(index / PART_CHANNELS)
            .and_then(|p| p.channel_mut(index % PART_CHANNELS))
        {
            *v = value.as_f32();
        }
    }
}

#[derive(Clone, Debug)]
pub struct PartPlayer {
    cfg: Config,
    controller: Controller,
    placements: Vec<PartPlacement>,
    cursor: PlaybackCursor,
    current: Option<String>,
}

/// Slot `i` drives handle `i`, i.e. part `i / 5`, channel `i % 5`.
fn part_controller(part_count: usize, cfg: &Config) -> Controller {
    let handles = (0..part_count * PART_CHANNELS).map(|slot| OutputHandle(slot as u32));
    Controller::from_outputs(ScalarKind::Float, handles, cfg)
}

impl PartPlayer {
    pub fn new(part_count: usize) -> Self {
        Self::with_config(part_count, &Config::default())
    }

    pub fn with_config(part_count: usize, cfg: &Config) -> Self {
        Self {
            cfg: cfg.clone(),
            controller: part_controller(part_count, cfg),
            placements: vec![PartPlacement::default(); part_count],
            cursor: PlaybackCursor::new(),
            current: None,
        }
    }

    /// Rebuild for a new part count: all placements reset to zero, playback stops.
    pub fn resize(&mut self, part_count: usize) {
        self.controller = part_controller(part_count, &self.cfg);
        self.placements = vec![PartPlacement::default(); part_count];
        self.cursor = PlaybackCursor::new();
        self.current = None;
    }

    pub fn part_count(&self) -> usize {
        self.placements.len()
    }

    pub fn placements(&self) -> &[PartPlacement] {
        &self.placements
    }

    pub fn placement(&self, part: usize) -> Option<&PartPlacement> {
        self.placements.get(part)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    /// Name of the clip last switched to.
    pub fn current_clip(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Switch to the clip called `name`, starting at `start` ms, playing
    /// `repeats` passes (0 loops forever).
    ///
    /// Returns `false` and changes nothing when the library has no such clip.
    pub fn play(
        &mut self,
        library: &ClipLibrary,
        name: &str,
        start: Millis,
        repeats: u32,
    ) -> bool {
        let Some(clip) = library.get(name) else {
            debug!("part player: no clip named '{name}', keeping current playback");
            return false;
        };
        start_playback(&mut self.controller, &mut self.cursor, clip, start, repeats);
        self.current = Some(name.to_string());
        true
    }

    /// Advance one clock frame and refresh the placements while playing.
    pub fn update(&mut self, clock: &SimClock) {
        let was_active = self.cursor.is_active();
        self.cursor.step(clock);
        if was_active {
            self.evaluate();
        }
    }

    /// Write the placements for the current cursor time.
    pub fn evaluate(&mut self) {
        self.controller
            .evaluate(self.cursor.elapsed(), self.placements.as_mut_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_sink_maps_handles_to_channels() {
        let mut parts = vec![PartPlacement::default(); 2];
        parts.as_mut_slice().write(OutputHandle(8), Scalar::Float(45.0));
        parts.as_mut_slice().write(OutputHandle(2), Scalar::Int(3));
        parts.as_mut_slice().write(OutputHandle(10), Scalar::Float(1.0));
        assert_eq!(parts[1].angh, 45.0);
        assert_eq!(parts[0].z, 3.0);
    }

    #[test]
    fn resize_resets_state() {
        let mut player = PartPlayer::new(1);
        player.placements[0].x = 4.0;
        player.resize(3);
        assert_eq!(player.part_count(), 3);
        assert_eq!(player.controller().slot_count(), 15);
        assert!(player.placements().iter().all(|p| *p == PartPlacement::default()));
        assert!(!player.cursor().is_active());
    }

    #[test]
    fn every_slot_drives_its_own_channel() {
        let player = PartPlayer::new(2);
        let outputs: Vec<_> = player.controller().slots().iter().map(|s| s.output).collect();
        let expected: Vec<_> = (0..10).map(|h| Some(OutputHandle(h))).collect();
        assert_eq!(outputs, expected);
        assert!(player
            .controller()
            .slots()
            .iter()
            .all(|s| s.kind == ScalarKind::Float));
    }
}
