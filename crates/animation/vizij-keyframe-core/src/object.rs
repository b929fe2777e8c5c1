//! An animated object: tweened position, angles and color plus optional
//! named multi-part playback.

use serde::{Deserialize, Serialize};

use crate::library::ClipLibrary;
use crate::outputs::{OutputHandle, OutputSink};
use crate::parts::PartPlayer;
use crate::playback::{Millis, SimClock};
use crate::track::KeyTime;
use crate::tween::AttributeTween;
use crate::value::Scalar;

const POS: [OutputHandle; 3] = [OutputHandle(0), OutputHandle(1), OutputHandle(2)];
const ANGLE: [OutputHandle; 2] = [OutputHandle(3), OutputHandle(4)];
const COLOR: [OutputHandle; 4] = [
    OutputHandle(5),
    OutputHandle(6),
    OutputHandle(7),
    OutputHandle(8),
];

/// Live attributes of an object, addressed by the handles above.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub angh: f32,
    pub angv: f32,
    /// RGBA in 0..1.
    pub color: [f32; 4],
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            angh: 0.0,
            angv: 0.0,
            color: [1.0; 4],
        }
    }
}

impl OutputSink for ObjectState {
    fn write(&mut self, handle: OutputHandle, value: Scalar) {
        let v = value.as_f32();
        match handle.0 {
            0 => self.x = v,
            1 => self.y = v,
            2 => self.z = v,
            3 => self.angh = v,
            4 => self.angv = v,
            h @ 5..=8 => self.color[(h - 5) as usize] = v,
            _ => {}
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnimatedObject {
    state: ObjectState,
    pos: AttributeTween<3>,
    angle: AttributeTween<2>,
    color: AttributeTween<4>,
    parts: Option<PartPlayer>,
}

impl Default for AnimatedObject {
    fn default() -> Self {
        Self::new(ObjectState::default())
    }
}

impl AnimatedObject {
    pub fn new(state: ObjectState) -> Self {
        Self {
            state,
            pos: AttributeTween::new(POS),
            angle: AttributeTween::new(ANGLE),
            color: AttributeTween::new(COLOR),
            parts: None,
        }
    }

    pub fn state(&self) -> &ObjectState {
        &self.state
    }

    pub fn parts(&self) -> Option<&PartPlayer> {
        self.parts.as_ref()
    }

    /// True while any tween is running.
    pub fn is_tweening(&self) -> bool {
        self.pos.is_active() || self.angle.is_active() || self.color.is_active()
    }

    pub fn set_pos(&mut self, x: f32, y: f32, z: f32, duration: KeyTime) {
        let from = [self.state.x, self.state.y, self.state.z];
        self.pos.start(from, [x, y, z], duration, &mut self.state);
    }

    pub fn set_angle(&mut self, angh: f32, angv: f32, duration: KeyTime) {
        let from = [self.state.angh, self.state.angv];
        self.angle.start(from, [angh, angv], duration, &mut self.state);
    }

    /// Tween to an 8-bit RGBA color.
    pub fn set_color(&mut self, rgba: [u8; 4], duration: KeyTime) {
        let to = rgba.map(|c| f32::from(c) / 255.0);
        let from = self.state.color;
        self.color.start(from, to, duration, &mut self.state);
    }

    /// Give the object `part_count` independently placed parts, or none.
    pub fn set_mesh_parts(&mut self, part_count: Option<usize>) {
        let Some(n) = part_count else {
            self.parts = None;
            return;
        };
        match self.parts.as_mut() {
            Some(player) => player.resize(n),
            None => self.parts = Some(PartPlayer::new(n)),
        }
    }

    /// Switch the parts to the clip called `name`. Returns `false` when the
    /// object has no parts or the clip is unknown.
    pub fn set_anim(
        &mut self,
        library: &ClipLibrary,
        name: &str,
        start: Millis,
        repeats: u32,
    ) -> bool {
        match self.parts.as_mut() {
            Some(player) => player.play(library, name, start, repeats),
            None => false,
        }
    }

    /// Advance all animations by one clock frame.
    ///
    /// Returns `true` when the position or angles were animated this frame.
    pub fn update(&mut self, clock: &SimClock) -> bool {
        let moved = !clock.paused && (self.pos.is_active() || self.angle.is_active());
        self.pos.step(clock, &mut self.state);
        self.angle.step(clock, &mut self.state);
        self.color.step(clock, &mut self.state);
        if let Some(player) = self.parts.as_mut() {
            player.update(clock);
        }
        moved
    }
}
