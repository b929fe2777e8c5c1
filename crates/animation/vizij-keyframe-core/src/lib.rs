//! Vizij Keyframe Core (engine-agnostic)
//!
//! Sparse, typed keyframe tracks bundled into named clips, controllers that
//! bind fixed slot arrays of live outputs to a clip's tracks, and playback
//! cursors implementing single-pass, repeat-then-freeze and infinite looping.
//! Two thin consumers are built on the same primitives: fire-and-forget
//! attribute tweens and named multi-part playback.
//!
//! Everything runs on the caller's update thread; the only shared state is a
//! [`SimClock`] passed explicitly into each step.

pub mod authoring;
pub mod binding;
pub mod clip;
pub mod config;
pub mod error;
pub mod library;
pub mod object;
pub mod outputs;
pub mod parts;
pub mod playback;
pub mod sampling;
pub mod track;
pub mod tween;
pub mod value;

// Re-exports for consumers (adapters)
pub use authoring::{build_part_clip, parse_clip_specs_json, NamedClipSpec, PartTrackSpec};
pub use binding::{BindingSlot, BoundTrack, Controller, LinkReport};
pub use clip::AnimationClip;
pub use config::{Config, StaleSlotPolicy};
pub use error::KeyframeError;
pub use library::ClipLibrary;
pub use object::{AnimatedObject, ObjectState};
pub use outputs::{OutputBank, OutputHandle, OutputSink};
pub use parts::{PartPlacement, PartPlayer, PART_CHANNELS};
pub use playback::{start_playback, Millis, PlaybackCursor, PlaybackState, SimClock};
pub use track::{Insertion, KeyTime, Keyframe, KeyframeTrack, PairsReport};
pub use tween::AttributeTween;
pub use value::{Scalar, ScalarKind};
