//! Building multi-part clips from authored, named clip specs.
//!
//! A spec lists, per part, five flat `[time, value, ...]` channels. Part `p`
//! channel `c` lands in clip track `p * PART_CHANNELS + c`, in the order
//! x, y, z, horizontal angle, vertical angle.

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::clip::AnimationClip;
use crate::error::KeyframeError;
use crate::library::ClipLibrary;
use crate::parts::PART_CHANNELS;
use crate::track::{KeyframeTrack, PairsReport};
use crate::value::Scalar;

/// Per-part channel data, each a flat alternating time/value list.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PartTrackSpec {
    #[serde(default)]
    pub x: Vec<Scalar>,
    #[serde(default)]
    pub y: Vec<Scalar>,
    #[serde(default)]
    pub z: Vec<Scalar>,
    #[serde(default)]
    pub angh: Vec<Scalar>,
    #[serde(default)]
    pub angv: Vec<Scalar>,
}

impl PartTrackSpec {
    fn channels(&self) -> [&[Scalar]; PART_CHANNELS] {
        [
            self.x.as_slice(),
            self.y.as_slice(),
            self.z.as_slice(),
            self.angh.as_slice(),
            self.angv.as_slice(),
        ]
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NamedClipSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parts: Vec<PartTrackSpec>,
}

/// Build a clip with `part_count * PART_CHANNELS` tracks from `spec`.
///
/// Parts missing from the spec are reported and left with empty tracks; parts
/// beyond `part_count` are ignored.
pub fn build_part_clip(spec: &NamedClipSpec, part_count: usize) -> (AnimationClip, PairsReport) {
    let mut tracks = vec![KeyframeTrack::Empty; part_count * PART_CHANNELS];
    let mut total = PairsReport::default();
    for (part, part_tracks) in tracks.chunks_exact_mut(PART_CHANNELS).enumerate() {
        let Some(part_spec) = spec.parts.get(part) else {
            error!(
                "no animation data found for part {} of '{}' clip",
                part, spec.name
            );
            continue;
        };
        for (track, pairs) in part_tracks.iter_mut().zip(part_spec.channels()) {
            total += track.insert_pairs(pairs);
        }
    }
    if total.skipped > 0 {
        warn!(
            "clip '{}': skipped {} pairs with invalid time",
            spec.name, total.skipped
        );
    }
    (AnimationClip::from_tracks(spec.name.clone(), tracks), total)
}

/// Decode a JSON array of [`NamedClipSpec`].
pub fn parse_clip_specs_json(s: &str) -> Result<Vec<NamedClipSpec>, KeyframeError> {
    serde_json::from_str(s).map_err(|e| KeyframeError::Json(e.to_string()))
}

impl ClipLibrary {
    /// Library holding one clip per spec, each sized for `part_count` parts.
    pub fn from_specs<'a>(
        specs: impl IntoIterator<Item = &'a NamedClipSpec>,
        part_count: usize,
    ) -> Self {
        let mut lib = ClipLibrary::new();
        for spec in specs {
            let (clip, _) = build_part_clip(spec, part_count);
            lib.insert(clip);
        }
        lib
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarKind;

    #[test]
    fn channels_map_to_part_tracks() {
        let spec = NamedClipSpec {
            name: "wave".into(),
            parts: vec![
                PartTrackSpec::default(),
                PartTrackSpec {
                    angv: vec![
                        Scalar::Int(0),
                        Scalar::Float(0.0),
                        Scalar::Int(300),
                        Scalar::Float(90.0),
                    ],
                    ..PartTrackSpec::default()
                },
            ],
        };
        let (clip, report) = build_part_clip(&spec, 2);
        assert_eq!(clip.track_count(), 10);
        assert_eq!(report.inserted, 2);
        assert_eq!(clip.duration(), 300);
        assert_eq!(clip.track(9).and_then(|t| t.kind()), Some(ScalarKind::Float));
        assert!(clip.tracks()[..9].iter().all(|t| t.is_empty()));
    }

    #[test]
    fn missing_parts_are_left_empty() {
        let spec = NamedClipSpec {
            name: "short".into(),
            parts: vec![PartTrackSpec {
                x: vec![Scalar::Int(0), Scalar::Float(1.0)],
                ..PartTrackSpec::default()
            }],
        };
        let (clip, _) = build_part_clip(&spec, 3);
        assert_eq!(clip.track_count(), 15);
        assert!(!clip.tracks()[0].is_empty());
        assert!(clip.tracks()[5..].iter().all(|t| t.is_empty()));
    }

    #[test]
    fn bad_json_is_reported() {
        let err = parse_clip_specs_json("{ not json").unwrap_err();
        assert!(matches!(err, KeyframeError::Json(_)));
    }
}
