//! Sparse keyframe tracks.
//!
//! A track starts `Empty` and takes the kind of the first keyframe ever
//! inserted. Later keyframes of the other kind are converted to the track's
//! kind rather than rejected, so a track is always homogeneous.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::sampling::{sample_frames, Interpolate};
use crate::value::{Scalar, ScalarKind};

/// Keyframe time in milliseconds from the start of the clip.
pub type KeyTime = u32;

/// A single `(time, value)` sample point.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe<T> {
    pub time: KeyTime,
    pub value: T,
}

/// Outcome of inserting a keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// A new keyframe was added.
    Added,
    /// A keyframe already existed at that time; its value was replaced.
    Replaced,
}

/// Counts reported by [`KeyframeTrack::insert_pairs`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PairsReport {
    pub inserted: usize,
    pub overwritten: usize,
    /// Pairs whose time element was not a non-negative integer.
    pub skipped: usize,
}

impl AddAssign for PairsReport {
    fn add_assign(&mut self, other: PairsReport) {
        self.inserted += other.inserted;
        self.overwritten += other.overwritten;
        self.skipped += other.skipped;
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "frames", rename_all = "lowercase")]
pub enum KeyframeTrack {
    #[default]
    Empty,
    Int(Vec<Keyframe<i32>>),
    Float(Vec<Keyframe<f32>>),
}

fn upsert<T: Copy>(frames: &mut Vec<Keyframe<T>>, time: KeyTime, value: T) -> Insertion {
    let i = frames.partition_point(|f| f.time < time);
    match frames.get_mut(i) {
        Some(existing) if existing.time == time => {
            existing.value = value;
            Insertion::Replaced
        }
        _ => {
            frames.insert(i, Keyframe { time, value });
            Insertion::Added
        }
    }
}

fn last_time<T>(frames: &[Keyframe<T>]) -> Option<KeyTime> {
    frames.last().map(|f| f.time)
}

fn sample<T: Interpolate>(frames: &[Keyframe<T>], time: i64) -> Option<T> {
    if frames.is_empty() {
        None
    } else {
        Some(sample_frames(frames, time))
    }
}

impl KeyframeTrack {
    pub fn new() -> Self {
        Self::Empty
    }

    /// Kind fixed by the first inserted keyframe; `None` while empty.
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            KeyframeTrack::Empty => None,
            KeyframeTrack::Int(_) => Some(ScalarKind::Int),
            KeyframeTrack::Float(_) => Some(ScalarKind::Float),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            KeyframeTrack::Empty => 0,
            KeyframeTrack::Int(f) => f.len(),
            KeyframeTrack::Float(f) => f.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time of the last keyframe, `None` while empty.
    pub fn last_time(&self) -> Option<KeyTime> {
        match self {
            KeyframeTrack::Empty => None,
            KeyframeTrack::Int(f) => last_time(f),
            KeyframeTrack::Float(f) => last_time(f),
        }
    }

    /// Keyframe times in ascending order.
    pub fn times(&self) -> Vec<KeyTime> {
        match self {
            KeyframeTrack::Empty => Vec::new(),
            KeyframeTrack::Int(f) => f.iter().map(|k| k.time).collect(),
            KeyframeTrack::Float(f) => f.iter().map(|k| k.time).collect(),
        }
    }

    /// Stored keyframe at position `index`, as a [`Scalar`] of the track's kind.
    pub fn frame(&self, index: usize) -> Option<Keyframe<Scalar>> {
        match self {
            KeyframeTrack::Empty => None,
            KeyframeTrack::Int(f) => f.get(index).map(|k| Keyframe {
                time: k.time,
                value: Scalar::Int(k.value),
            }),
            KeyframeTrack::Float(f) => f.get(index).map(|k| Keyframe {
                time: k.time,
                value: Scalar::Float(k.value),
            }),
        }
    }

    /// Insert or overwrite the keyframe at `time`.
    ///
    /// The first insertion decides the track kind. A value of the other kind is
    /// converted (`Scalar::to_kind`) before being stored.
    pub fn insert_frame(&mut self, time: KeyTime, value: Scalar) -> Insertion {
        match self {
            KeyframeTrack::Empty => {
                *self = match value {
                    Scalar::Int(v) => KeyframeTrack::Int(vec![Keyframe { time, value: v }]),
                    Scalar::Float(v) => KeyframeTrack::Float(vec![Keyframe { time, value: v }]),
                };
                Insertion::Added
            }
            KeyframeTrack::Int(frames) => upsert(frames, time, value.as_i32()),
            KeyframeTrack::Float(frames) => upsert(frames, time, value.as_f32()),
        }
    }

    /// Insert keyframes from a flat `[time, value, time, value, ...]` list.
    ///
    /// Times may arrive unsorted. A pair whose time element is a float or a
    /// negative integer is skipped; a trailing unpaired element is ignored.
    pub fn insert_pairs(&mut self, pairs: &[Scalar]) -> PairsReport {
        let mut report = PairsReport::default();
        for pair in pairs.chunks_exact(2) {
            let Scalar::Int(t) = pair[0] else {
                report.skipped += 1;
                continue;
            };
            let Ok(time) = KeyTime::try_from(t) else {
                report.skipped += 1;
                continue;
            };
            match self.insert_frame(time, pair[1]) {
                Insertion::Added => report.inserted += 1,
                Insertion::Replaced => report.overwritten += 1,
            }
        }
        report
    }

    /// Sample at `time` milliseconds. Returns `None` for an empty track.
    pub fn evaluate(&self, time: i64) -> Option<Scalar> {
        match self {
            KeyframeTrack::Empty => None,
            KeyframeTrack::Int(f) => sample(f, time).map(Scalar::Int),
            KeyframeTrack::Float(f) => sample(f, time).map(Scalar::Float),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insertion_fixes_kind() {
        let mut t = KeyframeTrack::new();
        assert_eq!(t.kind(), None);
        t.insert_frame(10, Scalar::Float(1.5));
        assert_eq!(t.kind(), Some(ScalarKind::Float));
        t.insert_frame(20, Scalar::Int(4));
        assert_eq!(t.kind(), Some(ScalarKind::Float));
        assert_eq!(
            t.frame(1),
            Some(Keyframe {
                time: 20,
                value: Scalar::Float(4.0)
            })
        );
    }

    #[test]
    fn float_into_int_track_truncates() {
        let mut t = KeyframeTrack::new();
        t.insert_frame(0, Scalar::Int(1));
        t.insert_frame(5, Scalar::Float(7.8));
        assert_eq!(t.evaluate(5), Some(Scalar::Int(7)));
    }

    #[test]
    fn reinsert_overwrites_in_place() {
        let mut t = KeyframeTrack::new();
        assert_eq!(t.insert_frame(30, Scalar::Int(3)), Insertion::Added);
        assert_eq!(t.insert_frame(10, Scalar::Int(1)), Insertion::Added);
        assert_eq!(t.insert_frame(30, Scalar::Int(9)), Insertion::Replaced);
        assert_eq!(t.times(), vec![10, 30]);
        assert_eq!(t.evaluate(30), Some(Scalar::Int(9)));
    }

    #[test]
    fn pairs_skip_bad_times() {
        let mut t = KeyframeTrack::new();
        let report = t.insert_pairs(&[
            Scalar::Int(-5),
            Scalar::Int(1),
            Scalar::Float(2.0),
            Scalar::Int(2),
            Scalar::Int(40),
            Scalar::Int(4),
            Scalar::Int(40),
            Scalar::Int(8),
            Scalar::Int(99),
        ]);
        assert_eq!(
            report,
            PairsReport {
                inserted: 1,
                overwritten: 1,
                skipped: 2
            }
        );
        assert_eq!(t.times(), vec![40]);
        assert_eq!(t.evaluate(40), Some(Scalar::Int(8)));
    }

    #[test]
    fn empty_track_has_no_value() {
        let t = KeyframeTrack::new();
        assert!(t.is_empty());
        assert_eq!(t.last_time(), None);
        assert_eq!(t.evaluate(0), None);
    }
}
