//! Controllers: fixed slot arrays binding live outputs to clip tracks.
//!
//! Each slot declares the kind of value it expects and the output it drives.
//! Linking a clip binds slot `i` to track `i` when the kinds agree, the track
//! has keyframes and the slot has an output. Evaluation writes every bound
//! slot and leaves unbound outputs at their last written value.

use std::sync::Arc;

use log::{log, Level};

use crate::clip::AnimationClip;
use crate::config::{Config, StaleSlotPolicy};
use crate::error::KeyframeError;
use crate::outputs::{OutputHandle, OutputSink};
use crate::track::KeyTime;
use crate::value::ScalarKind;

/// Track `track` of a shared clip.
#[derive(Clone, Debug)]
pub struct BoundTrack {
    pub clip: Arc<AnimationClip>,
    pub track: usize,
}

#[derive(Clone, Debug)]
pub struct BindingSlot {
    pub kind: ScalarKind,
    pub output: Option<OutputHandle>,
    pub bound: Option<BoundTrack>,
}

impl Default for BindingSlot {
    fn default() -> Self {
        Self {
            kind: ScalarKind::Float,
            output: None,
            bound: None,
        }
    }
}

/// Result of [`Controller::link`].
///
/// The per-reason counters cover slots within the clip's track range that
/// ended unbound; `out_of_range` counts slots beyond it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Clip duration in milliseconds (0 when unlinking).
    pub duration: KeyTime,
    pub bound: usize,
    pub kind_mismatch: usize,
    pub empty_track: usize,
    pub missing_output: usize,
    pub out_of_range: usize,
}

impl LinkReport {
    /// True when every slot in the clip's track range was bound.
    pub fn is_complete(&self) -> bool {
        self.kind_mismatch == 0 && self.empty_track == 0 && self.missing_output == 0
    }
}

#[derive(Clone, Debug)]
pub struct Controller {
    slots: Vec<BindingSlot>,
    cfg: Config,
}

impl Controller {
    /// Controller with `slot_count` unbound slots and the default config.
    pub fn new(slot_count: usize) -> Self {
        Self::with_config(slot_count, &Config::default())
    }

    pub fn with_config(slot_count: usize, cfg: &Config) -> Self {
        Self {
            slots: vec![BindingSlot::default(); slot_count],
            cfg: cfg.clone(),
        }
    }

    /// One slot per output, all expecting `kind`, slot `i` driving `outputs[i]`.
    pub(crate) fn from_outputs(
        kind: ScalarKind,
        outputs: impl IntoIterator<Item = OutputHandle>,
        cfg: &Config,
    ) -> Self {
        let slots = outputs
            .into_iter()
            .map(|output| BindingSlot {
                kind,
                output: Some(output),
                bound: None,
            })
            .collect();
        Self {
            slots,
            cfg: cfg.clone(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[BindingSlot] {
        &self.slots
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut BindingSlot, KeyframeError> {
        let slot_count = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(KeyframeError::SlotOutOfRange { index, slot_count })
    }

    /// Declare the output slot `index` drives and the value kind it expects.
    /// Any existing binding of the slot is dropped; call [`Controller::link`] again to bind.
    pub fn set_output(
        &mut self,
        index: usize,
        kind: ScalarKind,
        output: OutputHandle,
    ) -> Result<(), KeyframeError> {
        let slot = self.slot_mut(index)?;
        slot.kind = kind;
        slot.output = Some(output);
        slot.bound = None;
        Ok(())
    }

    /// Remove the output of slot `index` (and its binding).
    pub fn clear_output(&mut self, index: usize) -> Result<(), KeyframeError> {
        let slot = self.slot_mut(index)?;
        slot.output = None;
        slot.bound = None;
        Ok(())
    }

    /// Bind slots to the tracks of `clip`, or unbind everything for `None`.
    pub fn link(&mut self, clip: Option<&Arc<AnimationClip>>) -> LinkReport {
        let Some(clip) = clip else {
            self.unlink();
            return LinkReport::default();
        };

        if self.cfg.stale_slots == StaleSlotPolicy::ClearAll {
            self.unlink();
        }

        let mut report = LinkReport {
            duration: clip.duration(),
            ..LinkReport::default()
        };
        let in_range = self.slots.len().min(clip.track_count());
        report.out_of_range = self.slots.len() - in_range;

        for (i, slot) in self.slots.iter_mut().enumerate().take(in_range) {
            let track = &clip.tracks()[i];
            slot.bound = None;
            if track.kind() != Some(slot.kind) {
                // An empty track has no kind yet.
                if track.is_empty() {
                    report.empty_track += 1;
                } else {
                    report.kind_mismatch += 1;
                }
            } else if slot.output.is_none() {
                report.missing_output += 1;
            } else {
                slot.bound = Some(BoundTrack {
                    clip: Arc::clone(clip),
                    track: i,
                });
                report.bound += 1;
            }
        }

        let level = if !report.is_complete() && self.cfg.warn_on_partial_link {
            Level::Warn
        } else {
            Level::Debug
        };
        log!(
            level,
            "link: clip '{}' bound {}/{} slots (mismatch={}, empty={}, no_output={}, out_of_range={}), duration {} ms",
            clip.name(),
            report.bound,
            in_range,
            report.kind_mismatch,
            report.empty_track,
            report.missing_output,
            report.out_of_range,
            report.duration
        );
        report
    }

    /// Drop every binding, keeping declared outputs.
    pub fn unlink(&mut self) {
        for slot in &mut self.slots {
            slot.bound = None;
        }
    }

    pub fn is_bound(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.bound.is_some())
    }

    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.bound.is_some()).count()
    }

    pub fn is_linked(&self) -> bool {
        self.slots.iter().any(|s| s.bound.is_some())
    }

    /// Write the value of every bound slot at `time` milliseconds into `sink`.
    pub fn evaluate<S: OutputSink + ?Sized>(&self, time: i64, sink: &mut S) {
        for slot in &self.slots {
            let (Some(bound), Some(output)) = (&slot.bound, slot.output) else {
                continue;
            };
            if let Some(value) = bound
                .clip
                .track(bound.track)
                .and_then(|t| t.evaluate(time))
            {
                sink.write(output, value);
            }
        }
    }
}
