//! Core configuration for vizij-keyframe-core.

use serde::{Deserialize, Serialize};

/// What happens to slots whose index is beyond the linked clip's track count.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StaleSlotPolicy {
    /// Every slot is unbound before binding, so out-of-range slots end unbound.
    #[default]
    ClearAll,
    /// Out-of-range slots keep whatever binding they had, possibly to a
    /// previously linked, larger clip.
    PreserveOutOfRange,
}

/// Link behaviour of a [`Controller`](crate::binding::Controller).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub stale_slots: StaleSlotPolicy,
    /// Log partial links at `warn` level instead of `debug`.
    #[serde(default)]
    pub warn_on_partial_link: bool,
}

impl Config {
    /// Configuration reproducing the historical link behaviour.
    pub fn legacy() -> Self {
        Self {
            stale_slots: StaleSlotPolicy::PreserveOutOfRange,
            ..Self::default()
        }
    }
}
