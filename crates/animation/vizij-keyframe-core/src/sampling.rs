//! Keyframe sampling for sorted, typed frame lists.
//!
//! Model:
//! - Frames are sorted by strictly increasing integer millisecond time.
//! - Queries before the first frame hold the first value, queries after the last
//!   frame hold the last value.
//! - A query landing exactly on a frame returns that frame's stored value.
//! - Between two frames the value is linearly interpolated. Integer frames use
//!   truncating integer division, so `0 -> 10` over 3 ms gives 3 at t=1.

use crate::track::Keyframe;

/// Linear interpolation over an integer millisecond span.
pub trait Interpolate: Copy {
    /// Value reached `elapsed` ms into a segment of `span` ms (`0 < elapsed < span`).
    fn interpolate(v0: Self, v1: Self, elapsed: i64, span: i64) -> Self;
}

impl Interpolate for i32 {
    #[inline]
    fn interpolate(v0: i32, v1: i32, elapsed: i64, span: i64) -> i32 {
        // Widened so that (v1 - v0) * elapsed cannot overflow; the quotient always
        // lies between v0 and v1, so narrowing back is lossless.
        let delta = i128::from(v1) - i128::from(v0);
        let v = i128::from(v0) + delta * i128::from(elapsed) / i128::from(span);
        v as i32
    }
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(v0: f32, v1: f32, elapsed: i64, span: i64) -> f32 {
        v0 + (v1 - v0) * (elapsed as f32) / (span as f32)
    }
}

/// Locate the segment for `time`.
///
/// Returns `Err(i)` when the query resolves to frame `i` exactly (clamped before
/// the first frame, after the last one, or landing on a frame time), and
/// `Ok(i)` when `frames[i].time < time < frames[i + 1].time`.
pub(crate) fn find_segment<T>(frames: &[Keyframe<T>], time: i64) -> Result<usize, usize> {
    let n = frames.len();
    debug_assert!(n > 0, "sampling an empty frame list");
    if time <= i64::from(frames[0].time) {
        return Err(0);
    }
    if time >= i64::from(frames[n - 1].time) {
        return Err(n - 1);
    }
    // First frame with frame.time >= time; 1 <= next <= n - 1 here.
    let next = frames.partition_point(|f| i64::from(f.time) < time);
    if i64::from(frames[next].time) == time {
        Err(next)
    } else {
        Ok(next - 1)
    }
}

/// Sample a non-empty frame list at `time` (milliseconds, may be negative).
pub fn sample_frames<T: Interpolate>(frames: &[Keyframe<T>], time: i64) -> T {
    match find_segment(frames, time) {
        Err(i) => frames[i].value,
        Ok(i) => {
            let left = &frames[i];
            let right = &frames[i + 1];
            let t0 = i64::from(left.time);
            let span = i64::from(right.time) - t0;
            T::interpolate(left.value, right.value, time - t0, span)
        }
    }
}
