use std::sync::Arc;

use vizij_keyframe_core::{
    AnimationClip, Config, Controller, LinkReport, OutputBank, OutputHandle, Scalar, ScalarKind,
};

/// Clip with one two-key track per entry: `Some(kind)` or `None` for an empty track.
fn clip_with(kinds: &[Option<ScalarKind>]) -> Arc<AnimationClip> {
    let mut clip = AnimationClip::new("fixture", kinds.len());
    for (i, kind) in kinds.iter().enumerate() {
        match kind {
            Some(ScalarKind::Int) => {
                clip.insert_frame(i, 0, Scalar::Int(0)).unwrap();
                clip.insert_frame(i, 100, Scalar::Int(100)).unwrap();
            }
            Some(ScalarKind::Float) => {
                clip.insert_frame(i, 0, Scalar::Float(0.0)).unwrap();
                clip.insert_frame(i, 100, Scalar::Float(1.0)).unwrap();
            }
            None => {}
        }
    }
    Arc::new(clip)
}

fn controller_with(kinds: &[Option<ScalarKind>], cfg: &Config) -> Controller {
    let mut c = Controller::with_config(kinds.len(), cfg);
    for (i, kind) in kinds.iter().enumerate() {
        if let Some(kind) = kind {
            c.set_output(i, *kind, OutputHandle(i as u32)).unwrap();
        }
    }
    c
}

#[test]
fn all_conditions_met_binds_every_slot() {
    let clip = clip_with(&[Some(ScalarKind::Float), Some(ScalarKind::Int)]);
    let mut c = controller_with(
        &[Some(ScalarKind::Float), Some(ScalarKind::Int)],
        &Config::default(),
    );
    let report = c.link(Some(&clip));
    assert_eq!(report.bound, 2);
    assert!(report.is_complete());
    assert_eq!(report.duration, 100);
    assert_eq!(c.bound_count(), 2);
}

#[test]
fn kind_mismatch_leaves_slot_unbound() {
    let clip = clip_with(&[Some(ScalarKind::Int)]);
    let mut c = controller_with(&[Some(ScalarKind::Float)], &Config::default());
    let report = c.link(Some(&clip));
    assert_eq!(report.bound, 0);
    assert_eq!(report.kind_mismatch, 1);
    assert_eq!(c.bound_count(), 0);
}

#[test]
fn empty_track_leaves_slot_unbound() {
    let clip = clip_with(&[None, Some(ScalarKind::Float)]);
    let mut c = controller_with(
        &[Some(ScalarKind::Float), Some(ScalarKind::Float)],
        &Config::default(),
    );
    let report = c.link(Some(&clip));
    assert_eq!(report.bound, 1);
    assert_eq!(report.empty_track, 1);
    assert!(!c.is_bound(0));
    assert!(c.is_bound(1));
}

#[test]
fn missing_output_leaves_slot_unbound() {
    let clip = clip_with(&[Some(ScalarKind::Float)]);
    let mut c = Controller::new(1);
    let report = c.link(Some(&clip));
    assert_eq!(report.missing_output, 1);
    assert_eq!(c.bound_count(), 0);
    assert!(!c.is_linked());
}

#[test]
fn unbound_outputs_keep_their_last_value() {
    let clip = clip_with(&[Some(ScalarKind::Int), None]);
    let mut c = controller_with(
        &[Some(ScalarKind::Int), Some(ScalarKind::Int)],
        &Config::default(),
    );
    c.link(Some(&clip));

    let mut bank = OutputBank::ints(2);
    bank.set(OutputHandle(1), Scalar::Int(42));
    c.evaluate(50, &mut bank);
    assert_eq!(bank.values(), &[Scalar::Int(50), Scalar::Int(42)]);
}

#[test]
fn relinking_to_smaller_clip_clears_stale_slots_by_default() {
    let big = clip_with(&[Some(ScalarKind::Float); 3]);
    let small = clip_with(&[Some(ScalarKind::Float)]);
    let mut c = controller_with(&[Some(ScalarKind::Float); 3], &Config::default());

    assert_eq!(c.link(Some(&big)).bound, 3);
    let report = c.link(Some(&small));
    assert_eq!(report.bound, 1);
    assert_eq!(report.out_of_range, 2);
    assert_eq!(c.bound_count(), 1);
}

#[test]
fn legacy_policy_keeps_out_of_range_bindings() {
    let big = clip_with(&[Some(ScalarKind::Float); 3]);
    let mut small = AnimationClip::new("small", 1);
    small.insert_frame(0, 0, Scalar::Float(5.0)).unwrap();
    let small = Arc::new(small);
    let mut c = controller_with(&[Some(ScalarKind::Float); 3], &Config::legacy());

    c.link(Some(&big));
    let report = c.link(Some(&small));
    assert_eq!(report.bound, 1);
    assert_eq!(c.bound_count(), 3);

    // Slots 1 and 2 still sample the larger clip, which the controller keeps alive.
    drop(big);
    let mut bank = OutputBank::floats(3);
    c.evaluate(100, &mut bank);
    assert_eq!(
        bank.values(),
        &[Scalar::Float(5.0), Scalar::Float(1.0), Scalar::Float(1.0)]
    );
}

#[test]
fn link_none_unbinds_and_reports_zero_duration() {
    let clip = clip_with(&[Some(ScalarKind::Float); 2]);
    let mut c = controller_with(&[Some(ScalarKind::Float); 2], &Config::legacy());
    c.link(Some(&clip));
    assert_eq!(c.link(None), LinkReport::default());
    assert!(!c.is_linked());
}

#[test]
fn controller_larger_than_clip_ignores_extra_slots() {
    let clip = clip_with(&[Some(ScalarKind::Float)]);
    let mut c = controller_with(&[Some(ScalarKind::Float); 4], &Config::default());
    let report = c.link(Some(&clip));
    assert_eq!(report.bound, 1);
    assert_eq!(report.out_of_range, 3);
    assert!(report.is_complete());
}
