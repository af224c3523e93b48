//! End-to-end tests driving `AnimSwitch` through the test harness.

use animswitch_core::{DrawCommand, Widget};
use animswitch_test::{Harness, FRAME_MS};
use animswitch_widgets::{AnimSwitch, NotifyMode, SwitchChanged, SwitchStyle, TRACK_OPACITY_OFF};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

fn switch_120x60() -> AnimSwitch {
    AnimSwitch::new().preferred_size(120.0, 60.0)
}

fn listening(switch: AnimSwitch) -> (AnimSwitch, Arc<Mutex<Vec<bool>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let switch = switch.on_checked_change(move |checked| sink.lock().unwrap().push(checked));
    (switch, calls)
}

#[test]
fn test_click_runs_full_transition() {
    let (switch, calls) = listening(switch_120x60());
    let mut harness = Harness::new(switch).viewport(400.0, 300.0);

    assert_eq!(harness.widget().thumb_offset(), 10.0);
    harness.click_center();

    assert!(harness.widget().is_checked());
    assert_eq!(*calls.lock().unwrap(), vec![true]);
    assert_eq!(
        harness.messages_of::<SwitchChanged>(),
        vec![SwitchChanged { checked: true }]
    );

    harness.tick(250);
    let halfway = harness.widget().thumb_offset();
    assert!(halfway > 60.0 && halfway < 70.0, "offset {halfway}");
    assert!(harness.widget().is_animating());

    harness.settle();
    assert_eq!(harness.widget().thumb_offset(), 70.0);
    assert_eq!(harness.widget().track_opacity(), 1.0);
    assert!(harness.elapsed_ms() >= 500);
}

#[test]
fn test_tap_toggles_back_and_forth() {
    let mut harness = Harness::new(switch_120x60());
    harness.tap_at(60.0, 30.0).settle();
    assert!(harness.widget().is_checked());
    harness.tap_at(60.0, 30.0).settle();
    assert!(!harness.widget().is_checked());
    assert_eq!(harness.widget().thumb_offset(), 10.0);
    assert_eq!(harness.widget().track_opacity(), TRACK_OPACITY_OFF);
    harness.assert_message_count(2);
}

#[test]
fn test_drag_off_the_switch_does_not_toggle() {
    let mut harness = Harness::new(switch_120x60());
    harness.drag((60.0, 30.0), (300.0, 30.0));
    assert!(!harness.widget().is_checked());
    harness.assert_message_count(0);
}

#[test]
fn test_click_outside_ignored() {
    let mut harness = Harness::new(switch_120x60());
    harness.click_at(200.0, 200.0);
    assert!(!harness.widget().is_checked());
}

#[test]
fn test_paint_mid_transition() {
    let mut harness = Harness::new(switch_120x60());
    harness.click_center().tick(FRAME_MS * 4);
    let canvas = harness.paint();
    let commands = canvas.commands();
    assert_eq!(commands.len(), 2);

    let opacity = commands[0].effective_opacity();
    assert!(opacity > TRACK_OPACITY_OFF && opacity < 1.0);
    assert!(matches!(commands[0], DrawCommand::Opacity { .. }));

    let thumb = commands[1].bounds();
    assert_eq!(thumb.width, 40.0);
    assert_eq!(thumb.x, harness.widget().thumb_offset());
}

#[test]
fn test_programmatic_changes_through_harness() {
    let (switch, calls) = listening(switch_120x60());
    let mut harness = Harness::new(switch);
    harness.widget_mut().set_checked(true);
    harness.widget_mut().set_checked(false);
    harness.widget_mut().set_checked(true);
    assert_eq!(*calls.lock().unwrap(), vec![true, false, true]);
    assert!(!harness.widget().is_animating());
    assert_eq!(harness.widget().thumb_offset(), 70.0);
}

#[test]
fn test_on_settle_reports_once_after_rapid_taps() {
    let (switch, calls) = listening(switch_120x60().notify_mode(NotifyMode::OnSettle));
    let mut harness = Harness::new(switch);
    harness
        .tap_at(60.0, 30.0)
        .tick(FRAME_MS)
        .tap_at(60.0, 30.0)
        .tick(FRAME_MS)
        .tap_at(60.0, 30.0);
    assert!(calls.lock().unwrap().is_empty());
    harness.settle();
    assert_eq!(*calls.lock().unwrap(), vec![true]);
    // Every tap still produced a message.
    harness.assert_message_count(3);
}

#[test]
fn test_style_from_yaml_drives_widget() {
    let style = SwitchStyle::from_yaml("duration_ms: 100\nthumb_color: \"#ffffff\"").unwrap();
    let switch = AnimSwitch::with_style(style).preferred_size(120.0, 60.0);
    let mut harness = Harness::new(switch);
    harness.click_center().tick(120);
    assert!(!harness.widget().is_animating());
    assert_eq!(harness.widget().thumb_offset(), 70.0);

    let canvas = harness.paint();
    match canvas.commands()[1].shape() {
        DrawCommand::Rect { style, .. } => {
            assert_eq!(style.fill.map(|c| c.to_hex()), Some("#ffffff".to_string()));
        }
        DrawCommand::Opacity { .. } => panic!("expected thumb rect"),
    }
}

#[test]
fn test_harness_layout_resolves_geometry_once() {
    let mut harness = Harness::new(switch_120x60());
    let geometry = harness.widget().geometry().unwrap();
    assert_eq!(geometry.thumb_size, 40);
    assert_eq!(geometry.left_margin, 10);

    harness.widget_mut().layout(animswitch_core::Rect::new(0.0, 0.0, 300.0, 150.0));
    assert_eq!(harness.widget().geometry(), Some(geometry));
}

proptest! {
    #[test]
    fn prop_checked_matches_last_distinct_target(
        targets in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..30),
    ) {
        let (switch, calls) = listening(switch_120x60());
        let mut harness = Harness::new(switch);
        let mut expected_calls = Vec::new();
        let mut state = false;
        for (target, smooth) in targets {
            harness.widget_mut().set_checked_with(target, smooth);
            if target != state {
                expected_calls.push(target);
                state = target;
            }
            harness.tick(FRAME_MS);
        }
        prop_assert_eq!(harness.widget().is_checked(), state);
        prop_assert_eq!(calls.lock().unwrap().clone(), expected_calls);

        harness.settle();
        let rest = if state { 70.0 } else { 10.0 };
        prop_assert_eq!(harness.widget().thumb_offset(), rest);
    }

    #[test]
    fn prop_thumb_stays_between_rest_offsets(
        frames in proptest::collection::vec(1u64..40, 1..40),
        flips in proptest::collection::vec(any::<bool>(), 1..40),
    ) {
        let mut harness = Harness::new(switch_120x60());
        for (ms, flip) in frames.into_iter().zip(flips) {
            if flip {
                harness.widget_mut().toggle();
            }
            harness.tick(ms);
            let offset = harness.widget().thumb_offset();
            prop_assert!((10.0..=70.0).contains(&offset), "offset {}", offset);
            let opacity = harness.widget().track_opacity();
            prop_assert!((TRACK_OPACITY_OFF..=1.0).contains(&opacity), "opacity {}", opacity);
        }
    }
}
