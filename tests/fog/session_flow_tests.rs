use fog_map::fog::input::{DeviceEvent, InputOutcome, PointerEvent, PointerModifiers, PointerPhase};
use fog_map::fog::settings::{EraseModifier, FogSettings};
use fog_map::fog::transform::{Point, ViewportParams};
use fog_map::fog::{FileStorage, FogSession, MemoryStorage};

fn viewport() -> ViewportParams {
    ViewportParams::fit_image((256.0, 192.0), (128, 96))
}

fn settings() -> FogSettings {
    FogSettings {
        brush_radius: 8.0,
        ..FogSettings::default()
    }
}

fn drag(session: &mut FogSession<impl fog_map::fog::KeyValueStorage>, moves: usize) {
    session.handle_pointer(&PointerEvent::down(10.0, 10.0));
    for i in 0..moves {
        session.handle_pointer(&PointerEvent::moved(10.0 + i as f64, 12.0));
    }
    session.handle_pointer(&PointerEvent::up(10.0 + moves as f64, 12.0));
}

#[test]
fn pointer_input_is_ignored_outside_edit_mode() {
    let mut session = FogSession::new(settings(), MemoryStorage::new(), viewport());
    drag(&mut session, 5);
    assert!(session.strokes().is_empty());
    assert_eq!(session.persistence().storage().write_count(), 0);

    session.toggle_edit_mode();
    drag(&mut session, 5);
    assert!(!session.strokes().is_empty());
}

#[test]
fn one_save_per_gesture_regardless_of_moves() {
    let mut session = FogSession::new(settings(), MemoryStorage::new(), viewport());
    session.toggle_edit_mode();

    drag(&mut session, 50);
    assert_eq!(session.persistence().storage().write_count(), 1);
    drag(&mut session, 3);
    assert_eq!(session.persistence().storage().write_count(), 2);
}

#[test]
fn corrupt_saved_fog_starts_fully_hidden() {
    let mut storage = MemoryStorage::new();
    storage.insert_raw("fog_v1", "[{\"x\": 1, \"y\":");
    let session = FogSession::new(settings(), storage, viewport());
    assert!(session.strokes().is_empty());
    assert_eq!(session.frame().revealed_count(), 0);
}

#[test]
fn reveal_persists_across_sessions_and_zoom_levels() {
    let dir = tempfile::tempdir().expect("temp dir");
    let first_view = viewport();
    let revealed_at;
    {
        let mut session = FogSession::new(settings(), FileStorage::new(dir.path()), first_view);
        session.toggle_edit_mode();
        session.handle_pointer(&PointerEvent::down(64.0, 48.0));
        session.handle_pointer(&PointerEvent::up(64.0, 48.0));
        revealed_at = first_view.to_image_space(Point::new(64.0, 48.0));
    }

    let zoomed = first_view.zoom_at(Point::new(64.0, 48.0), 1.0);
    let session = FogSession::new(settings(), FileStorage::new(dir.path()), zoomed);
    assert!(!session.is_editing());
    assert_eq!(session.strokes().len(), 1);
    let centre = zoomed.to_viewport_space(revealed_at);
    assert!(session.frame().is_revealed(centre.x as u32, centre.y as u32));
}

#[test]
fn two_finger_touch_and_bound_modifier_erase() {
    let mut session = FogSession::new(
        FogSettings {
            erase_modifier: EraseModifier::Alt,
            ..settings()
        },
        MemoryStorage::new(),
        viewport(),
    );
    session.toggle_edit_mode();

    session.handle_device_event(&DeviceEvent::Touch {
        phase: PointerPhase::Down,
        touches: vec![Point::new(20.0, 20.0), Point::new(40.0, 40.0)],
    });
    session.handle_device_event(&DeviceEvent::Touch {
        phase: PointerPhase::Up,
        touches: Vec::new(),
    });

    let outcome = session.handle_device_event(&DeviceEvent::Mouse {
        phase: PointerPhase::Down,
        position: Point::new(30.0, 30.0),
        modifiers: PointerModifiers {
            alt: true,
            ..PointerModifiers::default()
        },
    });
    assert!(matches!(outcome, InputOutcome::StrokeAppended(stroke) if stroke.erase));

    session.handle_device_event(&DeviceEvent::Mouse {
        phase: PointerPhase::Cancel,
        position: Point::new(30.0, 30.0),
        modifiers: PointerModifiers::default(),
    });
    assert!(session.strokes().all().iter().all(|stroke| stroke.erase));
    assert_eq!(session.persistence().storage().write_count(), 2);
}

#[test]
fn composited_frame_shows_map_through_reveals() {
    use fog_map::fog::composite::{Rgba, RgbaBuffer};

    let mut session = FogSession::new(settings(), MemoryStorage::new(), viewport());
    session.toggle_edit_mode();
    session.handle_pointer(&PointerEvent::down(64.0, 48.0));
    session.handle_pointer(&PointerEvent::up(64.0, 48.0));

    let map = RgbaBuffer::new(128, 96, Rgba::rgba(200, 180, 120, 255));
    let out = session.composite_over(&map);
    assert_eq!(out.pixel(64, 48), Rgba::rgba(200, 180, 120, 255));
    assert_ne!(out.pixel(0, 0), Rgba::rgba(200, 180, 120, 255));
}
