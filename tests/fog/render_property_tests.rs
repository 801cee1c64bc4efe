use fog_map::fog::composite::Rgba;
use fog_map::fog::model::Stroke;
use fog_map::fog::render::{render_frame, RenderSettings};
use fog_map::fog::transform::{Point, ViewportParams};

fn settings() -> RenderSettings {
    RenderSettings::default()
}

#[test]
fn later_erase_hides_earlier_reveal() {
    let params = ViewportParams::identity((64, 64));
    let frame = render_frame(
        &[
            Stroke::reveal(32.0, 32.0, 10.0),
            Stroke::erase(32.0, 32.0, 10.0),
        ],
        &params,
        settings(),
    );
    assert_eq!(frame.pixel(32, 32), Rgba::rgba(0, 0, 0, 140));
    assert_eq!(frame.revealed_count(), 0);
}

#[test]
fn later_reveal_uncovers_earlier_erase() {
    let params = ViewportParams::identity((64, 64));
    let frame = render_frame(
        &[
            Stroke::erase(32.0, 32.0, 10.0),
            Stroke::reveal(32.0, 32.0, 10.0),
        ],
        &params,
        settings(),
    );
    assert!(frame.is_revealed(32, 32));
}

#[test]
fn reveal_stays_put_in_image_space_while_panning() {
    let stroke = Stroke::reveal(100.0, 100.0, 6.0);
    let base = ViewportParams::new(Point::new(80.0, 80.0), 1.0, (48, 48));
    for (dx, dy) in [(0.0, 0.0), (5.0, -3.0), (-12.0, 9.0)] {
        let params = base.pan_by(dx, dy);
        let frame = render_frame(&[stroke], &params, settings());
        let centre = params.to_viewport_space(stroke.center());
        assert!(frame.is_revealed(centre.x as u32, centre.y as u32));
    }
}

#[test]
fn same_inputs_render_identical_pixels() {
    let strokes: Vec<Stroke> = (0..200)
        .map(|i| {
            let f = i as f64;
            Stroke {
                x: (f * 7.3) % 120.0,
                y: (f * 3.1) % 90.0,
                radius: 3.0 + (f % 5.0),
                erase: i % 3 == 0,
            }
        })
        .collect();
    let params = ViewportParams::new(Point::new(-4.5, 2.25), 0.8, (160, 120));
    assert_eq!(
        render_frame(&strokes, &params, settings()),
        render_frame(&strokes, &params, settings())
    );
}
