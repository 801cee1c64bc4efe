use fog_map::fog::transform::{Point, ViewportParams};

fn viewports() -> Vec<ViewportParams> {
    let mut out = Vec::new();
    for &(ox, oy) in &[(0.0, 0.0), (-333.25, 97.5), (1500.0, -12.125)] {
        for zoom in [-2.0, -1.5, 0.0, 0.75, 2.0] {
            out.push(ViewportParams::from_zoom(Point::new(ox, oy), zoom, (1280, 720)));
        }
    }
    out
}

#[test]
fn image_space_roundtrip_holds_across_viewport() {
    for params in viewports() {
        for y in (0..720).step_by(37) {
            for x in (0..1280).step_by(53) {
                let v = Point::new(x as f64 + 0.3, y as f64 + 0.7);
                let back = params.to_viewport_space(params.to_image_space(v));
                assert!((back.x - v.x).abs() < 1e-7, "{params:?} {v:?} -> {back:?}");
                assert!((back.y - v.y).abs() < 1e-7, "{params:?} {v:?} -> {back:?}");
            }
        }
    }
}

#[test]
fn viewport_radius_scales_with_zoom_ratio() {
    let radius = 40.0;
    for a in viewports() {
        for b in viewports() {
            let ra = a.radius_to_viewport(radius);
            let rb = b.radius_to_viewport(radius);
            assert!((rb / ra - a.scale / b.scale).abs() < 1e-12);
        }
    }
}
