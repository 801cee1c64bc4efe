use criterion::{criterion_group, criterion_main, Criterion};
use fog_map::fog::model::Stroke;
use fog_map::fog::render::{render_frame, FogRenderer, RenderSettings};
use fog_map::fog::transform::ViewportParams;

fn session_strokes(count: usize) -> Vec<Stroke> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.05;
            let x = 1024.0 + t.cos() * (200.0 + i as f64 * 0.3);
            let y = 768.0 + t.sin() * (200.0 + i as f64 * 0.3);
            if i % 7 == 0 {
                Stroke::erase(x, y, 40.0)
            } else {
                Stroke::reveal(x, y, 40.0)
            }
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let strokes = session_strokes(5_000);
    let params = ViewportParams::fit_image((2048.0, 1536.0), (1280, 720));
    let settings = RenderSettings::default();

    c.bench_function("render_frame_5k_strokes", |b| {
        b.iter(|| render_frame(&strokes, &params, settings))
    });

    let mut renderer = FogRenderer::new();
    c.bench_function("renderer_replay_5k_strokes_cached_surface", |b| {
        b.iter(|| renderer.render(&strokes, &params, settings).pixels.len())
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
