use std::time::{Duration, Instant};

use clip_draw_match::{ClipDrawMatch, ClipDrawMatchConfig, HostConfig, SampleHost};
use clip_draw_match::{Geometry, SampleView};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn host_for(geometry: Geometry, anti_alias: bool, started: Instant) -> SampleHost {
    let config = ClipDrawMatchConfig::default().with_anti_alias(anti_alias);
    let mut view = ClipDrawMatch::with_config(started, config);
    view.on_event(clip_draw_match::Event::Char(geometry.key()));
    SampleHost::new(Box::new(view), HostConfig::default()).expect("host")
}

fn render_frame(c: &mut Criterion) {
    let started = Instant::now();
    let mut group = c.benchmark_group("render_frame");

    for anti_alias in [false, true] {
        for geometry in Geometry::ALL {
            let mut host = host_for(geometry, anti_alias, started);
            let id = BenchmarkId::new(if anti_alias { "aa" } else { "aliased" }, geometry);
            let mut frame = 0u64;
            group.bench_function(id, |b| {
                b.iter(|| {
                    // Step through the animation so offsets vary between frames.
                    frame += 1;
                    let now = started + Duration::from_millis(frame * 16 % 5000);
                    host.render_frame(now).pixel(200, 200)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, render_frame);
criterion_main!(benches);
