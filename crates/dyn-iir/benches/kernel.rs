use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dyn_iir::{apply, apply_checked, CoefTable, StereoFrame};
use rand::{rngs::StdRng, Rng, SeedableRng};

const FRAMES: usize = 48_000;
const RESOLUTION: usize = 256;

fn sweep_table(order: usize) -> CoefTable {
    // Stable all-pole smoothing blocks, one per sweep step.
    let blocks = (0..RESOLUTION).map(|step| {
        let pole = 0.05 + 0.9 * step as f32 / (RESOLUTION - 1) as f32;
        let mut b = vec![0.0; order];
        let mut a = vec![0.0; order];
        b[0] = 1.0 - pole;
        a[0] = 1.0;
        if order > 1 {
            a[1] = -pole;
        }
        (b, a)
    });
    CoefTable::from_blocks(order, blocks).expect("sweep table")
}

fn bench_kernel(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let input: Vec<StereoFrame> = (0..FRAMES)
        .map(|_| StereoFrame::new([rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)]))
        .collect();
    let indices: Vec<u32> = (0..FRAMES)
        .map(|i| (i * (RESOLUTION - 1) / FRAMES) as u32)
        .collect();
    let mut output = vec![StereoFrame::ZERO; FRAMES];

    for order in [3, 8] {
        let table = sweep_table(order);
        c.bench_function(&format!("apply order{order} 2x{FRAMES}"), |b| {
            b.iter(|| {
                apply(
                    table.view(),
                    black_box(&indices),
                    black_box(&input),
                    &mut output,
                    FRAMES,
                )
            })
        });
        c.bench_function(&format!("apply_checked order{order} 2x{FRAMES}"), |b| {
            b.iter(|| {
                apply_checked(
                    table.view(),
                    black_box(&indices),
                    black_box(&input),
                    &mut output,
                    FRAMES,
                )
                .expect("valid call")
            })
        });
    }
}

criterion_group!(benches, bench_kernel);
criterion_main!(benches);
