//! Recognition throughput on synthetic passing sequences
//!
//! Run with: cargo bench --bench recognition_bench

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use er_core::episode::FRAME_LEN;
use er_core::{recognize_dataset, recognize_episode, Dataset, Episode, RecognitionConfig};

const PASS_FRAMES: usize = 20;

/// Players 3 and 4 pass the ball back and forth 10m apart; everyone else
/// stands still along the touchlines.
fn passing_episode(len: usize) -> Episode {
    let frames = (0..len)
        .map(|frame| {
            let mut values = vec![0.0; FRAME_LEN];
            for player in 0..22 {
                values[player * 2] = -40.0 + 8.0 * (player % 11) as f64;
                values[player * 2 + 1] = if player < 11 { -20.0 } else { 20.0 };
            }
            values[6] = 0.0;
            values[7] = 0.0;
            values[8] = 10.0;
            values[9] = 0.0;

            // Half the cycle on a player, half in flight
            let phase = frame % (2 * PASS_FRAMES);
            let outbound = phase < PASS_FRAMES;
            let t = ((phase % PASS_FRAMES) as f64 - PASS_FRAMES as f64 / 2.0).max(0.0)
                / (PASS_FRAMES as f64 / 2.0);
            let x = if outbound { 10.0 * t } else { 10.0 * (1.0 - t) };
            values[FRAME_LEN - 2] = x;
            values[FRAME_LEN - 1] = 0.0;
            values
        })
        .collect();
    Episode::new(frames).expect("frames are built with FRAME_LEN")
}

fn benchmark_episode(c: &mut Criterion) {
    let config = RecognitionConfig::default();
    let mut group = c.benchmark_group("recognize_episode");

    for len in [500, 5_000, 50_000] {
        let episode = passing_episode(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &episode, |b, episode| {
            b.iter(|| recognize_episode(black_box(episode), black_box(&config)))
        });
    }

    group.finish();
}

fn benchmark_dataset(c: &mut Criterion) {
    let config = RecognitionConfig::default();
    let dataset = Dataset::from_episodes(
        (0..64)
            .map(|i| (format!("sequence_{}", i + 1), passing_episode(2_000)))
            .collect::<BTreeMap<_, _>>(),
    );

    c.bench_function("recognize_dataset_64x2000", |b| {
        b.iter(|| recognize_dataset(black_box(&dataset), black_box(&config)))
    });
}

criterion_group!(benches, benchmark_episode, benchmark_dataset);
criterion_main!(benches);
