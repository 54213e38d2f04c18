use std::time::Duration;

use criterion::{Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use streambed::prelude::{Particle, ParticleTable};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Particles spread over `[0, bed_length)`; roughly `active_ratio` of them active.
#[allow(dead_code)]
pub fn make_bed(count: usize, bed_length: f64, active_ratio: f64, seed: u64) -> ParticleTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut unit = move || rng.next_u32() as f64 / (u32::MAX as f64 + 1.0);
    let particles = (0..count)
        .map(|uid| {
            let x = unit() * bed_length;
            let elevation = unit() * 4.0;
            Particle::new(uid as u64, x, 0.5, elevation).with_active(unit() < active_ratio)
        })
        .collect();
    ParticleTable::new(particles).expect("uids are unique")
}
