use rand::rngs::StdRng;
use rand::SeedableRng;
use streambed::prelude::*;
use streambed_examples::{build_toy_bed, init_tracing, ToyBedConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let height_dependant = std::env::args().any(|arg| arg == "--height-dependant");
    let iterations = 50;

    let config = ToyBedConfig::new(
        BedConfig::new(100)
            .with_subregion_count(5)
            .with_iterations(iterations),
    )
    .with_particle_count(400)
    .with_mean_hop(6.0);

    let mut rng = StdRng::seed_from_u64(2025);
    let mut bed = build_toy_bed(config, &mut rng)?;

    let selector = EntrainmentSelector::new(
        SelectionConfig::new(6)
            .with_level_limit(3)
            .with_height_dependant(height_dependant),
    )
    .with_eligibility(LoopAgeCeiling)
    .with_weighting(ExponentialElevation::new(1.5)?);

    let mut shortfalls = 0usize;
    let mut sink = FnSink::new(|event: EntrainmentEvent| {
        if let EntrainmentEvent::Shortfall { .. } = event {
            shortfalls += 1;
        }
    });

    let mut entrained = 0usize;
    for _ in 0..iterations {
        let selection = bed.step(&selector, &mut rng, &mut sink)?;
        entrained += selection.len();
    }
    drop(sink);

    info!(
        "Ran {} iterations: {} entrainments, {} subregion shortfalls.",
        iterations, entrained, shortfalls
    );
    for (name, total) in bed.flux_totals() {
        println!("{name}: {total}");
    }

    Ok(())
}
