use rand::rngs::StdRng;
use rand::SeedableRng;
use streambed::prelude::*;
use streambed_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A 20-unit bed split into two subregions of width 10.
    let subregions = define_subregions(20, 2, 1)?;

    // Rows: [x, diameter, elevation, uid, active, age, loop_age]
    let particles = ParticleTable::from_rows(&[
        [1.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0],
        [4.0, 0.5, 0.5, 1.0, 1.0, 0.0, 0.0],
        [7.5, 0.5, 0.0, 2.0, 0.0, 3.0, 0.0],
        [10.0, 0.5, 0.0, 3.0, 1.0, 0.0, 0.0],
        [14.0, 0.5, 0.5, 4.0, 1.0, 1.0, 0.0],
        [GHOST_POSITION, 0.5, 0.0, 5.0, 0.0, 0.0, 0.0],
    ])?;

    let mut rng = StdRng::seed_from_u64(2025);
    let uids = get_event_particles(1, &subregions, &particles, 0, false, &mut rng);
    println!("uniform draw, one per subregion: {uids:?}");

    let uids = get_event_particles(1, &subregions, &particles, 0, true, &mut rng);
    println!("elevation-weighted draw, one per subregion: {uids:?}");

    // Asking for more than the bed can supply logs a shortfall and returns what exists.
    let uids = get_event_particles(5, &subregions, &particles, 0, false, &mut rng);
    println!("quota of five per subregion: {uids:?}");

    Ok(())
}
