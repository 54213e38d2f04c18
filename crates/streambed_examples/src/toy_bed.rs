//! A deliberately simple outer loop used by the example binaries.
//!
//! Selected particles hop downstream by a random distance; hops past the end of the
//! bed turn the particle into a ghost, and ghosts re-enter at the upstream end on the
//! next selection. Every subregion boundary crossed adds one to that subregion's flux
//! for the current iteration.
use rand::RngCore;
use streambed::entrainment::draw::rand01;
use streambed::prelude::*;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ToyBedConfig {
    pub bed: BedConfig,
    /// Particles laid on the bed at start.
    pub particle_count: usize,
    pub diameter: f64,
    /// Mean hop length of an entrained particle.
    pub mean_hop: f64,
}

impl ToyBedConfig {
    pub fn new(bed: BedConfig) -> Self {
        Self {
            bed,
            particle_count: 200,
            diameter: 0.5,
            mean_hop: 4.0,
        }
    }

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_mean_hop(mut self, mean_hop: f64) -> Self {
        self.mean_hop = mean_hop;
        self
    }
}

pub struct ToyBed {
    pub config: ToyBedConfig,
    pub subregions: Vec<BedSubregion>,
    pub particles: ParticleTable,
    pub iteration: usize,
}

/// Lay `particle_count` active particles uniformly over the bed, stacked two deep.
pub fn build_toy_bed(config: ToyBedConfig, rng: &mut dyn RngCore) -> Result<ToyBed> {
    let subregions = config.bed.define_subregions()?;
    let length = config.bed.bed_length as f64;
    let particles = (0..config.particle_count)
        .map(|i| {
            let x = rand01(rng) * length;
            let elevation = if i % 2 == 0 { 0.0 } else { config.diameter };
            Particle::new(i as Uid, x, config.diameter, elevation).with_active(true)
        })
        .collect();
    let particles = ParticleTable::new(particles)?;
    info!(
        "Built toy bed with {} particles over {} subregions.",
        particles.len(),
        subregions.len()
    );
    Ok(ToyBed {
        config,
        subregions,
        particles,
        iteration: 0,
    })
}

impl ToyBed {
    /// Select, move, and account for one iteration.
    pub fn step(
        &mut self,
        selector: &EntrainmentSelector,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<SelectionResult> {
        let selection = selector.select_with_events(&self.subregions, &self.particles, rng, sink);

        let length = self.config.bed.bed_length as f64;
        let mean_hop = self.config.mean_hop;
        let boundaries: Vec<f64> = self.subregions.iter().map(|s| s.right_boundary()).collect();
        let mut crossings: Vec<usize> = Vec::new();

        self.particles.for_each_mut(|uid, state| {
            if !selection.contains(uid) {
                state.active = true;
                state.age_counter = state.age_counter.saturating_add(1);
                return;
            }
            let from = if state.x == GHOST_POSITION { 0.0 } else { state.x };
            let to = from + mean_hop * 2.0 * rand01(rng);
            for (i, &right) in boundaries.iter().enumerate() {
                if from < right && to >= right {
                    crossings.push(i);
                }
            }
            // A moved particle rests for one iteration.
            state.active = false;
            state.age_counter = 0;
            state.loop_age_counter = state.loop_age_counter.saturating_add(1);
            state.x = if to > length { GHOST_POSITION } else { to };
        });

        for i in crossings {
            self.subregions[i].flux_list_mut().increment(self.iteration)?;
        }
        self.iteration += 1;
        Ok(selection)
    }

    /// Total flux recorded per subregion.
    pub fn flux_totals(&self) -> Vec<(String, u64)> {
        self.subregions
            .iter()
            .map(|s| (s.name().to_owned(), s.flux_list().total()))
            .collect()
    }
}
