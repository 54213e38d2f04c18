//! Entrainment selection: which particles the flow picks up in an iteration.
//!
//! The [`selector::EntrainmentSelector`] runs a ghost pass followed by one quota-limited
//! draw per subregion. Eligibility ([`eligibility`]) and elevation weighting
//! ([`weighting`]) are pluggable; [`get_event_particles`] wires the defaults.
use std::collections::BTreeSet;

use rand::RngCore;

use crate::bed::{ParticleTable, Subregion, Uid};

pub mod draw;
pub mod eligibility;
pub mod events;
pub mod selector;
pub mod weighting;

pub use selector::{EntrainmentSelector, SelectionConfig, SelectionResult, SubregionSelection};

/// Uids entrained this iteration, using the default eligibility and weighting policies.
///
/// Ghost particles are always included. Each subregion contributes at most
/// `entrainment_events` active particles; a short supply is logged, never an error.
pub fn get_event_particles<S, R>(
    entrainment_events: usize,
    subregions: &[S],
    particles: &ParticleTable,
    level_limit: u32,
    height_dependant: bool,
    rng: &mut R,
) -> BTreeSet<Uid>
where
    S: Subregion,
    R: RngCore + ?Sized,
{
    let config = SelectionConfig::new(entrainment_events)
        .with_level_limit(level_limit)
        .with_height_dependant(height_dependant);
    EntrainmentSelector::new(config)
        .select(subregions, particles, rng)
        .into_uids()
}
