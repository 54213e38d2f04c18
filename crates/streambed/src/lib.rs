#![forbid(unsafe_code)]
//! streambed: subregion partitioning and entrainment selection for 1-D stream-bed
//! sediment transport simulations.
//!
//! Modules:
//! - bed: particles, the particle table, subregions and their flux ledgers, partitioning
//! - entrainment: per-iteration selection of entrained particles (ghost pass, quotas,
//!   eligibility, elevation weighting, events)
//!
//! Randomness is always passed in explicitly; seed an RNG to reproduce a run.
pub mod bed;
pub mod entrainment;
pub mod error;

/// Convenient re-exports for common types. Import with `use streambed::prelude::*;`.
pub mod prelude {
    pub use crate::bed::{
        define_subregions, BedConfig, BedSubregion, FluxLedger, Particle, ParticleState,
        ParticleTable, Subregion, Uid, GHOST_POSITION,
    };
    pub use crate::entrainment::eligibility::{EligibilityPredicate, LoopAgeCeiling, Unrestricted};
    pub use crate::entrainment::events::{
        EntrainmentEvent, EntrainmentEventKind, EventSink, FnSink, MultiSink, VecSink,
    };
    pub use crate::entrainment::weighting::{
        ElevationWeighting, ExponentialElevation, LinearElevation,
    };
    pub use crate::entrainment::{
        get_event_particles, EntrainmentSelector, SelectionConfig, SelectionResult,
        SubregionSelection,
    };
    pub use crate::error::{Error, Result};
}
