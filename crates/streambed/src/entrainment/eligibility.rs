//! Level-limit eligibility policies.
//!
//! How `level_limit` bounds entrainment is a property of the physical model driving
//! the simulation, so the selector delegates it to an [`EligibilityPredicate`].
use crate::bed::Particle;

/// Decides whether an active, on-bed particle may be entrained.
pub trait EligibilityPredicate: Send + Sync {
    fn is_eligible(&self, particle: &Particle, level_limit: u32) -> bool;
}

/// Every active particle is eligible; `level_limit` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl EligibilityPredicate for Unrestricted {
    #[inline]
    fn is_eligible(&self, _particle: &Particle, _level_limit: u32) -> bool {
        true
    }
}

/// Eligible while `loop_age_counter <= level_limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopAgeCeiling;

impl EligibilityPredicate for LoopAgeCeiling {
    #[inline]
    fn is_eligible(&self, particle: &Particle, level_limit: u32) -> bool {
        particle.loop_age_counter <= level_limit
    }
}

impl<F> EligibilityPredicate for F
where
    F: Fn(&Particle, u32) -> bool + Send + Sync,
{
    #[inline]
    fn is_eligible(&self, particle: &Particle, level_limit: u32) -> bool {
        self(particle, level_limit)
    }
}
