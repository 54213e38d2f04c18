//! Bed model: particles, subregions, and the partitioner that lays subregions over the bed.
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod partition;
pub mod subregion;

pub use partition::{define_subregions, BedConfig};
pub use subregion::{BedSubregion, FluxLedger, Subregion};

/// Stable particle identifier.
pub type Uid = u64;

/// Position marking a particle that is currently outside the bed.
pub const GHOST_POSITION: f64 = -1.0;

/// Number of columns in the flat row encoding used by [`ParticleTable::from_rows`].
pub const ATTR_COUNT: usize = 7;

/// A single bed particle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Particle {
    /// Position along the bed, or [`GHOST_POSITION`].
    pub x: f64,
    pub diameter: f64,
    /// Vertical coordinate of the particle centre.
    pub elevation: f64,
    pub uid: Uid,
    pub active: bool,
    pub age_counter: u32,
    pub loop_age_counter: u32,
}

impl Particle {
    /// Create an inactive particle at `x` with zeroed counters.
    pub fn new(uid: Uid, x: f64, diameter: f64, elevation: f64) -> Self {
        Self {
            x,
            diameter,
            elevation,
            uid,
            active: false,
            age_counter: 0,
            loop_age_counter: 0,
        }
    }

    /// Create an inactive ghost particle.
    pub fn ghost(uid: Uid, diameter: f64) -> Self {
        Self::new(uid, GHOST_POSITION, diameter, 0.0)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_counters(mut self, age_counter: u32, loop_age_counter: u32) -> Self {
        self.age_counter = age_counter;
        self.loop_age_counter = loop_age_counter;
        self
    }

    #[inline]
    pub fn is_ghost(&self) -> bool {
        self.x == GHOST_POSITION
    }
}

/// Flat, order-irrelevant table of particles with unique uids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleTable {
    particles: Vec<Particle>,
}

impl ParticleTable {
    /// Build a table, rejecting duplicate uids.
    pub fn new(particles: Vec<Particle>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(particles.len());
        for p in &particles {
            if !seen.insert(p.uid) {
                return Err(Error::DuplicateUid(p.uid));
            }
        }
        Ok(Self { particles })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode rows laid out as `[x, diameter, elevation, uid, active, age, loop_age]`.
    ///
    /// Any non-zero `active` value counts as active. The uid and both counters must be
    /// finite, non-negative integers.
    pub fn from_rows(rows: &[[f64; ATTR_COUNT]]) -> Result<Self> {
        let mut particles = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let uid = integral_column(row[3], i, "uid")?;
            let age_counter = integral_column(row[5], i, "age counter")?;
            let loop_age_counter = integral_column(row[6], i, "loop age counter")?;
            particles.push(Particle {
                x: row[0],
                diameter: row[1],
                elevation: row[2],
                uid,
                active: row[4] != 0.0,
                age_counter: u32::try_from(age_counter).map_err(|_| {
                    Error::InvalidParticleTable(format!("row {i}: age counter overflows u32"))
                })?,
                loop_age_counter: u32::try_from(loop_age_counter).map_err(|_| {
                    Error::InvalidParticleTable(format!("row {i}: loop age counter overflows u32"))
                })?,
            });
        }
        Self::new(particles)
    }

    /// Encode back into the flat row layout accepted by [`ParticleTable::from_rows`].
    pub fn to_rows(&self) -> Vec<[f64; ATTR_COUNT]> {
        self.particles
            .iter()
            .map(|p| {
                [
                    p.x,
                    p.diameter,
                    p.elevation,
                    p.uid as f64,
                    if p.active { 1.0 } else { 0.0 },
                    p.age_counter as f64,
                    p.loop_age_counter as f64,
                ]
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Particles currently outside the bed.
    pub fn ghosts(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_ghost())
    }

    /// Active particles that are on the bed.
    pub fn active(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.active && !p.is_ghost())
    }

    pub fn get(&self, uid: Uid) -> Option<&Particle> {
        self.particles.iter().find(|p| p.uid == uid)
    }

    /// Mutable access for movement and deposition collaborators. Uids are not editable here.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Uid, &mut ParticleState)) {
        for p in &mut self.particles {
            let mut state = ParticleState {
                x: p.x,
                elevation: p.elevation,
                active: p.active,
                age_counter: p.age_counter,
                loop_age_counter: p.loop_age_counter,
            };
            f(p.uid, &mut state);
            p.x = state.x;
            p.elevation = state.elevation;
            p.active = state.active;
            p.age_counter = state.age_counter;
            p.loop_age_counter = state.loop_age_counter;
        }
    }

    pub fn into_inner(self) -> Vec<Particle> {
        self.particles
    }
}

/// Mutable view of the per-iteration fields of a [`Particle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub x: f64,
    pub elevation: f64,
    pub active: bool,
    pub age_counter: u32,
    pub loop_age_counter: u32,
}

fn integral_column(value: f64, row: usize, column: &str) -> Result<u64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(Error::InvalidParticleTable(format!(
            "row {row}: {column} must be a non-negative integer, got {value}"
        )));
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(x: f64, uid: f64, active: f64) -> [f64; ATTR_COUNT] {
        [x, 0.5, 0.0, uid, active, 0.0, 0.0]
    }

    #[test]
    fn from_rows_decodes_columns() {
        let table = ParticleTable::from_rows(&[
            [3.0, 0.5, 1.25, 7.0, 1.0, 2.0, 4.0],
            row(GHOST_POSITION, 8.0, 0.0),
        ])
        .unwrap();

        let p = table.get(7).unwrap();
        assert_eq!(p.x, 3.0);
        assert_eq!(p.elevation, 1.25);
        assert!(p.active);
        assert_eq!(p.age_counter, 2);
        assert_eq!(p.loop_age_counter, 4);
        assert!(table.get(8).unwrap().is_ghost());
    }

    #[test]
    fn from_rows_rejects_duplicate_uids() {
        let err = ParticleTable::from_rows(&[row(1.0, 3.0, 1.0), row(2.0, 3.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateUid(3)));
    }

    #[test]
    fn from_rows_rejects_fractional_uid() {
        let err = ParticleTable::from_rows(&[row(1.0, 0.5, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidParticleTable(_)));
    }

    #[test]
    fn to_rows_restores_layout() {
        let rows = vec![[4.0, 0.5, 2.0, 1.0, 1.0, 3.0, 0.0], row(GHOST_POSITION, 2.0, 0.0)];
        let table = ParticleTable::from_rows(&rows).unwrap();
        assert_eq!(table.to_rows(), rows);
    }

    #[test]
    fn ghost_and_active_filters_are_disjoint() {
        let table = ParticleTable::new(vec![
            Particle::ghost(0, 0.5).with_active(true),
            Particle::new(1, 2.0, 0.5, 0.0).with_active(true),
            Particle::new(2, 3.0, 0.5, 0.0),
        ])
        .unwrap();

        let ghosts: Vec<_> = table.ghosts().map(|p| p.uid).collect();
        let active: Vec<_> = table.active().map(|p| p.uid).collect();
        assert_eq!(ghosts, vec![0]);
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn for_each_mut_keeps_uids() {
        let mut table = ParticleTable::new(vec![Particle::new(5, 1.0, 0.5, 0.0)]).unwrap();
        table.for_each_mut(|uid, s| {
            assert_eq!(uid, 5);
            s.x = GHOST_POSITION;
            s.active = true;
        });
        let p = table.get(5).unwrap();
        assert!(p.is_ghost());
        assert!(p.active);
    }
}
