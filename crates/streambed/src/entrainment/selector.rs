//! Per-iteration entrainment selection across bed subregions.
use std::collections::BTreeSet;

use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bed::{Particle, ParticleTable, Subregion, Uid};
use crate::entrainment::draw::{draw_uniform, draw_weighted};
use crate::entrainment::eligibility::{EligibilityPredicate, Unrestricted};
use crate::entrainment::events::{EntrainmentEvent, EntrainmentEventKind, EventSink};
use crate::entrainment::weighting::{elevation_weights, ElevationWeighting, LinearElevation};

/// Configuration for one selection pass.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionConfig {
    /// Maximum number of particles entrained per subregion.
    pub entrainment_events: usize,
    /// Bound handed to the eligibility predicate.
    pub level_limit: u32,
    /// Weight draws by particle elevation instead of drawing uniformly.
    pub height_dependant: bool,
}

impl SelectionConfig {
    pub fn new(entrainment_events: usize) -> Self {
        Self {
            entrainment_events,
            ..Default::default()
        }
    }

    pub fn with_level_limit(mut self, level_limit: u32) -> Self {
        self.level_limit = level_limit;
        self
    }

    pub fn with_height_dependant(mut self, height_dependant: bool) -> Self {
        self.height_dependant = height_dependant;
        self
    }
}

/// What one subregion contributed to a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SubregionSelection {
    /// Index of the subregion in the sequence.
    pub index: usize,
    pub name: String,
    /// Active, eligible members of the subregion.
    pub eligible: usize,
    /// Uids drawn, in draw order.
    pub selected: Vec<Uid>,
    /// Fewer eligible particles than requested.
    pub shortfall: bool,
}

/// Result of a selection pass.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionResult {
    /// Every entrained uid, ghosts included.
    pub uids: BTreeSet<Uid>,
    /// Ghost uids in table order.
    pub ghosts: Vec<Uid>,
    /// Per-subregion summaries in sequence order.
    pub subregions: Vec<SubregionSelection>,
}

impl SelectionResult {
    pub fn len(&self) -> usize {
        self.uids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }

    pub fn contains(&self, uid: Uid) -> bool {
        self.uids.contains(&uid)
    }

    /// Subregions that could not meet the requested count.
    pub fn shortfalls(&self) -> impl Iterator<Item = &SubregionSelection> {
        self.subregions.iter().filter(|s| s.shortfall)
    }

    pub fn into_uids(self) -> BTreeSet<Uid> {
        self.uids
    }
}

/// Selects entrained particles per subregion with pluggable eligibility and weighting.
pub struct EntrainmentSelector {
    /// Configuration applied to every pass.
    pub config: SelectionConfig,
    eligibility: Box<dyn EligibilityPredicate>,
    weighting: Box<dyn ElevationWeighting>,
}

impl EntrainmentSelector {
    /// A selector with [`Unrestricted`] eligibility and [`LinearElevation`] weighting.
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            eligibility: Box::new(Unrestricted),
            weighting: Box::new(LinearElevation::default()),
        }
    }

    pub fn with_eligibility<P: EligibilityPredicate + 'static>(mut self, predicate: P) -> Self {
        self.eligibility = Box::new(predicate);
        self
    }

    pub fn with_weighting<W: ElevationWeighting + 'static>(mut self, weighting: W) -> Self {
        self.weighting = Box::new(weighting);
        self
    }

    /// Runs one selection pass.
    pub fn select<S, R>(
        &self,
        subregions: &[S],
        particles: &ParticleTable,
        rng: &mut R,
    ) -> SelectionResult
    where
        S: Subregion,
        R: RngCore + ?Sized,
    {
        self.select_with_events(subregions, particles, rng, &mut ())
    }

    pub fn select_with_events<S, R>(
        &self,
        subregions: &[S],
        particles: &ParticleTable,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> SelectionResult
    where
        S: Subregion,
        R: RngCore + ?Sized,
    {
        if sink.wants(EntrainmentEventKind::SelectionStarted) {
            sink.send(EntrainmentEvent::SelectionStarted {
                config: self.config.clone(),
                subregion_count: subregions.len(),
                particle_count: particles.len(),
            });
        }

        // Ghosts bypass activity, membership and quota.
        let ghosts: Vec<Uid> = particles.ghosts().map(|p| p.uid).collect();
        let mut result = SelectionResult {
            uids: ghosts.iter().copied().collect(),
            ghosts,
            subregions: Vec::with_capacity(subregions.len()),
        };
        if sink.wants(EntrainmentEventKind::GhostsCollected) {
            sink.send(EntrainmentEvent::GhostsCollected {
                uids: result.ghosts.clone(),
            });
        }

        if subregions.is_empty() && !particles.is_empty() {
            warn!("No subregions supplied; only ghost particles can be selected.");
        }

        let members = self.eligible_members(subregions, particles);
        for (index, (subregion, eligible)) in subregions.iter().zip(members).enumerate() {
            let selection = self.select_subregion(index, subregion, eligible, rng, sink);
            result.uids.extend(selection.selected.iter().copied());
            result.subregions.push(selection);
        }

        if sink.wants(EntrainmentEventKind::SelectionFinished) {
            sink.send(EntrainmentEvent::SelectionFinished {
                result: result.clone(),
            });
        }

        result
    }

    /// Active, eligible, non-ghost particles of each subregion, in table order.
    ///
    /// Ordered, non-overlapping subregions are filled in one pass over the table.
    /// Anything else falls back to testing every particle against every subregion.
    fn eligible_members<'a, S: Subregion>(
        &self,
        subregions: &[S],
        particles: &'a ParticleTable,
    ) -> Vec<Vec<&'a Particle>> {
        let mut members = vec![Vec::new(); subregions.len()];
        let Some(last) = subregions.len().checked_sub(1) else {
            return members;
        };
        let candidates = particles
            .iter()
            .filter(|p| !p.is_ghost() && p.active)
            .filter(|p| self.eligibility.is_eligible(p, self.config.level_limit));

        if is_ordered(subregions) {
            let lefts: Vec<f64> = subregions.iter().map(|s| s.left_boundary()).collect();
            for p in candidates {
                let Some(index) = lefts.partition_point(|&left| left <= p.x).checked_sub(1)
                else {
                    continue;
                };
                let s = &subregions[index];
                if in_interval(p.x, s.left_boundary(), s.right_boundary(), index == last) {
                    members[index].push(p);
                }
            }
        } else {
            for p in candidates {
                for (index, s) in subregions.iter().enumerate() {
                    if in_interval(p.x, s.left_boundary(), s.right_boundary(), index == last) {
                        members[index].push(p);
                    }
                }
            }
        }
        members
    }

    fn select_subregion<S, R>(
        &self,
        index: usize,
        subregion: &S,
        eligible: Vec<&Particle>,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> SubregionSelection
    where
        S: Subregion,
        R: RngCore + ?Sized,
    {
        let left = subregion.left_boundary();
        let right = subregion.right_boundary();
        let requested = self.config.entrainment_events;

        let shortfall = eligible.len() < requested;
        let selected: Vec<Uid> = if eligible.len() <= requested {
            eligible.iter().map(|p| p.uid).collect()
        } else if self.config.height_dependant {
            let elevations: Vec<f64> = eligible.iter().map(|p| p.elevation).collect();
            let weights = elevation_weights(self.weighting.as_ref(), &elevations);
            draw_weighted(&weights, requested, rng)
                .into_iter()
                .map(|i| eligible[i].uid)
                .collect()
        } else {
            draw_uniform(eligible.len(), requested, rng)
                .into_iter()
                .map(|i| eligible[i].uid)
                .collect()
        };

        if shortfall {
            warn!(
                "Subregion '{}' has {} eligible particles; {} entrainment events requested.",
                subregion.name(),
                eligible.len(),
                requested
            );
            if sink.wants(EntrainmentEventKind::Shortfall) {
                sink.send(EntrainmentEvent::Shortfall {
                    index,
                    name: subregion.name().to_owned(),
                    requested,
                    available: eligible.len(),
                });
            }
        }

        debug!(
            "Subregion '{}' [{}, {}]: {} eligible, {} selected.",
            subregion.name(),
            left,
            right,
            eligible.len(),
            selected.len()
        );
        if sink.wants(EntrainmentEventKind::SubregionSelected) {
            sink.send(EntrainmentEvent::SubregionSelected {
                index,
                name: subregion.name().to_owned(),
                eligible: eligible.len(),
                uids: selected.clone(),
            });
        }

        SubregionSelection {
            index,
            name: subregion.name().to_owned(),
            eligible: eligible.len(),
            selected,
            shortfall,
        }
    }
}

impl Default for EntrainmentSelector {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

/// Each interval is well-formed and ends at or before the next one starts.
fn is_ordered<S: Subregion>(subregions: &[S]) -> bool {
    subregions
        .iter()
        .all(|s| s.left_boundary() <= s.right_boundary())
        && subregions
            .windows(2)
            .all(|w| w[0].right_boundary() <= w[1].left_boundary())
}

/// Half-open `[left, right)`, closed on the right for the last subregion.
#[inline]
fn in_interval(x: f64, left: f64, right: f64, closed_right: bool) -> bool {
    x >= left && (x < right || (closed_right && x == right))
}
