//! Subregion capability consumed by the entrainment selector, and the uniform-width
//! [`BedSubregion`] produced by [`crate::bed::partition::define_subregions`].
use crate::error::{Error, Result};

/// Per-iteration entrainment counts for one subregion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluxLedger {
    counts: Vec<u32>,
}

impl FluxLedger {
    /// A ledger with `iterations` zeroed slots.
    pub fn zeroed(iterations: usize) -> Self {
        Self {
            counts: vec![0; iterations],
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    pub fn get(&self, iteration: usize) -> Option<u32> {
        self.counts.get(iteration).copied()
    }

    /// Record one more particle crossing during `iteration`.
    pub fn increment(&mut self, iteration: usize) -> Result<()> {
        let len = self.counts.len();
        let slot = self
            .counts
            .get_mut(iteration)
            .ok_or(Error::IterationOutOfRange { iteration, len })?;
        *slot = slot.saturating_add(1);
        Ok(())
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

/// Narrow view of a bed subregion.
///
/// The selector only reads the boundaries and name; the flux ledger belongs to
/// accounting code that runs after selection.
pub trait Subregion {
    fn left_boundary(&self) -> f64;
    fn right_boundary(&self) -> f64;
    fn name(&self) -> &str;
    fn flux_list(&self) -> &FluxLedger;
    fn flux_list_mut(&mut self) -> &mut FluxLedger;
}

/// An interval `[left, right)` of the bed with its flux ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct BedSubregion {
    name: String,
    left: f64,
    right: f64,
    flux: FluxLedger,
}

impl BedSubregion {
    pub fn new(name: impl Into<String>, left: f64, right: f64, iterations: usize) -> Self {
        debug_assert!(left <= right, "left boundary must not exceed right boundary");
        Self {
            name: name.into(),
            left,
            right,
            flux: FluxLedger::zeroed(iterations),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

impl Subregion for BedSubregion {
    fn left_boundary(&self) -> f64 {
        self.left
    }

    fn right_boundary(&self) -> f64 {
        self.right
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn flux_list(&self) -> &FluxLedger {
        &self.flux
    }

    fn flux_list_mut(&mut self) -> &mut FluxLedger {
        &mut self.flux
    }
}

impl<S: Subregion + ?Sized> Subregion for Box<S> {
    fn left_boundary(&self) -> f64 {
        (**self).left_boundary()
    }

    fn right_boundary(&self) -> f64 {
        (**self).right_boundary()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn flux_list(&self) -> &FluxLedger {
        (**self).flux_list()
    }

    fn flux_list_mut(&mut self) -> &mut FluxLedger {
        (**self).flux_list_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_starts_zeroed() {
        let ledger = FluxLedger::zeroed(4);
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn ledger_increment_touches_one_slot() {
        let mut ledger = FluxLedger::zeroed(3);
        ledger.increment(1).unwrap();
        ledger.increment(1).unwrap();
        assert_eq!(ledger.as_slice(), &[0, 2, 0]);
        assert_eq!(ledger.total(), 2);
    }

    #[test]
    fn ledger_increment_out_of_range_errors() {
        let mut ledger = FluxLedger::zeroed(2);
        let err = ledger.increment(2).unwrap_err();
        assert!(matches!(
            err,
            Error::IterationOutOfRange {
                iteration: 2,
                len: 2
            }
        ));
    }

    #[test]
    fn boxed_subregion_delegates() {
        let mut boxed: Box<dyn Subregion> = Box::new(BedSubregion::new("a", 0.0, 5.0, 2));
        assert_eq!(boxed.left_boundary(), 0.0);
        assert_eq!(boxed.right_boundary(), 5.0);
        assert_eq!(boxed.name(), "a");
        boxed.flux_list_mut().increment(0).unwrap();
        assert_eq!(boxed.flux_list().get(0), Some(1));
    }
}
