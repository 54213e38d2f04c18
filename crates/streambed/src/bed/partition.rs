//! Partitioning of the bed into equal-width subregions.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bed::subregion::BedSubregion;
use crate::error::{Error, Result};

/// Bed geometry and run length used to lay out subregions.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BedConfig {
    /// Length of the bed in bed units.
    pub bed_length: u32,
    /// Number of equal-width subregions.
    pub subregion_count: u32,
    /// Number of simulation iterations; sizes each flux ledger.
    pub iterations: usize,
}

impl Default for BedConfig {
    fn default() -> Self {
        Self {
            bed_length: 100,
            subregion_count: 1,
            iterations: 0,
        }
    }
}

impl BedConfig {
    pub fn new(bed_length: u32) -> Self {
        Self {
            bed_length,
            ..Default::default()
        }
    }

    pub fn with_subregion_count(mut self, subregion_count: u32) -> Self {
        self.subregion_count = subregion_count;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Width of each subregion, if the layout is valid.
    pub fn subregion_width(&self) -> Result<u32> {
        self.validate()?;
        Ok(self.bed_length / self.subregion_count)
    }

    pub fn validate(&self) -> Result<()> {
        if self.subregion_count == 0 {
            return Err(Error::InvalidSubregionCount(self.subregion_count));
        }
        if self.bed_length % self.subregion_count != 0 {
            return Err(Error::InexactPartition {
                bed_length: self.bed_length,
                subregion_count: self.subregion_count,
            });
        }
        Ok(())
    }

    pub fn define_subregions(&self) -> Result<Vec<BedSubregion>> {
        define_subregions(self.bed_length, self.subregion_count, self.iterations)
    }
}

/// Split `[0, bed_length]` into `subregion_count` equal, contiguous subregions.
///
/// Fails when `subregion_count` is zero or does not divide `bed_length` exactly; no
/// partial partition is returned. Each subregion gets a zeroed flux ledger of length
/// `iterations`.
pub fn define_subregions(
    bed_length: u32,
    subregion_count: u32,
    iterations: usize,
) -> Result<Vec<BedSubregion>> {
    let config = BedConfig {
        bed_length,
        subregion_count,
        iterations,
    };
    config.validate()?;

    let width = bed_length / subregion_count;
    let subregions: Vec<BedSubregion> = (0..subregion_count)
        .map(|i| {
            // Integer boundaries keep neighbours exactly equal at shared edges.
            let left = i * width;
            let right = if i + 1 == subregion_count {
                bed_length
            } else {
                left + width
            };
            BedSubregion::new(
                format!("Subregion_{i}"),
                left as f64,
                right as f64,
                iterations,
            )
        })
        .collect();

    info!(
        "Partitioned bed of length {} into {} subregions of width {}.",
        bed_length, subregion_count, width
    );
    Ok(subregions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed::Subregion;

    #[test]
    fn zero_count_is_rejected() {
        let err = define_subregions(10, 0, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidSubregionCount(0)));
    }

    #[test]
    fn inexact_division_is_rejected() {
        let err = define_subregions(10, 3, 10).unwrap_err();
        assert!(matches!(
            err,
            Error::InexactPartition {
                bed_length: 10,
                subregion_count: 3
            }
        ));
    }

    #[test]
    fn two_subregions_share_middle_boundary() {
        let subs = define_subregions(10, 2, 10).unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].left_boundary(), 0.0);
        assert_eq!(subs[0].right_boundary(), 5.0);
        assert_eq!(subs[1].left_boundary(), 5.0);
        assert_eq!(subs[1].right_boundary(), 10.0);
    }

    #[test]
    fn five_subregions_tile_bed() {
        let subs = define_subregions(10, 5, 10).unwrap();
        assert_eq!(subs.len(), 5);
        for (i, s) in subs.iter().enumerate() {
            assert_eq!(s.left_boundary(), (i * 2) as f64);
            assert_eq!(s.right_boundary(), (i * 2 + 2) as f64);
            assert_eq!(s.name(), format!("Subregion_{i}"));
        }
    }

    #[test]
    fn flux_ledgers_are_zeroed() {
        let subs = define_subregions(10, 2, 10).unwrap();
        for s in &subs {
            assert_eq!(s.flux_list().len(), 10);
            assert!(s.flux_list().as_slice().iter().all(|&c| c == 0));
        }
    }

    #[test]
    fn config_builder_delegates() {
        let config = BedConfig::new(20).with_subregion_count(4).with_iterations(3);
        assert_eq!(config.subregion_width().unwrap(), 5);
        let subs = config.define_subregions().unwrap();
        assert_eq!(subs.len(), 4);
        assert_eq!(subs[3].flux_list().len(), 3);

        assert!(BedConfig::new(20).with_subregion_count(3).validate().is_err());
    }
}
