use crate::{error::Error, gc_table::BiasTable, Result};
use log::debug;
use std::fmt;

/// Cut points of the GC bins. Every bin is `(lower, upper]` except the first, which also
/// holds a GC fraction of exactly zero.
pub const GC_BIN_BOUNDARIES: [f64; 11] = [
    0.0, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55, 0.60, 0.75, 1.0,
];

/// Number of GC bins
pub const N_GC_BINS: usize = GC_BIN_BOUNDARIES.len() - 1;

/// A GC fraction interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcBin {
    /// Exclusive lower bound, inclusive for the first bin
    pub lower: f64,
    /// Inclusive upper bound
    pub upper: f64,
}

impl GcBin {
    /// Checks if the bin holds `gc`
    pub fn contains(&self, gc: f64) -> bool {
        (gc > self.lower || (gc == 0.0 && self.lower == 0.0)) && gc <= self.upper
    }
}

impl fmt::Display for GcBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower == GC_BIN_BOUNDARIES[0] {
            '['
        } else {
            '('
        };
        write!(f, "{}{}, {}]", open, self.lower, self.upper)
    }
}

/// The fixed GC bins, lowest first
pub fn gc_bins() -> impl Iterator<Item = GcBin> {
    GC_BIN_BOUNDARIES.windows(2).map(|bounds| GcBin {
        lower: bounds[0],
        upper: bounds[1],
    })
}

/// Index of the bin holding `gc`, `None` outside `[0, 1]` or for NaN
pub fn bin_index(gc: f64) -> Option<usize> {
    if gc == 0.0 {
        return Some(0);
    }
    gc_bins().position(|bin| bin.contains(gc))
}

/// Per-bin correction factors of one sample
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedFactors {
    factors: [f64; N_GC_BINS],
    avg_coverage: f64,
}

impl BinnedFactors {
    /// Uses `factors` as given, `avg_coverage` is the sample's overall coverage
    pub fn new(factors: [f64; N_GC_BINS], avg_coverage: f64) -> Self {
        Self {
            factors,
            avg_coverage,
        }
    }

    /// Averages the coverage of the bias table rows falling in each bin. Rows with
    /// `min_reads` or fewer overlapping reads are left out, bins without rows use the
    /// overall coverage of the unfiltered table.
    pub fn from_table(sample: &str, table: &BiasTable, min_reads: u64) -> Result<Self> {
        let avg_coverage = table
            .avg_coverage()
            .ok_or_else(|| Error::ZeroCoverage(sample.to_string()))?;

        let mut sums = [0.0; N_GC_BINS];
        let mut counts = [0usize; N_GC_BINS];
        let filtered = table.filter_min_reads(min_reads);
        debug!(
            "Sample {} keeps {} of {} bias table rows above {} reads",
            sample,
            filtered.rows().len(),
            table.rows().len(),
            min_reads
        );
        for row in filtered.rows() {
            match bin_index(row.gc) {
                Some(idx) => {
                    sums[idx] += row.avg_coverage;
                    counts[idx] += 1;
                }
                None => debug!("Sample {} GC value {} is outside all bins", sample, row.gc),
            }
        }

        let mut factors = [avg_coverage; N_GC_BINS];
        for (idx, factor) in factors.iter_mut().enumerate() {
            if counts[idx] > 0 {
                *factor = sums[idx] / counts[idx] as f64;
            }
        }
        let binned = Self::new(factors, avg_coverage);
        debug!(
            "Sample {} bin factors: {}",
            sample,
            gc_bins()
                .zip(binned.factors().iter())
                .map(|(bin, factor)| format!("{}={:.3}", bin, factor))
                .collect::<Vec<_>>()
                .join(" ")
        );
        Ok(binned)
    }

    /// Factor for the bin holding `gc`
    pub fn factor(&self, gc: f64) -> Result<f64> {
        bin_index(gc)
            .map(|idx| self.factors[idx])
            .ok_or(Error::NoMatchingBin(gc))
    }

    /// Factors, lowest bin first
    pub fn factors(&self) -> &[f64; N_GC_BINS] {
        &self.factors
    }

    /// Overall coverage of the sample
    pub fn avg_coverage(&self) -> f64 {
        self.avg_coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gc_table::BiasRow;

    fn row(gc: f64, n_sites: u64, reads_covered: u64) -> BiasRow {
        BiasRow {
            gc,
            n_sites,
            reads_covered,
            avg_coverage: reads_covered as f64 / n_sites as f64,
        }
    }

    #[test]
    fn test_boundaries_partition_unit_interval() {
        assert_eq!(GC_BIN_BOUNDARIES[0], 0.0);
        assert_eq!(GC_BIN_BOUNDARIES[N_GC_BINS], 1.0);
        assert!(GC_BIN_BOUNDARIES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_fraction_has_exactly_one_bin() {
        for k in 1..=60usize {
            for gc_count in 0..=k {
                let gc = gc_count as f64 / k as f64;
                let matching = gc_bins().filter(|bin| bin.contains(gc)).count();
                assert_eq!(matching, 1, "{} matched {} bins", gc, matching);
                assert!(bin_index(gc).is_some());
            }
        }
    }

    #[test]
    fn test_bin_edges() {
        assert_eq!(bin_index(0.0), Some(0));
        assert_eq!(bin_index(0.25), Some(0));
        assert_eq!(bin_index(0.26), Some(1));
        assert_eq!(bin_index(0.3), Some(1));
        assert_eq!(bin_index(0.5), Some(5));
        assert_eq!(bin_index(0.6), Some(7));
        assert_eq!(bin_index(2.0 / 3.0), Some(8));
        assert_eq!(bin_index(1.0), Some(9));
        assert_eq!(bin_index(-0.1), None);
        assert_eq!(bin_index(1.1), None);
        assert_eq!(bin_index(f64::NAN), None);
    }

    #[test]
    fn test_bin_display() {
        let labels = gc_bins().map(|bin| bin.to_string()).collect::<Vec<_>>();
        assert_eq!(labels[0], "[0, 0.25]");
        assert_eq!(labels[1], "(0.25, 0.3]");
        assert_eq!(labels[9], "(0.75, 1]");
    }

    #[test]
    fn test_binned_means_and_fallback() {
        let table = BiasTable::new(vec![
            row(0.0, 10, 20),
            row(0.48, 10, 20),
            row(0.5, 10, 40),
            row(1.0, 5, 50),
        ]);
        let factors = BinnedFactors::from_table("s1", &table, 0).unwrap();
        assert_eq!(factors.avg_coverage(), 130.0 / 35.0);
        assert_eq!(factors.factor(0.0).unwrap(), 2.0);
        assert_eq!(factors.factor(0.5).unwrap(), 3.0);
        assert_eq!(factors.factor(1.0).unwrap(), 10.0);
        assert_eq!(factors.factor(0.3).unwrap(), 130.0 / 35.0);
        assert!(matches!(factors.factor(1.5), Err(Error::NoMatchingBin(_))));
    }

    #[test]
    fn test_min_reads_filter_uses_unfiltered_average() {
        let table = BiasTable::new(vec![row(0.5, 10, 40), row(0.7, 2, 2)]);
        let factors = BinnedFactors::from_table("s1", &table, 2).unwrap();
        assert_eq!(factors.factor(0.5).unwrap(), 4.0);
        assert_eq!(factors.factor(0.7).unwrap(), 42.0 / 12.0);
    }

    #[test]
    fn test_out_of_range_rows_only_count_toward_average() {
        let table = BiasTable::new(vec![row(0.5, 10, 40), row(1.5, 10, 100)]);
        let factors = BinnedFactors::from_table("s1", &table, 0).unwrap();
        assert_eq!(factors.avg_coverage(), 7.0);
        assert_eq!(
            factors.factors(),
            &[7.0, 7.0, 7.0, 7.0, 7.0, 4.0, 7.0, 7.0, 7.0, 7.0]
        );
        assert_eq!(factors.factor(1.0).unwrap(), 7.0);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let err = BinnedFactors::from_table("s1", &BiasTable::default(), 0).unwrap_err();
        assert!(matches!(err, Error::ZeroCoverage(ref s) if s == "s1"));
    }
}
