use crate::{
    bins::BinnedFactors, counts::CountMatrix, error::Error, gc_table::BiasTable,
    kmer::gc_fraction, Result,
};
use log::{debug, info};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// Minimum number of overlapping reads, all bias table rows are used by default
pub const DEFAULT_MIN_READS: u64 = 0;
/// Name of the average coverage summary written by the corrector
pub const AVG_COVS_FILE: &str = "avg_covs.txt";
/// Name of the corrected count matrix written by the corrector
pub const CORRECTED_FILE: &str = "corrected.csv";

/// Rounds a corrected count to the nearest integer, halves go to the even neighbour
pub fn round_count(count: f64) -> u64 {
    count.round_ties_even() as u64
}

/// Binned correction factors for every sample with a bias table
#[derive(Debug, Clone)]
pub struct Corrector {
    samples: Vec<(String, BinnedFactors)>,
    index: HashMap<String, usize>,
}

impl Corrector {
    /// Bins every bias table. Each sample may only have one table.
    pub fn new(tables: &[(String, BiasTable)], min_reads: u64) -> Result<Self> {
        info!(
            "Binning {} bias tables using rows with more than {} overlapping reads...",
            tables.len(),
            min_reads
        );
        let samples = tables
            .par_iter()
            .map(|(sample, table)| {
                BinnedFactors::from_table(sample, table, min_reads)
                    .map(|factors| (sample.clone(), factors))
            })
            .collect::<Result<Vec<(String, BinnedFactors)>>>()?;
        Self::from_factors(samples)
    }

    /// Uses already binned factors
    pub fn from_factors(samples: Vec<(String, BinnedFactors)>) -> Result<Self> {
        let mut index = HashMap::new();
        for (i, (sample, _)) in samples.iter().enumerate() {
            if index.insert(sample.clone(), i).is_some() {
                return Err(Error::DuplicateBiasTable(sample.clone()));
            }
        }
        Ok(Self { samples, index })
    }

    /// Factors of a sample
    pub fn factors(&self, sample: &str) -> Option<&BinnedFactors> {
        self.index.get(sample).map(|i| &self.samples[*i].1)
    }

    /// Divides every count by the factor of its sample and the GC bin of its k-mer and
    /// rounds the result. Samples and bias tables must correspond one to one.
    pub fn correct(&self, matrix: &CountMatrix) -> Result<CountMatrix> {
        self.check_samples(matrix)?;
        let gc = matrix
            .kmers()
            .iter()
            .map(|kmer| gc_fraction(kmer))
            .collect::<Result<Vec<f64>>>()?;

        info!(
            "Correcting {} k-mers across {} samples...",
            matrix.kmers().len(),
            matrix.samples().len()
        );
        let counts = matrix
            .rows()
            .collect::<Vec<(&str, &[u64])>>()
            .into_par_iter()
            .map(|(sample, row)| {
                let factors = self
                    .factors(sample)
                    .ok_or_else(|| Error::MissingBiasTable(vec![sample.to_string()]))?;
                row.iter()
                    .zip(gc.iter())
                    .map(|(count, gc)| {
                        let factor = factors.factor(*gc)?;
                        if !(factor > 0.0) {
                            return Err(Error::ZeroFactor(sample.to_string(), *gc));
                        }
                        Ok(round_count(*count as f64 / factor))
                    })
                    .collect::<Result<Vec<u64>>>()
            })
            .collect::<Result<Vec<Vec<u64>>>>()?;

        CountMatrix::new(matrix.samples().to_vec(), matrix.kmers().to_vec(), counts)
    }

    fn check_samples(&self, matrix: &CountMatrix) -> Result<()> {
        let matrix_samples = matrix.samples().iter().collect::<HashSet<_>>();
        let missing = matrix
            .samples()
            .iter()
            .filter(|sample| !self.index.contains_key(*sample))
            .cloned()
            .collect::<Vec<String>>();
        if !missing.is_empty() {
            return Err(Error::MissingBiasTable(missing));
        }

        let unmatched = self
            .samples
            .iter()
            .map(|(sample, _)| sample)
            .filter(|sample| !matrix_samples.contains(sample))
            .cloned()
            .collect::<Vec<String>>();
        if !unmatched.is_empty() {
            return Err(Error::UnmatchedBiasTable(unmatched));
        }
        debug!("All {} samples have a bias table", self.samples.len());
        Ok(())
    }

    /// Writes the overall coverage of every sample as fixed width text
    pub fn write_avg_covs<W: Write>(&self, mut wtr: W) -> Result<()> {
        writeln!(wtr, "{:>10}\t{:>6}", "sample", "avg. cov")?;
        for (sample, factors) in &self.samples {
            writeln!(wtr, "{:>10}\t{:.3}", sample, factors.avg_coverage())?;
        }
        wtr.flush()?;
        Ok(())
    }
}
