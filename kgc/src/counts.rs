use crate::{error::Error, kmer::gc_fraction, Result};
use log::{debug, info};
use std::cmp::Ordering;
use std::io::{Read, Write};

/// Column with the number of sequenced bases, dropped before correction
pub const TOTAL_BP_COLUMN: &str = "total_bp";
/// Column counting unknown bases, dropped when present
pub const UNKNOWN_KMER_COLUMN: &str = "N/N";

/// Matrix of k-mer counts, one row per sample and one column per k-mer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    samples: Vec<String>,
    kmers: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl CountMatrix {
    /// Creates a matrix from its parts, every row must have one count per k-mer
    pub fn new(samples: Vec<String>, kmers: Vec<String>, counts: Vec<Vec<u64>>) -> Result<Self> {
        if samples.len() != counts.len() {
            return Err(Error::RowCount(samples.len(), counts.len()));
        }
        if let Some((sample, row)) = samples
            .iter()
            .zip(counts.iter())
            .find(|(_, row)| row.len() != kmers.len())
        {
            return Err(Error::RowLength(sample.clone(), row.len(), kmers.len()));
        }
        Ok(Self {
            samples,
            kmers,
            counts,
        })
    }

    /// Reads a tab separated k-mer compilation table. The first column holds the sample
    /// names and is truncated at the first `.`, k-mer columns are truncated at the first `/`.
    /// `total_bp` is required and dropped, `N/N` is dropped if present. K-mer columns are
    /// ordered by ascending GC fraction.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        info!("Reading k-mer counts...");
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(rdr);
        let headers = rdr.headers()?.clone();

        if !headers.iter().skip(1).any(|header| header == TOTAL_BP_COLUMN) {
            return Err(Error::MissingColumn(
                TOTAL_BP_COLUMN.to_string(),
                "k-mer count table".to_string(),
            ));
        }
        let mut columns = headers
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, header)| *header != TOTAL_BP_COLUMN && *header != UNKNOWN_KMER_COLUMN)
            .map(|(idx, header)| {
                let kmer = header.split('/').next().unwrap_or(header).to_string();
                gc_fraction(&kmer).map(|gc| (idx, kmer, gc))
            })
            .collect::<Result<Vec<(usize, String, f64)>>>()?;
        columns.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));

        let mut samples = Vec::new();
        let mut counts = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let name = record.get(0).unwrap_or_default();
            let sample = name.split('.').next().unwrap_or(name).to_string();
            let row = columns
                .iter()
                .map(|(idx, kmer, _)| {
                    let value = record.get(*idx).unwrap_or_default();
                    value.parse::<u64>().map_err(|_| {
                        Error::MalformedCount(sample.clone(), kmer.clone(), value.to_string())
                    })
                })
                .collect::<Result<Vec<u64>>>()?;
            samples.push(sample);
            counts.push(row);
        }
        debug!(
            "Read counts of {} k-mers for {} samples",
            columns.len(),
            samples.len()
        );

        Self::new(
            samples,
            columns.into_iter().map(|(_, kmer, _)| kmer).collect(),
            counts,
        )
    }

    /// Sample names in row order
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// K-mer names in column order
    pub fn kmers(&self) -> &[String] {
        &self.kmers
    }

    /// Counts of the sample in row `idx`
    pub fn row(&self, idx: usize) -> Option<&[u64]> {
        self.counts.get(idx).map(Vec::as_slice)
    }

    /// Count for a sample and k-mer by name, first match wins
    pub fn get(&self, sample: &str, kmer: &str) -> Option<u64> {
        let row = self.samples.iter().position(|s| s == sample)?;
        let col = self.kmers.iter().position(|k| k == kmer)?;
        Some(self.counts[row][col])
    }

    /// Rows paired with their sample name
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.samples
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().map(Vec::as_slice))
    }

    /// Writes the matrix comma separated, k-mers as the header and samples as the first
    /// column
    pub fn write_csv<W: Write>(&self, wtr: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(wtr);
        wtr.write_record(std::iter::once("").chain(self.kmers.iter().map(String::as_str)))?;
        for (sample, row) in self.rows() {
            wtr.write_record(
                std::iter::once(sample.to_string()).chain(row.iter().map(u64::to_string)),
            )?;
        }
        wtr.flush()?;
        Ok(())
    }
}
