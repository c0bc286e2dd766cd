use crate::{error::Error, Result};
use log::{debug, info};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Header of a bias table
pub const BIAS_TABLE_HEADER: [&str; 4] =
    ["GC", "Num. Positions", "Overlapping Reads", "Avg. Coverage"];
const N_SITES_COLUMN: &str = BIAS_TABLE_HEADER[1];
const READS_COVERED_COLUMN: &str = BIAS_TABLE_HEADER[2];
const AVG_COVERAGE_COLUMN: &str = BIAS_TABLE_HEADER[3];

/// A single genomic site from a position table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    /// GC content label of the site, kept verbatim
    pub gc: String,
    /// Number of reads covering the site
    pub reads_covered: u64,
}

impl PositionRecord {
    /// Parses a whitespace delimited `chrom pos reads_covered gc ...` line. Only the third
    /// and fourth columns are used.
    pub fn from_line(line: &str, line_no: usize) -> Result<Self> {
        let mut fields = line.split_whitespace().skip(2);
        let reads_covered = fields
            .next()
            .ok_or_else(|| Error::MalformedPosition(line_no, "missing read count".to_string()))?;
        let gc = fields
            .next()
            .ok_or_else(|| Error::MalformedPosition(line_no, "missing GC label".to_string()))?;
        let reads_covered = reads_covered.parse::<u64>().map_err(|_| {
            Error::MalformedPosition(
                line_no,
                format!("read count `{}` is not an integer", reads_covered),
            )
        })?;

        Ok(Self {
            gc: gc.to_string(),
            reads_covered,
        })
    }
}

/// Number of sites and reads covering them for one GC label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GcRecord {
    /// Sites with this GC label
    pub n_sites: u64,
    /// Reads summed over those sites
    pub reads_covered: u64,
}

impl GcRecord {
    /// Mean number of reads per site
    pub fn avg_coverage(&self) -> f64 {
        self.reads_covered as f64 / self.n_sites as f64
    }
}

/// Coverage aggregated per GC label, ordered by label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcAggregate(BTreeMap<String, GcRecord>);

impl GcAggregate {
    /// Creates an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds position records to the aggregate and returns it
    pub fn accumulate<I>(self, records: I) -> Self
    where
        I: IntoIterator<Item = PositionRecord>,
    {
        records
            .into_iter()
            .fold(self, |GcAggregate(mut gc_records), record| {
                let gc_record = gc_records.entry(record.gc).or_default();
                gc_record.n_sites += 1;
                gc_record.reads_covered += record.reads_covered;
                GcAggregate(gc_records)
            })
    }

    /// Reads a position table line by line. The first malformed line aborts the read.
    pub fn from_reader<R: BufRead>(rdr: R) -> Result<Self> {
        info!("Reading position table...");
        let mut aggregate = Self::new();
        for (i, line) in rdr.lines().enumerate() {
            let record = PositionRecord::from_line(&line?, i + 1)?;
            aggregate = aggregate.accumulate(Some(record));
        }
        debug!("Aggregated positions into {} GC labels", aggregate.0.len());
        Ok(aggregate)
    }

    /// Record for a GC label
    pub fn get(&self, gc: &str) -> Option<&GcRecord> {
        self.0.get(gc)
    }

    /// Iterates over GC labels in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GcRecord)> {
        self.0.iter().map(|(gc, record)| (gc.as_str(), record))
    }

    /// Number of distinct GC labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if no position was aggregated
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total sites and reads over all labels
    pub fn total(&self) -> GcRecord {
        self.0.values().fold(GcRecord::default(), |total, record| GcRecord {
            n_sites: total.n_sites + record.n_sites,
            reads_covered: total.reads_covered + record.reads_covered,
        })
    }

    /// Writes the aggregate as a tab separated bias table
    pub fn write_table<W: Write>(&self, wtr: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(wtr);
        wtr.write_record(&BIAS_TABLE_HEADER)?;
        for (gc, record) in self.iter() {
            wtr.write_record(&[
                gc.to_string(),
                record.n_sites.to_string(),
                record.reads_covered.to_string(),
                format!("{:?}", record.avg_coverage()),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// One row of a bias table as read back for correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasRow {
    /// GC content of the row
    pub gc: f64,
    /// Sites with this GC content
    pub n_sites: u64,
    /// Reads covering those sites
    pub reads_covered: u64,
    /// Mean coverage per site
    pub avg_coverage: f64,
}

/// Bias table of a single sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiasTable {
    rows: Vec<BiasRow>,
}

impl BiasTable {
    /// Wraps already parsed rows
    pub fn new(rows: Vec<BiasRow>) -> Self {
        Self { rows }
    }

    /// Reads a tab separated bias table. The first column holds the GC content, the
    /// remaining columns are located by their header name. Blank lines are skipped and
    /// errors report the line number in the file.
    pub fn from_reader<R: BufRead>(rdr: R) -> Result<Self> {
        let mut lines = rdr
            .lines()
            .enumerate()
            .map(|(i, line)| line.map(|line| (i + 1, line.trim_end_matches('\r').to_string())))
            .filter(|line| !matches!(line, Ok((_, text)) if text.trim().is_empty()));
        let headers: Vec<String> = match lines.next().transpose()? {
            Some((_, header)) => header.split('\t').map(str::to_string).collect(),
            None => Vec::new(),
        };
        let column = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string(), "bias table".to_string()))
        };
        let n_sites_idx = column(N_SITES_COLUMN)?;
        let reads_idx = column(READS_COVERED_COLUMN)?;
        let avg_idx = column(AVG_COVERAGE_COLUMN)?;

        let mut rows = Vec::new();
        for line in lines {
            let (line_no, line) = line?;
            let fields: Vec<&str> = line.split('\t').collect();
            let field = |idx: usize| {
                fields.get(idx).copied().ok_or_else(|| {
                    Error::MalformedBiasRow(line_no, format!("missing field {}", idx + 1))
                })
            };
            let malformed =
                |value: &str| Error::MalformedBiasRow(line_no, format!("`{}` is not a number", value));

            let gc = field(0)?;
            let n_sites = field(n_sites_idx)?;
            let reads_covered = field(reads_idx)?;
            let avg_coverage = field(avg_idx)?;
            rows.push(BiasRow {
                gc: gc.parse().map_err(|_| malformed(gc))?,
                n_sites: n_sites.parse().map_err(|_| malformed(n_sites))?,
                reads_covered: reads_covered.parse().map_err(|_| malformed(reads_covered))?,
                avg_coverage: avg_coverage.parse().map_err(|_| malformed(avg_coverage))?,
            });
        }
        debug!("Read {} bias table rows", rows.len());
        Ok(Self { rows })
    }

    /// Rows in file order
    pub fn rows(&self) -> &[BiasRow] {
        &self.rows
    }

    /// Keeps rows supported by more than `min_reads` overlapping reads
    pub fn filter_min_reads(&self, min_reads: u64) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .filter(|row| row.reads_covered > min_reads)
                .copied()
                .collect(),
        }
    }

    /// Overall coverage: all overlapping reads divided by all positions. `None` if the
    /// table has no positions.
    pub fn avg_coverage(&self) -> Option<f64> {
        let (n_sites, reads_covered) = self
            .rows
            .iter()
            .fold((0u64, 0u64), |(n, reads), row| {
                (n + row.n_sites, reads + row.reads_covered)
            });
        if n_sites == 0 {
            None
        } else {
            Some(reads_covered as f64 / n_sites as f64)
        }
    }
}
