#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Crate for correcting GC-content bias in k-mer repeat counts and for matching k-mers
//! up to rotation and reverse complement.
//!
//! Sequencing coverage depends on the GC content of the sequenced region, so counts of
//! GC-rich or AT-rich repeats are skewed. Coverage is summarised per GC value into a
//! bias table ([`GcAggregate`]), coarsened into fixed GC bins ([`BinnedFactors`]) and each
//! raw k-mer count is divided by the factor of the bin holding its GC fraction
//! ([`Corrector`]).
//!
//! Repeats such as `AACCTG` are reported by kseek under any of their rotations or the
//! reverse complement of those rotations, [`KmerClass`] collects all of them.

mod bins;
mod correct;
mod counts;
mod error;
mod gc_table;
mod kmer;
mod motif;
mod repeats;

pub use crate::bins::{bin_index, gc_bins, BinnedFactors, GcBin, GC_BIN_BOUNDARIES, N_GC_BINS};
pub use crate::correct::{
    round_count, Corrector, AVG_COVS_FILE, CORRECTED_FILE, DEFAULT_MIN_READS,
};
pub use crate::counts::{CountMatrix, TOTAL_BP_COLUMN, UNKNOWN_KMER_COLUMN};
pub use crate::error::Error;
pub use crate::gc_table::{
    BiasRow, BiasTable, GcAggregate, GcRecord, PositionRecord, BIAS_TABLE_HEADER,
};
pub use crate::kmer::{
    complement, gc_fraction, is_acgt, revcomp, rotations, KmerClass, COMPLEMENT_CYCLE,
};
pub use crate::motif::{intersect, motif_hits, read_kmer_list, DEFAULT_MOTIFS};
pub use crate::repeats::{
    extract_reads, ExtractSummary, RepBlock, RepReader, PROGRESS_INTERVAL, REP_BLOCK_LINES,
};

/// Result type returned by every fallible operation of the crate
pub type Result<T> = std::result::Result<T, Error>;
