#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Command line tools for GC-bias correction of k-mer repeat counts, extraction of reads
//! carrying a repeat and motif search across k-mer lists.
mod cli;
mod error;
mod io;

use crate::cli::Command;
use kgc::{
    extract_reads, intersect, motif_hits, read_kmer_list, BiasTable, CountMatrix, Corrector,
    GcAggregate, KmerClass, AVG_COVS_FILE, CORRECTED_FILE, DEFAULT_MOTIFS,
};
use log::{error, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use structopt::StructOpt;

type Result<T> = std::result::Result<T, crate::error::Error>;

fn main() -> Result<()> {
    let opt = cli::RustyKmer::from_args();
    opt.set_logging();

    rayon::ThreadPoolBuilder::new()
        .num_threads(opt.threads)
        .build_global()
        .map_err(|_| crate::error::Error::ThreadError)?;

    let result = match opt.cmd {
        Command::GcTable { ref positions } => gc_table(positions),
        Command::Correct {
            ref compilefile,
            ref biasfolder,
            min_reads,
        } => correct(compilefile, biasfolder, min_reads),
        Command::Extract {
            ref kmer,
            ref repfile,
            ref output,
        } => extract(kmer, repfile, output),
        Command::Motifs {
            ref kmers,
            ref motifs,
        } => motifs_search(kmers, motifs),
        Command::Intersect {
            ref reference,
            ref query,
            revcomp,
        } => intersect_lists(reference, query, revcomp),
    };

    if let Err(ref e) = result {
        error!("{}", e);
    }
    result
}

fn gc_table(positions: &Path) -> Result<()> {
    let aggregate = GcAggregate::from_reader(io::open_input(positions)?)?;
    let stdout = std::io::stdout();
    aggregate.write_table(stdout.lock())?;
    Ok(())
}

fn correct(compilefile: &Path, biasfolder: &Path, min_reads: u64) -> Result<()> {
    let counts = CountMatrix::from_reader(io::open_input(compilefile)?)?;
    let tables: Vec<(String, BiasTable)> = io::read_bias_folder(biasfolder)?;
    let corrector = Corrector::new(&tables, min_reads)?;
    let corrected = corrector.correct(&counts)?;

    corrector.write_avg_covs(BufWriter::new(File::create(AVG_COVS_FILE)?))?;
    info!("Wrote average coverages to {}", AVG_COVS_FILE);
    corrected.write_csv(BufWriter::new(File::create(CORRECTED_FILE)?))?;
    info!("Wrote corrected counts to {}", CORRECTED_FILE);
    Ok(())
}

fn extract(kmer: &str, repfile: &Path, output: &Path) -> Result<()> {
    let class = KmerClass::new(kmer)?;
    let rdr = io::open_input(repfile)?;
    let wtr = BufWriter::new(File::create(output)?);
    let summary = extract_reads(rdr, &class, wtr)?;
    info!(
        "Wrote {} reads to {}",
        summary.matched,
        output.display()
    );
    Ok(())
}

fn motifs_search(kmers: &Path, motifs: &[String]) -> Result<()> {
    let kmers = read_kmer_list(io::open_input(kmers)?)?;
    let motifs = if motifs.is_empty() {
        DEFAULT_MOTIFS.iter().map(|m| m.to_string()).collect()
    } else {
        motifs.to_vec()
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for kmer in kmers {
        let class = KmerClass::new(&kmer)?;
        for motif in motif_hits(&class, &motifs) {
            writeln!(out, "{} {}", kmer, motif)?;
        }
    }
    Ok(())
}

fn intersect_lists(reference: &Path, query: &Path, revcomp: bool) -> Result<()> {
    let reference = read_kmer_list(io::open_input(reference)?)?;
    let query = read_kmer_list(io::open_input(query)?)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for kmer in query {
        let class = KmerClass::new(&kmer)?;
        let shared = intersect(&reference, &class, revcomp);
        writeln!(out, "{}\t{}", kmer, shared.join(","))?;
    }
    Ok(())
}
