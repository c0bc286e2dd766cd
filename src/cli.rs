use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rustykmer",
    about = "GC-bias correction, extraction and motif search for kseek k-mer repeats"
)]
pub(crate) struct RustyKmer {
    #[structopt(
        short,
        long,
        global = true,
        parse(from_occurrences),
        help = "Increase logging verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,
    #[structopt(short, long, global = true, help = "Only log errors")]
    pub quiet: bool,
    #[structopt(
        short,
        long,
        global = true,
        default_value = "1",
        help = "Number of threads used for per-sample correction"
    )]
    pub threads: usize,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub(crate) enum Command {
    /// Summarises coverage per GC value of a position table into a bias table on stdout
    GcTable {
        #[structopt(
            help = "Position table (chrom, pos, reads covered, GC, ...), `-` for stdin",
            parse(from_os_str)
        )]
        positions: PathBuf,
    },
    /// Corrects k-mer counts by the binned coverage of each sample's bias table, writes
    /// `avg_covs.txt` and `corrected.csv` in the working directory
    Correct {
        #[structopt(help = "k-mer compilation table (kcompile output)", parse(from_os_str))]
        compilefile: PathBuf,
        #[structopt(
            help = "Folder containing one bias table per sample (gc.txt files)",
            parse(from_os_str)
        )]
        biasfolder: PathBuf,
        #[structopt(
            long = "minreads",
            default_value = "0",
            help = "Minimum number of overlapping reads for a GC value to be used in correction"
        )]
        min_reads: u64,
    },
    /// Extracts the reads of a kseek `.rep` report whose repeat is the k-mer, one of its
    /// rotations or a reverse complement of those
    Extract {
        #[structopt(help = "k-mer to search for")]
        kmer: String,
        #[structopt(help = ".rep file, output of kseek", parse(from_os_str))]
        repfile: PathBuf,
        #[structopt(
            short,
            long,
            default_value = "extracted_reads.fasta",
            help = "Name of output FASTA file",
            parse(from_os_str)
        )]
        output: PathBuf,
    },
    /// Reports the motifs found in any rotation or reverse complement of each k-mer
    Motifs {
        #[structopt(help = "k-mer list, one per line", parse(from_os_str))]
        kmers: PathBuf,
        #[structopt(
            short,
            long = "motif",
            number_of_values = 1,
            help = "Motif to search for instead of the default list, can be repeated"
        )]
        motifs: Vec<String>,
    },
    /// Reports the reference k-mers that are rotations of each query k-mer
    Intersect {
        #[structopt(help = "Reference k-mer list, one per line", parse(from_os_str))]
        reference: PathBuf,
        #[structopt(help = "Query k-mer list, one per line", parse(from_os_str))]
        query: PathBuf,
        #[structopt(long, help = "Also match reverse complements of the rotations")]
        revcomp: bool,
    },
}

impl RustyKmer {
    pub fn set_logging(&self) {
        let log_level = match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Error,
            (false, 0) => LevelFilter::Warn,
            (false, 1) => LevelFilter::Info,
            (false, 2) => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        env_logger::Builder::new().filter_level(log_level).init();
    }
}
