use crate::{error::Error, kmer::KmerClass, Result};
use log::{debug, info};
use std::io::{BufRead, Write};

/// Lines per read in a kseek `.rep` report
pub const REP_BLOCK_LINES: usize = 5;
/// Blocks between progress messages
pub const PROGRESS_INTERVAL: usize = 100_000;

/// A read from a `.rep` report together with the repeat kseek found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepBlock {
    /// Read name without the header marker
    pub name: String,
    /// Read sequence
    pub sequence: String,
    /// Repeat label, the part of the trailer before `=`
    pub repeat: String,
}

/// Reads `.rep` blocks: header, sequence, two ignored lines and a `repeat=count` trailer.
/// A missing or blank header ends the report, a block cut short is an error.
#[derive(Debug)]
pub struct RepReader<R> {
    rdr: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> RepReader<R> {
    /// Wraps a buffered reader
    pub fn new(rdr: R) -> Self {
        Self {
            rdr,
            line_no: 0,
            buf: String::new(),
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.rdr.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(self.buf.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }

    fn next_block(&mut self) -> Result<Option<RepBlock>> {
        let header = match self.next_line()? {
            Some(header) if !header.is_empty() => header,
            _ => return Ok(None),
        };
        let start = self.line_no;
        let mut block = Vec::with_capacity(REP_BLOCK_LINES - 1);
        for _ in 1..REP_BLOCK_LINES {
            block.push(self.next_line()?.ok_or(Error::TruncatedBlock(start))?);
        }

        let name = header.chars().skip(1).collect::<String>();
        let repeat = block[REP_BLOCK_LINES - 2]
            .split('=')
            .next()
            .unwrap_or_default()
            .to_string();
        Ok(Some(RepBlock {
            name,
            sequence: block.swap_remove(0),
            repeat,
        }))
    }
}

impl<R: BufRead> Iterator for RepReader<R> {
    type Item = Result<RepBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}

/// Number of reads scanned and written by [`extract_reads`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Blocks read from the report
    pub blocks: usize,
    /// Blocks whose repeat belongs to the k-mer class
    pub matched: usize,
}

/// Writes every read whose repeat is a rotation of `class` or the reverse complement of
/// one as a FASTA entry followed by a blank line.
pub fn extract_reads<R, W>(rdr: R, class: &KmerClass, mut wtr: W) -> Result<ExtractSummary>
where
    R: BufRead,
    W: Write,
{
    info!(
        "Extracting reads with {} or any of its {} rotations/reverse complements...",
        class.kmer(),
        class.len()
    );
    let mut summary = ExtractSummary::default();
    for block in RepReader::new(rdr) {
        if summary.blocks % PROGRESS_INTERVAL == 0 {
            info!("Processed {} reads", summary.blocks);
        }
        let block = block?;
        summary.blocks += 1;
        if class.contains(&block.repeat) {
            debug!("Read {} has repeat {}", block.name, block.repeat);
            write!(wtr, ">{}\n{}\n\n", block.name, block.sequence)?;
            summary.matched += 1;
        }
    }
    wtr.flush()?;
    info!(
        "Extracted {} of {} reads",
        summary.matched, summary.blocks
    );
    Ok(summary)
}
