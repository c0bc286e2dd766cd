use crate::{kmer::KmerClass, Result};
use std::collections::BTreeSet;
use std::io::BufRead;

/// Motifs searched for when none are given
pub const DEFAULT_MOTIFS: [&str; 14] = [
    "AAC", "AAG", "AAAA", "TAGG", "AGG", "AGC", "GCCAG", "AATGG", "AGGAG", "ACGC", "AACCT",
    "ACGG", "ACCGA", "TCCAG",
];

/// Reads one k-mer per line, blank lines are skipped
pub fn read_kmer_list<R: BufRead>(rdr: R) -> Result<Vec<String>> {
    let mut kmers = Vec::new();
    for line in rdr.lines() {
        let line = line?;
        let kmer = line.trim();
        if !kmer.is_empty() {
            kmers.push(kmer.to_string());
        }
    }
    Ok(kmers)
}

/// Motifs occurring in any rotation or reverse complement of the class, in motif order
pub fn motif_hits<'a, S: AsRef<str>>(class: &KmerClass, motifs: &'a [S]) -> Vec<&'a str> {
    motifs
        .iter()
        .map(|motif| motif.as_ref())
        .filter(|motif| class.variants().any(|variant| variant.contains(*motif)))
        .collect()
}

/// K-mers of `reference` that are rotations of the query class, or with `with_revcomp`
/// any member of it. Sorted and deduplicated.
pub fn intersect<S: AsRef<str>>(
    reference: &[S],
    query: &KmerClass,
    with_revcomp: bool,
) -> Vec<String> {
    reference
        .iter()
        .map(|kmer| kmer.as_ref())
        .filter(|kmer| {
            if with_revcomp {
                query.contains(*kmer)
            } else {
                query.is_rotation(*kmer)
            }
        })
        .map(str::to_string)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motif_hits() {
        let class = KmerClass::new("AACCTG").unwrap();
        assert_eq!(motif_hits(&class, &DEFAULT_MOTIFS), vec!["AAC", "AGG", "AACCT"]);
        assert!(motif_hits(&class, &["GGGG"]).is_empty());
    }

    #[test]
    fn test_motif_hit_through_reverse_complement() {
        let class = KmerClass::new("CCTT").unwrap();
        assert_eq!(motif_hits(&class, &["AAG", "AAGG"]), vec!["AAG", "AAGG"]);
    }

    #[test]
    fn test_intersect() {
        let reference = vec!["ACCTGA", "GGGG", "AACC", "CAGGTT", "ACCTGA"];
        let query = KmerClass::new("AACCTG").unwrap();
        assert_eq!(intersect(&reference, &query, false), vec!["ACCTGA"]);
        assert_eq!(
            intersect(&reference, &query, true),
            vec!["ACCTGA", "CAGGTT"]
        );
    }

    #[test]
    fn test_read_kmer_list() {
        let kmers = read_kmer_list("AACCTG\n\n  ACG \nT\n".as_bytes()).unwrap();
        assert_eq!(kmers, vec!["AACCTG", "ACG", "T"]);
    }
}
