use crate::{error::Error, Result};
use bio::alphabets::Alphabet;
use log::debug;
use std::collections::HashSet;

/// Base order used for complementing, every base pairs with the base two places away
pub const COMPLEMENT_CYCLE: [char; 4] = ['A', 'C', 'T', 'G'];

/// Watson-Crick partner of `base`. Anything outside `ACGT` (ambiguity codes, `N`,
/// lowercase) is returned unchanged.
pub fn complement(base: char) -> char {
    match COMPLEMENT_CYCLE.iter().position(|b| *b == base) {
        Some(i) => COMPLEMENT_CYCLE[(i + 2) % COMPLEMENT_CYCLE.len()],
        None => base,
    }
}

/// Checks that the k-mer only has uppercase `A`, `C`, `G` and `T`, the bases
/// [`complement`] pairs
pub fn is_acgt(kmer: &str) -> bool {
    Alphabet::new(COMPLEMENT_CYCLE.iter().map(|base| *base as u8)).is_word(kmer.as_bytes())
}

/// Reverse complement of a k-mer
pub fn revcomp(kmer: &str) -> String {
    kmer.chars().rev().map(complement).collect()
}

/// All cyclic rotations of `kmer`, starting with the k-mer itself. A k-mer of length `n`
/// always gives `n` rotations, periodic k-mers repeat some of them.
pub fn rotations(kmer: &str) -> Vec<String> {
    let bases = kmer.chars().collect::<Vec<char>>();
    (0..bases.len())
        .map(|shift| {
            bases[shift..]
                .iter()
                .chain(bases[..shift].iter())
                .collect::<String>()
        })
        .collect()
}

/// Fraction of `G` and `C` bases in the k-mer
pub fn gc_fraction(kmer: &str) -> Result<f64> {
    let (len, gc) = kmer.chars().fold((0usize, 0usize), |(len, gc), base| {
        (len + 1, gc + matches!(base, 'G' | 'C') as usize)
    });
    if len == 0 {
        return Err(Error::EmptyKmer);
    }
    Ok(gc as f64 / len as f64)
}

/// Equivalence class of a k-mer: its rotations and the reverse complements of those
/// rotations, duplicates removed.
#[derive(Debug, Clone)]
pub struct KmerClass {
    kmer: String,
    rotations: Vec<String>,
    reverse_complements: Vec<String>,
    members: HashSet<String>,
}

impl KmerClass {
    /// Builds the class of `kmer`
    pub fn new<T: AsRef<str>>(kmer: T) -> Result<Self> {
        let kmer = kmer.as_ref();
        if kmer.is_empty() {
            return Err(Error::EmptyKmer);
        }
        if !is_acgt(kmer) {
            debug!(
                "K-mer {} contains non-ACGT characters, they are kept as is when complementing",
                kmer
            );
        }

        let mut members = HashSet::new();
        let rotations = rotations(kmer)
            .into_iter()
            .filter(|rotation| members.insert(rotation.clone()))
            .collect::<Vec<String>>();

        let mut seen = HashSet::new();
        let reverse_complements = rotations
            .iter()
            .map(|rotation| revcomp(rotation))
            .filter(|rc| seen.insert(rc.clone()))
            .collect::<Vec<String>>();
        members.extend(seen);

        Ok(Self {
            kmer: kmer.to_string(),
            rotations,
            reverse_complements,
            members,
        })
    }

    /// The k-mer the class was built from
    pub fn kmer(&self) -> &str {
        &self.kmer
    }

    /// Distinct rotations, in rotation order
    pub fn rotations(&self) -> &[String] {
        &self.rotations
    }

    /// Distinct reverse complements of the rotations, in rotation order
    pub fn reverse_complements(&self) -> &[String] {
        &self.reverse_complements
    }

    /// Rotations followed by their reverse complements
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.rotations
            .iter()
            .chain(self.reverse_complements.iter())
            .map(String::as_str)
    }

    /// Checks if `query` is a rotation of the k-mer or the reverse complement of one
    pub fn contains(&self, query: &str) -> bool {
        self.members.contains(query)
    }

    /// Checks if `query` is a rotation of the k-mer
    pub fn is_rotation(&self, query: &str) -> bool {
        self.rotations.iter().any(|rotation| rotation == query)
    }

    /// Number of distinct sequences in the class
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// A class always holds at least the k-mer itself
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotations() {
        assert_eq!(
            rotations("AACCTG"),
            vec!["AACCTG", "ACCTGA", "CCTGAA", "CTGAAC", "TGAACC", "GAACCT"]
        );
        assert_eq!(rotations("ATAT").len(), 4);
        assert!(rotations("").is_empty());
    }

    #[test]
    fn test_revcomp() {
        assert_eq!(revcomp("AACCTG"), "CAGGTT");
        assert_eq!(revcomp("A"), "T");
        assert_eq!(revcomp(&revcomp("GATTACA")), "GATTACA");
    }

    #[test]
    fn test_revcomp_passes_through_unknown_bases() {
        assert_eq!(revcomp("ANRG"), "CRNT");
        assert_eq!(revcomp("acgt"), "tgca");
        assert_eq!(complement('N'), 'N');
    }

    #[test]
    fn test_class_members() {
        let class = KmerClass::new("AACCTG").unwrap();
        for query in &[
            "AACCTG", "ACCTGA", "CCTGAA", "CTGAAC", "TGAACC", "GAACCT", "CAGGTT", "TCAGGT",
            "TTCAGG", "GTTCAG", "GGTTCA", "AGGTTC",
        ] {
            assert!(class.contains(query), "{} should be in the class", query);
        }
        assert!(!class.contains("AACCTT"));
        assert_eq!(class.len(), 12);
        assert!(class.is_rotation("CTGAAC"));
        assert!(!class.is_rotation("CAGGTT"));
    }

    #[test]
    fn test_class_is_reflexive() {
        for kmer in &["A", "AC", "AACCTG", "ATAT", "NNA"] {
            assert!(KmerClass::new(kmer).unwrap().contains(kmer));
        }
    }

    #[test]
    fn test_class_dedups_periodic_kmers() {
        let class = KmerClass::new("ATAT").unwrap();
        assert_eq!(class.rotations(), &["ATAT", "TATA"]);
        assert_eq!(class.reverse_complements(), &["ATAT", "TATA"]);
        assert_eq!(class.len(), 2);

        let class = KmerClass::new("AAAA").unwrap();
        assert_eq!(class.rotations(), &["AAAA"]);
        assert_eq!(class.reverse_complements(), &["TTTT"]);
        assert_eq!(class.len(), 2);
    }

    #[test]
    fn test_class_size_bound() {
        for kmer in &["ACGT", "AACCTG", "AC", "GGGGC", "ACN"] {
            let class = KmerClass::new(kmer).unwrap();
            assert!(class.len() <= 2 * kmer.len());
        }
    }

    #[test]
    fn test_class_with_ambiguity_code() {
        let class = KmerClass::new("ACN").unwrap();
        assert!(class.contains("NAC"));
        assert!(class.contains("NGT"));
        assert!(!class.contains("ACT"));
    }

    #[test]
    fn test_is_acgt() {
        assert!(is_acgt("AACCTG"));
        assert!(!is_acgt("acgt"));
        assert!(!is_acgt("AaCG"));
        assert!(!is_acgt("ACN"));
    }

    #[test]
    fn test_empty_kmer() {
        assert!(matches!(KmerClass::new(""), Err(Error::EmptyKmer)));
        assert!(matches!(gc_fraction(""), Err(Error::EmptyKmer)));
    }

    #[test]
    fn test_gc_fraction() {
        assert_eq!(gc_fraction("AT").unwrap(), 0.0);
        assert_eq!(gc_fraction("AACCTG").unwrap(), 0.5);
        assert_eq!(gc_fraction("GGCC").unwrap(), 1.0);
        assert_eq!(gc_fraction("ACGTACGTAA").unwrap(), 0.4);
        assert_eq!(gc_fraction("acgt").unwrap(), 0.0);
    }
}
