use super::Nucleotide;
use crate::errors::InvalidSequence;
use std::fmt;
use std::str::FromStr;

/// Nucleotide sequence backed by a vector of `Nucleotide`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence(Vec<Nucleotide>);

impl Sequence {
    /// Create a new, empty `Sequence`.
    ///
    /// ```rust
    /// # use dnavault_core::base::Sequence;
    /// let seq = Sequence::new();
    /// assert!(seq.is_empty());
    /// ```
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_nucleotides(nucleotides: Vec<Nucleotide>) -> Self {
        Self(nucleotides)
    }

    /// Map 2-bit symbols straight onto bases without any constraint search.
    ///
    /// Returns the index and value of the first symbol above 3 on failure.
    pub fn from_symbols(symbols: &[u8]) -> Result<Self, (usize, u8)> {
        symbols
            .iter()
            .enumerate()
            .map(|(i, &s)| Nucleotide::from_index(s).ok_or((i, s)))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Symbol (0-3) of every base.
    pub fn to_symbols(&self) -> Vec<u8> {
        self.0.iter().map(|n| n.to_index()).collect()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Nucleotide> {
        self.0.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.0
    }

    #[inline]
    pub fn push(&mut self, base: Nucleotide) {
        self.0.push(base);
    }

    pub fn iter(&self) -> impl Iterator<Item = Nucleotide> + '_ {
        self.0.iter().copied()
    }

    pub fn into_inner(self) -> Vec<Nucleotide> {
        self.0
    }

    /// Percentage (0-100) of G and C bases. Empty sequences report 0.
    pub fn gc_content(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        let gc = self.0.iter().filter(|n| n.is_gc()).count();
        gc as f64 * 100.0 / self.0.len() as f64
    }

    /// Length of the longest homopolymer run.
    pub fn longest_run(&self) -> usize {
        self.0
            .chunk_by(|a, b| a == b)
            .map(<[Nucleotide]>::len)
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<Nucleotide>> for Sequence {
    fn from(nucleotides: Vec<Nucleotide>) -> Self {
        Self(nucleotides)
    }
}

impl AsRef<[Nucleotide]> for Sequence {
    fn as_ref(&self) -> &[Nucleotide] {
        &self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &nuc in &self.0 {
            write!(f, "{}", nuc.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = InvalidSequence;

    /// Parse text such as `"ACGT"`; case-insensitive, anything outside
    /// A/C/G/T is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| {
                u8::try_from(c)
                    .ok()
                    .and_then(Nucleotide::from_ascii)
                    .ok_or(InvalidSequence::InvalidChar { position, found: c })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
