use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base::Nucleotide;
use crate::errors::{DnaError, InvalidSequence};

pub const DEFAULT_MAX_HOMOPOLYMER: usize = 2;
pub const DEFAULT_FORBIDDEN_MOTIFS: [&str; 2] = ["ATATAT", "CGCGCG"];
pub const DEFAULT_GC_MIN: f64 = 40.0;
pub const DEFAULT_GC_MAX: f64 = 60.0;

/// A short, non-empty nucleotide pattern the encoder avoids producing.
///
/// Serialized as its plain text form (`"ATATAT"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Motif(Vec<Nucleotide>);

impl Motif {
    #[inline]
    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.0
    }

    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for Motif {
    type Err = InvalidSequence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seq: crate::base::Sequence = s.parse()?;
        if seq.is_empty() {
            return Err(InvalidSequence::EmptySequence);
        }
        Ok(Self(seq.into_inner()))
    }
}

impl TryFrom<String> for Motif {
    type Error = InvalidSequence;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Motif> for String {
    fn from(motif: Motif) -> String {
        motif.to_string()
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &nuc in &self.0 {
            write!(f, "{nuc}")?;
        }
        Ok(())
    }
}

/// Inclusive GC-content band, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GcBand {
    pub min: f64,
    pub max: f64,
}

impl GcBand {
    pub fn new(min: f64, max: f64) -> Result<Self, DnaError> {
        if !(0.0..=100.0).contains(&min) || !(0.0..=100.0).contains(&max) || min > max {
            return Err(DnaError::InvalidProfile(format!(
                "GC band [{min}, {max}] must satisfy 0 <= min <= max <= 100"
            )));
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn contains(&self, gc_percent: f64) -> bool {
        self.min <= gc_percent && gc_percent <= self.max
    }
}

impl Default for GcBand {
    fn default() -> Self {
        Self {
            min: DEFAULT_GC_MIN,
            max: DEFAULT_GC_MAX,
        }
    }
}

/// Rules the mapper and the repair pass try to satisfy.
///
/// The profile is read-only once built; the same instance is shared by every
/// position of an encode call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintProfile {
    /// Longest allowed run of one base.
    pub max_homopolymer: usize,
    pub forbidden_motifs: Vec<Motif>,
    pub gc_band: GcBand,
}

impl ConstraintProfile {
    pub fn new(
        max_homopolymer: usize,
        forbidden_motifs: Vec<Motif>,
        gc_band: GcBand,
    ) -> Result<Self, DnaError> {
        let profile = Self {
            max_homopolymer,
            forbidden_motifs,
            gc_band,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check invariants that deserialization cannot enforce on its own.
    pub fn validate(&self) -> Result<(), DnaError> {
        if self.max_homopolymer == 0 {
            return Err(DnaError::InvalidProfile(
                "max_homopolymer must be at least 1".into(),
            ));
        }
        GcBand::new(self.gc_band.min, self.gc_band.max)?;
        Ok(())
    }

    /// Default motif set, `ATATAT` and `CGCGCG`.
    pub fn default_motifs() -> Vec<Motif> {
        DEFAULT_FORBIDDEN_MOTIFS
            .iter()
            .map(|m| Motif(m.bytes().filter_map(Nucleotide::from_ascii).collect()))
            .collect()
    }
}

impl Default for ConstraintProfile {
    fn default() -> Self {
        Self {
            max_homopolymer: DEFAULT_MAX_HOMOPOLYMER,
            forbidden_motifs: Self::default_motifs(),
            gc_band: GcBand::default(),
        }
    }
}
