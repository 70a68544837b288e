//! Whole-sequence compliance checks.
//!
//! Unlike the mapper, which only looks at a short trailing window, these
//! functions scan the complete sequence. They back the repair pass and the
//! compliance report printed after encoding.

use serde::Serialize;

use super::profile::{ConstraintProfile, Motif};
use crate::base::{Nucleotide, Sequence};

/// Percentage (0-100) of G/C bases; 0 for an empty slice.
pub fn gc_content(seq: &[Nucleotide]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    seq.iter().filter(|n| n.is_gc()).count() as f64 * 100.0 / seq.len() as f64
}

/// Index of the first base that extends a run beyond `max_run`.
pub fn first_run_violation(seq: &[Nucleotide], max_run: usize) -> Option<usize> {
    if max_run < 1 {
        return None;
    }
    let mut run = 0;
    let mut last = None;
    for (i, &base) in seq.iter().enumerate() {
        if Some(base) == last {
            run += 1;
            if run > max_run {
                return Some(i);
            }
        } else {
            last = Some(base);
            run = 1;
        }
    }
    None
}

/// True if any run of identical bases is longer than `max_run`.
///
/// A `max_run` below 1 disables the check.
pub fn has_long_homopolymers(seq: &[Nucleotide], max_run: usize) -> bool {
    first_run_violation(seq, max_run).is_some()
}

/// First motif (in list order) present in `seq`, with its first position.
pub fn find_motif<'m>(seq: &[Nucleotide], motifs: &'m [Motif]) -> Option<(usize, &'m Motif)> {
    motifs.iter().find_map(|motif| {
        seq.windows(motif.len())
            .position(|w| w == motif.as_slice())
            .map(|pos| (pos, motif))
    })
}

pub fn contains_motifs(seq: &[Nucleotide], motifs: &[Motif]) -> bool {
    find_motif(seq, motifs).is_some()
}

/// A single constraint breach, in repair priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Overall GC percentage is outside the band.
    GcOutOfBand { gc: f64 },
    /// `position` is the first base exceeding the run limit.
    Homopolymer { position: usize },
    /// `position` is where the motif starts.
    Motif { position: usize, motif: Motif },
}

/// The highest-priority violation, checking GC band, then runs, then motifs.
pub fn first_violation(seq: &[Nucleotide], profile: &ConstraintProfile) -> Option<Violation> {
    let gc = gc_content(seq);
    if !profile.gc_band.contains(gc) {
        return Some(Violation::GcOutOfBand { gc });
    }
    if let Some(position) = first_run_violation(seq, profile.max_homopolymer) {
        return Some(Violation::Homopolymer { position });
    }
    find_motif(seq, &profile.forbidden_motifs).map(|(position, motif)| Violation::Motif {
        position,
        motif: motif.clone(),
    })
}

/// Summary of how a sequence fares against a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub length: usize,
    pub gc_content: f64,
    pub gc_in_band: bool,
    pub longest_run: usize,
    pub max_homopolymer: usize,
    /// Some run is longer than `max_homopolymer`.
    pub homopolymer_violation: bool,
    /// Motifs from the audited list that occur somewhere in the sequence.
    pub motifs_found: Vec<String>,
}

impl ComplianceReport {
    /// Audit `seq` against the profile's GC band and run limit, and against
    /// `motifs` (which may differ from the profile's own motif list).
    pub fn new(seq: &Sequence, profile: &ConstraintProfile, motifs: &[Motif]) -> Self {
        let gc_content = seq.gc_content();
        let motifs_found = motifs
            .iter()
            .filter(|m| contains_motifs(seq.as_slice(), std::slice::from_ref(*m)))
            .map(|m| m.to_string())
            .collect();

        let longest_run = seq.longest_run();

        Self {
            length: seq.len(),
            gc_content,
            gc_in_band: profile.gc_band.contains(gc_content),
            longest_run,
            max_homopolymer: profile.max_homopolymer,
            homopolymer_violation: longest_run > profile.max_homopolymer,
            motifs_found,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.gc_in_band && !self.homopolymer_violation && self.motifs_found.is_empty()
    }
}
