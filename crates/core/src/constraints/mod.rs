//! Synthesis constraints: the profile the mapper enforces and the audits
//! used to report on (and repair) finished sequences.

mod audit;
mod profile;

pub use audit::{
    contains_motifs, find_motif, first_run_violation, first_violation, gc_content,
    has_long_homopolymers, ComplianceReport, Violation,
};
pub use profile::{
    ConstraintProfile, GcBand, Motif, DEFAULT_FORBIDDEN_MOTIFS, DEFAULT_GC_MAX, DEFAULT_GC_MIN,
    DEFAULT_MAX_HOMOPOLYMER,
};
