//! Shared default values for the command-line interface.
//! Library defaults (nsym, constraint profile, repair budget) come from
//! `dnavault_core` so both sides agree.

pub use dnavault_core::pipeline::DEFAULT_NSYM as NSYM;

/// Directory encoded records are written to.
pub const OUT_DIR: &str = "output";

/// Record file extension.
pub const RECORD_EXTENSION: &str = "fasta";

/// Sequence line width in record files.
pub const LINE_WIDTH: usize = 80;

/// Record id used when an input has no usable file stem.
pub const RECORD_ID: &str = "DNA_Sequence";

// File-type sniffing
pub const TEXT_SNIFF_BYTES: usize = 1000;
pub const TEXT_PRINTABLE_RATIO: f64 = 0.8;
