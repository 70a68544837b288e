//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use dnavault_core::prelude::*;
//!
//! let unit = encode(b"Hello World", 4).unwrap();
//! let data = decode(&unit.sequence, &unit.metadata, 4).unwrap();
//! assert_eq!(data, b"Hello World");
//! ```

pub use crate::base::{Nucleotide, OffsetStream, Sequence};
pub use crate::constraints::{ComplianceReport, ConstraintProfile, GcBand, Motif};
pub use crate::errors::DnaError;
pub use crate::mapping::{ConstraintMapper, Mapping};
pub use crate::pipeline::{decode, encode, Decoded, EncodedUnit, Pipeline, PipelineConfig};
