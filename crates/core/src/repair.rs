//! Post-hoc hill climbing toward a compliant sequence.
//!
//! Each attempt fixes the highest-priority violation reported by
//! [`first_violation`]: an out-of-band GC percentage, then the first
//! over-long homopolymer run, then the first forbidden motif. Mutations are
//! single-base substitutions drawn from a caller-supplied RNG, so a seeded
//! generator reproduces the exact same repair.
//!
//! Substituting bases changes which symbol a position decodes to. Use
//! [`repair_mapping`] for anything that must stay decodable; it recomputes
//! the offsets after repair.

use rand::Rng;

use crate::base::{Nucleotide, OffsetStream, Sequence};
use crate::constraints::{first_violation, ConstraintProfile, Violation};
use crate::errors::DnaError;
use crate::mapping::Mapping;

/// Default hard cap on repair attempts.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

const GC_BASES: [Nucleotide; 2] = [Nucleotide::G, Nucleotide::C];
const AT_BASES: [Nucleotide; 2] = [Nucleotide::A, Nucleotide::T];

/// Output of a successful repair.
#[derive(Debug, Clone, PartialEq)]
pub struct Repaired<T> {
    pub value: T,
    /// Number of substitutions applied.
    pub mutations: usize,
}

/// A uniformly random base other than `current`.
fn different_base<R: Rng + ?Sized>(current: Nucleotide, rng: &mut R) -> Nucleotide {
    current.rotate(rng.random_range(1..4))
}

/// Mutate `seq` until it satisfies `profile` or `max_attempts` is used up.
///
/// # Arguments
///
/// * `seq` - Sequence to repair. It is not modified.
/// * `profile` - Constraints to satisfy.
/// * `rng` - Source of every random choice.
/// * `max_attempts` - Hard cap on the number of mutations tried.
///
/// # Errors
///
/// `ConstraintUnsatisfiable` when violations remain after the last attempt.
pub fn repair_sequence<R: Rng + ?Sized>(
    seq: &Sequence,
    profile: &ConstraintProfile,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Repaired<Sequence>, DnaError> {
    let mut bases = seq.as_slice().to_vec();
    if bases.is_empty() {
        return Ok(Repaired {
            value: Sequence::new(),
            mutations: 0,
        });
    }

    let mut mutations = 0;
    while mutations < max_attempts {
        let (index, replacement) = match first_violation(&bases, profile) {
            None => break,
            Some(Violation::GcOutOfBand { gc }) => {
                let index = rng.random_range(0..bases.len());
                let pool = if gc < profile.gc_band.min {
                    &GC_BASES
                } else {
                    &AT_BASES
                };
                (index, pool[rng.random_range(0..pool.len())])
            }
            Some(Violation::Homopolymer { position }) => {
                (position, different_base(bases[position], rng))
            }
            Some(Violation::Motif { position, motif }) => {
                let index = position + motif.len() / 2;
                (index, different_base(bases[index], rng))
            }
        };
        bases[index] = replacement;
        mutations += 1;
    }

    if first_violation(&bases, profile).is_some() {
        tracing::warn!(
            attempts = max_attempts,
            length = bases.len(),
            "repair exhausted its attempt budget"
        );
        return Err(DnaError::ConstraintUnsatisfiable {
            attempts: max_attempts,
        });
    }

    tracing::debug!(mutations, length = bases.len(), "sequence repaired");
    Ok(Repaired {
        value: Sequence::from_nucleotides(bases),
        mutations,
    })
}

/// Repair a mapped sequence and recompute its offsets so that unmapping the
/// result still yields the original symbols.
///
/// The returned mapping has no fallback positions: every constraint in
/// `profile` holds for the sequence as a whole.
pub fn repair_mapping<R: Rng + ?Sized>(
    mapping: &Mapping,
    profile: &ConstraintProfile,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Repaired<Mapping>, DnaError> {
    let symbols = mapping.symbols();
    let Repaired { value, mutations } =
        repair_sequence(mapping.sequence(), profile, rng, max_attempts)?;

    let mut offsets = OffsetStream::with_capacity(symbols.len());
    for (base, &symbol) in value.iter().zip(&symbols) {
        offsets.push(base.offset_from(symbol));
    }

    Ok(Repaired {
        value: Mapping::new(value, offsets)?,
        mutations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{GcBand, Motif};
    use crate::mapping::{unmap, ConstraintMapper};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn seq(s: &str) -> Sequence {
        s.parse().unwrap()
    }

    #[test]
    fn test_compliant_sequence_untouched() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let input = seq("ACGTACGTAC");
        let repaired =
            repair_sequence(&input, &ConstraintProfile::default(), &mut rng, 10).unwrap();
        assert_eq!(repaired.value, input);
        assert_eq!(repaired.mutations, 0);
    }

    #[test]
    fn test_empty_sequence() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let repaired =
            repair_sequence(&Sequence::new(), &ConstraintProfile::default(), &mut rng, 10)
                .unwrap();
        assert!(repaired.value.is_empty());
        assert_eq!(repaired.mutations, 0);
    }

    #[test]
    fn test_repairs_runs_and_motifs() {
        let profile = ConstraintProfile::default();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let input = seq("GGGGCCCCATATATACGTACGA");
        let repaired = repair_sequence(&input, &profile, &mut rng, DEFAULT_MAX_ATTEMPTS).unwrap();

        assert_eq!(repaired.value.len(), input.len());
        assert!(repaired.mutations > 0);
        assert!(first_violation(repaired.value.as_slice(), &profile).is_none());
    }

    #[test]
    fn test_seeded_repair_is_reproducible() {
        let profile = ConstraintProfile::default();
        let input = seq("AAAAAAAAAATTTTTTTTTTATATATATAT");

        let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(123);
        let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(123);
        let a = repair_sequence(&input, &profile, &mut rng1, DEFAULT_MAX_ATTEMPTS);
        let b = repair_sequence(&input, &profile, &mut rng2, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(a, b);
    }

    #[test]
    fn test_attempt_cap_is_hard() {
        // All-GC and no runs forces alternation, which the motifs forbid.
        let profile = ConstraintProfile {
            max_homopolymer: 1,
            forbidden_motifs: vec!["GC".parse::<Motif>().unwrap(), "CG".parse().unwrap()],
            gc_band: GcBand::new(100.0, 100.0).unwrap(),
        };
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let err = repair_sequence(&seq("ACGTACGT"), &profile, &mut rng, 50).unwrap_err();
        assert_eq!(err, DnaError::ConstraintUnsatisfiable { attempts: 50 });
    }

    #[test]
    fn test_zero_attempts_reports_violation() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let err = repair_sequence(&seq("AAAAAA"), &ConstraintProfile::default(), &mut rng, 0)
            .unwrap_err();
        assert_eq!(err, DnaError::ConstraintUnsatisfiable { attempts: 0 });
    }

    #[test]
    fn test_repaired_mapping_stays_decodable() {
        let profile = ConstraintProfile::default();
        let mapper = ConstraintMapper::new(profile.clone()).unwrap();
        let symbols = [0u8; 40];
        let mapping = mapper.map(&symbols).unwrap();
        assert!(!mapping.is_compliant());

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
        let repaired = repair_mapping(&mapping, &profile, &mut rng, DEFAULT_MAX_ATTEMPTS).unwrap();

        assert!(repaired.value.is_compliant());
        assert!(first_violation(repaired.value.sequence().as_slice(), &profile).is_none());
        assert_eq!(
            unmap(repaired.value.sequence(), repaired.value.offsets()).unwrap(),
            symbols
        );
    }
}
