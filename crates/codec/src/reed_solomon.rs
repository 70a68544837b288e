//! Systematic Reed-Solomon code over GF(256).
//!
//! The payload is cut into blocks of `255 - nsym` bytes and every block is
//! followed by its `nsym` parity bytes, so a payload of at most `255 - nsym`
//! bytes grows by exactly `nsym`. Decoding corrects up to `nsym / 2` byte
//! errors per block and refuses to return anything when a block is beyond
//! repair.

use crate::error::CodecError;
use crate::galois::{
    alpha_pow, alpha_pow_inv, div, eval_high_first, eval_low_first, mul, poly_mul, FIELD_ORDER,
};
use crate::traits::Codec;

/// Maximum codeword length in bytes.
pub const RS_BLOCK_SIZE: usize = FIELD_ORDER;

/// Reed-Solomon codec with a fixed number of parity symbols per block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReedSolomon {
    nsym: usize,
    /// Generator polynomial, highest degree first, monic.
    generator: Vec<u8>,
}

/// Result of a decode that also reports how much repair was needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corrected {
    pub data: Vec<u8>,
    /// Total number of byte errors fixed across all blocks.
    pub corrections: usize,
}

impl ReedSolomon {
    /// Build a codec appending `nsym` parity bytes per block.
    ///
    /// `nsym = 0` is accepted and leaves data unprotected. `nsym = 255`
    /// leaves no room for data and is rejected.
    pub fn new(nsym: u8) -> Result<Self, CodecError> {
        let nsym = nsym as usize;
        if nsym >= RS_BLOCK_SIZE {
            return Err(CodecError::InvalidParameter(format!(
                "nsym must be below {RS_BLOCK_SIZE}, got {nsym}"
            )));
        }
        let generator = (0..nsym).fold(vec![1u8], |g, i| poly_mul(&g, &[1, alpha_pow(i)]));
        Ok(Self { nsym, generator })
    }

    /// Parity bytes per block.
    pub fn nsym(&self) -> usize {
        self.nsym
    }

    /// Payload bytes carried by one full block.
    pub fn data_len(&self) -> usize {
        RS_BLOCK_SIZE - self.nsym
    }

    /// Number of errors correctable per block.
    pub fn capacity(&self) -> usize {
        self.nsym / 2
    }

    /// Length of the encoded form of an `input_len`-byte payload.
    pub fn protected_len(&self, input_len: usize) -> usize {
        input_len + self.nsym * input_len.div_ceil(self.data_len())
    }

    /// Decode and report the number of corrected bytes.
    pub fn decode_counted(&self, data: &[u8]) -> Result<Corrected, CodecError> {
        let mut decoded = Vec::with_capacity(data.len());
        let mut corrections = 0;

        for (block, chunk) in data.chunks(RS_BLOCK_SIZE).enumerate() {
            if chunk.len() <= self.nsym {
                return Err(CodecError::Uncorrectable {
                    block,
                    reason: "block shorter than its parity",
                });
            }
            let mut codeword = chunk.to_vec();
            let fixed = self
                .correct(&mut codeword)
                .map_err(|reason| CodecError::Uncorrectable { block, reason })?;
            if fixed > 0 {
                tracing::debug!(block, fixed, "corrected symbol errors");
            }
            corrections += fixed;
            codeword.truncate(chunk.len() - self.nsym);
            decoded.extend_from_slice(&codeword);
        }

        Ok(Corrected {
            data: decoded,
            corrections,
        })
    }

    fn encode_block(&self, block: &[u8], out: &mut Vec<u8>) {
        out.extend_from_slice(block);
        if self.nsym == 0 {
            return;
        }
        // LFSR division of block(x) * x^nsym by the generator.
        let mut remainder = vec![0u8; self.nsym];
        for &byte in block {
            let feedback = byte ^ remainder[0];
            remainder.rotate_left(1);
            remainder[self.nsym - 1] = 0;
            if feedback != 0 {
                for (r, &g) in remainder.iter_mut().zip(&self.generator[1..]) {
                    *r ^= mul(g, feedback);
                }
            }
        }
        out.extend_from_slice(&remainder);
    }

    fn syndromes(&self, codeword: &[u8]) -> Vec<u8> {
        (0..self.nsym)
            .map(|j| eval_high_first(codeword, alpha_pow(j)))
            .collect()
    }

    /// Correct a single codeword in place, returning the number of fixed bytes.
    fn correct(&self, codeword: &mut [u8]) -> Result<usize, &'static str> {
        if self.nsym == 0 {
            return Ok(0);
        }
        let syndromes = self.syndromes(codeword);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let (locator, errors) = berlekamp_massey(&syndromes);
        if locator.len() != errors + 1 {
            return Err("inconsistent error locator");
        }
        if errors > self.capacity() {
            return Err("too many symbol errors");
        }

        // Chien search over the positions this (possibly shortened) block has.
        let n = codeword.len();
        let positions: Vec<usize> = (0..n)
            .filter(|&p| eval_low_first(&locator, alpha_pow_inv(p)) == 0)
            .collect();
        if positions.len() != errors {
            return Err("error locator roots fall outside the block");
        }

        // Forney: e = X * Ω(X^-1) / Λ'(X^-1) for first consecutive root α^0.
        let mut evaluator = poly_mul(&syndromes, &locator);
        evaluator.truncate(self.nsym);
        let derivative: Vec<u8> = locator
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        for &p in &positions {
            let x_inv = alpha_pow_inv(p);
            let denominator = eval_low_first(&derivative, x_inv);
            if denominator == 0 {
                return Err("zero locator derivative");
            }
            let magnitude = mul(alpha_pow(p), div(eval_low_first(&evaluator, x_inv), denominator));
            codeword[n - 1 - p] ^= magnitude;
        }

        if self.syndromes(codeword).iter().any(|&s| s != 0) {
            return Err("residual syndromes after correction");
        }
        Ok(errors)
    }
}

/// Berlekamp-Massey over the syndrome sequence.
///
/// Returns the error locator (lowest degree first, trailing zeros removed)
/// and the linear complexity found.
fn berlekamp_massey(syndromes: &[u8]) -> (Vec<u8>, usize) {
    let mut locator = vec![1u8];
    let mut previous = vec![1u8];
    let mut complexity = 0usize;
    let mut shift = 1usize;
    let mut last_discrepancy = 1u8;

    for n in 0..syndromes.len() {
        let mut discrepancy = syndromes[n];
        for (i, &c) in locator.iter().enumerate().skip(1).take(n) {
            discrepancy ^= mul(c, syndromes[n - i]);
        }

        if discrepancy == 0 {
            shift += 1;
            continue;
        }

        let snapshot = locator.clone();
        let scale = div(discrepancy, last_discrepancy);
        if locator.len() < previous.len() + shift {
            locator.resize(previous.len() + shift, 0);
        }
        for (i, &b) in previous.iter().enumerate() {
            locator[i + shift] ^= mul(scale, b);
        }

        if 2 * complexity <= n {
            complexity = n + 1 - complexity;
            previous = snapshot;
            last_discrepancy = discrepancy;
            shift = 1;
        } else {
            shift += 1;
        }
    }

    while locator.len() > 1 && locator.last() == Some(&0) {
        locator.pop();
    }
    (locator, complexity)
}

impl Codec for ReedSolomon {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.protected_len(data.len()));
        for block in data.chunks(self.data_len()) {
            self.encode_block(block, &mut out);
        }
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.decode_counted(data).map(|c| c.data)
    }
}
