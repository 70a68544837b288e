//! Arithmetic over GF(2^8).
//!
//! Elements are bytes; addition is XOR. Multiplication goes through
//! exponent/logarithm tables generated from the primitive polynomial
//! x^8 + x^4 + x^3 + x^2 + 1 (0x11d) with generator α = 2.

/// Primitive polynomial used to build the field.
pub const PRIMITIVE_POLY: u16 = 0x11d;

/// Multiplicative group order.
pub const FIELD_ORDER: usize = 255;

const fn build_tables() -> ([u8; 512], [u8; 256]) {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < FIELD_ORDER {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    // Doubled so that log(a) + log(b) indexes without a modulo.
    while i < 512 {
        exp[i] = exp[i - FIELD_ORDER];
        i += 1;
    }
    (exp, log)
}

const TABLES: ([u8; 512], [u8; 256]) = build_tables();
static EXP: [u8; 512] = TABLES.0;
static LOG: [u8; 256] = TABLES.1;

/// α^power.
#[inline]
pub fn alpha_pow(power: usize) -> u8 {
    EXP[power % FIELD_ORDER]
}

/// α^-power.
#[inline]
pub fn alpha_pow_inv(power: usize) -> u8 {
    EXP[(FIELD_ORDER - power % FIELD_ORDER) % FIELD_ORDER]
}

#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP[LOG[a as usize] as usize + LOG[b as usize] as usize]
}

/// Field division. `b` must be non-zero.
#[inline]
pub fn div(a: u8, b: u8) -> u8 {
    debug_assert!(b != 0, "division by zero in GF(256)");
    if a == 0 {
        return 0;
    }
    EXP[LOG[a as usize] as usize + FIELD_ORDER - LOG[b as usize] as usize]
}

/// Multiply two polynomials. Works for either coefficient order as long as
/// both operands use the same one.
pub fn poly_mul(p: &[u8], q: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; p.len() + q.len() - 1];
    for (i, &a) in p.iter().enumerate() {
        for (j, &b) in q.iter().enumerate() {
            out[i + j] ^= mul(a, b);
        }
    }
    out
}

/// Evaluate a polynomial stored highest degree first.
pub fn eval_high_first(poly: &[u8], x: u8) -> u8 {
    poly.iter().fold(0, |acc, &coef| mul(acc, x) ^ coef)
}

/// Evaluate a polynomial stored lowest degree first.
pub fn eval_low_first(poly: &[u8], x: u8) -> u8 {
    poly.iter().rev().fold(0, |acc, &coef| mul(acc, x) ^ coef)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_every_nonzero_element() {
        let mut seen = [false; 256];
        for i in 0..FIELD_ORDER {
            seen[alpha_pow(i) as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_known_powers() {
        assert_eq!(alpha_pow(0), 1);
        assert_eq!(alpha_pow(1), 2);
        assert_eq!(alpha_pow(7), 128);
        // x^8 reduces to x^4 + x^3 + x^2 + 1
        assert_eq!(alpha_pow(8), 0x1d);
        assert_eq!(alpha_pow(255), 1);
    }

    #[test]
    fn test_mul_div_inverse() {
        for a in 1..=255u8 {
            for b in [1u8, 2, 3, 29, 128, 255] {
                let product = mul(a, b);
                assert_eq!(div(product, b), a);
            }
            assert_eq!(mul(a, div(1, a)), 1);
        }
        assert_eq!(mul(0, 77), 0);
        assert_eq!(div(0, 77), 0);
    }

    #[test]
    fn test_alpha_pow_inv() {
        for p in 0..300 {
            assert_eq!(mul(alpha_pow(p), alpha_pow_inv(p)), 1);
        }
    }

    #[test]
    fn test_eval_orders_agree() {
        // 3x^2 + 5x + 7
        let high = [3u8, 5, 7];
        let low = [7u8, 5, 3];
        for x in [0u8, 1, 2, 17, 200] {
            assert_eq!(eval_high_first(&high, x), eval_low_first(&low, x));
        }
        assert_eq!(eval_high_first(&high, 0), 7);
        assert_eq!(eval_high_first(&high, 1), 3 ^ 5 ^ 7);
    }

    #[test]
    fn test_poly_mul() {
        // (x + 1)(x + 1) = x^2 + 1 in characteristic 2
        assert_eq!(poly_mul(&[1, 1], &[1, 1]), vec![1, 0, 1]);
    }
}
