//! Trial-division primality and Mersenne-number helpers.

/// Largest exponent whose Mersenne number `2^p - 1` fits in an `i64`.
pub const MAX_MERSENNE_EXPONENT: u32 = 61;

/// Return whether `n` is prime using trial division.
///
/// Values `<= 1`, negatives included, are never prime.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    let mut i: i64 = 2;
    // `i <= n / i` is `i * i <= n` without the overflow near `i64::MAX`.
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Compute `2^p - 1`, or `None` when it does not fit in an `i64`.
pub fn mersenne_number(p: u32) -> Option<i64> {
    if p > MAX_MERSENNE_EXPONENT {
        return None;
    }
    Some((1_i64 << p) - 1)
}
