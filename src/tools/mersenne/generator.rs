use std::time::{Duration, Instant};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lib::primes::{is_prime, mersenne_number, MAX_MERSENNE_EXPONENT};

/// Outcome of one Mersenne-prime scan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MersenneReport {
    /// Limit exactly as requested.
    pub requested_limit: u32,
    /// Limit after clamping to the supported maximum.
    pub effective_limit: u32,
    /// Exponents `p` for which `2^p - 1` is prime, ascending.
    pub exponents: Vec<u32>,
    /// Decimal values of the Mersenne primes found, in exponent order.
    pub mersenne_primes: Vec<String>,
    /// Wall-clock time of the scan in milliseconds.
    pub elapsed_ms: f64,
    /// Human-readable timing line, e.g. `Elapsed time: 1.2ms`.
    pub summary: String,
}

/// Clamp a requested exponent limit to [`MAX_MERSENNE_EXPONENT`].
pub fn effective_limit(limit: u32) -> u32 {
    limit.min(MAX_MERSENNE_EXPONENT)
}

/// Enumerate the Mersenne primes `2^p - 1` for every prime `p <= limit`.
///
/// `limit` is clamped to 61 so the candidate always fits in an `i64`.
pub fn generate_mersenne_primes(limit: u32) -> MersenneReport {
    let started_at = Instant::now();
    let bound = effective_limit(limit);

    let mut exponents = Vec::new();
    let mut mersenne_primes = Vec::new();
    for p in 2..=bound {
        if !is_prime(i64::from(p)) {
            continue;
        }
        let Some(candidate) = mersenne_number(p) else {
            break;
        };
        if is_prime(candidate) {
            exponents.push(p);
            mersenne_primes.push(candidate.to_string());
        }
    }

    let elapsed = started_at.elapsed();
    MersenneReport {
        requested_limit: limit,
        effective_limit: bound,
        exponents,
        mersenne_primes,
        elapsed_ms: elapsed.as_secs_f64() * 1_000.0,
        summary: format_elapsed(elapsed),
    }
}

/// Render the timing line returned to callers.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("Elapsed time: {elapsed:?}")
}
