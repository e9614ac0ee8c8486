use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::generator::{generate_mersenne_primes, MersenneReport};

/// Input for `generate_mersenne_primes`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerateMersennePrimesRequest {
    /// The maximum exponent p to check for Mersenne primes M_p = 2^p - 1. Maximum supported is 61.
    #[schemars(
        description = "The maximum exponent p to check for Mersenne primes M_p = 2^p - 1. Maximum supported is 61."
    )]
    pub limit: u32,
}

impl GenerateMersennePrimesRequest {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    /// Run the scan for this request.
    pub fn run(self) -> MersenneReport {
        generate_mersenne_primes(self.limit)
    }
}
