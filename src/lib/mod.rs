//! Shared library modules providing error types, prime arithmetic, and telemetry initialization.

pub mod errors;
pub mod primes;
pub mod telemetry;
