//! Integration test crate for golem.
//!
//! The suites live under `tests/`; this library is intentionally empty.
