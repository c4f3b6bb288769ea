//! Tests for provider services
//!
//! These cover client construction, status mapping and the offline
//! provider. HTTP round trips live in the crate's `tests/` directory.
