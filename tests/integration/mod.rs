//! End-to-end tests of schema construction, derivation and resolution.

pub mod concurrency;
pub mod library;
pub mod properties;
pub mod reference_example;
