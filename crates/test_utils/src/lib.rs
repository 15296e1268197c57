//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! insurance quoting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Well-known users, amounts and ready-made services
//! - `builders`: Builder for quotes with sensible defaults
//! - `doubles`: Deterministic calculators, recording and failing collaborators
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod doubles;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use doubles::*;
pub use assertions::*;
pub use generators::*;
