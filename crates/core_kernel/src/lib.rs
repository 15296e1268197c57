//! Core Kernel - Foundational types shared by the insurance quoting service
//!
//! This crate provides the building blocks used across the domain and API crates:
//! - The caller identity used as the policy store key
//! - The port error taxonomy and marker traits for ports and adapters
//! - Adapter health reporting

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::UserName;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;
