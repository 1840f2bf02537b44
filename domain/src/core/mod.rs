//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderKind`]: the two supported backends
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
pub mod string;
