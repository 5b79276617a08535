//! Customer and address management core.
//!
//! - [`validation`]: field errors and the request-scoped [`validation::ValidationContext`]
//! - [`domain`]: customer entities, value objects and collaborator traits
//! - [`caching`]: cache providers used by gateways
//! - [`gateways`]: cache-first postal code lookup against ViaCEP
//! - [`usecases`]: load → mutate → persist operations

pub mod caching;
pub mod config;
pub mod domain;
pub mod gateways;
pub mod metrics;
pub mod persistence;
pub mod usecases;
pub mod validation;
