//! # neutron-core
//!
//! Core types and HTTP plumbing for talking to the OpenStack Neutron API.
//!
//! ## Modules
//!
//! - [`error`] - Error type shared by every Neutron operation
//! - [`ids`] - Strongly-typed identifiers for Neutron resources
//! - [`config`] - Serializable client configuration
//! - [`client`] - HTTP transport settings, request builder and executor
//! - [`query`] - Query parameter helper

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod query;

// Re-export commonly used types
pub use error::{Error, Result};
