//! Neutron client and data models for OpenStack networking.
//!
//! Provides typed structures and an asynchronous client for listing, creating
//! and deleting networks, subnets and ports through the Neutron v2.0 API.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod client;
mod envelope;
pub mod models;

pub use api::NeutronApi;
pub use client::{NeutronClient, NeutronClientBuilder};
pub use models::{AllocationPool, FixedIp, HostRoute, IpVersion, Network, Port, Resource, Subnet};
pub use neutron_core::ids::{NetworkId, PortId, ProjectId, SegmentId, SubnetId, SubnetPoolId};
pub use neutron_core::config::NeutronClientConfig;
pub use neutron_core::Error;

/// Convenient result alias sharing the `neutron-core` error type.
pub type Result<T> = neutron_core::Result<T>;
