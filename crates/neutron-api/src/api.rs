//! Object-safe view of the Neutron operations.
//!
//! Orchestrators that decide which networks, subnets and ports should exist
//! can depend on `Arc<dyn NeutronApi>` and substitute their own fake in tests.

use crate::client::NeutronClient;
use crate::models::{Network, Port, Subnet};
use crate::Result;
use async_trait::async_trait;
use neutron_core::ids::{NetworkId, PortId};

/// Networks, subnets and ports operations.
#[async_trait]
pub trait NeutronApi: Send + Sync {
    /// List all networks.
    async fn list_networks(&self) -> Result<Vec<Network>>;

    /// List networks with an exact name match.
    async fn list_networks_by_name(&self, name: &str) -> Result<Vec<Network>>;

    /// Create a network.
    async fn create_network(&self, network: &Network) -> Result<Network>;

    /// Delete a network.
    async fn delete_network(&self, id: &NetworkId) -> Result<()>;

    /// List all subnets.
    async fn list_subnets(&self) -> Result<Vec<Subnet>>;

    /// List subnets with an exact name match.
    async fn list_subnets_by_name(&self, name: &str) -> Result<Vec<Subnet>>;

    /// Create a subnet.
    async fn create_subnet(&self, subnet: &Subnet) -> Result<Subnet>;

    /// List all ports.
    async fn list_ports(&self) -> Result<Vec<Port>>;

    /// Create a port.
    async fn create_port(&self, port: &Port) -> Result<Port>;

    /// Delete a port.
    async fn delete_port(&self, id: &PortId) -> Result<()>;
}

#[async_trait]
impl NeutronApi for NeutronClient {
    async fn list_networks(&self) -> Result<Vec<Network>> {
        NeutronClient::list_networks(self).await
    }

    async fn list_networks_by_name(&self, name: &str) -> Result<Vec<Network>> {
        NeutronClient::list_networks_by_name(self, name).await
    }

    async fn create_network(&self, network: &Network) -> Result<Network> {
        NeutronClient::create_network(self, network).await
    }

    async fn delete_network(&self, id: &NetworkId) -> Result<()> {
        NeutronClient::delete_network(self, id).await
    }

    async fn list_subnets(&self) -> Result<Vec<Subnet>> {
        NeutronClient::list_subnets(self).await
    }

    async fn list_subnets_by_name(&self, name: &str) -> Result<Vec<Subnet>> {
        NeutronClient::list_subnets_by_name(self, name).await
    }

    async fn create_subnet(&self, subnet: &Subnet) -> Result<Subnet> {
        NeutronClient::create_subnet(self, subnet).await
    }

    async fn list_ports(&self) -> Result<Vec<Port>> {
        NeutronClient::list_ports(self).await
    }

    async fn create_port(&self, port: &Port) -> Result<Port> {
        NeutronClient::create_port(self, port).await
    }

    async fn delete_port(&self, id: &PortId) -> Result<()> {
        NeutronClient::delete_port(self, id).await
    }
}
