//! Neutron data models for networks, subnets and ports.
//!
//! The same struct serves as the create request and the server's answer:
//! fields left `None` (or empty) are omitted from request bodies, and fields
//! the server sends that are not modelled here are ignored on decode.

use chrono::{DateTime, NaiveDateTime, Utc};
use neutron_core::ids::{NetworkId, PortId, ProjectId, SegmentId, SubnetId, SubnetPoolId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::debug;

/// A Neutron resource type addressable under `/v2.0/{COLLECTION}`.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Wrapper key for a single record, e.g. `network`.
    const SINGULAR: &'static str;
    /// Wrapper key and path segment for the collection, e.g. `networks`.
    const COLLECTION: &'static str;
}

/// Virtual L2 network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Network {
    /// Server-assigned identifier; empty until created.
    #[serde(default, skip_serializing_if = "NetworkId::is_empty")]
    pub id: NetworkId,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operational status, e.g. `ACTIVE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Administrative state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    /// Subnets attached to this network.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subnets: Vec<SubnetId>,
    /// Owning tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<ProjectId>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Maximum transmission unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    /// Whether the network is shared across projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    /// Whether the network is an external (provider) network.
    #[serde(
        rename = "router:external",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub router_external: Option<bool>,
    /// Resource tags.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    /// Revision counter maintained by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_number: Option<u64>,
    /// Creation timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Network {
    const SINGULAR: &'static str = "network";
    const COLLECTION: &'static str = "networks";
}

/// IP protocol version of a subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IpVersion {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl TryFrom<u8> for IpVersion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(format!("unsupported ip_version {other}")),
        }
    }
}

impl From<IpVersion> for u8 {
    fn from(version: IpVersion) -> Self {
        match version {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Address range available for automatic assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationPool {
    /// First address in the range.
    pub start: String,
    /// Last address in the range.
    pub end: String,
}

impl AllocationPool {
    /// Create a pool from its bounds.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Static route pushed to hosts on a subnet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostRoute {
    /// Destination CIDR.
    pub destination: String,
    /// Next hop address.
    pub nexthop: String,
}

/// IP address block within a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Subnet {
    /// Server-assigned identifier; empty until created.
    #[serde(default, skip_serializing_if = "SubnetId::is_empty")]
    pub id: SubnetId,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Subnet pool the CIDR was allocated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnetpool_id: Option<SubnetPoolId>,
    /// Whether DHCP is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_dhcp: Option<bool>,
    /// Owning network.
    #[serde(default, skip_serializing_if = "NetworkId::is_empty")]
    pub network_id: NetworkId,
    /// Network segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<SegmentId>,
    /// Owning tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<ProjectId>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// DNS nameserver addresses.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dns_nameservers: Vec<String>,
    /// Ranges available for automatic assignment.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allocation_pools: Vec<AllocationPool>,
    /// Host routes.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub host_routes: Vec<HostRoute>,
    /// IP version (4 or 6).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<IpVersion>,
    /// Gateway address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_ip: Option<String>,
    /// CIDR block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    /// Revision counter maintained by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_number: Option<u64>,
    /// Creation timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Subnet {
    const SINGULAR: &'static str = "subnet";
    const COLLECTION: &'static str = "subnets";
}

/// Address-to-subnet binding on a port.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedIp {
    /// Bound address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Subnet the address belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<SubnetId>,
}

impl FixedIp {
    /// Binding of a specific address on a subnet.
    #[must_use]
    pub fn new(ip_address: impl Into<String>, subnet_id: impl Into<SubnetId>) -> Self {
        Self {
            ip_address: Some(ip_address.into()),
            subnet_id: Some(subnet_id.into()),
        }
    }
}

/// Virtual network attachment point.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Port {
    /// Server-assigned identifier; empty until created.
    #[serde(default, skip_serializing_if = "PortId::is_empty")]
    pub id: PortId,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Network the port is attached to.
    #[serde(default)]
    pub network_id: NetworkId,
    /// Owning tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<ProjectId>,
    /// Operational status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Administrative state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    /// MAC address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    /// Entity that uses the port, e.g. `network:dhcp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_owner: Option<String>,
    /// Device using the port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Fixed IP bindings.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fixed_ips: Vec<FixedIp>,
}

impl Resource for Port {
    const SINGULAR: &'static str = "port";
    const COLLECTION: &'static str = "ports";
}

/// Decode a list that the server may send as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode an RFC 3339 timestamp, or a zone-less one taken as UTC.
///
/// Older Neutron releases omit the zone suffix. Anything else unparsable
/// decodes as `None` so one odd record cannot fail a whole listing.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    match NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Ok(Some(naive.and_utc())),
        Err(err) => {
            debug!(timestamp = %raw, %err, "ignoring unparsable timestamp");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_network_serializes_to_empty_object() {
        let value = serde_json::to_value(Network::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn network_request_omits_unset_fields() {
        let network = Network {
            name: Some("sample_network".into()),
            admin_state_up: Some(true),
            ..Network::default()
        };
        let value = serde_json::to_value(&network).unwrap();
        assert_eq!(
            value,
            json!({"name": "sample_network", "admin_state_up": true})
        );
    }

    #[test]
    fn network_decodes_nulls_and_router_external() {
        let network: Network = serde_json::from_value(json!({
            "id": "net-1",
            "description": null,
            "router:external": true,
            "provider:physical_network": null,
            "created_at": "2016-11-07T03:24:33Z"
        }))
        .unwrap();
        assert_eq!(network.id.as_str(), "net-1");
        assert!(network.description.is_none());
        assert_eq!(network.router_external, Some(true));
        assert!(network.created_at.is_some());
    }

    #[test]
    fn ip_version_round_trips_as_integer() {
        assert_eq!(serde_json::to_value(IpVersion::V6).unwrap(), json!(6));
        let version: IpVersion = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(version, IpVersion::V4);
        assert_eq!(version.to_string(), "4");
        assert!(serde_json::from_value::<IpVersion>(json!(5)).is_err());
    }

    #[test]
    fn port_always_sends_network_id() {
        let value = serde_json::to_value(Port::default()).unwrap();
        assert_eq!(value, json!({"network_id": ""}));
    }

    #[test]
    fn fixed_ip_may_name_only_subnet() {
        let fixed = FixedIp {
            subnet_id: Some("sub-1".into()),
            ..FixedIp::default()
        };
        assert_eq!(
            serde_json::to_value(&fixed).unwrap(),
            json!({"subnet_id": "sub-1"})
        );
    }

    #[test]
    fn zone_less_timestamps_are_utc() {
        let network: Network = serde_json::from_value(json!({
            "id": "n1",
            "created_at": "2016-03-08T20:19:41",
            "updated_at": "2016-03-08T20:19:41.123456Z"
        }))
        .unwrap();
        let created = network.created_at.unwrap();
        assert_eq!(created.to_rfc3339(), "2016-03-08T20:19:41+00:00");
        assert_eq!(created.timestamp(), network.updated_at.unwrap().timestamp());
    }

    #[test]
    fn unparsable_timestamp_decodes_as_none() {
        let subnet: Subnet = serde_json::from_value(json!({
            "id": "s1",
            "created_at": "yesterday",
            "updated_at": null
        }))
        .unwrap();
        assert!(subnet.created_at.is_none());
        assert!(subnet.updated_at.is_none());
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let network: Network =
            serde_json::from_value(json!({"id": "n1", "subnets": null, "tags": null})).unwrap();
        assert!(network.subnets.is_empty());
        assert!(network.tags.is_empty());

        let subnet: Subnet = serde_json::from_value(json!({
            "id": "s1",
            "dns_nameservers": null,
            "allocation_pools": null,
            "host_routes": null
        }))
        .unwrap();
        assert!(subnet.dns_nameservers.is_empty());
        assert!(subnet.allocation_pools.is_empty());
        assert!(subnet.host_routes.is_empty());

        let port: Port = serde_json::from_value(json!({"id": "p1", "fixed_ips": null})).unwrap();
        assert!(port.fixed_ips.is_empty());
    }
}
