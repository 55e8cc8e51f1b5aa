//! Strongly-typed identifiers for Neutron resources.
//!
//! Neutron identifiers are opaque server-assigned strings. A freshly built
//! request value carries an empty identifier until the server hands one back,
//! so every wrapper here defaults to the empty string.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed identifier wrapper types.
macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $doc:expr, $label:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if no identifier has been assigned.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Returns the identifier, rejecting an empty one.
            ///
            /// # Errors
            ///
            /// Returns [`Error::ValidationError`] if the identifier is empty.
            pub fn require(&self) -> Result<&str> {
                if self.0.is_empty() {
                    Err(Error::ValidationError(format!("empty '{}' parameter", $label)))
                } else {
                    Ok(&self.0)
                }
            }

            /// Converts into the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

resource_id!(NetworkId, "Network identifier", "network id");
resource_id!(SubnetId, "Subnet identifier", "subnet id");
resource_id!(PortId, "Port identifier", "port id");
resource_id!(SubnetPoolId, "Subnet pool identifier", "subnetpool id");
resource_id!(SegmentId, "Network segment identifier", "segment id");
resource_id!(ProjectId, "Tenant/project identifier", "project id");

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK_ID: &str = "e53a3b67-0074-404c-90b5-52ae217c3587";

    #[test]
    fn test_default_is_empty() {
        let id = NetworkId::default();
        assert!(id.is_empty());
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn test_require_rejects_empty() {
        let err = PortId::default().require().unwrap_err();
        assert_eq!(
            err,
            Error::ValidationError("empty 'port id' parameter".to_string())
        );
    }

    #[test]
    fn test_require_returns_value() {
        let id = NetworkId::new(NETWORK_ID);
        assert_eq!(id.require().unwrap(), NETWORK_ID);
    }

    #[test]
    fn test_display_and_conversions() {
        let id: SubnetId = NETWORK_ID.into();
        assert_eq!(id.to_string(), NETWORK_ID);
        assert_eq!(id.clone().into_inner(), NETWORK_ID);
        let as_ref: &str = id.as_ref();
        assert_eq!(as_ref, NETWORK_ID);
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ProjectId::new("1f77bad08b454898803a3d9f9e3799ec");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1f77bad08b454898803a3d9f9e3799ec\"");

        let back: ProjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
