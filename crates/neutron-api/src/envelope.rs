//! Wrapper-key envelopes around Neutron payloads.
//!
//! Single records travel as `{"network": {...}}`, collections as
//! `{"networks": [...]}`.

use crate::models::Resource;
use crate::Result;
use neutron_core::client::decode_body;
use neutron_core::Error;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Borrowed record serialized under its singular key.
pub(crate) struct Wrapped<'a, T>(pub &'a T);

impl<T: Resource> Serialize for Wrapped<'_, T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(T::SINGULAR, self.0)?;
        map.end()
    }
}

/// Decode `{"<singular>": {...}}`.
pub(crate) fn unwrap_one<T: Resource>(path: &str, bytes: &[u8]) -> Result<T> {
    let mut body: Map<String, Value> = decode_body(path, bytes)?;
    let value = body.remove(T::SINGULAR).ok_or_else(|| {
        Error::ParseError(format!(
            "response for `{path}` has no `{}` key",
            T::SINGULAR
        ))
    })?;
    serde_json::from_value(value)
        .map_err(|err| Error::ParseError(format!("invalid `{}` in `{path}`: {err}", T::SINGULAR)))
}

/// Decode `{"<collection>": [...]}`; a missing or null list is empty.
pub(crate) fn unwrap_many<T: Resource>(path: &str, bytes: &[u8]) -> Result<Vec<T>> {
    let mut body: Map<String, Value> = decode_body(path, bytes)?;
    match body.remove(T::COLLECTION) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|err| {
            Error::ParseError(format!("invalid `{}` in `{path}`: {err}", T::COLLECTION))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Network, Port};
    use serde_json::json;

    #[test]
    fn wraps_under_singular_key() {
        let port = Port {
            network_id: "net-1".into(),
            ..Port::default()
        };
        let value = serde_json::to_value(Wrapped(&port)).unwrap();
        assert_eq!(value, json!({"port": {"network_id": "net-1"}}));
    }

    #[test]
    fn unwrap_many_tolerates_missing_key() {
        let networks: Vec<Network> = unwrap_many("/v2.0/networks", b"{}").unwrap();
        assert!(networks.is_empty());
    }

    #[test]
    fn unwrap_one_requires_key() {
        let err = unwrap_one::<Network>("/v2.0/networks", br#"{"port": {}}"#).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn unwrap_many_rejects_wrong_shape() {
        let err =
            unwrap_many::<Network>("/v2.0/networks", br#"{"networks": {"id": 1}}"#).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
