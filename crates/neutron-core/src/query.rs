//! Query parameter helper for list endpoints.
//!
//! Values are kept raw here; percent-encoding happens when the request is
//! built, so filters containing reserved URL characters survive intact.

use crate::error::{Error, Result};

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a filter that must not be empty.
    ///
    /// An empty filter would silently widen a list call to the whole
    /// collection, so it is rejected instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if `value` is empty.
    pub fn push_filter(&mut self, key: &'static str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::ValidationError(format!("empty '{key}' parameter")));
        }
        self.pairs.push((key, value.to_string()));
        Ok(())
    }

    /// Borrow the collected pairs.
    #[must_use]
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_filter_rejects_empty() {
        let mut params = QueryParams::new();
        let err = params.push_filter("name", "").unwrap_err();
        assert_eq!(
            err,
            Error::ValidationError("empty 'name' parameter".to_string())
        );
        assert!(params.is_empty());
    }

    #[test]
    fn push_filter_keeps_raw_value() {
        let mut params = QueryParams::new();
        params.push_filter("name", "a&b c").unwrap();
        assert_eq!(params.as_pairs(), &[("name", "a&b c".to_string())]);
    }
}
