//! Typed Identifiers

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque string identifier tagged with the entity it identifies.
///
/// Storage hands out cuid-style strings, so the wrapper keeps the raw value
/// untouched and only uses the type parameter to stop a coupon id from being
/// passed where a product id is expected.
pub struct TypedId<T>(String, PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into(), PhantomData)
    }

    /// Wrap a raw identifier coming from an untrusted boundary.
    ///
    /// Empty or whitespace-only input is the "no value" sentinel and yields `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            None
        } else {
            Some(Self::new(trimmed))
        }
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the raw identifier.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<String> for TypedId<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> From<&str> for TypedId<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<TypedId<T>> for String {
    fn from(value: TypedId<T>) -> Self {
        value.into_string()
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Marker for product identifiers.
#[derive(Debug)]
pub struct Product;

/// Product ID
pub type ProductId = TypedId<Product>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_treats_blank_input_as_absent() {
        assert!(ProductId::from_raw("").is_none());
        assert!(ProductId::from_raw("   ").is_none());
    }

    #[test]
    fn from_raw_trims_surrounding_whitespace() {
        let id = ProductId::from_raw("  prod_123 \n");

        assert_eq!(id, Some(ProductId::new("prod_123")));
    }

    #[test]
    fn serializes_as_a_bare_string() -> Result<(), serde_json::Error> {
        let id = ProductId::new("prod_123");

        assert_eq!(serde_json::to_string(&id)?, "\"prod_123\"");
        assert_eq!(serde_json::from_str::<ProductId>("\"prod_123\"")?, id);

        Ok(())
    }
}
