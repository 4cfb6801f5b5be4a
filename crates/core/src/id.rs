//! Strongly-typed identifiers used across the marketplace.
//!
//! Vendor, agent and product identifiers are **opaque strings** owned by the
//! storage collaborators (e.g. `VEN-0042`). They are compared structurally and
//! never coerced into another key type. Connection requests are created by this
//! service and use UUIDv7.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Identifier of a vendor (marketplace seller).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VendorId(String);

/// Identifier of a sales agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentId(String);

/// Identifier of a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

/// Identifier of a vendor/agent connection request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

macro_rules! impl_opaque_id {
    ($t:ident, $name:literal) => {
        impl $t {
            /// Wrap an opaque identifier.
            ///
            /// The value is kept byte-for-byte; only blank values are rejected.
            pub fn new(value: impl Into<String>) -> DomainResult<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!("{} cannot be empty", $name)));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_opaque_id!(VendorId, "VendorId");
impl_opaque_id!(AgentId, "AgentId");
impl_opaque_id!(ProductId, "ProductId");

impl ConnectionId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ConnectionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("ConnectionId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_ids_keep_their_exact_value() {
        let id = VendorId::new("VEN-0042").unwrap();
        assert_eq!(id.as_str(), "VEN-0042");
        assert_eq!(id.to_string(), "VEN-0042");

        // No case folding or trimming: these are distinct vendors.
        assert_ne!(VendorId::new("ven-0042").unwrap(), id);
        assert_ne!(VendorId::new(" VEN-0042").unwrap(), id);
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(matches!(VendorId::new(""), Err(DomainError::InvalidId(_))));
        assert!(matches!(ProductId::new("   "), Err(DomainError::InvalidId(_))));
        assert!("".parse::<AgentId>().is_err());
    }

    #[test]
    fn opaque_ids_serialize_as_plain_strings() {
        let id = ProductId::new("64f1c0ffee").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"64f1c0ffee\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        let blank: Result<ProductId, _> = serde_json::from_str("\"\"");
        assert!(blank.is_err());
    }

    #[test]
    fn connection_id_parses_uuid_text() {
        let id = ConnectionId::new();
        let parsed: ConnectionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<ConnectionId>().is_err());
    }
}
