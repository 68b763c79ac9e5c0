//! Typed IDs for master-data references.
//!
//! Master records are keyed by human-readable codes (`A-001`, `V3F2A`,
//! `SVC-81C0`, `BUDGET_L1_004`) rather than UUIDs. Wrapping them in newtypes
//! prevents accidentally passing a vendor code where a project code is
//! expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed code wrappers over `String`.
macro_rules! typed_code {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing code.
            #[must_use]
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Returns the code as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_code!(ProjectId, "Project code in `<dept>-<seq3>` format, e.g. `A-001`.");
typed_code!(VendorId, "Vendor code, e.g. `V3F2A`.");
typed_code!(ServiceId, "Service code, e.g. `SVC-81C0`.");
typed_code!(CodeId, "Budget classification code, e.g. `BUDGET_L1_004`.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        let id = ProjectId::new("A-001");
        assert_eq!(id.to_string(), "A-001");
        assert_eq!(id.as_str(), "A-001");
        assert_eq!(String::from(id), "A-001");
    }

    #[test]
    fn test_serde_transparent() {
        let id: ProjectId = serde_json::from_str("\"B-012\"").unwrap();
        assert_eq!(id, ProjectId::new("B-012"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"B-012\"");
    }
}
