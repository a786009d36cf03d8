//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing an IngredientId where an ItemId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a sellable item; also the identity key of a cart line.
    ItemId
);
define_id!(
    /// Identifier of a build-your-own ingredient (base, fruit or add-on).
    IngredientId
);
define_id!(
    /// Identifier of a confirmed order.
    OrderId
);

/// Prefix shared by every custom-build item id.
pub const CUSTOM_ITEM_PREFIX: &str = "custom-";

impl ItemId {
    /// Id for the `sequence`-th custom build of a session.
    pub fn custom(sequence: u64) -> Self {
        Self(format!("{CUSTOM_ITEM_PREFIX}{sequence}"))
    }

    /// Check whether this id belongs to a custom build.
    pub fn is_custom(&self) -> bool {
        self.0.starts_with(CUSTOM_ITEM_PREFIX)
    }
}

impl OrderId {
    /// Generate a new unique order id.
    pub fn generate() -> Self {
        Self(format!("ORD-{}", generate_suffix()))
    }
}

/// Unique suffix from the clock and a process-wide counter.
fn generate_suffix() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{:X}{:04X}", millis, counter & 0xFFFF)
}
