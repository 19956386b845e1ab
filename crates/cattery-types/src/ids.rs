//! Type-safe identifier wrappers.
//!
//! Caller identities ([`Account`], [`CallerId`]) are opaque UUIDs supplied
//! by the embedding driver -- the engine never inspects them. Entity
//! identifiers ([`CatId`], [`EggId`], [`OrnamentId`]) are sequential `u64`
//! values allocated by the registry; they are never reused, even when an
//! entity is logically retired.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Generates a newtype wrapper around a sequential `u64` entity id.
macro_rules! define_entity_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw id value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner `u64` value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_uuid_id! {
    /// Opaque identity of an account: the owner of eggs, cats, and balances.
    Account
}

define_uuid_id! {
    /// Opaque identity of a calling component (e.g. the incubation engine).
    ///
    /// Capability grants in the access-control layer are keyed by this type,
    /// never by [`Account`] -- component identity and account identity are
    /// independent namespaces.
    CallerId
}

define_entity_id! {
    /// Sequential identifier of a cat entity.
    CatId
}

define_entity_id! {
    /// Sequential identifier of an egg entity.
    EggId
}

define_entity_id! {
    /// Identifier of an ornament a cat can wear.
    ///
    /// Ornament ids are part of the driver-facing catalog; the engine only
    /// tracks which ids a cat holds.
    OrnamentId
}
