//! Defines the newtype wrappers for the UUID identifiers used by the domain
//! models.
//!
//! Using a distinct type per entity disambiguates the IDs from one another,
//! leading to better compile time errors, and more flexible generics that can
//! have distinct implementations for multiple ID types.

macro_rules! define_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Create a new, random ID.
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Parse an ID from its string form.
            ///
            /// # Errors
            /// Returns [Error::InvalidId](crate::Error::InvalidId) if `raw` is
            /// not a well-formed UUID.
            pub fn parse(raw: &str) -> Result<Self, crate::Error> {
                uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| crate::Error::InvalidId)
            }

            /// The underlying UUID.
            pub const fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// A newtype wrapper for user IDs.
    UserId
);

define_id!(
    /// A newtype wrapper for category IDs.
    CategoryId
);

define_id!(
    /// A newtype wrapper for priority IDs.
    PriorityId
);

define_id!(
    /// A newtype wrapper for transaction IDs.
    TransactionId
);
