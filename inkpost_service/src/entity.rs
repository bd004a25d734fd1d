use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use inkpost_request::schema::{Schema, SchemaMapped};

/// A record kind managed by the search engine and the lookup guard.
pub trait Entity: SchemaMapped + Debug + Clone + Send + Sync + 'static {
    type Id: Debug + Display + Copy + Eq + Hash + Send + Sync + 'static;

    /// Human readable kind, used in error messages.
    const KIND: &'static str;
    /// Name of the member that must be unique across all records.
    const UNIQUE_KEY: &'static str;

    fn id(&self) -> Self::Id;

    fn unique_key(&self) -> &str;

    fn get_schema() -> Schema;
}

/// Declares an entity id newtype over [`inkpost_common::id::Id`].
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub ::inkpost_common::id::Id);

        impl $name {
            pub fn new<T: Into<::inkpost_common::id::Id>>(id: T) -> Self {
                Self(id.into())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::inkpost_request::error::CommonError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<::inkpost_common::id::Id>()
                    .map(Self)
                    .map_err(|_| ::inkpost_request::error::CommonError::InvalidId)
            }
        }
    };
}

pub(crate) use entity_id;
