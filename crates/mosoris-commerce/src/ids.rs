//! Identifiers assigned by the commerce backend.
//!
//! Ids arrive as global ids (`gid://shopify/CartLine/123?cart=abc`) and are
//! compared as opaque strings; nothing in this crate mints new ones. Each
//! kind gets its own newtype so a line id never stands in for a variant id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Last path segment of a global id, without its query string.
///
/// Plain ids that are not URLs come back unchanged.
pub fn gid_tail(id: &str) -> &str {
    let path = id.split_once('?').map_or(id, |(path, _)| path);
    path.rsplit('/').next().unwrap_or(path)
}

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form for logs and terminal output.
            pub fn short(&self) -> &str {
                gid_tail(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

backend_id!(
    /// Id of a cart.
    CartId
);
backend_id!(
    /// Id of a cart line; unique within one cart snapshot.
    CartLineId
);
backend_id!(
    /// Id of a catalog product.
    ProductId
);
backend_id!(
    /// Id of a purchasable variant (the line's merchandise).
    VariantId
);
backend_id!(
    /// Id of a gift card applied to a cart.
    GiftCardId
);
