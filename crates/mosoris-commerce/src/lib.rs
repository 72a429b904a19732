//! Cart and catalog logic for the Ars Mosoris storefront.
//!
//! Everything here operates on data already fetched from the commerce
//! backend and recomputes its results on every call:
//!
//! - **Cart**: snapshot types, the bundle line tree, compare-at price
//!   reconstruction from discount allocations, quantity controls
//! - **Catalog**: variants, option labels, the in-cart size swap, cursor
//!   pagination
//! - **Format**: injected, locale-aware money formatting
//!
//! # Example
//!
//! ```rust
//! use mosoris_commerce::prelude::*;
//!
//! let json = r#"{
//!   "id": "gid://shopify/Cart/1",
//!   "totalQuantity": 1,
//!   "cost": {"subtotalAmount": {"amount": "100.00", "currencyCode": "HUF"}},
//!   "lines": {"nodes": [{
//!     "id": "gid://shopify/CartLine/1",
//!     "quantity": 1,
//!     "merchandise": {"id": "gid://shopify/ProductVariant/1", "product": {"handle": "tee"}},
//!     "cost": {"totalAmount": {"amount": "100.00", "currencyCode": "HUF"}},
//!     "discountAllocations": [{"discountedAmount": {"amount": "20.00", "currencyCode": "HUF"}}]
//!   }]}
//! }"#;
//!
//! let cart = Cart::from_json(json).unwrap();
//! let reconciler = PriceReconciler::default();
//!
//! let tree = cart.line_tree();
//! let line = tree.roots()[0];
//! let price = line.price(&reconciler);
//! assert_eq!(price.original().unwrap().amount_string(), "120.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod format;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        AppliedGiftCard, Cart, CartAction, CartCost, CartDiscountCode, CartLine, CartLineCost,
        DiscountAllocation, LineTree, LineUpdate, Merchandise, PriceDisplay, PriceReconciler,
        PricingConfig, QuantityControls, VariantSwap,
    };

    // Catalog
    pub use crate::catalog::{
        AutoLoad, CatalogConfig, Connection, PageInfo, ProductOption, ProductVariant,
        SelectedOption, SizeChoice,
    };

    // Format
    pub use crate::format::{FormatConfig, FormattedPrice, MoneyFormatter};
}
