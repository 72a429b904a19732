//! Shopping cart module.
//!
//! Contains cart snapshot and line types, the bundle line tree, price
//! reconciliation and line actions.

mod actions;
mod cart;
mod line;
mod pricing;
mod tree;

pub use actions::{update_key, CartAction, LineUpdate, QuantityControls, VariantSwap};
pub use cart::{AppliedGiftCard, Cart, CartCost, CartDiscountCode};
pub use line::{
    CartLine, CartLineCost, DiscountAllocation, Image, Merchandise, MerchandiseProduct,
    ParentRef, ParentRelationship,
};
pub use pricing::{PriceDisplay, PriceReconciler, PricingConfig};
pub use tree::{build_children_map, root_lines, ChildrenMap, LineTree};
