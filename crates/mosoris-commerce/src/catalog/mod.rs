//! Product catalog module.
//!
//! Contains variant types, option presentation and cursor pagination.

mod pagination;
mod variant;

pub use pagination::{AutoLoad, Connection, PageInfo, LOAD_AHEAD_MARGIN_PX};
pub use variant::{
    variant_url, CatalogConfig, ProductOption, ProductVariant, SelectedOption, SizeChoice,
};
