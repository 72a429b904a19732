//! Cart line types, shaped like the backend's cart query.

use crate::catalog::{variant_url, Connection, ProductVariant, SelectedOption};
use crate::ids::{CartLineId, ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One entry of a cart.
///
/// Lines are a read-only projection of backend state: they are replaced
/// wholesale on every cart query and never edited locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Backend-assigned line id.
    pub id: CartLineId,
    /// Quantity; `0` means the line is about to be removed.
    #[serde(default)]
    pub quantity: u32,
    /// The variant being purchased.
    pub merchandise: Merchandise,
    /// Line costs, after discounts.
    #[serde(default)]
    pub cost: CartLineCost,
    /// Per-discount reductions applied to this line.
    #[serde(default)]
    pub discount_allocations: Vec<DiscountAllocation>,
    /// Back-reference to the bundle line this line belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_relationship: Option<ParentRelationship>,
    /// Bundle components embedded under this line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_components: Option<Vec<CartLine>>,
    /// Set while a mutation touching this line is in flight.
    #[serde(default)]
    pub is_optimistic: bool,
}

impl CartLine {
    /// Create a line with no costs or relationships.
    pub fn new(id: impl Into<CartLineId>, quantity: u32, merchandise: Merchandise) -> Self {
        Self {
            id: id.into(),
            quantity,
            merchandise,
            cost: CartLineCost::default(),
            discount_allocations: Vec::new(),
            parent_relationship: None,
            line_components: None,
            is_optimistic: false,
        }
    }

    /// Set the post-discount total.
    pub fn with_total(mut self, total: Money) -> Self {
        self.cost.total_amount = Some(total);
        self
    }

    /// Append a discount allocation.
    pub fn with_discount(mut self, amount: Money) -> Self {
        self.discount_allocations.push(DiscountAllocation {
            discounted_amount: amount,
        });
        self
    }

    /// Declare the bundle line this line belongs to.
    pub fn with_parent(mut self, parent: impl Into<CartLineId>) -> Self {
        self.parent_relationship = Some(ParentRelationship {
            parent: Some(ParentRef { id: parent.into() }),
        });
        self
    }

    /// Embed bundle components under this line.
    pub fn with_components(mut self, components: Vec<CartLine>) -> Self {
        self.line_components = Some(components);
        self
    }

    /// Mark the line as awaiting backend confirmation.
    pub fn optimistic(mut self) -> Self {
        self.is_optimistic = true;
        self
    }

    /// Id of the declared parent line, if any.
    pub fn parent_id(&self) -> Option<&CartLineId> {
        self.parent_relationship
            .as_ref()
            .and_then(|r| r.parent.as_ref())
            .map(|p| &p.id)
    }

    /// A line is shown at the top level iff it declares no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id().is_none()
    }

    /// Embedded components, empty when there are none.
    pub fn components(&self) -> &[CartLine] {
        self.line_components.as_deref().unwrap_or(&[])
    }

    /// Storefront URL of the line's variant.
    pub fn variant_url(&self) -> String {
        variant_url(
            &self.merchandise.product.handle,
            &self.merchandise.selected_options,
        )
    }
}

/// Costs of a line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCost {
    /// Line total after discounts.
    #[serde(default)]
    pub total_amount: Option<Money>,
    /// Line total before line-level discounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal_amount: Option<Money>,
    /// Unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_per_quantity: Option<Money>,
    /// Catalog compare-at unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_amount_per_quantity: Option<Money>,
}

/// How much one discount took off a line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountAllocation {
    pub discounted_amount: Money,
}

/// `parentRelationship` as sent by the backend; `parent` may be null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentRelationship {
    #[serde(default)]
    pub parent: Option<ParentRef>,
}

/// Reference to another line in the same cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentRef {
    pub id: CartLineId,
}

/// The variant a line refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Merchandise {
    /// Variant id.
    pub id: VariantId,
    /// Variant title (e.g., "L / Fekete").
    #[serde(default)]
    pub title: String,
    /// Options that define the variant.
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    /// The product the variant belongs to.
    pub product: MerchandiseProduct,
    /// Variant image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

impl Merchandise {
    /// Create merchandise for a product handle and title.
    pub fn new(
        id: impl Into<VariantId>,
        product_handle: impl Into<String>,
        product_title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            selected_options: Vec::new(),
            product: MerchandiseProduct {
                id: None,
                handle: product_handle.into(),
                title: product_title.into(),
                vendor: None,
                variants: Connection::default(),
            },
            image: None,
        }
    }

    /// Add a selected option.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.selected_options.push(SelectedOption::new(name, value));
        self
    }
}

/// Product summary embedded in a cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub handle: String,
    #[serde(default)]
    pub title: String,
    /// Artist name on the storefront.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Sibling variants, used by the size swap.
    #[serde(default)]
    pub variants: Connection<ProductVariant>,
}

/// Image reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}
