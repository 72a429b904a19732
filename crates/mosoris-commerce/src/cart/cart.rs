//! Cart snapshot as returned by the backend's cart query.

use crate::cart::{CartLine, LineTree, PriceDisplay, PriceReconciler};
use crate::catalog::Connection;
use crate::error::CommerceError;
use crate::ids::{CartId, CartLineId, GiftCardId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A cart at one point in time.
///
/// While a mutation is in flight the storefront overlays its predicted
/// result and flags the affected lines (and the cart) as optimistic; the
/// next query replaces the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Hosted checkout URL.
    #[serde(default)]
    pub checkout_url: Option<String>,
    /// Sum of quantities.
    #[serde(default)]
    pub total_quantity: u32,
    /// Cart-level costs.
    #[serde(default)]
    pub cost: CartCost,
    /// Lines in display order.
    #[serde(default)]
    pub lines: Connection<CartLine>,
    /// Discount codes entered by the customer.
    #[serde(default)]
    pub discount_codes: Vec<CartDiscountCode>,
    /// Gift cards applied to the cart.
    #[serde(default)]
    pub applied_gift_cards: Vec<AppliedGiftCard>,
    /// Set while any mutation is in flight.
    #[serde(default)]
    pub is_optimistic: bool,
}

impl Cart {
    /// Decode a snapshot from the backend's JSON.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let cart: Cart = serde_json::from_str(json)?;
        debug!(
            cart = %cart.id,
            lines = cart.lines.len(),
            optimistic = cart.is_optimistic,
            "decoded cart snapshot"
        );
        Ok(cart)
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines.nodes
    }

    /// Whether the cart lists any line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether there is something to check out.
    pub fn has_items(&self) -> bool {
        self.total_quantity > 0
    }

    /// Find a line by id in the flat list, children that point at a
    /// parent included.
    pub fn line(&self, id: &CartLineId) -> Option<&CartLine> {
        self.lines().iter().find(|l| &l.id == id)
    }

    /// Codes the backend accepted, in entry order.
    pub fn applicable_discount_codes(&self) -> Vec<&str> {
        self.discount_codes
            .iter()
            .filter(|d| d.applicable)
            .map(|d| d.code.as_str())
            .collect()
    }

    /// Whether any entered code is currently applied.
    pub fn has_applicable_discounts(&self) -> bool {
        self.discount_codes.iter().any(|d| d.applicable)
    }

    /// Whether the snapshot shows a predicted, unconfirmed state.
    pub fn has_pending_changes(&self) -> bool {
        self.is_optimistic || self.lines().iter().any(|l| l.is_optimistic)
    }

    /// Line tree for this render.
    pub fn line_tree(&self) -> LineTree<'_> {
        LineTree::build(self.lines())
    }

    /// Subtotal display with the pre-discount subtotal when lines carry
    /// discounts.
    pub fn subtotal_price(&self, reconciler: &PriceReconciler) -> PriceDisplay {
        reconciler.subtotal(self.cost.subtotal_amount.as_ref(), self.lines())
    }
}

impl CartLine {
    /// Line total display with the pre-discount total when discounted.
    pub fn price(&self, reconciler: &PriceReconciler) -> PriceDisplay {
        reconciler.line(self.cost.total_amount.as_ref(), &self.discount_allocations)
    }
}

/// Cart-level costs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    /// Sum of line totals, after every discount.
    #[serde(default)]
    pub subtotal_amount: Option<Money>,
    /// Amount due, including taxes and duties when known.
    #[serde(default)]
    pub total_amount: Option<Money>,
}

/// A discount code entered on the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartDiscountCode {
    pub code: String,
    /// Whether the code currently applies to the cart.
    pub applicable: bool,
}

/// A gift card applied to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedGiftCard {
    pub id: GiftCardId,
    /// Last characters of the card code, the only part shown.
    pub last_characters: String,
    pub amount_used: Money,
}

impl AppliedGiftCard {
    /// Masked code for display (`***ABCD`).
    pub fn masked_code(&self) -> String {
        format!("***{}", self.last_characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Merchandise;
    use crate::money::Currency;

    fn huf(amount: &str) -> Money {
        Money::parse(amount, Currency::HUF).unwrap()
    }

    fn cart(lines: Vec<CartLine>) -> Cart {
        Cart {
            id: CartId::new("gid://shopify/Cart/1"),
            checkout_url: None,
            total_quantity: lines.iter().map(|l| l.quantity).sum(),
            cost: CartCost::default(),
            lines: Connection::new(lines),
            discount_codes: Vec::new(),
            applied_gift_cards: Vec::new(),
            is_optimistic: false,
        }
    }

    fn line(id: &str) -> CartLine {
        CartLine::new(id, 1, Merchandise::new("v", "tee", "Tee"))
    }

    #[test]
    fn test_empty_cart() {
        let c = cart(vec![]);
        assert!(c.is_empty());
        assert!(!c.has_items());
        assert!(c.line_tree().roots().is_empty());
    }

    #[test]
    fn test_applicable_discount_codes() {
        let mut c = cart(vec![line("a")]);
        c.discount_codes = vec![
            CartDiscountCode {
                code: "NYAR10".to_string(),
                applicable: true,
            },
            CartDiscountCode {
                code: "EXPIRED".to_string(),
                applicable: false,
            },
            CartDiscountCode {
                code: "ART5".to_string(),
                applicable: true,
            },
        ];
        assert_eq!(c.applicable_discount_codes(), vec!["NYAR10", "ART5"]);
        assert!(c.has_applicable_discounts());
    }

    #[test]
    fn test_line_lookup_includes_children() {
        let c = cart(vec![line("a"), line("b").with_parent("a")]);
        assert_eq!(c.line(&CartLineId::new("b")).unwrap().id.as_str(), "b");
        assert!(c.line(&CartLineId::new("missing")).is_none());
        assert_eq!(c.line_tree().roots().len(), 1);
    }

    #[test]
    fn test_pending_changes_from_line() {
        let c = cart(vec![line("a"), line("b").optimistic()]);
        assert!(c.has_pending_changes());
        assert!(!cart(vec![line("a")]).has_pending_changes());
    }

    #[test]
    fn test_subtotal_price() {
        let mut c = cart(vec![
            line("a").with_total(huf("80.00")).with_discount(huf("20.00")),
            line("b").with_total(huf("95.00")).with_discount(huf("5.00")),
        ]);
        c.cost.subtotal_amount = Some(huf("175.00"));

        let display = c.subtotal_price(&PriceReconciler::default());
        assert_eq!(display.original().unwrap().amount_string(), "200.00");
    }

    #[test]
    fn test_line_price() {
        let l = line("a").with_total(huf("100.00")).with_discount(huf("20.00"));
        let display = l.price(&PriceReconciler::default());
        assert_eq!(display.original().unwrap().amount_string(), "120.00");
    }

    #[test]
    fn test_gift_card_mask() {
        let card = AppliedGiftCard {
            id: GiftCardId::new("gc-1"),
            last_characters: "X9K2".to_string(),
            amount_used: huf("5000.00"),
        };
        assert_eq!(card.masked_code(), "***X9K2");
    }

    #[test]
    fn test_from_json_rejects_bad_amount() {
        let json = r#"{
            "id": "c1",
            "cost": {"subtotalAmount": {"amount": "12,50", "currencyCode": "HUF"}}
        }"#;
        assert!(matches!(Cart::from_json(json), Err(CommerceError::Snapshot(_))));
    }
}
