//! Compare-at price reconstruction for cart display.
//!
//! The backend reports line and subtotal amounts after discounts, plus one
//! allocation per discount. The pre-discount amount shown struck through is
//! rebuilt as `current + sum(allocations)`, in decimal.

use crate::cart::{CartLine, DiscountAllocation};
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What a price slot should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PriceDisplay {
    /// Current price with the pre-discount price struck through.
    Discounted { current: Money, original: Money },
    /// Current price only.
    Regular { current: Money },
    /// No price known; the slot stays blank.
    Unavailable,
}

impl PriceDisplay {
    /// Product-page price: the compare-at price is shown only when it is
    /// higher than the current price in the same currency.
    pub fn for_variant(price: Option<&Money>, compare_at: Option<&Money>) -> Self {
        let Some(price) = price else {
            return PriceDisplay::Unavailable;
        };
        match compare_at {
            Some(cap) if cap.currency_code == price.currency_code && cap.amount > price.amount => {
                PriceDisplay::Discounted {
                    current: *price,
                    original: *cap,
                }
            }
            _ => PriceDisplay::Regular { current: *price },
        }
    }

    /// The amount to show as the price.
    pub fn current(&self) -> Option<&Money> {
        match self {
            PriceDisplay::Discounted { current, .. } | PriceDisplay::Regular { current } => {
                Some(current)
            }
            PriceDisplay::Unavailable => None,
        }
    }

    /// The struck-through amount, if any.
    pub fn original(&self) -> Option<&Money> {
        match self {
            PriceDisplay::Discounted { original, .. } => Some(original),
            _ => None,
        }
    }

    /// Whether a comparison price is shown.
    pub fn has_comparison(&self) -> bool {
        matches!(self, PriceDisplay::Discounted { .. })
    }

    /// `original - current` when a comparison is shown.
    pub fn savings(&self) -> Option<Money> {
        match self {
            PriceDisplay::Discounted { current, original } => Some(Money::new(
                original.amount - current.amount,
                current.currency_code,
            )),
            _ => None,
        }
    }
}

/// Pricing settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PricingConfig {
    /// Suppress the comparison when an allocation's currency differs from
    /// the amount it reduces. Off by default: amounts are summed as sent,
    /// since a cart carries a single currency.
    pub strict_currency: bool,
}

/// Rebuilds pre-discount amounts for lines and the cart subtotal.
///
/// Pure: the same inputs always give the same display, and nothing is
/// cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceReconciler {
    config: PricingConfig,
}

impl PriceReconciler {
    /// Create a reconciler with the given settings.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Sum of a line's discount allocations, in decimal.
    ///
    /// `None` when the sum cannot be trusted: overflow, or (in strict mode)
    /// an allocation in a currency other than `currency`.
    pub fn line_discount(
        &self,
        currency: Currency,
        allocations: &[DiscountAllocation],
    ) -> Option<Decimal> {
        let mut total = Decimal::ZERO;
        for allocation in allocations {
            let amount = &allocation.discounted_amount;
            if amount.currency_code != currency {
                if self.config.strict_currency {
                    warn!(
                        expected = %currency,
                        got = %amount.currency_code,
                        "discount allocation currency mismatch; comparison suppressed"
                    );
                    return None;
                }
                warn!(
                    expected = %currency,
                    got = %amount.currency_code,
                    "discount allocation currency mismatch; summing as-is"
                );
            }
            total = match total.checked_add(amount.amount) {
                Some(sum) => sum,
                None => {
                    warn!("discount allocation sum overflowed");
                    return None;
                }
            };
        }
        Some(total)
    }

    /// Price display for one line.
    ///
    /// No total means no price at all; a discount sum that is zero, negative
    /// or untrusted means no comparison.
    pub fn line(&self, total: Option<&Money>, allocations: &[DiscountAllocation]) -> PriceDisplay {
        let Some(total) = total else {
            return PriceDisplay::Unavailable;
        };
        let discount = self.line_discount(total.currency_code, allocations);
        with_discount(total, discount)
    }

    /// Discount summed over every line of the cart (top-level lines as
    /// delivered; embedded components are not added again).
    pub fn cart_discount(&self, currency: Currency, lines: &[CartLine]) -> Option<Decimal> {
        let mut total = Decimal::ZERO;
        for line in lines {
            let discount = self.line_discount(currency, &line.discount_allocations)?;
            total = match total.checked_add(discount) {
                Some(sum) => sum,
                None => {
                    warn!("cart discount sum overflowed");
                    return None;
                }
            };
        }
        Some(total)
    }

    /// Price display for the cart subtotal.
    ///
    /// Only line-level allocations are added back. Discounts the backend
    /// applies to the subtotal directly are not reflected in the original.
    pub fn subtotal(&self, subtotal: Option<&Money>, lines: &[CartLine]) -> PriceDisplay {
        let Some(subtotal) = subtotal else {
            return PriceDisplay::Unavailable;
        };
        let discount = self.cart_discount(subtotal.currency_code, lines);
        with_discount(subtotal, discount)
    }
}

fn with_discount(current: &Money, discount: Option<Decimal>) -> PriceDisplay {
    let discount = match discount {
        Some(d) if d > Decimal::ZERO => d,
        _ => return PriceDisplay::Regular { current: *current },
    };

    match current.checked_add_amount(discount) {
        Ok(original) => PriceDisplay::Discounted {
            current: *current,
            original,
        },
        Err(e) => {
            warn!(error = %e, "could not rebuild original price");
            PriceDisplay::Regular { current: *current }
        }
    }
}
