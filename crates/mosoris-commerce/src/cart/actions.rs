//! Cart mutations as the storefront submits them.

use crate::cart::CartLine;
use crate::ids::{CartLineId, VariantId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cart mutation understood by the backend's cart handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CartAction {
    LinesAdd,
    LinesUpdate,
    LinesRemove,
    DiscountCodesUpdate,
    GiftCardCodesAdd,
    GiftCardCodesRemove,
}

impl CartAction {
    /// Action name as submitted with the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            CartAction::LinesAdd => "LinesAdd",
            CartAction::LinesUpdate => "LinesUpdate",
            CartAction::LinesRemove => "LinesRemove",
            CartAction::DiscountCodesUpdate => "DiscountCodesUpdate",
            CartAction::GiftCardCodesAdd => "GiftCardCodesAdd",
            CartAction::GiftCardCodesRemove => "GiftCardCodesRemove",
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key under which in-flight mutations on the given lines are tracked.
///
/// Quantity changes and removals share the `LinesUpdate` prefix, so a
/// removal supersedes a pending quantity change on the same line.
pub fn update_key(line_ids: &[&CartLineId]) -> String {
    std::iter::once(CartAction::LinesUpdate.as_str())
        .chain(line_ids.iter().map(|id| id.as_str()))
        .collect::<Vec<_>>()
        .join("-")
}

/// `{ id, quantity }` payload of a `LinesUpdate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUpdate {
    pub id: CartLineId,
    pub quantity: u32,
}

/// Payload swapping a line to another variant of the same product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSwap {
    pub line_id: CartLineId,
    pub merchandise_id: VariantId,
    pub quantity: u32,
}

impl VariantSwap {
    /// Swap `line` to `variant`, keeping its quantity. `None` if the line
    /// already holds that variant.
    pub fn for_line(line: &CartLine, variant: &VariantId) -> Option<Self> {
        if &line.merchandise.id == variant {
            return None;
        }
        Some(Self {
            line_id: line.id.clone(),
            merchandise_id: variant.clone(),
            quantity: line.quantity,
        })
    }
}

/// State of the quantity stepper and remove button of one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityControls {
    pub line_id: CartLineId,
    pub quantity: u32,
    /// Quantity submitted by the minus button.
    pub decrease_to: u32,
    /// Quantity submitted by the plus button.
    pub increase_to: u32,
    pub can_decrease: bool,
    pub can_increase: bool,
    pub can_remove: bool,
}

impl QuantityControls {
    /// Controls for a line. All buttons are disabled while the line is
    /// optimistic; decreasing below one is left to the remove button.
    pub fn for_line(line: &CartLine) -> Self {
        let quantity = line.quantity;
        let settled = !line.is_optimistic;
        Self {
            line_id: line.id.clone(),
            quantity,
            decrease_to: quantity.saturating_sub(1),
            increase_to: quantity.saturating_add(1),
            can_decrease: quantity > 1 && settled,
            can_increase: settled,
            can_remove: settled,
        }
    }

    /// Payload for the minus button.
    pub fn decrease(&self) -> LineUpdate {
        LineUpdate {
            id: self.line_id.clone(),
            quantity: self.decrease_to,
        }
    }

    /// Payload for the plus button.
    pub fn increase(&self) -> LineUpdate {
        LineUpdate {
            id: self.line_id.clone(),
            quantity: self.increase_to,
        }
    }

    /// Tracking key shared by this line's update and remove forms.
    pub fn key(&self) -> String {
        update_key(&[&self.line_id])
    }
}
