//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use projecta_core::{CartLineId, Price};

/// Customization chosen on the product page.
///
/// Two lines with equal `name` and equal attributes are the same logical
/// line and are merged by summing quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAttributes {
    #[serde(default)]
    pub diamond_form: String,
    #[serde(default)]
    pub diamond_color: String,
    #[serde(default)]
    pub band_color: String,
    #[serde(default)]
    pub engraving: String,
}

/// One line in the shopper's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartLineId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(flatten)]
    pub attributes: CartAttributes,
    #[serde(default)]
    pub image: String,
}

impl CartItem {
    /// Returns `true` if `other` describes the same logical line.
    #[must_use]
    pub fn same_line_as(&self, other: &Self) -> bool {
        self.name == other.name && self.attributes == other.attributes
    }

    /// `price × quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .amount()
            .saturating_mul(Decimal::from(self.quantity))
    }
}
