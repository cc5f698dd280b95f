//! Cart manager.
//!
//! Every operation loads the whole cart, changes the in-memory copy and
//! writes it back. Rejected operations never write.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument, warn};

use projecta_core::{CartLineId, KeyValueStore, Price};

use crate::db::{CartRepository, RepositoryError};
use crate::models::{CartAttributes, CartItem, Notice, NoticeTarget};

/// Maximum engraving length in characters.
pub const MAX_ENGRAVING_CHARS: usize = 20;

/// Message shown for an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity is below one.
    #[error("please choose a valid quantity")]
    InvalidQuantity,

    /// Engraving text is too long.
    #[error("engraving may be at most {max} characters (got {len})")]
    EngravingTooLong {
        /// Allowed characters.
        max: usize,
        /// Characters supplied.
        len: usize,
    },

    /// The cart could not be saved.
    #[error("failed to save cart: {0}")]
    Repository(#[from] RepositoryError),
}

/// A line the shopper wants to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub name: String,
    pub price: Price,
    pub quantity: i64,
    pub attributes: CartAttributes,
    pub image: String,
}

/// What `add_to_cart` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Quantity added to an existing line.
    Merged {
        /// Index of the merged line.
        index: usize,
        /// Its quantity after the merge.
        quantity: u32,
    },
    /// A new line was appended.
    Appended {
        /// Index of the new line.
        index: usize,
    },
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub index: usize,
    pub item: CartItem,
    pub line_total: Decimal,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// `None` for an empty cart.
    pub total: Option<Decimal>,
    pub item_count: u64,
    /// Set only for an empty cart.
    pub empty_message: Option<&'static str>,
}

impl CartView {
    /// Build the view for a cart.
    #[must_use]
    pub fn from_items(items: &[CartItem]) -> Self {
        if items.is_empty() {
            return Self {
                lines: Vec::new(),
                total: None,
                item_count: 0,
                empty_message: Some(EMPTY_CART_MESSAGE),
            };
        }

        Self {
            lines: items
                .iter()
                .enumerate()
                .map(|(index, item)| CartLineView {
                    index,
                    item: item.clone(),
                    line_total: item.line_total(),
                })
                .collect(),
            total: Some(compute_total(items)),
            item_count: item_count(items),
            empty_message: None,
        }
    }
}

/// Sum of `price × quantity` over all lines, saturating at `Decimal::MAX`.
#[must_use]
pub fn compute_total(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .map(CartItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Sum of quantities over all lines.
#[must_use]
pub fn item_count(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Text for the cart badge: hidden at zero, capped at `99+`.
#[must_use]
pub fn badge_label(count: u64) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self {
            carts: CartRepository::new(storage),
        }
    }

    /// Current cart contents.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.carts.load()
    }

    /// Current cart as display data.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from_items(&self.carts.load())
    }

    /// Add a line, merging it into an existing line with the same name and
    /// attributes.
    ///
    /// The engraving is trimmed before it is checked and stored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity < 1`,
    /// `CartError::EngravingTooLong` if the engraving exceeds
    /// [`MAX_ENGRAVING_CHARS`], and `CartError::Repository` if saving fails.
    #[instrument(skip(self, new_item), fields(name = %new_item.name, quantity = new_item.quantity))]
    pub fn add_to_cart(&self, new_item: NewCartItem) -> Result<(AddOutcome, Notice), CartError> {
        let item = validate(new_item).inspect_err(|e| {
            warn!(error = %e, "Rejected cart add");
        })?;

        let mut items = self.carts.load();
        let outcome = match items.iter().position(|existing| existing.same_line_as(&item)) {
            Some(index) => {
                let quantity = items
                    .get_mut(index)
                    .map_or(0, |existing| {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                        existing.quantity
                    });
                AddOutcome::Merged { index, quantity }
            }
            None => {
                items.push(item.clone());
                AddOutcome::Appended {
                    index: items.len() - 1,
                }
            }
        };

        self.carts.save(&items)?;

        let notice = match outcome {
            AddOutcome::Merged { .. } => {
                info!(?outcome, "Merged cart line");
                Notice::success(
                    NoticeTarget::Cart,
                    format!(
                        "Quantity of \"{}\" increased by {}!",
                        item.name, item.quantity
                    ),
                )
            }
            AddOutcome::Appended { .. } => {
                info!(?outcome, "Appended cart line");
                Notice::success(
                    NoticeTarget::Cart,
                    format!("\"{}\" was added to the cart!", item.name),
                )
            }
        };

        Ok((outcome, notice))
    }

    /// Replace the quantity of the line at `index`.
    ///
    /// Quantities below one and out-of-range indices are ignored.
    ///
    /// # Returns
    ///
    /// `true` if the cart changed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if saving fails.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, index: usize, new_qty: i64) -> Result<bool, CartError> {
        let Ok(quantity) = u32::try_from(new_qty) else {
            return Ok(false);
        };
        if quantity == 0 {
            return Ok(false);
        }

        let mut items = self.carts.load();
        let Some(line) = items.get_mut(index) else {
            return Ok(false);
        };
        line.quantity = quantity;

        self.carts.save(&items)?;
        info!(index, quantity, "Updated cart quantity");
        Ok(true)
    }

    /// Remove the line at `index`.
    ///
    /// # Returns
    ///
    /// The removed line, or `None` if `index` was out of range.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if saving fails.
    #[instrument(skip(self))]
    pub fn remove_item(&self, index: usize) -> Result<Option<CartItem>, CartError> {
        let mut items = self.carts.load();
        if index >= items.len() {
            return Ok(None);
        }
        let removed = items.remove(index);

        self.carts.save(&items)?;
        info!(index, name = %removed.name, "Removed cart line");
        Ok(Some(removed))
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the key cannot be removed.
    pub fn clear(&self) -> Result<(), CartError> {
        self.carts.clear()?;
        info!("Cleared cart");
        Ok(())
    }
}

fn validate(new_item: NewCartItem) -> Result<CartItem, CartError> {
    if new_item.quantity < 1 {
        return Err(CartError::InvalidQuantity);
    }
    let quantity = u32::try_from(new_item.quantity).map_err(|_| CartError::InvalidQuantity)?;

    let mut attributes = new_item.attributes;
    attributes.engraving = attributes.engraving.trim().to_string();
    let len = attributes.engraving.chars().count();
    if len > MAX_ENGRAVING_CHARS {
        return Err(CartError::EngravingTooLong {
            max: MAX_ENGRAVING_CHARS,
            len,
        });
    }

    Ok(CartItem {
        id: CartLineId::timestamped("safty-band-"),
        name: new_item.name,
        price: new_item.price,
        quantity,
        attributes,
        image: new_item.image,
    })
}
