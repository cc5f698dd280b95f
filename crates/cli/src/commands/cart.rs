//! Cart commands.

use projecta_core::ProductId;
use projecta_storefront::error::AppError;
use projecta_storefront::models::CartAttributes;
use projecta_storefront::services::cart::{CartService, NewCartItem, badge_label};
use projecta_storefront::services::catalog::{CatalogService, FALLBACK_IMAGE};

use super::Context;

/// Customization flags from the command line.
pub struct Attributes {
    pub diamond_form: String,
    pub diamond_color: String,
    pub band_color: String,
    pub engraving: String,
}

/// Print the cart.
pub fn list(ctx: &Context) {
    let view = CartService::new(ctx.storage()).view();

    #[allow(clippy::print_stdout)]
    {
        if let Some(message) = view.empty_message {
            println!("{message}");
            return;
        }
        for line in &view.lines {
            let attrs = &line.item.attributes;
            println!(
                "[{}] {} x{} | {} / {} / {} | \"{}\" | €{:.2}",
                line.index,
                line.item.name,
                line.item.quantity,
                attrs.diamond_form,
                attrs.diamond_color,
                attrs.band_color,
                attrs.engraving,
                line.line_total
            );
        }
        if let Some(total) = view.total {
            println!("Total: €{total:.2}");
        }
        if let Some(badge) = badge_label(view.item_count) {
            println!("Items: {badge}");
        }
    }
}

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product, or the cart error.
pub fn add(
    ctx: &Context,
    product_id: &str,
    quantity: i64,
    attributes: Attributes,
) -> Result<(), AppError> {
    let product = CatalogService::new(ctx.storage())
        .find(&ProductId::new(product_id))
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))?;

    let (_, notice) = CartService::new(ctx.storage()).add_to_cart(NewCartItem {
        name: product.title,
        price: product.price,
        quantity,
        attributes: CartAttributes {
            diamond_form: attributes.diamond_form,
            diamond_color: attributes.diamond_color,
            band_color: attributes.band_color,
            engraving: attributes.engraving,
        },
        image: product
            .images
            .into_iter()
            .next()
            .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
    })?;

    tracing::info!("{notice}");
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns the cart error if saving fails.
pub fn update(ctx: &Context, index: usize, quantity: i64) -> Result<(), AppError> {
    if !CartService::new(ctx.storage()).update_quantity(index, quantity)? {
        tracing::warn!(index, quantity, "Nothing updated");
    }
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns the cart error if saving fails.
pub fn remove(ctx: &Context, index: usize) -> Result<(), AppError> {
    if CartService::new(ctx.storage()).remove_item(index)?.is_none() {
        tracing::warn!(index, "No cart line at this index");
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns the cart error if the key cannot be removed.
pub fn clear(ctx: &Context) -> Result<(), AppError> {
    CartService::new(ctx.storage()).clear()?;
    Ok(())
}
