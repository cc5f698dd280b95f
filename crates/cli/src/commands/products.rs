//! Catalog browsing commands.

use projecta_core::ProductId;
use projecta_storefront::error::AppError;
use projecta_storefront::services::CatalogService;

use super::Context;

/// List all products.
pub fn list(ctx: &Context) {
    let catalog = CatalogService::new(ctx.storage());

    #[allow(clippy::print_stdout)]
    {
        for product in catalog.products() {
            let marker = if product.bestseller { " *" } else { "" };
            println!(
                "{:<16} {:<24} {}{marker}",
                product.id.as_str(),
                product.title,
                product.price.display()
            );
        }
    }
}

/// Show one product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id.
pub fn show(ctx: &Context, id: &str) -> Result<(), AppError> {
    let product = CatalogService::new(ctx.storage())
        .find(&ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    #[allow(clippy::print_stdout)]
    {
        println!("{} ({})", product.title, product.id);
        println!("Price: {}", product.price.display());
        if !product.desc.is_empty() {
            println!("{}", product.desc);
        }
        for (index, image) in product.images.iter().enumerate() {
            println!("  [{index}] {}", summarize_image(image));
        }
    }
    Ok(())
}

/// Shorten `data:` URLs for display.
fn summarize_image(image: &str) -> String {
    if image.starts_with("data:") {
        let header = image.split(',').next().unwrap_or(image);
        format!("{header},… ({} bytes)", image.len())
    } else {
        image.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_image() {
        assert_eq!(summarize_image("images/a.jpg"), "images/a.jpg");
        assert_eq!(
            summarize_image("data:image/png;base64,iVBORw=="),
            "data:image/png;base64,… (30 bytes)"
        );
    }
}
