//! Store record commands.

use projecta_storefront::db::{RepositoryError, StoreRepository};

use super::Context;

/// Print the catalog and site copy.
pub fn show(ctx: &Context) {
    let store = StoreRepository::new(ctx.storage()).get_data();

    #[allow(clippy::print_stdout)]
    {
        println!("Mission: {}", store.content.mission);
        println!("Products: {}", store.products.len());
        for product in &store.products {
            println!("  {:<16} {:<24} {}", product.id.as_str(), product.title, product.price.display());
        }
        println!(
            "Admin: {}",
            store
                .admin
                .as_ref()
                .map_or("not set up", |admin| admin.email.as_str())
        );
    }
}

/// Delete the store record.
///
/// # Errors
///
/// Returns an error if the key cannot be removed.
pub fn reset(ctx: &Context) -> Result<(), RepositoryError> {
    StoreRepository::new(ctx.storage()).reset()
}
