//! Read-only catalog views for the shop pages.

use projecta_core::{KeyValueStore, ProductId};

use crate::db::StoreRepository;
use crate::models::Product;

/// Number of products shown on the home page.
pub const PREVIEW_LIMIT: usize = 6;

/// Image used when a product has none.
pub const FALLBACK_IMAGE: &str = "images/product1.jpg";

/// A product card on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPreview {
    pub id: ProductId,
    pub title: String,
    /// Formatted price, e.g. `€129.00`.
    pub price_label: String,
    pub image: String,
    pub bestseller: bool,
}

impl From<&Product> for ProductPreview {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price_label: product.price.display(),
            image: product
                .images
                .first()
                .cloned()
                .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
            bestseller: product.bestseller,
        }
    }
}

/// Catalog service.
pub struct CatalogService<'a> {
    store: StoreRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self {
            store: StoreRepository::new(storage),
        }
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.store.get_data().products
    }

    /// The first `limit` products as preview cards.
    #[must_use]
    pub fn previews(&self, limit: usize) -> Vec<ProductPreview> {
        self.store
            .get_data()
            .products
            .iter()
            .take(limit)
            .map(ProductPreview::from)
            .collect()
    }

    /// Look up one product.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<Product> {
        self.store.get_data().product(id).cloned()
    }

    /// The mission statement shown on the home page.
    #[must_use]
    pub fn mission(&self) -> String {
        self.store.get_data().content.mission
    }
}
