//! Catalog editor.
//!
//! Every operation requires a logged-in admin session and works on a fresh
//! read of the store record, writing the whole record back on change.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use tracing::{info, instrument};

use projecta_core::{KeyValueStore, ProductId};
use projecta_storefront::db::{RepositoryError, StoreRepository};
use projecta_storefront::models::{Notice, NoticeTarget, Product, StoreRecord};

use super::auth::AdminAuthError;
use crate::session::AdminSession;

/// Errors from catalog editing.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Not logged in.
    #[error(transparent)]
    Auth(#[from] AdminAuthError),

    /// Product title is blank.
    #[error("product title cannot be empty")]
    EmptyTitle,

    /// Product id is blank.
    #[error("product id cannot be empty")]
    EmptyId,

    /// No product with this id.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Image index past the end of the product's images.
    #[error("image {index} out of range (product has {len})")]
    ImageIndexOutOfRange { index: usize, len: usize },

    /// Image file could not be read.
    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a known image type.
    #[error("unsupported image type: {0}")]
    UnsupportedImageType(String),

    /// Store could not be saved.
    #[error("failed to save catalog: {0}")]
    Repository(#[from] RepositoryError),
}

/// What `upsert_product` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// An existing product was replaced in place.
    Updated { index: usize },
    /// A new product was appended.
    Created { index: usize },
}

/// Catalog editor.
pub struct CatalogEditor<'a> {
    store: StoreRepository<'a>,
    session: AdminSession<'a>,
}

impl<'a> CatalogEditor<'a> {
    /// Create a new catalog editor.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore, session: &'a dyn KeyValueStore) -> Self {
        Self {
            store: StoreRepository::new(storage),
            session: AdminSession::new(session),
        }
    }

    fn load(&self) -> Result<StoreRecord, CatalogError> {
        self.session.require_logged_in()?;
        Ok(self.store.get_data())
    }

    /// All products in display order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Auth` without a session.
    pub fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.load()?.products)
    }

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Auth` without a session.
    pub fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.load()?.product(id).cloned())
    }

    /// A blank draft with a fresh id. Nothing is saved until
    /// [`CatalogEditor::upsert_product`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Auth` without a session.
    pub fn new_product(&self) -> Result<Product, CatalogError> {
        self.session.require_logged_in()?;
        Ok(Product::draft())
    }

    /// Replace the product with the same id, or append it.
    ///
    /// The title is trimmed and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyTitle` or `CatalogError::EmptyId` for
    /// invalid input, `CatalogError::Auth` without a session, or
    /// `CatalogError::Repository` if saving fails.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn upsert_product(&self, mut product: Product) -> Result<UpsertOutcome, CatalogError> {
        let mut store = self.load()?;

        product.title = product.title.trim().to_string();
        if product.title.is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        if product.id.is_blank() {
            return Err(CatalogError::EmptyId);
        }

        let outcome = match store.product_index(&product.id) {
            Some(index) => {
                if let Some(slot) = store.products.get_mut(index) {
                    *slot = product;
                }
                UpsertOutcome::Updated { index }
            }
            None => {
                store.products.push(product);
                UpsertOutcome::Created {
                    index: store.products.len() - 1,
                }
            }
        };

        self.store.save_data(&store)?;
        info!(?outcome, "Saved product");
        Ok(outcome)
    }

    /// Remove a product once the deletion has been confirmed.
    ///
    /// # Returns
    ///
    /// `true` if a product was removed. Unconfirmed calls and unknown ids
    /// return `false` without writing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Auth` without a session or
    /// `CatalogError::Repository` if saving fails.
    #[instrument(skip(self))]
    pub fn delete_product(&self, id: &ProductId, confirmed: bool) -> Result<bool, CatalogError> {
        let mut store = self.load()?;
        if !confirmed {
            return Ok(false);
        }

        let before = store.products.len();
        store.products.retain(|p| &p.id != id);
        if store.products.len() == before {
            return Ok(false);
        }

        self.store.save_data(&store)?;
        info!("Deleted product");
        Ok(true)
    }

    /// Read an image file and append it to the product as a `data:` URL.
    ///
    /// # Returns
    ///
    /// The index of the new image.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnsupportedImageType`, `CatalogError::ImageRead`,
    /// `CatalogError::ProductNotFound`, or a session/storage error.
    #[instrument(skip(self))]
    pub fn add_image_from_file(&self, id: &ProductId, path: &Path) -> Result<usize, CatalogError> {
        let mime = mime_for_path(path)?;
        let bytes = std::fs::read(path).map_err(|source| CatalogError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_image(id, image_data_url(&bytes, mime))
    }

    /// Append an image reference (path or `data:` URL) to a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound`, or a session/storage error.
    pub fn add_image(&self, id: &ProductId, image: String) -> Result<usize, CatalogError> {
        let mut store = self.load()?;
        let product = product_mut(&mut store, id)?;
        product.images.push(image);
        let index = product.images.len() - 1;

        self.store.save_data(&store)?;
        info!(%id, index, "Added product image");
        Ok(index)
    }

    /// Remove the image at `index` from a product.
    ///
    /// # Returns
    ///
    /// The removed image reference.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound`,
    /// `CatalogError::ImageIndexOutOfRange`, or a session/storage error.
    #[instrument(skip(self))]
    pub fn remove_image(&self, id: &ProductId, index: usize) -> Result<String, CatalogError> {
        let mut store = self.load()?;
        let product = product_mut(&mut store, id)?;
        let len = product.images.len();
        if index >= len {
            return Err(CatalogError::ImageIndexOutOfRange { index, len });
        }
        let removed = product.images.remove(index);

        self.store.save_data(&store)?;
        info!("Removed product image");
        Ok(removed)
    }

    /// Trim and store the mission statement.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Auth` without a session or
    /// `CatalogError::Repository` if saving fails.
    #[instrument(skip(self, text))]
    pub fn update_mission(&self, text: &str) -> Result<Notice, CatalogError> {
        let mut store = self.load()?;
        store.content.mission = text.trim().to_string();

        self.store.save_data(&store)?;
        info!("Updated mission statement");
        Ok(Notice::show_msg(NoticeTarget::Data, "Content saved", 2000))
    }
}

fn product_mut<'s>(
    store: &'s mut StoreRecord,
    id: &ProductId,
) -> Result<&'s mut Product, CatalogError> {
    store
        .products
        .iter_mut()
        .find(|p| &p.id == id)
        .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
}

/// Encode image bytes as a `data:<mime>;base64,...` URL.
#[must_use]
pub fn image_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// MIME type for an image path, by extension.
///
/// # Errors
///
/// Returns `CatalogError::UnsupportedImageType` for unknown extensions.
pub fn mime_for_path(path: &Path) -> Result<&'static str, CatalogError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "avif" => Ok("image/avif"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(CatalogError::UnsupportedImageType(
            path.display().to_string(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use projecta_core::Price;
    use projecta_storefront::storage::MemoryStorage;

    use super::*;

    fn logged_in() -> (MemoryStorage, MemoryStorage) {
        let session = MemoryStorage::new();
        AdminSession::new(&session).set_logged_in().unwrap();
        (MemoryStorage::new(), session)
    }

    #[test]
    fn test_requires_login() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let editor = CatalogEditor::new(&storage, &session);

        assert!(matches!(
            editor.list_products(),
            Err(CatalogError::Auth(AdminAuthError::NotLoggedIn))
        ));
        assert!(matches!(
            editor.upsert_product(Product::draft()),
            Err(CatalogError::Auth(AdminAuthError::NotLoggedIn))
        ));
        assert!(matches!(
            editor.update_mission("x"),
            Err(CatalogError::Auth(AdminAuthError::NotLoggedIn))
        ));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_new_product_draft() {
        let (storage, session) = logged_in();
        let editor = CatalogEditor::new(&storage, &session);
        let draft = editor.new_product().unwrap();
        assert!(draft.id.as_str().starts_with('p'));
        assert!(draft.title.is_empty());
        assert_eq!(draft.price, Price::ZERO);
        assert_eq!(editor.list_products().unwrap().len(), 3);
    }

    #[test]
    fn test_upsert_creates_then_updates() {
        let (storage, session) = logged_in();
        let editor = CatalogEditor::new(&storage, &session);

        let mut product = editor.new_product().unwrap();
        product.title = "  Projecta Sport ".to_string();
        product.price = Price::from_cents(17900);
        assert_eq!(
            editor.upsert_product(product.clone()).unwrap(),
            UpsertOutcome::Created { index: 3 }
        );
        assert_eq!(
            editor.get_product(&product.id).unwrap().unwrap().title,
            "Projecta Sport"
        );

        product.title = "Projecta Sport 2".to_string();
        assert_eq!(
            editor.upsert_product(product.clone()).unwrap(),
            UpsertOutcome::Updated { index: 3 }
        );
        let products = editor.list_products().unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[3].title, "Projecta Sport 2");
    }

    #[test]
    fn test_upsert_rejects_blank_title() {
        let (storage, session) = logged_in();
        let editor = CatalogEditor::new(&storage, &session);
        let mut product = editor.new_product().unwrap();
        product.title = "   ".to_string();
        assert!(matches!(
            editor.upsert_product(product),
            Err(CatalogError::EmptyTitle)
        ));
        assert_eq!(editor.list_products().unwrap().len(), 3);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (storage, session) = logged_in();
        let editor = CatalogEditor::new(&storage, &session);
        let id = ProductId::new("p1");

        assert!(!editor.delete_product(&id, false).unwrap());
        assert!(editor.get_product(&id).unwrap().is_some());

        assert!(editor.delete_product(&id, true).unwrap());
        assert!(editor.get_product(&id).unwrap().is_none());
        assert!(!editor.delete_product(&id, true).unwrap());
    }

    #[test]
    fn test_add_and_remove_image() {
        let (storage, session) = logged_in();
        let editor = CatalogEditor::new(&storage, &session);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("band.PNG");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        let id = ProductId::new("p3");

        let index = editor.add_image_from_file(&id, &path).unwrap();
        assert_eq!(index, 2);
        let images = editor.get_product(&id).unwrap().unwrap().images;
        assert_eq!(images[2], "data:image/png;base64,iVBORw==");

        let removed = editor.remove_image(&id, 0).unwrap();
        assert_eq!(removed, "images/product3.jpg");
        assert!(matches!(
            editor.remove_image(&id, 9),
            Err(CatalogError::ImageIndexOutOfRange { index: 9, len: 2 })
        ));
    }

    #[test]
    fn test_image_errors() {
        let (storage, session) = logged_in();
        let editor = CatalogEditor::new(&storage, &session);
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            editor.add_image_from_file(&ProductId::new("p1"), &dir.path().join("notes.txt")),
            Err(CatalogError::UnsupportedImageType(_))
        ));
        assert!(matches!(
            editor.add_image_from_file(&ProductId::new("p1"), &dir.path().join("missing.jpg")),
            Err(CatalogError::ImageRead { .. })
        ));
        assert!(matches!(
            editor.add_image(&ProductId::new("nope"), "x.jpg".to_string()),
            Err(CatalogError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_update_mission_trims() {
        let (storage, session) = logged_in();
        let editor = CatalogEditor::new(&storage, &session);
        let notice = editor.update_mission("  Safety first.  ").unwrap();
        assert_eq!(notice.target, NoticeTarget::Data);
        assert_eq!(
            StoreRepository::new(&storage).get_data().content.mission,
            "Safety first."
        );
    }
}
