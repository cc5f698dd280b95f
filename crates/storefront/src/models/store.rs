//! The store record: catalog, site copy and the admin credential.

use serde::{Deserialize, Serialize};

use projecta_core::{AdminCredential, Price, ProductId};

/// Everything persisted under the store key.
///
/// Missing `products` or `content` fields read as empty, matching records
/// written before those fields existed. `admin` stays `null` until the
/// credential is set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub content: SiteContent,
    #[serde(default)]
    pub admin: Option<AdminCredential>,
}

impl StoreRecord {
    /// The catalog a fresh store is seeded with.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            products: vec![
                Product {
                    id: ProductId::new("p1"),
                    title: "Projecta Classic".to_string(),
                    price: Price::from_cents(12900),
                    desc: "Elegant bracelet with GPS and alarm.".to_string(),
                    images: vec![
                        "images/product1.jpg".to_string(),
                        "images/product2.jpg".to_string(),
                    ],
                    bestseller: true,
                },
                Product {
                    id: ProductId::new("p2"),
                    title: "Projecta Slim".to_string(),
                    price: Price::from_cents(14900),
                    desc: "Slim design, long battery life.".to_string(),
                    images: vec![
                        "images/product2.jpg".to_string(),
                        "images/product3.jpg".to_string(),
                    ],
                    bestseller: true,
                },
                Product {
                    id: ProductId::new("p3"),
                    title: "Projecta Kids".to_string(),
                    price: Price::from_cents(9900),
                    desc: "Made for children, robust and light.".to_string(),
                    images: vec![
                        "images/product3.jpg".to_string(),
                        "images/product1.jpg".to_string(),
                    ],
                    bestseller: false,
                },
            ],
            content: SiteContent {
                mission: "Projecta brings safety in an elegant form.".to_string(),
            },
            admin: None,
        }
    }

    /// Find a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Position of a product in display order.
    #[must_use]
    pub fn product_index(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub desc: String,
    /// Image references: relative paths or `data:` URLs.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bestseller: bool,
}

impl Product {
    /// An empty draft with a fresh `p<millis>` id.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            id: ProductId::timestamped("p"),
            title: String::new(),
            price: Price::ZERO,
            desc: String::new(),
            images: Vec::new(),
            bestseller: false,
        }
    }
}

/// Free-text site copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub mission: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_unique_ids() {
        let seed = StoreRecord::seed();
        let mut ids: Vec<_> = seed.products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), seed.products.len());
        assert!(seed.admin.is_none());
    }

    #[test]
    fn test_admin_serializes_as_null() {
        let json = serde_json::to_value(StoreRecord::seed()).unwrap();
        assert!(json["admin"].is_null());
        assert_eq!(json["products"][0]["price"], serde_json::json!(129.0));
    }

    #[test]
    fn test_missing_fields_default() {
        let record: StoreRecord = serde_json::from_str("{}").unwrap();
        assert!(record.products.is_empty());
        assert_eq!(record.content.mission, "");
        assert!(record.admin.is_none());
    }

    #[test]
    fn test_product_without_bestseller() {
        let json = r#"{"id":"p9","title":"T","price":10,"desc":"","images":[]}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.bestseller);

        let back = serde_json::to_value(&product).unwrap();
        assert!(back.get("bestseller").is_none());
    }

    #[test]
    fn test_draft_id_prefix() {
        let draft = Product::draft();
        assert!(draft.id.as_str().starts_with('p'));
        assert_eq!(draft.price, Price::ZERO);
    }
}
