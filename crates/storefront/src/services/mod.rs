//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart manager (merge by attributes, quantities, totals)
//! - `catalog` - Read-only product listings and price formatting
//! - `contact` - Contact form submissions

pub mod cart;
pub mod catalog;
pub mod contact;

pub use cart::{AddOutcome, CartError, CartService, CartView, NewCartItem};
pub use catalog::{CatalogService, ProductPreview};
pub use contact::{ContactError, ContactForm, ContactService};
