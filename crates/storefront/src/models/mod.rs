//! Persisted record types for the storefront.
//!
//! Field names follow the persisted JSON, which is shared with exported
//! backup files.

pub mod cart;
pub mod message;
pub mod notice;
pub mod store;

pub use cart::{CartAttributes, CartItem};
pub use message::ContactMessage;
pub use notice::{Notice, NoticeTarget};
pub use store::{Product, SiteContent, StoreRecord};
