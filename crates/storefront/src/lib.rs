//! Projecta Storefront library.
//!
//! The shopper-facing half of Projecta: the store accessor, the cart, the
//! contact form, cookie consent and catalog previews, all persisted through
//! an injected [`projecta_core::KeyValueStore`].
//!
//! # Layers
//!
//! - [`storage`] - `KeyValueStore` backends (in-memory and file-backed)
//! - [`db`] - Repositories that read and write whole JSON records per key
//! - [`models`] - Persisted record types
//! - [`services`] - Validation and business rules on top of the repositories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
