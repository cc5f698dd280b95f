//! Projecta Core - Shared types library.
//!
//! This crate provides common types used across all Projecta components:
//! - `storefront` - Catalog browsing, cart, contact form and the store accessor
//! - `admin` - Credential check, catalog editor and backup import/export
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O. Storage backends
//! implement [`KeyValueStore`] in the storefront crate so every component can
//! be exercised against an in-memory double.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails and credentials
//! - [`storage`] - The key-value storage seam and its error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod storage;
pub mod types;

pub use storage::{KeyValueStore, StorageError};
pub use types::*;
