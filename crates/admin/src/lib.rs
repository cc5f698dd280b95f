//! Projecta Admin library.
//!
//! The admin half of Projecta: credential bootstrap and login, the catalog
//! editor and JSON backup export/import. Everything operates on the same
//! store record as the storefront, through an injected
//! [`projecta_core::KeyValueStore`].
//!
//! # Security
//!
//! Login state lives in a separate, session-scoped store and is never
//! persisted next to the catalog. Passwords are only ever held as
//! [`secrecy::SecretString`] and compared in constant time.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod services;
pub mod session;
