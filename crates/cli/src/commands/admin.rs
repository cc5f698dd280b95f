//! Admin commands.
//!
//! Each invocation logs in for the lifetime of the process using `--email`
//! (or `PROJECTA_ADMIN_EMAIL`) and `PROJECTA_ADMIN_PASSWORD`. If no admin
//! credential exists yet, the configured one is created first.
//!
//! # Environment Variables
//!
//! - `PROJECTA_ADMIN_PASSWORD` - Admin password
//! - `PROJECTA_ADMIN_NEW_PASSWORD` - New password for `admin passwd`

use std::path::Path;

use secrecy::SecretString;

use projecta_admin::config::{AdminConfig, BootstrapCredential, ConfigError};
use projecta_admin::error::Result;
use projecta_admin::services::auth::AdminAuthError;
use projecta_admin::services::{AdminAuthService, BackupService, CatalogEditor, UpsertOutcome};
use projecta_core::{Email, Price, ProductId};
use projecta_storefront::models::Product;

use super::Context;

/// Product fields given on the command line. `None` keeps the current value.
pub struct ProductEdit {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<Price>,
    pub desc: Option<String>,
    pub bestseller: Option<bool>,
}

fn bootstrap(config: &AdminConfig, email: Option<&str>) -> Result<Option<BootstrapCredential>> {
    let Some(mut bootstrap) = config.bootstrap() else {
        return Ok(None);
    };
    if let Some(email) = email {
        bootstrap.email = Email::normalized(email).map_err(AdminAuthError::from)?;
    }
    Ok(Some(bootstrap))
}

/// Create the admin credential if none exists.
///
/// # Errors
///
/// Returns an error if `PROJECTA_ADMIN_PASSWORD` is unset or too short.
pub async fn setup(ctx: &Context, email: Option<&str>) -> Result<()> {
    let config = AdminConfig::from_env()?;
    let bootstrap = bootstrap(&config, email)?.ok_or_else(|| {
        ConfigError::MissingEnvVar("PROJECTA_ADMIN_PASSWORD".to_string())
    })?;

    let auth = AdminAuthService::new(ctx.storage(), ctx.session());
    if auth.ensure_admin_exists(&bootstrap).await? {
        tracing::info!(email = %bootstrap.email, "Admin credential created");
    } else {
        tracing::warn!("Admin credential already exists; use `admin passwd` to change it");
    }
    Ok(())
}

/// Log in for the rest of the process.
///
/// # Errors
///
/// Returns `AdminAuthError::InvalidCredentials` on mismatch.
pub async fn login(ctx: &Context, email: Option<&str>) -> Result<()> {
    let config = AdminConfig::from_env()?;
    let auth = AdminAuthService::new(ctx.storage(), ctx.session());

    if let Some(bootstrap) = bootstrap(&config, email)? {
        auth.ensure_admin_exists(&bootstrap).await?;
    }

    let email = email.unwrap_or_else(|| config.admin_email.as_str());
    auth.login(email, config.require_password()?).await?;
    Ok(())
}

/// Change the password to `PROJECTA_ADMIN_NEW_PASSWORD`.
///
/// # Errors
///
/// Returns an error if the new password is unset or rejected.
pub async fn change_password(ctx: &Context) -> Result<()> {
    let config = AdminConfig::from_env()?;
    let new = std::env::var("PROJECTA_ADMIN_NEW_PASSWORD")
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar("PROJECTA_ADMIN_NEW_PASSWORD".to_string()))?;

    AdminAuthService::new(ctx.storage(), ctx.session())
        .change_password(config.require_password()?, &new)
        .await?;
    tracing::info!("Password changed; update PROJECTA_ADMIN_PASSWORD");
    Ok(())
}

/// Create or update a product.
///
/// # Errors
///
/// Returns the catalog error if the product is invalid or cannot be saved.
pub fn upsert_product(ctx: &Context, edit: ProductEdit) -> Result<()> {
    let editor = CatalogEditor::new(ctx.storage(), ctx.session());

    let mut product = match edit.id {
        Some(id) => {
            let id = ProductId::new(id);
            editor.get_product(&id)?.unwrap_or_else(|| Product {
                id,
                ..Product::draft()
            })
        }
        None => editor.new_product()?,
    };
    if let Some(title) = edit.title {
        product.title = title;
    }
    if let Some(price) = edit.price {
        product.price = price;
    }
    if let Some(desc) = edit.desc {
        product.desc = desc;
    }
    if let Some(bestseller) = edit.bestseller {
        product.bestseller = bestseller;
    }

    let id = product.id.clone();
    match editor.upsert_product(product)? {
        UpsertOutcome::Created { .. } => tracing::info!(%id, "Product created"),
        UpsertOutcome::Updated { .. } => tracing::info!(%id, "Product updated"),
    }
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns the catalog error if the store cannot be saved.
pub fn delete_product(ctx: &Context, id: &str, confirmed: bool) -> Result<()> {
    if !confirmed {
        tracing::warn!("Pass --yes to confirm the deletion");
    }
    let removed = CatalogEditor::new(ctx.storage(), ctx.session())
        .delete_product(&ProductId::new(id), confirmed)?;
    if confirmed && !removed {
        tracing::warn!(id, "No such product");
    }
    Ok(())
}

/// Attach an image file.
///
/// # Errors
///
/// Returns the catalog error if the file cannot be read or the product is unknown.
pub fn add_image(ctx: &Context, id: &str, path: &Path) -> Result<()> {
    let index = CatalogEditor::new(ctx.storage(), ctx.session())
        .add_image_from_file(&ProductId::new(id), path)?;
    tracing::info!(id, index, "Image added");
    Ok(())
}

/// Remove an image.
///
/// # Errors
///
/// Returns the catalog error if the product or index is unknown.
pub fn remove_image(ctx: &Context, id: &str, index: usize) -> Result<()> {
    CatalogEditor::new(ctx.storage(), ctx.session())
        .remove_image(&ProductId::new(id), index)?;
    Ok(())
}

/// Set the mission statement.
///
/// # Errors
///
/// Returns the catalog error if the store cannot be saved.
pub fn update_mission(ctx: &Context, text: &str) -> Result<()> {
    let notice = CatalogEditor::new(ctx.storage(), ctx.session()).update_mission(text)?;
    tracing::info!("{notice}");
    Ok(())
}

/// Export the store to `path`.
///
/// # Errors
///
/// Returns the backup error if the file cannot be written.
pub fn export(ctx: &Context, path: &Path) -> Result<()> {
    BackupService::new(ctx.storage(), ctx.session()).export_to_file(path)?;
    tracing::info!(path = %path.display(), "Store exported");
    Ok(())
}

/// Replace the store from `path`.
///
/// # Errors
///
/// Returns the backup error if the file is unreadable or invalid.
pub fn import(ctx: &Context, path: &Path) -> Result<()> {
    let store = BackupService::new(ctx.storage(), ctx.session()).import_from_file(path)?;
    tracing::info!(products = store.products.len(), "Store imported");
    Ok(())
}
