//! Projecta CLI - Shop and admin operations over a file-backed store.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! projecta products list
//!
//! # Add two bands to the cart
//! projecta cart add --product p1 --quantity 2 --band-color Black --engraving Anna
//!
//! # Create the admin credential (password from PROJECTA_ADMIN_PASSWORD)
//! projecta admin setup --email owner@example.com
//!
//! # Back up the store
//! projecta admin export projecta_data.json
//! ```
//!
//! # Commands
//!
//! - `store` - Show or reset the store record
//! - `products` - Browse the catalog
//! - `cart` - Manage the cart
//! - `contact` - Submit and list contact messages
//! - `consent` - Cookie banner choice
//! - `admin` - Credential setup, catalog editing, export/import

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use projecta_admin::error::AdminError;
use projecta_core::Price;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "projecta")]
#[command(author, version, about = "Projecta shop and admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or reset the store record
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Contact form
    Contact {
        #[command(subcommand)]
        action: ContactAction,
    },
    /// Cookie banner choice
    Consent {
        #[command(subcommand)]
        action: ConsentAction,
    },
    /// Admin panel (password from `PROJECTA_ADMIN_PASSWORD`)
    Admin {
        /// Admin email (default: `PROJECTA_ADMIN_EMAIL`)
        #[arg(short, long, global = true)]
        email: Option<String>,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Print catalog and site copy
    Show,
    /// Delete the store record so defaults are seeded again
    Reset,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List all products
    List,
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and total
    List,
    /// Add a product to the cart
    Add {
        /// Product id
        #[arg(short, long)]
        product: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        #[arg(long, default_value = "")]
        diamond_form: String,

        #[arg(long, default_value = "")]
        diamond_color: String,

        #[arg(long, default_value = "")]
        band_color: String,

        /// Engraving text (max 20 characters)
        #[arg(long, default_value = "")]
        engraving: String,
    },
    /// Set the quantity of a line
    Update {
        /// Line index as shown by `cart list`
        index: usize,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Line index as shown by `cart list`
        index: usize,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum ContactAction {
    /// Send a message
    Submit {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        message: String,
    },
    /// List stored messages
    List,
}

#[derive(Subcommand)]
enum ConsentAction {
    /// Show the stored choice
    Show,
    /// Accept cookies
    Accept,
    /// Reject cookies
    Reject,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create the admin credential if none exists
    Setup,
    /// Change the admin password (new password from `PROJECTA_ADMIN_NEW_PASSWORD`)
    Passwd,
    /// Edit products
    Product {
        #[command(subcommand)]
        action: AdminProductAction,
    },
    /// Set the mission statement
    Mission {
        text: String,
    },
    /// Export the store as JSON
    Export {
        #[arg(default_value = projecta_admin::services::backup::EXPORT_FILE_NAME)]
        path: PathBuf,
    },
    /// Replace the store from a JSON export
    Import {
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum AdminProductAction {
    /// Create or update a product
    Upsert {
        /// Product id (omit to create a new product)
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Price in euros, e.g. 129 or 129,90
        #[arg(long)]
        price: Option<Price>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        bestseller: Option<bool>,
    },
    /// Delete a product
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Attach an image file as a data URL
    AddImage {
        id: String,
        path: PathBuf,
    },
    /// Remove an image by index
    RemoveImage {
        id: String,
        index: usize,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("projecta=info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Store { action } => match action {
            StoreAction::Show => commands::store::show(&ctx),
            StoreAction::Reset => commands::store::reset(&ctx)?,
        },
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list(&ctx),
            ProductsAction::Show { id } => commands::products::show(&ctx, &id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&ctx),
            CartAction::Add {
                product,
                quantity,
                diamond_form,
                diamond_color,
                band_color,
                engraving,
            } => commands::cart::add(
                &ctx,
                &product,
                quantity,
                commands::cart::Attributes {
                    diamond_form,
                    diamond_color,
                    band_color,
                    engraving,
                },
            )?,
            CartAction::Update { index, quantity } => {
                commands::cart::update(&ctx, index, quantity)?;
            }
            CartAction::Remove { index } => commands::cart::remove(&ctx, index)?,
            CartAction::Clear => commands::cart::clear(&ctx)?,
        },
        Commands::Contact { action } => match action {
            ContactAction::Submit {
                name,
                email,
                message,
            } => commands::contact::submit(&ctx, name, email, message)?,
            ContactAction::List => commands::contact::list(&ctx),
        },
        Commands::Consent { action } => match action {
            ConsentAction::Show => commands::consent::show(&ctx),
            ConsentAction::Accept => commands::consent::accept(&ctx)?,
            ConsentAction::Reject => commands::consent::reject(&ctx)?,
        },
        Commands::Admin { email, action } => {
            run_admin(&ctx, email.as_deref(), action)
                .await
                .map_err(|e| e.user_message())?;
        }
    }
    Ok(())
}

async fn run_admin(
    ctx: &commands::Context,
    email: Option<&str>,
    action: AdminAction,
) -> Result<(), AdminError> {
    use commands::admin;

    if let AdminAction::Setup = action {
        return admin::setup(ctx, email).await;
    }

    admin::login(ctx, email).await?;
    match action {
        AdminAction::Setup => {}
        AdminAction::Passwd => admin::change_password(ctx).await?,
        AdminAction::Product { action } => match action {
            AdminProductAction::Upsert {
                id,
                title,
                price,
                desc,
                bestseller,
            } => admin::upsert_product(
                ctx,
                admin::ProductEdit {
                    id,
                    title,
                    price,
                    desc,
                    bestseller,
                },
            )?,
            AdminProductAction::Delete { id, yes } => admin::delete_product(ctx, &id, yes)?,
            AdminProductAction::AddImage { id, path } => admin::add_image(ctx, &id, &path)?,
            AdminProductAction::RemoveImage { id, index } => {
                admin::remove_image(ctx, &id, index)?;
            }
        },
        AdminAction::Mission { text } => admin::update_mission(ctx, &text)?,
        AdminAction::Export { path } => admin::export(ctx, &path)?,
        AdminAction::Import { path } => admin::import(ctx, &path)?,
    }
    Ok(())
}
