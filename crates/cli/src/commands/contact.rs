//! Contact form commands.

use projecta_storefront::error::AppError;
use projecta_storefront::services::contact::{ContactForm, ContactService};

use super::Context;

/// Submit a message.
///
/// # Errors
///
/// Returns the contact error for blank fields or a failed write.
pub fn submit(ctx: &Context, name: String, email: String, msg: String) -> Result<(), AppError> {
    let notice = ContactService::new(ctx.storage()).submit(&ContactForm { name, email, msg })?;
    tracing::info!("{notice}");
    Ok(())
}

/// Print stored messages.
pub fn list(ctx: &Context) {
    let messages = ContactService::new(ctx.storage()).list();

    #[allow(clippy::print_stdout)]
    {
        if messages.is_empty() {
            println!("No messages.");
        }
        for message in messages {
            println!(
                "{} | {} <{}>\n  {}",
                message.date.to_rfc3339(),
                message.name,
                message.email,
                message.msg
            );
        }
    }
}
