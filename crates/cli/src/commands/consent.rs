//! Cookie consent commands.

use projecta_storefront::db::{ConsentRepository, RepositoryError};

use super::Context;

/// Print the stored choice.
pub fn show(ctx: &Context) {
    let consent = ConsentRepository::new(ctx.storage()).get();

    #[allow(clippy::print_stdout)]
    {
        match consent {
            Some(consent) => println!("{consent}"),
            None => println!("not chosen"),
        }
    }
}

/// Accept cookies.
///
/// # Errors
///
/// Returns an error if the write is rejected.
pub fn accept(ctx: &Context) -> Result<(), RepositoryError> {
    ConsentRepository::new(ctx.storage()).accept()
}

/// Reject cookies.
///
/// # Errors
///
/// Returns an error if the write is rejected.
pub fn reject(ctx: &Context) -> Result<(), RepositoryError> {
    ConsentRepository::new(ctx.storage()).reject()
}
