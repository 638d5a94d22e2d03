//! Wishlist commands.

use versiq_core::ProductId;

use super::{AppContext, CommandError};

/// Toggle a product on the current user's wishlist.
///
/// # Errors
///
/// Returns [`CommandError::UnknownProduct`] for an id not in the catalog.
pub fn toggle(ctx: &mut AppContext, product_id: i64) -> Result<(), CommandError> {
    let product = ctx
        .catalog
        .find(ProductId::new(product_id))
        .ok_or(CommandError::UnknownProduct(product_id))?;

    if ctx.session.current_user().is_none() {
        println!("Sign in to save products to your wishlist.");
        return Ok(());
    }

    if ctx.session.toggle_wishlist(product.id) {
        tracing::info!("Added {} to the wishlist", product.name);
    } else {
        tracing::info!("Removed {} from the wishlist", product.name);
    }
    Ok(())
}

/// Print the current user's saved products.
pub fn show(ctx: &AppContext) {
    if ctx.session.current_user().is_none() {
        println!("Sign in to view your wishlist.");
        return;
    }

    let products = ctx.session.wishlist_products();
    if products.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }

    for product in products {
        println!("{:>4}  {:<28} ₹{}", product.id, product.name, product.price);
    }
}
