//! Cart commands.

use rust_decimal::Decimal;

use versiq_core::ProductId;

use super::{AppContext, CommandError};

/// Flat shipping fee applied at checkout, matching the storefront.
fn flat_shipping() -> Decimal {
    Decimal::new(50, 0)
}

/// Add `quantity` of a product in `size` to the cart.
///
/// Size validation happens here, at the input surface; the store itself
/// accepts any size string.
///
/// # Errors
///
/// Returns [`CommandError::UnknownProduct`] for an id not in the catalog and
/// [`CommandError::InvalidSize`] for a size the product is not offered in.
pub fn add(ctx: &mut AppContext, product_id: i64, size: &str, quantity: u32) -> Result<(), CommandError> {
    let product = ctx
        .catalog
        .find(ProductId::new(product_id))
        .ok_or(CommandError::UnknownProduct(product_id))?;

    if !product.has_size(size) {
        return Err(CommandError::InvalidSize {
            product: product_id,
            size: size.to_owned(),
        });
    }

    ctx.session.cart_mut().add_to_cart(&product, size, quantity);
    tracing::info!("Added {quantity} x {} ({size}) to the cart", product.name);
    Ok(())
}

/// Print the cart lines and totals.
pub fn show(ctx: &AppContext) {
    let cart = ctx.session.cart();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in cart.items() {
        println!(
            "{:<8} {:<28} size {:<4} qty {:>3}  ₹{} each  ₹{}",
            line.cart_item_id,
            line.product.name,
            line.size,
            line.quantity,
            line.price_at_add,
            line.line_total(),
        );
    }

    let totals = cart.totals();
    println!();
    println!("{} item(s), subtotal ₹{}", totals.total_items, totals.subtotal);
}

/// Set the quantity for a cart line (0 removes it).
pub fn update(ctx: &mut AppContext, cart_item_id: &str, quantity: u32) {
    ctx.session.cart_mut().update_quantity(cart_item_id, quantity);
    tracing::info!("Updated {cart_item_id} to quantity {quantity}");
}

/// Remove a cart line.
pub fn remove(ctx: &mut AppContext, cart_item_id: &str) {
    ctx.session.cart_mut().remove_from_cart(cart_item_id);
    tracing::info!("Removed {cart_item_id} from the cart");
}

/// Empty the cart.
pub fn clear(ctx: &mut AppContext) {
    ctx.session.cart_mut().clear();
    tracing::info!("Cart cleared");
}

/// Print the order summary the checkout page shows.
pub fn checkout(ctx: &AppContext) {
    let summary = ctx.session.cart().checkout_summary(flat_shipping());
    println!("Subtotal  ₹{}", summary.subtotal);
    println!("Shipping  ₹{}", summary.shipping);
    println!("Total     ₹{}", summary.total);
}
