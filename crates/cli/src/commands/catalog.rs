//! Catalog browsing commands.

use versiq_core::ProductId;
use versiq_store::ProductQuery;

use super::{AppContext, CommandError};

/// List products matching `query`, one row per product.
pub fn list(ctx: &AppContext, query: &ProductQuery) {
    let products = query.run(ctx.catalog.as_ref());
    if products.is_empty() {
        println!("No products match the selected filters.");
        return;
    }

    println!("{:>4}  {:<28} {:>10}  {:<10} {:<9} {}", "ID", "NAME", "PRICE", "COLOR", "PATTERN", "ARRIVAL");
    for product in products {
        println!(
            "{:>4}  {:<28} {:>10}  {:<10} {:<9} {}",
            product.id,
            product.name,
            format!("₹{}", product.price),
            product.color,
            product.pattern,
            product.arrival.label(),
        );
    }
}

/// Show one product in full.
///
/// # Errors
///
/// Returns [`CommandError::UnknownProduct`] if the id is not in the catalog.
pub fn show(ctx: &AppContext, id: i64) -> Result<(), CommandError> {
    let product = ctx
        .catalog
        .find(ProductId::new(id))
        .ok_or(CommandError::UnknownProduct(id))?;

    println!("{} (#{})", product.name, product.id);
    println!("  Price:    ₹{}", product.price);
    println!("  Color:    {}", product.color);
    println!("  Pattern:  {}", product.pattern);
    println!("  Arrival:  {}", product.arrival.label());
    if !product.category.is_empty() {
        println!("  Category: {}", product.category);
    }
    if !product.sizes.is_empty() {
        println!("  Sizes:    {}", product.sizes.join(", "));
    }
    for image in &product.images {
        println!("  Image:    {image}");
    }
    Ok(())
}
