//! Plain-text rendering of catalogue, product detail and cart screens.

use crate::adapters::image::ResolvedImage;
use crate::core::detail::LoadState;
use crate::domain::model::{Cart, Product};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

pub fn render_product_list(products: &[&Product], category: Option<&str>) -> String {
    let mut out = String::new();
    match category {
        Some(category) => {
            let _ = writeln!(out, "Products in '{}' ({})", category, products.len());
        }
        None => {
            let _ = writeln!(out, "All products ({})", products.len());
        }
    }

    if products.is_empty() {
        out.push_str("No products found.\n");
        return out;
    }

    for product in products {
        let _ = writeln!(
            out,
            "#{:<4} {:>9}  ★ {:.1}  {}  [{}]",
            product.id,
            format_price(product.price),
            product.rating.rate,
            product.title,
            product.category
        );
    }
    out
}

pub fn render_categories(categories: &[String]) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "- {}", category);
    }
    out
}

/// Renders the detail screen for every load state. Not-found and failed
/// loads render navigation and retry hints instead of an error.
pub fn render_product_detail(state: &LoadState, image: Option<&ResolvedImage>) -> String {
    let mut out = String::new();
    match state {
        LoadState::Loading => out.push_str("Loading product...\n"),
        LoadState::NotFound(id) => {
            let _ = writeln!(out, "Product Not Found");
            let _ = writeln!(out, "The product you are looking for does not exist (id {}).", id);
            out.push_str(&navigation_hints());
        }
        LoadState::Failed(message) => {
            let _ = writeln!(out, "Could not load product");
            let _ = writeln!(out, "{}", message);
            out.push_str("  Retry:           run the same command again\n");
            out.push_str(&navigation_hints());
        }
        LoadState::Loaded(product) => {
            let _ = writeln!(out, "Home / Products / {}", product.category);
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", product.title);
            let _ = writeln!(out, "{}", product.category);
            let _ = writeln!(
                out,
                "{}  ★ {} ({} reviews)",
                format_price(product.price),
                product.rating.rate,
                product.rating.count
            );
            let image_url = image.map(|i| i.url.as_str()).unwrap_or(&product.image);
            let _ = writeln!(out, "Image: {}", image_url);
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", product.description);
        }
    }
    out
}

fn navigation_hints() -> String {
    "  Go Back:         return to the previous screen\n  Browse Products: shopswift products\n"
        .to_string()
}

pub fn render_cart(cart: &Cart) -> String {
    let mut out = String::new();
    if cart.is_empty() {
        out.push_str("Your cart is empty.\n");
    } else {
        for line in &cart.lines {
            let _ = writeln!(
                out,
                "{:>3} x {}  @ {}  = {}",
                line.quantity,
                line.product.title,
                format_price(line.product.price),
                format_price(line.line_total())
            );
        }
    }
    let _ = writeln!(
        out,
        "Items: {}  Total: {}",
        cart.total_items(),
        format_price(cart.total_price())
    );
    out
}
