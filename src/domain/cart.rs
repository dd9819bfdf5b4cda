use serde::{Deserialize, Serialize};

use super::product::{Product, ProductId};

/// One line of the cart: a product plus its requested quantity.
///
/// The amount is always a positive integer (zero and negative requests are dropped
/// before a line item is ever built) and at most one line item exists per product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    /// Builds the line item for a product entering the cart; the amount starts at 1.
    pub fn first(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    /// Line subtotal (price times amount).
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Total number of units across all line items (the cart badge count).
pub fn cart_units(items: &[CartItem]) -> u32 {
    items.iter().map(|item| item.amount).sum()
}

/// Checkout total across all line items.
pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boot() -> CartItem {
        CartItem {
            id: 1,
            title: "Trail Boot".to_string(),
            price: 139.9,
            image: "trail-boot.jpg".to_string(),
            amount: 2,
        }
    }

    #[test]
    fn first_insertion_starts_at_one_unit() {
        let item = CartItem::first(Product::new(7, "Runner", 99.5, "runner.jpg"));
        assert_eq!(item.id, 7);
        assert_eq!(item.amount, 1);
    }

    #[test]
    fn totals_sum_over_line_items() {
        let items = vec![
            boot(),
            CartItem::first(Product::new(2, "Runner", 100.0, "runner.jpg")),
        ];
        assert_eq!(cart_units(&items), 3);
        assert!((cart_total(&items) - 379.8).abs() < 1e-9);
    }

    #[test]
    fn serialized_shape_matches_the_persisted_slot() {
        let json = serde_json::to_string(&vec![boot()]).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1,"title":"Trail Boot","price":139.9,"image":"trail-boot.jpg","amount":2}]"#
        );
    }
}
