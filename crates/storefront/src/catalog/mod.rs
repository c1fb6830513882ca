//! Product catalog.
//!
//! The catalog is the single canonical set of products the storefront
//! serves. It is defined once at build time, owned by
//! [`crate::state::AppState`], and never mutated - pages and API consumers
//! all see the same data instead of carrying their own divergent copies.

pub mod filter;

use serde::Serialize;

use clearcart_core::{Price, ProductId};

pub use filter::filter;

/// A product in the catalog.
///
/// Immutable in-memory record; defined at build time, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Image reference (static asset path or served file URL).
    pub image: String,
    pub price: Price,
    pub original_price: Option<Price>,
    /// Star rating, 0.0 to 5.0.
    pub rating: f32,
    /// Number of customer reviews.
    pub reviews: u32,
    /// Display string for the estimated delivery date.
    pub delivery_date: String,
    pub prime_eligible: bool,
    pub sponsored: bool,
    /// Merchandising badge (e.g., "Overall Pick").
    pub badge: Option<String>,
    /// Curated match tags, distinct from the title text.
    pub keywords: Vec<String>,
}

/// The canonical product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Filter the catalog against a free-text query.
    ///
    /// See [`filter::filter`] for the matching rules.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        filter(query, &self.products)
    }

    /// The built-in catalog shipped with the storefront.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            product(
                1,
                "100 PCS Clear PET Plastic Storage Boxes Transparent Present Box Empty Container's Rectangle Cube Candy Chocolate...",
                "/images/products/storage-boxes.jpg",
                2399,
                None,
                4.3,
                582,
                "Wed, Oct 8",
                Some("Overall Pick"),
                false,
                &["storage", "boxes", "plastic", "container", "transparent", "clear"],
            ),
            product(
                2,
                "Selfckf 200 Pieces Acrylic Keychain Blanks Acrylic Transparent Pendants Includes Circle Heart Square Rectangle...",
                "/images/products/acrylic-keychain-1.jpg",
                2199,
                None,
                4.5,
                847,
                "Wed, Oct 8",
                None,
                false,
                &["keychain", "acrylic", "pendant", "transparent", "selfckf"],
            ),
            product(
                3,
                "Selfckf 200 Pieces Acrylic Keychain Blanks Acrylic Transparent Pendants Includes Circle Heart Square Rectangle...",
                "/images/products/acrylic-keychain-2.jpg",
                2199,
                None,
                4.5,
                847,
                "Wed, Oct 8",
                None,
                false,
                &["keychain", "acrylic", "pendant", "transparent", "selfckf"],
            ),
            product(
                4,
                "SPACE Seating Big and Tall Dual Layer AirGrid Back with Mesh Seat, Adjustable Flooring and Gunmetal Finish Base Drafting...",
                "/images/products/office-chair.jpg",
                30514,
                None,
                4.0,
                159,
                "Wed, Oct 8",
                None,
                true,
                &["chair", "office", "seating", "mesh", "adjustable", "space"],
            ),
            product(
                5,
                "Selfckf 30 Pieces Believe Bell Ornament for Christmas Tree Sleigh Bell Ribbon Xmas Party Home Decoration 1.5 inc...",
                "/images/products/christmas-bells.jpg",
                1111,
                Some(1805),
                4.8,
                10,
                "Thu, Oct 10",
                None,
                false,
                &["christmas", "bell", "ornament", "decoration", "xmas", "selfckf"],
            ),
            product(
                6,
                "2 Pcs Clear Paint Organizer With Paint Brush Holder 2 Layers Acrylic Paint Organizer Paint Storage Rack Craft Paint...",
                "/images/products/paint-organizer.jpg",
                2299,
                None,
                4.6,
                91,
                "Wed, Oct 8",
                None,
                false,
                &["paint", "organizer", "brush", "storage", "craft", "acrylic"],
            ),
            product(
                7,
                "Steamer Board for Clothes With Ironing Glove, 35' 17.5' Hanging Ironing Pad, Steam Iron Stand With Pad for Steaming Clothes",
                "/images/products/steamer-board.jpg",
                2740,
                None,
                4.3,
                289,
                "Wed, Oct 8",
                None,
                false,
                &["steamer", "iron", "clothes", "board", "ironing", "steam"],
            ),
            product(
                8,
                "Selfckf 24 Pieces Christmas Booze Balls Fillable Booze Tree Ornaments Clear Plastic Round Christmas Ornaments Pendant...",
                "/images/products/christmas-ornaments.jpg",
                1890,
                None,
                4.4,
                44,
                "Wed, Oct 8",
                None,
                false,
                &["christmas", "ornaments", "booze", "tree", "decoration", "selfckf"],
            ),
            product(
                9,
                "Laptop Stand Adjustable Aluminum Laptop Holder for Desk Portable Laptop Riser Compatible with MacBook Pro Air...",
                "/images/products/laptop-stand.jpg",
                2999,
                Some(3999),
                4.7,
                1205,
                "Wed, Oct 8",
                None,
                false,
                &["laptop", "stand", "aluminum", "adjustable", "macbook", "desk"],
            ),
            product(
                10,
                "Wireless Bluetooth Headphones Over Ear, Hi-Fi Stereo Foldable Wireless Headset with Microphone...",
                "/images/products/headphones.jpg",
                4999,
                Some(7999),
                4.4,
                892,
                "Wed, Oct 8",
                None,
                false,
                &["headphones", "wireless", "bluetooth", "stereo", "microphone", "audio"],
            ),
            product(
                11,
                "Gaming Mouse RGB Backlit 6 Buttons Programmable Gaming Mice with Adjustable DPI for PC Laptop Computer...",
                "/images/products/gaming-mouse.jpg",
                1999,
                None,
                4.6,
                456,
                "Wed, Oct 8",
                None,
                false,
                &["mouse", "gaming", "rgb", "programmable", "computer", "laptop"],
            ),
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Shorthand constructor for builtin catalog entries.
#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    title: &str,
    image: &str,
    price_cents: i64,
    original_price_cents: Option<i64>,
    rating: f32,
    reviews: u32,
    delivery_date: &str,
    badge: Option<&str>,
    sponsored: bool,
    keywords: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        image: image.to_string(),
        price: Price::usd(price_cents),
        original_price: original_price_cents.map(Price::usd),
        rating,
        reviews,
        delivery_date: delivery_date.to_string(),
        prime_eligible: true,
        sponsored,
        badge: badge.map(str::to_string),
        keywords: keywords.iter().map(|&k| k.to_string()).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_stable() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.all().len(), 11);

        // Catalog order is insertion order
        let ids: Vec<i32> = catalog.all().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::builtin();
        let chair = catalog.get(ProductId::new(4)).unwrap();
        assert!(chair.sponsored);
        assert_eq!(chair.price.display(), "$305.14");
        assert!(catalog.get(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let catalog = Catalog::builtin();
        let json = serde_json::to_value(catalog.get(ProductId::new(1)).unwrap()).unwrap();
        assert_eq!(json["badge"], "Overall Pick");
        assert_eq!(json["primeEligible"], true);
        assert_eq!(json["deliveryDate"], "Wed, Oct 8");
        assert!(json["originalPrice"].is_null());
    }
}
