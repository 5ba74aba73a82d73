//! Static boutique catalog — products, categories, lookbook and the demo bag.
//!
//! Everything here is compiled-in data; there is no server-driven catalog.

use std::fmt;
use std::str::FromStr;

use super::cart::CartLine;

// ───────────────────────────────────────── materials ─────────

/// Metal a piece can be ordered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Gold,
    Silver,
    RoseGold,
    Platinum,
}

impl Material {
    pub const ALL: &[Material] = &[
        Material::Gold,
        Material::Silver,
        Material::RoseGold,
        Material::Platinum,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Material::Gold => "Gold",
            Material::Silver => "Silver",
            Material::RoseGold => "Rose Gold",
            Material::Platinum => "Platinum",
        }
    }

    /// Stable identifier (`"rose-gold"` etc.).
    pub fn key(self) -> &'static str {
        match self {
            Material::Gold => "gold",
            Material::Silver => "silver",
            Material::RoseGold => "rose-gold",
            Material::Platinum => "platinum",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Material {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Material::ALL
            .iter()
            .copied()
            .find(|m| m.key() == s)
            .ok_or_else(|| format!("unknown material `{s}`"))
    }
}

// ───────────────────────────────────────── categories ────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Rings,
    Necklaces,
    Earrings,
    Bracelets,
}

impl Category {
    /// Display order of the category grid.
    pub const ALL: &[Category] = &[
        Category::Rings,
        Category::Necklaces,
        Category::Earrings,
        Category::Bracelets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Rings => "Rings",
            Category::Necklaces => "Necklaces",
            Category::Earrings => "Earrings",
            Category::Bracelets => "Bracelets",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Category::Rings => "Symbols of eternal devotion",
            Category::Necklaces => "Grace that frames the heart",
            Category::Earrings => "Light that dances with you",
            Category::Bracelets => "Elegance around every gesture",
        }
    }

    /// Number of catalog pieces in this category.
    pub fn piece_count(self) -> usize {
        PRODUCTS.iter().filter(|p| p.category == self).count()
    }

    /// Spin speed (radians per second) of the gem viewer for this category.
    pub fn spin_speed(self) -> f64 {
        match self {
            Category::Rings => 0.5,
            Category::Necklaces => 0.3,
            Category::Earrings => 0.4,
            Category::Bracelets => 0.3,
        }
    }
}

// ───────────────────────────────────────── products ──────────

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub price: u64,
    pub materials: &'static [Material],
    pub description: &'static str,
    pub featured: bool,
}

impl Product {
    /// A one-piece cart line for this product in `material`.
    pub fn to_line(&self, material: Material) -> CartLine {
        CartLine::new(self.id, self.name, self.price, 1, material)
    }
}

pub static PRODUCTS: &[Product] = &[
    Product {
        id: "1",
        name: "Eternal Solitaire",
        category: Category::Rings,
        price: 12_500,
        materials: &[Material::Gold, Material::Platinum, Material::RoseGold],
        description: "A timeless diamond solitaire",
        featured: true,
    },
    Product {
        id: "2",
        name: "Celestial Hoops",
        category: Category::Earrings,
        price: 4_200,
        materials: &[Material::Gold, Material::Silver],
        description: "Pavé hoops that catch every glimmer",
        featured: true,
    },
    Product {
        id: "3",
        name: "Midnight Pendant",
        category: Category::Necklaces,
        price: 8_400,
        materials: &[Material::Gold, Material::Silver, Material::RoseGold],
        description: "A deep sapphire embraced by diamonds",
        featured: true,
    },
    Product {
        id: "4",
        name: "Aurora Tennis Bracelet",
        category: Category::Bracelets,
        price: 18_900,
        materials: &[Material::Platinum, Material::Gold],
        description: "An unbroken line of brilliant-cut light",
        featured: false,
    },
    Product {
        id: "5",
        name: "Rosé Eternity Band",
        category: Category::Rings,
        price: 6_750,
        materials: &[Material::RoseGold, Material::Gold],
        description: "Diamonds set all the way around",
        featured: false,
    },
    Product {
        id: "6",
        name: "Pearl Cascade Drops",
        category: Category::Earrings,
        price: 3_100,
        materials: &[Material::Silver, Material::Gold],
        description: "South Sea pearls on a fall of diamonds",
        featured: false,
    },
    Product {
        id: "7",
        name: "Heirloom Locket",
        category: Category::Necklaces,
        price: 5_600,
        materials: &[Material::Gold, Material::RoseGold],
        description: "Hand-engraved, made to be passed on",
        featured: false,
    },
    Product {
        id: "8",
        name: "Serpent Cuff",
        category: Category::Bracelets,
        price: 9_800,
        materials: &[Material::Gold, Material::Platinum],
        description: "Sculpted scales with emerald eyes",
        featured: false,
    },
];

/// Look up a product by id.
pub fn product(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Featured pieces, in catalog order.
pub fn featured() -> impl Iterator<Item = &'static Product> {
    PRODUCTS.iter().filter(|p| p.featured)
}

// ───────────────────────────────────────── lookbook ──────────

#[derive(Debug, Clone, PartialEq)]
pub struct LookbookItem {
    pub id: &'static str,
    pub title: &'static str,
    pub products: &'static [&'static str],
}

pub static LOOKBOOK: &[LookbookItem] = &[
    LookbookItem {
        id: "evening",
        title: "Evening Radiance",
        products: &["1", "3", "4"],
    },
    LookbookItem {
        id: "garden",
        title: "Garden Party",
        products: &["2", "5"],
    },
    LookbookItem {
        id: "heritage",
        title: "Modern Heritage",
        products: &["6", "7", "8"],
    },
];

// ───────────────────────────────────────── demo bag ──────────

/// Lines the cart starts with.
pub fn demo_cart_lines() -> Vec<CartLine> {
    ["1", "3"]
        .iter()
        .filter_map(|id| product(id))
        .map(|p| p.to_line(Material::Gold))
        .collect()
}

// ───────────────────────────────────────── formatting ────────

/// Format a whole-number price as US dollars with thousands separators.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_prices_with_separators() {
        assert_eq!(format_price(0), "$0");
        assert_eq!(format_price(500), "$500");
        assert_eq!(format_price(12_500), "$12,500");
        assert_eq!(format_price(1_234_567), "$1,234,567");
    }

    #[test]
    fn category_counts_follow_products() {
        let total: usize = Category::ALL.iter().map(|c| c.piece_count()).sum();
        assert_eq!(total, PRODUCTS.len());
        assert_eq!(Category::Rings.piece_count(), 2);
    }

    #[test]
    fn demo_bag_holds_solitaire_and_pendant() {
        let lines = demo_cart_lines();
        let ids: Vec<&str> = lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(lines.iter().all(|l| l.quantity == 1));
        assert!(lines.iter().all(|l| l.selected_material == Material::Gold));
    }

    #[test]
    fn lookbook_references_known_products() {
        for item in LOOKBOOK {
            assert!(item.products.iter().all(|id| product(id).is_some()), "{}", item.id);
        }
    }

    #[test]
    fn material_keys_parse_back() {
        for &m in Material::ALL {
            assert_eq!(m.key().parse::<Material>(), Ok(m));
        }
        assert!("bronze".parse::<Material>().is_err());
    }
}
