//! Static restaurant and menu catalog.
//!
//! The storefront has no product backend; restaurants and the sample menu are
//! compiled in. Money is kept in centavos and rating in tenths of a star so
//! the tables stay `const`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use vida_saborosa_core::{CartCandidate, CartError, MenuItemId, Price, RestaurantId};

/// A restaurant listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: &'static str,
    rating_tenths: u8,
    pub delivery_time: &'static str,
    delivery_fee_cents: i64,
    pub distance: &'static str,
    pub categories: &'static [&'static str],
    pub price_range: &'static str,
}

impl Restaurant {
    /// Average rating out of 5.
    #[must_use]
    pub fn rating(&self) -> Decimal {
        Decimal::new(i64::from(self.rating_tenths), 1)
    }

    #[must_use]
    pub fn delivery_fee(&self) -> Price {
        Price::from_cents(self.delivery_fee_cents)
    }

    /// Whether any of the restaurant's tags matches `category`.
    #[must_use]
    pub fn serves(&self, category: Category) -> bool {
        self.categories
            .iter()
            .any(|tag| fold(tag) == category.slug())
    }
}

/// A dish on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: &'static str,
    pub description: &'static str,
    price_cents: i64,
    pub image: &'static str,
    pub category: &'static str,
}

impl MenuItem {
    #[must_use]
    pub fn price(&self) -> Price {
        Price::from_cents(self.price_cents)
    }

    /// What the cart needs to add one unit of this dish.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the dish has no name or a negative price.
    pub fn to_candidate(&self) -> Result<CartCandidate, CartError> {
        CartCandidate::new(
            self.id,
            self.name,
            self.price().amount,
            Some(self.image.to_string()),
        )
    }
}

/// Browsable restaurant categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hamburguer,
    Pizza,
    Lanche,
    Saudavel,
    Bebidas,
    Sobremesas,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Hamburguer,
        Self::Pizza,
        Self::Lanche,
        Self::Saudavel,
        Self::Bebidas,
        Self::Sobremesas,
    ];

    /// ASCII lowercase identifier, e.g. `saudavel`.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Hamburguer => "hamburguer",
            Self::Pizza => "pizza",
            Self::Lanche => "lanche",
            Self::Saudavel => "saudavel",
            Self::Bebidas => "bebidas",
            Self::Sobremesas => "sobremesas",
        }
    }

    /// Display name, e.g. `Saudável`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hamburguer => "Hambúrguer",
            Self::Pizza => "Pizza",
            Self::Lanche => "Lanche",
            Self::Saudavel => "Saudável",
            Self::Bebidas => "Bebidas",
            Self::Sobremesas => "Sobremesas",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The category name matched none of [`Category::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts slugs and labels in any case, with or without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s.trim());
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == folded)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Lowercase and strip the Portuguese diacritics used in category names.
fn fold(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

const RESTAURANTS: &[Restaurant] = &[
    Restaurant {
        id: RestaurantId::new(1),
        name: "Burger King",
        rating_tenths: 45,
        delivery_time: "25-35 min",
        delivery_fee_cents: 599,
        distance: "2.5 km",
        categories: &["Hambúrguer", "Fast Food"],
        price_range: "$$",
    },
    Restaurant {
        id: RestaurantId::new(2),
        name: "McDonald's",
        rating_tenths: 43,
        delivery_time: "20-30 min",
        delivery_fee_cents: 499,
        distance: "1.8 km",
        categories: &["Hambúrguer", "Fast Food"],
        price_range: "$$",
    },
    Restaurant {
        id: RestaurantId::new(3),
        name: "Sabor Caseiro",
        rating_tenths: 48,
        delivery_time: "30-45 min",
        delivery_fee_cents: 699,
        distance: "3.2 km",
        categories: &["Hambúrguer", "Caseiro"],
        price_range: "$$$",
    },
    Restaurant {
        id: RestaurantId::new(4),
        name: "Pizzaria Bella Napoli",
        rating_tenths: 47,
        delivery_time: "35-50 min",
        delivery_fee_cents: 799,
        distance: "4.0 km",
        categories: &["Pizza", "Italiana"],
        price_range: "$$$",
    },
    Restaurant {
        id: RestaurantId::new(5),
        name: "Sushi Express",
        rating_tenths: 46,
        delivery_time: "40-55 min",
        delivery_fee_cents: 899,
        distance: "5.1 km",
        categories: &["Saudável", "Japonesa"],
        price_range: "$$$",
    },
    Restaurant {
        id: RestaurantId::new(6),
        name: "Bebidas & Cia",
        rating_tenths: 44,
        delivery_time: "15-25 min",
        delivery_fee_cents: 399,
        distance: "1.5 km",
        categories: &["Bebidas", "Conveniência"],
        price_range: "$$",
    },
    Restaurant {
        id: RestaurantId::new(7),
        name: "Lanchonete do Zé",
        rating_tenths: 42,
        delivery_time: "20-30 min",
        delivery_fee_cents: 499,
        distance: "2.0 km",
        categories: &["Lanche", "Salgados"],
        price_range: "$",
    },
    Restaurant {
        id: RestaurantId::new(8),
        name: "Salada Gourmet",
        rating_tenths: 45,
        delivery_time: "25-35 min",
        delivery_fee_cents: 599,
        distance: "3.0 km",
        categories: &["Saudável", "Saladas"],
        price_range: "$$$",
    },
    Restaurant {
        id: RestaurantId::new(9),
        name: "Doce Sabor",
        rating_tenths: 47,
        delivery_time: "20-30 min",
        delivery_fee_cents: 499,
        distance: "2.2 km",
        categories: &["Sobremesas", "Doces"],
        price_range: "$$",
    },
    Restaurant {
        id: RestaurantId::new(10),
        name: "Pizza Hut",
        rating_tenths: 44,
        delivery_time: "30-45 min",
        delivery_fee_cents: 699,
        distance: "3.5 km",
        categories: &["Pizza", "Fast Food"],
        price_range: "$$$",
    },
];

const MENU: &[MenuItem] = &[
    MenuItem {
        id: MenuItemId::new(1),
        name: "Hambúrguer Clássico",
        description: "Hambúrguer de carne bovina, queijo cheddar, alface, tomate e molho especial.",
        price_cents: 2590,
        image: "/images/cheeseburger_duplo-thumb.webp",
        category: "Hambúrgueres",
    },
    MenuItem {
        id: MenuItemId::new(2),
        name: "Batata Frita Grande",
        description: "Porção grande de batatas fritas crocantes com sal e temperos especiais.",
        price_cents: 1590,
        image: "/images/batata.webp",
        category: "Acompanhamentos",
    },
    MenuItem {
        id: MenuItemId::new(3),
        name: "Milk Shake de Chocolate",
        description: "Milk shake cremoso de chocolate com calda e chantilly.",
        price_cents: 1850,
        image: "/images/milkshake_chocolate.webp",
        category: "Bebidas",
    },
    MenuItem {
        id: MenuItemId::new(4),
        name: "Combo Família",
        description: "4 hambúrgueres, 2 batatas grandes, 4 refrigerantes e 2 sobremesas.",
        price_cents: 8990,
        image: "/images/combo_familia.webp",
        category: "Combos",
    },
];

/// All restaurants in listing order.
#[must_use]
pub const fn restaurants() -> &'static [Restaurant] {
    RESTAURANTS
}

/// Restaurants tagged with `category`.
#[must_use]
pub fn restaurants_in_category(category: Category) -> Vec<&'static Restaurant> {
    RESTAURANTS.iter().filter(|r| r.serves(category)).collect()
}

#[must_use]
pub fn restaurant(id: RestaurantId) -> Option<&'static Restaurant> {
    RESTAURANTS.iter().find(|r| r.id == id)
}

/// The menu shown on every restaurant page.
#[must_use]
pub const fn menu() -> &'static [MenuItem] {
    MENU
}

#[must_use]
pub fn menu_item(id: MenuItemId) -> Option<&'static MenuItem> {
    MENU.iter().find(|item| item.id == id)
}
