//! Catalog browsing commands.

use std::io::Write;

use vida_saborosa_storefront::StorefrontSession;
use vida_saborosa_storefront::catalog::{self, Category};

use super::CommandError;

/// List restaurants, optionally only those in `category`.
///
/// # Errors
///
/// Returns `CommandError::UnknownCategory` for an unrecognised category.
pub fn restaurants(out: &mut impl Write, category: Option<&str>) -> Result<(), CommandError> {
    let list: Vec<_> = match category {
        Some(name) => catalog::restaurants_in_category(name.parse::<Category>()?),
        None => catalog::restaurants().iter().collect(),
    };

    if list.is_empty() {
        writeln!(out, "No restaurants found.")?;
    }
    for r in list {
        writeln!(
            out,
            "{:>2}  {:<24} ★ {}  {}  entrega {}  {}  {}  [{}]",
            r.id.as_i32(),
            r.name,
            r.rating(),
            r.delivery_time,
            r.delivery_fee().display(),
            r.distance,
            r.price_range,
            r.categories.join(", "),
        )?;
    }
    Ok(())
}

/// Show the menu, marking the active user's favorites.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn menu(out: &mut impl Write, session: &StorefrontSession) -> Result<(), CommandError> {
    for item in catalog::menu() {
        let marker = if session.favorites().is_favorited(item.id) {
            "♥"
        } else {
            " "
        };
        writeln!(
            out,
            "{marker} {:>2}  {:<26} {:>10}  {}",
            item.id.as_i32(),
            item.name,
            item.price().display(),
            item.category,
        )?;
        writeln!(out, "       {}", item.description)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurants_by_category() {
        let mut out = Vec::new();
        restaurants(&mut out, Some("pizza")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Pizzaria Bella Napoli"));
        assert!(text.contains("Pizza Hut"));
        assert!(!text.contains("Burger King"));
    }

    #[test]
    fn test_unknown_category() {
        let mut out = Vec::new();
        let err = restaurants(&mut out, Some("sushi")).unwrap_err();
        assert!(matches!(err, CommandError::UnknownCategory(_)));
    }
}
