//! Cart commands.

use std::io::Write;

use vida_saborosa_core::{MenuItemId, Price};
use vida_saborosa_storefront::StorefrontSession;
use vida_saborosa_storefront::catalog;

use super::CommandError;

/// Print the cart with line and grand totals.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn show(out: &mut impl Write, session: &StorefrontSession) -> Result<(), CommandError> {
    let cart = session.cart();
    if cart.items().is_empty() {
        writeln!(out, "Seu carrinho está vazio.")?;
        return Ok(());
    }

    for line in cart.items() {
        writeln!(
            out,
            "{:>3} x {:<26} {:>10}  {:>10}",
            line.quantity,
            line.name,
            Price::from(line.unit_price).display(),
            Price::from(line.line_total()).display(),
        )?;
    }
    writeln!(
        out,
        "Total ({} itens): {}",
        cart.total_item_count(),
        Price::from(cart.total_price()).display()
    )?;
    Ok(())
}

/// Add one unit of a catalog item.
///
/// # Errors
///
/// Returns `CommandError::UnknownMenuItem` if the id is not on the menu.
pub fn add(
    out: &mut impl Write,
    session: &mut StorefrontSession,
    id: MenuItemId,
) -> Result<(), CommandError> {
    let item = catalog::menu_item(id).ok_or(CommandError::UnknownMenuItem(id))?;
    session.cart_mut().add_item(item.to_candidate()?);
    writeln!(
        out,
        "{} adicionado ({} no carrinho).",
        item.name,
        session.cart().quantity_of(id)
    )?;
    Ok(())
}

/// Remove one unit of an item. Absent items are left alone.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn remove(
    out: &mut impl Write,
    session: &mut StorefrontSession,
    id: MenuItemId,
) -> Result<(), CommandError> {
    session.cart_mut().remove_item(id);
    writeln!(out, "Item {id}: {} no carrinho.", session.cart().quantity_of(id))?;
    Ok(())
}

/// Set an item's quantity; 0 removes it. Absent items are left alone.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn set(
    out: &mut impl Write,
    session: &mut StorefrontSession,
    id: MenuItemId,
    quantity: u32,
) -> Result<(), CommandError> {
    session.cart_mut().set_quantity(id, quantity);
    writeln!(out, "Item {id}: {} no carrinho.", session.cart().quantity_of(id))?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn clear(out: &mut impl Write, session: &mut StorefrontSession) -> Result<(), CommandError> {
    session.cart_mut().clear();
    writeln!(out, "Carrinho esvaziado.")?;
    Ok(())
}
