//! Favorites commands.

use std::io::Write;

use vida_saborosa_core::MenuItemId;
use vida_saborosa_storefront::StorefrontSession;
use vida_saborosa_storefront::catalog;

use super::CommandError;

/// List favorited items.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn show(out: &mut impl Write, session: &StorefrontSession) -> Result<(), CommandError> {
    let ids = session.favorites().favorited_ids();
    if ids.is_empty() {
        writeln!(out, "Nenhum favorito ainda.")?;
    }
    for id in ids {
        match catalog::menu_item(id) {
            Some(item) => writeln!(out, "♥ {:>2}  {}", id.as_i32(), item.name)?,
            None => writeln!(out, "♥ {:>2}  (item indisponível)", id.as_i32())?,
        }
    }
    Ok(())
}

/// Favorite or unfavorite a catalog item.
///
/// # Errors
///
/// Returns `CommandError::UnknownMenuItem` if the id is not on the menu.
pub fn toggle(
    out: &mut impl Write,
    session: &mut StorefrontSession,
    id: MenuItemId,
) -> Result<(), CommandError> {
    let item = catalog::menu_item(id).ok_or(CommandError::UnknownMenuItem(id))?;
    if session.favorites_mut().toggle(id) {
        writeln!(out, "{} adicionado aos favoritos.", item.name)?;
    } else {
        writeln!(out, "{} removido dos favoritos.", item.name)?;
    }
    Ok(())
}
