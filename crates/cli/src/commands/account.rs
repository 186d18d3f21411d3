//! Account commands.

use std::io::Write;

use secrecy::SecretString;

use vida_saborosa_storefront::StorefrontSession;
use vida_saborosa_storefront::error::AppError;
use vida_saborosa_storefront::models::NewAccount;
use vida_saborosa_storefront::services::AuthError;

use super::CommandError;

/// Create an account.
///
/// # Errors
///
/// Returns `CommandError::App` if the input is invalid or the email is taken.
pub fn register(
    out: &mut impl Write,
    session: &StorefrontSession,
    email: String,
    full_name: String,
    username: String,
    password: SecretString,
) -> Result<(), CommandError> {
    let user = session.register(NewAccount {
        email,
        full_name,
        username,
        password,
    })?;
    writeln!(out, "Conta criada para {}. Faça login para continuar.", user.email)?;
    Ok(())
}

/// Log in and switch the cart and favorites to the account.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` (wrapped) on a failed login.
pub fn login(
    out: &mut impl Write,
    session: &mut StorefrontSession,
    email: &str,
    password: &SecretString,
) -> Result<(), CommandError> {
    if !session.login(email, password)? {
        return Err(AppError::Auth(AuthError::InvalidCredentials).into());
    }
    writeln!(
        out,
        "Bem-vindo(a), {email}! Itens no carrinho: {}",
        session.cart().total_item_count()
    )?;
    Ok(())
}

/// Log out; the guest cart starts empty.
///
/// # Errors
///
/// Returns `CommandError::App` if the session slot cannot be cleared.
pub fn logout(out: &mut impl Write, session: &mut StorefrontSession) -> Result<(), CommandError> {
    session.logout()?;
    writeln!(out, "Sessão encerrada.")?;
    Ok(())
}

/// Show the logged-in account.
///
/// # Errors
///
/// Returns `CommandError::App` if the session or accounts cannot be read.
pub fn whoami(out: &mut impl Write, session: &StorefrontSession) -> Result<(), CommandError> {
    match session.current_user()? {
        Some(user) => writeln!(
            out,
            "{} ({}) <{}>, membro desde {}",
            user.full_name,
            user.username,
            user.email,
            user.created_at.format("%d/%m/%Y")
        )?,
        None => writeln!(out, "Visitante (não logado)")?,
    }
    Ok(())
}

/// Change name and username of the logged-in account.
///
/// # Errors
///
/// Returns `CommandError::App` if nobody is logged in or a field is blank.
pub fn update_profile(
    out: &mut impl Write,
    session: &StorefrontSession,
    full_name: &str,
    username: &str,
) -> Result<(), CommandError> {
    let user = session.update_profile(full_name, username)?;
    writeln!(out, "Perfil atualizado: {} ({})", user.full_name, user.username)?;
    Ok(())
}

/// Change the logged-in account's password.
///
/// # Errors
///
/// Returns `CommandError::App` if nobody is logged in, `current` is wrong or
/// `new` is too weak.
pub fn change_password(
    out: &mut impl Write,
    session: &StorefrontSession,
    current: &SecretString,
    new: &SecretString,
) -> Result<(), CommandError> {
    session.change_password(current, new)?;
    writeln!(out, "Senha alterada.")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use vida_saborosa_storefront::db::UserRepository;
    use vida_saborosa_storefront::storage::MemoryStorage;

    use super::*;

    fn session(dir: &tempfile::TempDir) -> StorefrontSession {
        let mut session = StorefrontSession::with_storage(
            Arc::new(MemoryStorage::new()),
            UserRepository::new(dir.path().join("users.json")),
        );
        session.restore();
        register(
            &mut Vec::new(),
            &session,
            "ana@example.com".to_string(),
            "Ana Souza".to_string(),
            "ana".to_string(),
            SecretString::from("senha-forte"),
        )
        .unwrap();
        session
    }

    #[test]
    fn test_login_and_whoami() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);

        let mut out = Vec::new();
        login(
            &mut out,
            &mut session,
            "ana@example.com",
            &SecretString::from("senha-forte"),
        )
        .unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Bem-vindo(a), ana@example.com!"));

        let mut out = Vec::new();
        whoami(&mut out, &session).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Ana Souza (ana) <ana@example.com>"));
    }

    #[test]
    fn test_login_wrong_password_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);

        let mut out = Vec::new();
        let err = login(
            &mut out,
            &mut session,
            "ana@example.com",
            &SecretString::from("errada-123"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CommandError::App(AppError::Auth(AuthError::InvalidCredentials))
        ));
        assert!(out.is_empty());
        assert_eq!(session.current_user_id().unwrap(), None);
    }

    #[test]
    fn test_update_profile_requires_login() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);

        let err = update_profile(&mut Vec::new(), &session, "Ana Lima", "analima").unwrap_err();
        assert!(matches!(err, CommandError::App(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_logout_as_guest() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);

        let mut out = Vec::new();
        logout(&mut out, &mut session).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Sessão encerrada.\n");

        let mut out = Vec::new();
        whoami(&mut out, &session).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Visitante (não logado)\n");
    }
}
