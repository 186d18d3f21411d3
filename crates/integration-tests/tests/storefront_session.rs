//! Login/logout namespace switching.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use vida_saborosa_core::{MenuItemId, UserId};
use vida_saborosa_integration_tests::{PASSWORD, TestContext, candidate, login};
use vida_saborosa_storefront::error::AppError;
use vida_saborosa_storefront::services::AuthError;
use vida_saborosa_storefront::stores::{StoreKind, resolve_key};

fn user(id: &str) -> UserId {
    UserId::parse(id).unwrap()
}

// =============================================================================
// Namespace Isolation
// =============================================================================

#[test]
fn test_users_never_share_carts() {
    let ctx = TestContext::new();
    ctx.register("a@x.com");
    ctx.register("b@y.com");
    let mut session = ctx.session();

    login(&mut session, "a@x.com");
    session.cart_mut().add_item(candidate(1));

    login(&mut session, "b@y.com");
    assert!(session.cart().items().is_empty());
    session.cart_mut().add_item(candidate(2));

    login(&mut session, "a@x.com");
    assert_eq!(session.cart().quantity_of(MenuItemId::new(1)), 1);
    assert_eq!(session.cart().quantity_of(MenuItemId::new(2)), 0);
}

#[test]
fn test_round_trip_preserves_cart() {
    let ctx = TestContext::new();
    ctx.register("a@x.com");
    ctx.register("b@y.com");
    let mut session = ctx.session();

    login(&mut session, "a@x.com");
    session.cart_mut().add_item(candidate(1));
    session.cart_mut().add_item(candidate(4));
    session.cart_mut().set_quantity(MenuItemId::new(4), 2);
    let before = session.cart().cart().clone();

    login(&mut session, "b@y.com");
    login(&mut session, "a@x.com");
    assert_eq!(session.cart().cart(), &before);
}

#[test]
fn test_distinct_users_distinct_keys() {
    let a = user("a@x.com");
    let b = user("b@y.com");
    for kind in [StoreKind::Cart, StoreKind::Favorites] {
        assert_ne!(resolve_key(kind, Some(&a)), resolve_key(kind, Some(&b)));
        assert_ne!(resolve_key(kind, Some(&a)), resolve_key(kind, None));
    }
}

#[test]
fn test_guest_cart_does_not_leak_into_account() {
    let ctx = TestContext::new();
    ctx.register("a@x.com");
    let mut session = ctx.session();

    session.cart_mut().add_item(candidate(1));
    login(&mut session, "a@x.com");
    assert!(session.cart().items().is_empty());
}

// =============================================================================
// Logout
// =============================================================================

#[test]
fn test_logout_then_guest_is_empty() {
    let ctx = TestContext::new();
    ctx.register("a@x.com");
    let mut session = ctx.session();

    session.cart_mut().add_item(candidate(2));
    login(&mut session, "a@x.com");
    session.cart_mut().add_item(candidate(1));
    session.logout().unwrap();

    let session = ctx.session();
    assert_eq!(session.current_user_id().unwrap(), None);
    assert!(session.cart().items().is_empty());
    assert!(session.favorites().favorited_ids().is_empty());
}

#[test]
fn test_logout_keeps_account_cart() {
    let ctx = TestContext::new();
    ctx.register("a@x.com");
    {
        let mut session = ctx.session();
        login(&mut session, "a@x.com");
        session.cart_mut().add_item(candidate(3));
        session.logout().unwrap();
    }

    let mut session = ctx.session();
    login(&mut session, "a@x.com");
    assert_eq!(session.cart().quantity_of(MenuItemId::new(3)), 1);
}

// =============================================================================
// Across Processes
// =============================================================================

#[test]
fn test_restart_restores_logged_in_user() {
    let ctx = TestContext::new();
    ctx.register("a@x.com");
    {
        let mut session = ctx.session();
        login(&mut session, "a@x.com");
        session.cart_mut().add_item(candidate(1));
    }

    let session = ctx.session();
    assert_eq!(session.current_user_id().unwrap(), Some(user("a@x.com")));
    assert_eq!(session.cart().active_user(), Some(&user("a@x.com")));
    assert_eq!(session.cart().quantity_of(MenuItemId::new(1)), 1);
}

#[test]
fn test_rejected_login() {
    let ctx = TestContext::new();
    ctx.register("a@x.com");
    let mut session = ctx.session();

    assert!(
        !session
            .login("a@x.com", &SecretString::from("senha-errada"))
            .unwrap()
    );
    assert!(
        !session
            .login("nobody@x.com", &SecretString::from(PASSWORD))
            .unwrap()
    );
    assert_eq!(session.current_user_id().unwrap(), None);
    assert_eq!(session.cart().active_user(), None);
}

#[test]
fn test_duplicate_registration() {
    let ctx = TestContext::new();
    ctx.register("a@x.com");
    let session = ctx.session();

    let err = session
        .register(vida_saborosa_storefront::models::NewAccount {
            email: "a@x.com".to_string(),
            full_name: "Outra Pessoa".to_string(),
            username: "outra".to_string(),
            password: SecretString::from(PASSWORD),
        })
        .unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::UserAlreadyExists)));
}
