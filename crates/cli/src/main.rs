//! Vida Saborosa CLI - browse the catalog and manage a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! vs-cli restaurants --category saudavel
//! vs-cli menu
//!
//! # Accounts
//! vs-cli account register -e ana@example.com -n "Ana Souza" -u ana -p 'senha-forte'
//! vs-cli account login -e ana@example.com -p 'senha-forte'
//! vs-cli account logout
//!
//! # Cart and favorites of whoever is logged in (guest otherwise)
//! vs-cli cart add 1
//! vs-cli cart set 1 3
//! vs-cli cart show
//! vs-cli favorites toggle 3
//! ```
//!
//! State lives in `VIDA_DATA_DIR` (default `.vida-saborosa`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vida_saborosa_core::MenuItemId;
use vida_saborosa_storefront::StorefrontSession;
use vida_saborosa_storefront::config::StorefrontConfig;
use vida_saborosa_storefront::error::AppError;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "vs-cli")]
#[command(author, version, about = "Vida Saborosa storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants
    Restaurants {
        /// Only restaurants in this category (hamburguer, pizza, lanche,
        /// saudavel, bebidas, sobremesas)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show the menu
    Menu,
    /// Manage your account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create a new account
    Register {
        #[arg(short, long)]
        email: String,

        /// Full name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log in and switch to your cart
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out and start an empty guest cart
    Logout,
    /// Show who is logged in
    Whoami,
    /// Change name and username
    UpdateProfile {
        /// Full name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        username: String,
    },
    /// Change password
    ChangePassword {
        #[arg(long)]
        current: String,

        #[arg(long)]
        new: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a menu item
    Add { item: MenuItemId },
    /// Remove one unit of a menu item
    Remove { item: MenuItemId },
    /// Set a menu item's quantity (0 removes it)
    Set { item: MenuItemId, quantity: u32 },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorited menu items
    Show,
    /// Favorite or unfavorite a menu item
    Toggle { item: MenuItemId },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn main() {
    let cli = Cli::parse();

    // Load configuration first (needed for Sentry init)
    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for the storefront if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vida_saborosa_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = config
        .map_err(|e| CommandError::from(AppError::from(e)))
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        e.report();
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CommandError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let open_session = || {
        let mut session = StorefrontSession::open(config);
        session.restore();
        session
    };

    match cli.command {
        Commands::Restaurants { category } => {
            commands::catalog::restaurants(&mut out, category.as_deref())?;
        }
        Commands::Menu => commands::catalog::menu(&mut out, &open_session())?,
        Commands::Account { action } => run_account(&mut out, &mut open_session(), action)?,
        Commands::Cart { action } => run_cart(&mut out, &mut open_session(), action)?,
        Commands::Favorites { action } => match action {
            FavoritesAction::Show => commands::favorites::show(&mut out, &open_session())?,
            FavoritesAction::Toggle { item } => {
                commands::favorites::toggle(&mut out, &mut open_session(), item)?;
            }
        },
    }

    out.flush()?;
    Ok(())
}

fn run_account(
    out: &mut impl Write,
    session: &mut StorefrontSession,
    action: AccountAction,
) -> Result<(), CommandError> {
    match action {
        AccountAction::Register {
            email,
            name,
            username,
            password,
        } => commands::account::register(out, session, email, name, username, password.into()),
        AccountAction::Login { email, password } => {
            commands::account::login(out, session, &email, &password.into())
        }
        AccountAction::Logout => commands::account::logout(out, session),
        AccountAction::Whoami => commands::account::whoami(out, session),
        AccountAction::UpdateProfile { name, username } => {
            commands::account::update_profile(out, session, &name, &username)
        }
        AccountAction::ChangePassword { current, new } => {
            commands::account::change_password(out, session, &current.into(), &new.into())
        }
    }
}

fn run_cart(
    out: &mut impl Write,
    session: &mut StorefrontSession,
    action: CartAction,
) -> Result<(), CommandError> {
    match action {
        CartAction::Show => commands::cart::show(out, session),
        CartAction::Add { item } => commands::cart::add(out, session, item),
        CartAction::Remove { item } => commands::cart::remove(out, session, item),
        CartAction::Set { item, quantity } => commands::cart::set(out, session, item, quantity),
        CartAction::Clear => commands::cart::clear(out, session),
    }
}
