//! Versiq CLI - drives the storefront state layer from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! versiq catalog list --pattern Solid --sort price-asc
//! versiq catalog show 3
//!
//! # Fill the cart as a guest
//! versiq cart add 3 --size M --quantity 2
//! versiq cart show
//!
//! # Sign up; the guest cart folds into the signed-in session
//! versiq auth signup -e asha@example.com -p secret -n Asha
//!
//! # Save favorites (signed-in only)
//! versiq wishlist toggle 3
//! versiq wishlist show
//! ```
//!
//! # Commands
//!
//! - `catalog` - List and inspect products
//! - `cart` - Add, update, remove, clear, checkout summary
//! - `wishlist` - Toggle and list saved products
//! - `auth` - Sign up, log in, Google demo sign-in, log out, whoami
//!
//! State lives in `VERSIQ_DATA_DIR` (default `.versiq`), one JSON file per
//! storage key, so flows can span multiple invocations the way they span
//! page loads in the browser.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use secrecy::SecretString;

use versiq_core::Arrival;
use versiq_store::{ProductQuery, SortOrder};

mod commands;
mod config;

use commands::CommandError;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "versiq")]
#[command(author, version, about = "Versiq storefront state tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the signed-in account
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered and sorted
    List {
        /// Keep only these patterns (repeatable)
        #[arg(long)]
        pattern: Vec<String>,

        /// Keep only these colors (repeatable)
        #[arg(long)]
        color: Vec<String>,

        /// Keep only these arrival buckets (repeatable)
        #[arg(long, value_enum)]
        arrival: Vec<ArrivalArg>,

        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        /// Inclusive lower price bound
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Inclusive upper price bound
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort order
        #[arg(long, value_enum, default_value = "newest")]
        sort: SortArg,
    },
    /// Show one product in full
    Show {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: i64,

        /// Size to add (must be offered for the product)
        #[arg(short, long)]
        size: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Print the cart lines and totals
    Show,
    /// Set the quantity of a cart line (0 removes it)
    Update {
        /// Cart line id, e.g. 3-M
        cart_item_id: String,

        /// New absolute quantity
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Cart line id, e.g. 3-M
        cart_item_id: String,
    },
    /// Empty the cart
    Clear,
    /// Print the order summary with shipping
    Checkout,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Toggle a product on the wishlist
    Toggle {
        /// Product id
        product_id: i64,
    },
    /// Print the saved products
    Show,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Create an account and sign in
    Signup {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (required, never verified by the demo stub)
        #[arg(short, long)]
        password: String,

        /// Display name (defaults to the email local part)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Sign in to the stored account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign in with the Google demo flow
    Google,
    /// Sign out
    Logout,
    /// Print the current identity
    Whoami,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArrivalArg {
    New,
    Old,
}

impl From<ArrivalArg> for Arrival {
    fn from(arg: ArrivalArg) -> Self {
        match arg {
            ArrivalArg::New => Self::New,
            ArrivalArg::Old => Self::Old,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Newest,
    PriceAsc,
    PriceDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => Self::Newest,
            SortArg::PriceAsc => Self::PriceAsc,
            SortArg::PriceDesc => Self::PriceDesc,
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();

    // Default to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "versiq_cli=info,versiq_store=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = CliConfig::from_env();

    if let Err(e) = run(cli, &config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &CliConfig) -> Result<(), CommandError> {
    let mut ctx = commands::open_context(config)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                pattern,
                color,
                arrival,
                search,
                min_price,
                max_price,
                sort,
            } => {
                let query = ProductQuery {
                    patterns: pattern,
                    colors: color,
                    arrivals: arrival.into_iter().map(Arrival::from).collect(),
                    search,
                    min_price,
                    max_price,
                    sort: sort.into(),
                };
                commands::catalog::list(&ctx, &query);
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                size,
                quantity,
            } => commands::cart::add(&mut ctx, product_id, &size, quantity)?,
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Update {
                cart_item_id,
                quantity,
            } => commands::cart::update(&mut ctx, &cart_item_id, quantity),
            CartAction::Remove { cart_item_id } => commands::cart::remove(&mut ctx, &cart_item_id),
            CartAction::Clear => commands::cart::clear(&mut ctx),
            CartAction::Checkout => commands::cart::checkout(&ctx),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Toggle { product_id } => {
                commands::wishlist::toggle(&mut ctx, product_id)?;
            }
            WishlistAction::Show => commands::wishlist::show(&ctx),
        },
        Commands::Auth { action } => match action {
            AuthAction::Signup {
                email,
                password,
                name,
            } => commands::auth::signup(
                &mut ctx,
                &email,
                SecretString::from(password),
                name.as_deref(),
            )?,
            AuthAction::Login { email, password } => {
                commands::auth::login(&mut ctx, &email, SecretString::from(password))?;
            }
            AuthAction::Google => commands::auth::google(&mut ctx)?,
            AuthAction::Logout => commands::auth::logout(&mut ctx),
            AuthAction::Whoami => commands::auth::whoami(&ctx),
        },
    }
    Ok(())
}
