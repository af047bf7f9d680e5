//! Trend Bazar cart CLI - Inspect and edit a cart persisted on disk.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (repeat to increase its quantity)
//! bazar-cart add --id p1 --name Shirt --price 19.99 --image shirt.png
//!
//! # Change a quantity (0 or less removes the line)
//! bazar-cart set p1 3
//!
//! # Remove a line
//! bazar-cart remove p1
//!
//! # Empty the cart (asks first unless --yes)
//! bazar-cart clear
//!
//! # Show the cart, or the rendered item list
//! bazar-cart show
//! bazar-cart show --html
//!
//! # Print the total
//! bazar-cart total
//! ```
//!
//! The cart lives in `$CART_STORAGE_DIR/$CART_STORAGE_KEY.json`, in the same
//! layout the storefront page keeps in local storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bazar-cart")]
#[command(author, version, about = "Trend Bazar cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: String,

        /// Image URL or path
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Set the quantity of a line (0 or less removes it)
    Set {
        /// Product id
        id: String,

        /// Target quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the cart contents
    Show {
        /// Print the rendered item list markup instead of a summary
        #[arg(long)]
        html: bool,
    },
    /// Print the cart total and item count
    Total,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for the cart crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trendbazar_cart=info,trendbazar_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut session = commands::Session::open()?;
    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            image,
        } => session.add(id, name, price, image)?,
        Commands::Set { id, quantity } => session.set_quantity(id, quantity)?,
        Commands::Remove { id } => session.remove(id)?,
        Commands::Clear { yes } => session.clear(yes)?,
        Commands::Show { html } => session.show(html),
        Commands::Total => session.total(),
    }
    Ok(())
}
