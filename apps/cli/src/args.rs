//! Command-line arguments.
//!
//! Ids issued by the API start with `-N`, so id positionals accept
//! hyphen-leading values.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cartsync_core::{OrderRequest, OrderUser};

#[derive(Debug, Parser)]
#[command(name = "cartsync", about = "Shopping cart client for the commerce API", long_about = None)]
pub(crate) struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// API path segment, overriding the config file
    #[arg(long, global = true, env = "CARTSYNC_API_PATH")]
    pub(crate) api_path: Option<String>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub(crate) json: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    #[command(flatten)]
    Cart(CartCommand),

    /// Inspect or write the client configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Commands that operate on the cart.
#[derive(Debug, Subcommand)]
pub(crate) enum CartCommand {
    /// Show the current cart
    Show,

    /// Add a product to the cart
    Add {
        #[arg(allow_hyphen_values = true)]
        product_id: String,

        #[arg(long, default_value_t = 1)]
        qty: i64,
    },

    /// Set the quantity of a cart line
    Update {
        #[arg(allow_hyphen_values = true)]
        cart_id: String,
        #[arg(allow_hyphen_values = true)]
        product_id: String,
        qty: i64,
    },

    /// Remove a cart line
    Remove {
        #[arg(allow_hyphen_values = true)]
        cart_id: String,
    },

    /// Lower the quantity of a cart line, removing it at zero
    Decrement {
        #[arg(allow_hyphen_values = true)]
        cart_id: String,

        #[arg(long, default_value_t = 1)]
        qty: i64,
    },

    /// Remove every line from the cart
    Clear,

    /// Apply a coupon code
    Coupon { code: String },

    /// Place an order for the cart contents
    Order(OrderArgs),
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    tel: String,

    #[arg(long)]
    address: String,

    /// Note for the shop
    #[arg(long, default_value = "")]
    message: String,
}

impl From<OrderArgs> for OrderRequest {
    fn from(args: OrderArgs) -> Self {
        OrderRequest {
            user: OrderUser {
                name: args.name,
                email: args.email,
                tel: args.tel,
                address: args.address,
            },
            message: args.message,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Save,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_globals() {
        let cli = Cli::try_parse_from(["cartsync", "add", "-Nprod1", "--qty", "3", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Cart(CartCommand::Add { product_id, qty }) => {
                assert_eq!(product_id, "-Nprod1");
                assert_eq!(qty, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_order() {
        let cli = Cli::try_parse_from([
            "cartsync",
            "order",
            "--name",
            "Lin Mei",
            "--email",
            "mei@example.com",
            "--tel",
            "0912345678",
            "--address",
            "Taipei",
        ])
        .unwrap();

        let Command::Cart(CartCommand::Order(args)) = cli.command else {
            panic!("expected order command");
        };
        let order = OrderRequest::from(args);
        assert_eq!(order.user.name, "Lin Mei");
        assert_eq!(order.message, "");
    }
}
