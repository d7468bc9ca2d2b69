//! Command execution and output.

use anyhow::{Context, Result};
use cartsync_client::{CartStore, ClientConfig, HttpCartApi, OrderReceipt};
use cartsync_core::Cart;
use serde_json::json;

use crate::args::{CartCommand, Cli, Command, ConfigCommand};

pub(crate) async fn run(cli: Cli) -> Result<()> {
    let api_path = cli.api_path;
    let config = ClientConfig::load_with(cli.config.clone(), |config| {
        if let Some(api_path) = api_path {
            config.api.api_path = api_path;
        }
    })
    .context("failed to load configuration")?;

    match cli.command {
        Command::Config(command) => run_config(command, &config, cli.config, cli.json),
        Command::Cart(command) => run_cart(command, config, cli.json).await,
    }
}

fn run_config(
    command: ConfigCommand,
    config: &ClientConfig,
    path: Option<std::path::PathBuf>,
    as_json: bool,
) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("base_url: {}", config.api.base_url);
                println!("api_path: {}", config.api.api_path);
                println!("timeout_secs: {}", config.api.timeout_secs);
                println!("connect_timeout_secs: {}", config.api.connect_timeout_secs);
                println!("cart endpoint: {}", config.endpoint("cart")?);
            }
        }
        ConfigCommand::Save => {
            let written = config.save(path)?;
            println!("saved {}", written.display());
        }
    }
    Ok(())
}

async fn run_cart(command: CartCommand, config: ClientConfig, as_json: bool) -> Result<()> {
    let mut store = CartStore::new(HttpCartApi::new(config)?);

    // Local pre-checks (stock, decrement) need the current lines.
    store.fetch_cart().await.context("failed to load cart")?;

    let message = match command {
        CartCommand::Show => None,
        CartCommand::Add { product_id, qty } => Some(store.add_item(&product_id, qty).await?.message),
        CartCommand::Update {
            cart_id,
            product_id,
            qty,
        } => Some(store.update_item(&cart_id, &product_id, qty).await?.message),
        CartCommand::Remove { cart_id } => Some(store.remove_item(&cart_id).await?.message),
        CartCommand::Decrement { cart_id, qty } => {
            Some(store.decrement_item(&cart_id, qty).await?.message)
        }
        CartCommand::Clear => Some(store.clear().await?.message),
        CartCommand::Coupon { code } => Some(store.apply_coupon(&code).await?.message),
        CartCommand::Order(args) => {
            let receipt = store.place_order(&args.into()).await?;
            print_order(&receipt, store.cart(), as_json)?;
            return Ok(());
        }
    };

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "message": message, "cart": store.cart() }))?
        );
    } else {
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            println!("{message}");
        }
        print!("{}", render_cart(store.cart()));
    }
    Ok(())
}

fn print_order(receipt: &OrderReceipt, cart: &Cart, as_json: bool) -> Result<()> {
    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "order": receipt, "cart": cart }))?
        );
        return Ok(());
    }

    println!("order_id: {}", receipt.order_id);
    println!("total: {}", receipt.total);
    if let Some(created_at) = receipt.created_at {
        println!("created_at: {created_at}");
    }
    if !receipt.cleanup_complete {
        println!("warning: the order was placed but some cart lines could not be removed");
        print!("{}", render_cart(cart));
    }
    Ok(())
}

/// Renders the cart as a fixed-width table with a totals footer.
pub(crate) fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "cart is empty\n".to_string();
    }

    let mut out = format!(
        "{:<24} {:<24} {:>5} {:>6} {:>12}\n",
        "CART ID", "PRODUCT", "QTY", "STOCK", "TOTAL"
    );
    for item in &cart.carts {
        out.push_str(&format!(
            "{:<24} {:<24} {:>5} {:>6} {:>12}\n",
            item.id,
            item.product.title,
            item.qty,
            item.product
                .num
                .map_or_else(|| "-".to_string(), |num| num.to_string()),
            item.final_total.to_string()
        ));
    }

    out.push_str(&format!(
        "\nitems: {}  subtotal: {}",
        cart.item_count(),
        cart.total
    ));
    let discount = cart.discount();
    if !discount.is_zero() {
        out.push_str(&format!("  discount: {discount}"));
    }
    out.push_str(&format!("  due: {}\n", cart.total_amount()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_cart() {
        assert_eq!(render_cart(&Cart::empty()), "cart is empty\n");
    }

    #[test]
    fn test_render_cart() {
        let cart: Cart = serde_json::from_value(json!({
            "carts": [{
                "id": "-Ncart1",
                "product_id": "-Noolong",
                "qty": 3,
                "total": 360,
                "final_total": 288,
                "product": {"id": "-Noolong", "title": "Oolong Tea", "price": 120, "num": 5}
            }],
            "total": 360,
            "final_total": 288
        }))
        .unwrap();

        let table = render_cart(&cart);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("CART ID"));
        assert!(lines[1].starts_with("-Ncart1"));
        assert!(lines[1].contains("Oolong Tea"));
        assert!(lines[1].trim_end().ends_with("$288.00"));
        assert_eq!(
            lines.last().copied(),
            Some("items: 3  subtotal: $360.00  discount: $72.00  due: $288.00")
        );
    }

    #[test]
    fn test_render_cart_without_discount_or_stock() {
        let cart: Cart = serde_json::from_value(json!({
            "carts": [{
                "id": "-Ncart2",
                "product_id": "-Nscone",
                "qty": 1,
                "total": 90,
                "final_total": 90,
                "product": {"id": "-Nscone", "title": "Scone", "price": 90}
            }],
            "total": 90,
            "final_total": 90
        }))
        .unwrap();

        let table = render_cart(&cart);
        let lines: Vec<&str> = table.lines().collect();
        let columns: Vec<&str> = lines[1].split_whitespace().collect();
        assert_eq!(columns, vec!["-Ncart2", "Scone", "1", "-", "$90.00"]);
        assert_eq!(lines.last().copied(), Some("items: 1  subtotal: $90.00  due: $90.00"));
    }
}
