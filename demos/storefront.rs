//! Storefront Example
//!
//! This example walks through the full record set: configuration, users,
//! a product catalogue, and an order rendered as a receipt. Invalid input
//! is attempted on purpose to show aggregated validation errors.
//!
//! Use `-c` to load a YAML configuration file
//! Use `-j` to print each record as JSON after validation
//!
//! Run with: `cargo run --example storefront`

use std::io;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use smallvec::smallvec;

use emporium::{
    config::{AppConfig, AppConfigDraft},
    orders::{LineItemDraft, Order, OrderDraft},
    products::{Product, ProductDraft},
    receipt::OrderReceipt,
    users::{User, UserDraft},
    utils::DemoArgs,
};

/// Storefront Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    let config = match args.config.as_deref() {
        Some(path) => AppConfig::from_yaml_file(path)?,
        None => AppConfig::try_from(AppConfigDraft::new("postgres://localhost/emporium"))?,
    };

    println!(
        "{} listening on port {} ({} connections max)\n",
        config.app_name, config.port, config.max_connections
    );

    let user = User::try_from(UserDraft {
        id: 1,
        name: "  juan carlos  ".to_owned(),
        email: "juan@example.com".to_owned(),
        phone: Some("+1 (555) 123-4567".to_owned()),
        age: Some(25),
        active: true,
    })?;

    println!("Registered {} <{}>", user.name, user.email);

    let catalogue: Vec<Product> = [
        ProductDraft {
            id: 1,
            name: "Wireless Mouse".to_owned(),
            price: Decimal::new(2999, 2),
            category: "Electronics".to_owned(),
            stock: 40,
            description: None,
        },
        ProductDraft {
            id: 2,
            name: "Mechanical Keyboard".to_owned(),
            price: Decimal::new(9999, 2),
            category: "electronics".to_owned(),
            stock: 15,
            description: Some("Tenkeyless, brown switches".to_owned()),
        },
    ]
    .into_iter()
    .map(Product::try_from)
    .collect::<Result<_, _>>()?;

    let rejected = Product::try_from(ProductDraft {
        id: 3,
        name: "Broken Listing".to_owned(),
        price: Decimal::new(-50, 0),
        category: "groceries".to_owned(),
        stock: -5,
        description: None,
    });

    if let Err(errors) = rejected {
        println!("Rejected product listing: {errors}\n");
    }

    let order = Order::try_from(OrderDraft {
        items: smallvec![
            LineItemDraft {
                product_id: 1,
                quantity: 2,
                unit_price: Decimal::new(2999, 2),
            },
            LineItemDraft {
                product_id: 2,
                quantity: 1,
                unit_price: Decimal::new(9999, 2),
            },
        ],
        status: "confirmed".to_owned(),
        ..OrderDraft::new(1, user.id)
    })?;

    OrderReceipt::new(&order, &catalogue).write_to(io::stdout())?;

    if args.json {
        println!("\nuser: {}", serde_json::to_string_pretty(&user)?);
        println!("order: {}", serde_json::to_string_pretty(&order)?);

        let round_tripped: Order = serde_json::from_str(&serde_json::to_string(&order)?)?;
        println!(
            "\norder round-trips losslessly: {}",
            round_tripped == order
        );
    }

    Ok(())
}
