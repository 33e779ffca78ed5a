//! Integration test covering the full storefront record set.
//!
//! This test builds a realistic catalogue and order from messy input and
//! checks the normalised values and the derived totals end to end.
//!
//! Expected order arithmetic:
//!
//! 1. Wireless Mouse, 2 × 29.99 = 59.98
//! 2. Mechanical Keyboard, 1 × 99.99 = 99.99
//!
//! Expected order total: 59.98 + 99.99 = 159.97

use rust_decimal::Decimal;
use smallvec::smallvec;
use testresult::TestResult;

use emporium::prelude::*;

fn catalogue() -> Result<Vec<Product>, ValidationErrors> {
    [
        ProductDraft {
            id: 1,
            name: "Wireless Mouse".to_owned(),
            price: Decimal::new(29_990, 3),
            category: "ELECTRONICS".to_owned(),
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
    .collect()
}

#[test]
fn test_storefront_end_to_end() -> TestResult {
    let user = User::try_from(UserDraft {
        id: 1,
        name: "  juan carlos  ".to_owned(),
        email: "juan@example.com".to_owned(),
        phone: Some("+1 (555) 123-4567".to_owned()),
        age: Some(25),
        active: true,
    })?;

    assert_eq!(user.name, "Juan Carlos");

    let catalogue = catalogue()?;

    let mouse = catalogue.first();
    assert_eq!(mouse.map(|p| p.category), Some(Category::Electronics));
    assert_eq!(mouse.map(|p| p.price), Some(Decimal::new(2999, 2)));

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

    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.total(), Decimal::new(15_997, 2));

    let mut rendered = Vec::new();
    OrderReceipt::new(&order, &catalogue).write_to(&mut rendered)?;
    let receipt = String::from_utf8(rendered)?;

    assert!(receipt.contains("159.97"), "receipt should show the total");
    assert!(
        receipt.contains("Wireless Mouse"),
        "receipt should resolve product names from the catalogue"
    );

    Ok(())
}

#[test]
fn test_update_flow_preserves_validity() -> TestResult {
    let user = User::try_from(UserDraft {
        id: 2,
        name: "ana maría".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: None,
        age: None,
        active: true,
    })?;

    let update: UserUpdate = serde_json::from_str(r#"{"name": "  ana lucía  ", "age": 31}"#)?;
    let updated = user.with_update(&update);

    assert_eq!(updated.name, "Ana Lucía");
    assert_eq!(updated.age, Some(31));
    assert!(updated.clone().revalidated().is_ok());
    assert_eq!(updated.email, "ana@example.com");

    Ok(())
}

#[test]
fn test_whitespace_only_update_name_is_rejected() {
    let result: Result<UserUpdate, _> = serde_json::from_str(r#"{"name": " \t "}"#);

    assert!(result.is_err(), "a blank name must not validate");
}

#[test]
fn test_construction_is_atomic() {
    let result = Order::try_from(OrderDraft {
        items: smallvec![LineItemDraft {
            product_id: 1,
            quantity: 0,
            unit_price: Decimal::ONE,
        }],
        status: "nonsense".to_owned(),
        ..OrderDraft::new(9, 9)
    });

    let errors = result.err().unwrap_or_default();

    assert_eq!(errors.len(), 2, "both violations should be reported");
}
