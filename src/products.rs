//! Products

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fields::{self, ValidationError, ValidationErrors};

/// Product category allow-list.
///
/// Serialized as its lowercase name; parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Consumer electronics
    Electronics,

    /// Clothing and apparel
    Clothing,

    /// Books and print media
    Books,

    /// Household goods
    Home,

    /// Sporting goods
    Sports,
}

impl Category {
    /// Every recognised category, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Electronics,
        Self::Clothing,
        Self::Books,
        Self::Home,
        Self::Sports,
    ];

    /// The lowercase name used in serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Books => "books",
            Self::Home => "home",
            Self::Sports => "sports",
        }
    }

    fn allowed() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Case-insensitive lookup against the allow-list.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_lowercase();

        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| {
                ValidationError::new(
                    "category",
                    format!("must be one of: {} (got {raw:?})", Self::allowed()),
                )
            })
    }
}

/// A validated product record.
///
/// The stored price is strictly positive and rounded to cents; the category
/// is a member of [`Category::ALL`]; stock is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductDraft")]
pub struct Product {
    /// Product identifier
    pub id: i64,

    /// Product name
    pub name: String,

    /// Unit price, rounded to cents
    pub price: Decimal,

    /// Catalogue category
    pub category: Category,

    /// Units in stock
    pub stock: i64,

    /// Optional long-form description
    pub description: Option<String>,
}

impl Product {
    /// Re-run every field rule after direct field edits.
    ///
    /// # Errors
    ///
    /// Returns every violated rule as a [`ValidationErrors`].
    pub fn revalidated(self) -> Result<Self, ValidationErrors> {
        Self::try_from(ProductDraft::from(self))
    }
}

/// Unvalidated product input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Product identifier
    pub id: i64,

    /// Product name
    pub name: String,

    /// Proposed unit price
    pub price: Decimal,

    /// Proposed category name, matched case-insensitively
    pub category: String,

    /// Units in stock
    #[serde(default)]
    pub stock: i64,

    /// Optional long-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            category: product.category.as_str().to_owned(),
            stock: product.stock,
            description: product.description,
        }
    }
}

impl TryFrom<ProductDraft> for Product {
    type Error = ValidationErrors;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        let price = fields::positive_price("price", draft.price);
        let category = draft.category.parse::<Category>();
        let stock = fields::non_negative_count("stock", draft.stock);

        match (price, category, stock) {
            (Ok(price), Ok(category), Ok(stock)) => Ok(Self {
                id: draft.id,
                name: draft.name,
                price,
                category,
                stock,
                description: draft.description,
            }),
            (price, category, stock) => Err([price.err(), category.err(), stock.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }
}
