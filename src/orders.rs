//! Orders

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::fields::{self, ValidationError, ValidationErrors};

/// Lifecycle states an order moves through.
///
/// Serialized as its lowercase name; parsing is exact-match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed but not yet confirmed
    #[default]
    Pending,

    /// Confirmed and awaiting dispatch
    Confirmed,

    /// Handed to the carrier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Cancelled before delivery
    Cancelled,
}

impl OrderStatus {
    /// Every recognised status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The lowercase name used in serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    fn allowed() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    /// Exact-match lookup against the allow-list.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| {
                ValidationError::new(
                    "status",
                    format!("must be one of: {} (got {raw:?})", Self::allowed()),
                )
            })
    }
}

/// One product line within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineItemDraft")]
pub struct LineItem {
    /// Identifier of the ordered product
    pub product_id: i64,

    /// Units ordered, strictly positive
    pub quantity: i64,

    /// Price per unit at the time of ordering
    pub unit_price: Decimal,
}

impl LineItem {
    /// Quantity times unit price, at full precision.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Unvalidated line-item input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDraft {
    /// Identifier of the ordered product
    pub product_id: i64,

    /// Units ordered
    pub quantity: i64,

    /// Price per unit
    pub unit_price: Decimal,
}

impl From<LineItem> for LineItemDraft {
    fn from(item: LineItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

impl TryFrom<LineItemDraft> for LineItem {
    type Error = ValidationErrors;

    fn try_from(draft: LineItemDraft) -> Result<Self, Self::Error> {
        let quantity = fields::positive_count("quantity", draft.quantity)?;

        Ok(Self {
            product_id: draft.product_id,
            quantity,
            unit_price: draft.unit_price,
        })
    }
}

/// A validated customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderDraft")]
pub struct Order {
    /// Order identifier
    pub id: i64,

    /// Identifier of the ordering user
    pub user_id: i64,

    /// Ordered sequence of line items
    pub items: SmallVec<[LineItem; 4]>,

    /// When the order was placed
    pub created_at: DateTime<Utc>,

    /// Current lifecycle state
    pub status: OrderStatus,
}

impl Order {
    /// Sum of every line total, at full precision.
    ///
    /// Unit prices are stored already rounded to cents, so the sum is exact;
    /// round only for display.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Re-run every field rule after direct field edits.
    ///
    /// # Errors
    ///
    /// Returns every violated rule as a [`ValidationErrors`].
    pub fn revalidated(self) -> Result<Self, ValidationErrors> {
        Self::try_from(OrderDraft::from(self))
    }
}

/// Unvalidated order input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Order identifier
    pub id: i64,

    /// Identifier of the ordering user
    pub user_id: i64,

    /// Proposed line items
    #[serde(default)]
    pub items: SmallVec<[LineItemDraft; 4]>,

    /// When the order was placed
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Proposed lifecycle state, matched exactly
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    OrderStatus::Pending.as_str().to_owned()
}

impl OrderDraft {
    /// Empty draft stamped with the current time and the default status.
    #[must_use]
    pub fn new(id: i64, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            items: SmallVec::new(),
            created_at: Utc::now(),
            status: default_status(),
        }
    }
}

impl From<Order> for OrderDraft {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            items: order.items.into_iter().map(LineItemDraft::from).collect(),
            created_at: order.created_at,
            status: order.status.as_str().to_owned(),
        }
    }
}

impl TryFrom<OrderDraft> for Order {
    type Error = ValidationErrors;

    fn try_from(draft: OrderDraft) -> Result<Self, Self::Error> {
        let status = draft.status.parse::<OrderStatus>();

        let mut items: SmallVec<[LineItem; 4]> = SmallVec::with_capacity(draft.items.len());
        let mut item_errors = ValidationErrors::new();

        for (index, item) in draft.items.into_iter().enumerate() {
            match LineItem::try_from(item) {
                Ok(item) => items.push(item),
                Err(errors) => item_errors.merge(errors.nested(format_args!("items[{index}]"))),
            }
        }

        match (status, item_errors.is_empty()) {
            (Ok(status), true) => Ok(Self {
                id: draft.id,
                user_id: draft.user_id,
                items,
                created_at: draft.created_at,
                status,
            }),
            (status, _) => Err(status.err().into_iter().chain(item_errors).collect()),
        }
    }
}
