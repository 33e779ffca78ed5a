//! Emporium prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    config::{AppConfig, AppConfigDraft, ConfigError},
    fields::{ValidationError, ValidationErrors},
    orders::{LineItem, LineItemDraft, Order, OrderDraft, OrderStatus},
    products::{Category, Product, ProductDraft},
    receipt::{OrderReceipt, ReceiptError},
    users::{StoredUser, StoredUserDraft, User, UserDraft, UserUpdate, UserUpdateDraft},
};
