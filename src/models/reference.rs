//! Read-only reference data consumed by the editor.
//!
//! Products, product families, partner families, payment terms and balance
//! codes are owned by the backend; the editor only looks codes up in them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Current unit price.
    pub price: Decimal,
    /// Units in stock.
    #[serde(default)]
    pub stock: Decimal,
}

/// A group of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFamily {
    /// Family code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Number of products in the family.
    #[serde(default)]
    pub product_count: u32,
}

/// A named group of partner accounts used for targeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerFamily {
    /// Family code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional filter expression selecting the partners.
    #[serde(default)]
    pub condition: Option<String>,
    /// Number of partners in the family.
    #[serde(default)]
    pub partner_count: u32,
}

/// A payment term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerm {
    /// Payment-term code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Paid in cash.
    #[serde(default)]
    pub is_cash: bool,
    /// Paid on credit.
    #[serde(default)]
    pub is_credit: bool,
    /// Paid by bank transfer.
    #[serde(default)]
    pub is_bank_transfer: bool,
}

/// A balance a burning promotion can be redeemed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCode {
    /// Balance code, uppercase.
    pub code: String,
    /// Display name.
    pub name: String,
}
