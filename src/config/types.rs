//! Reference-data configuration types.
//!
//! This module contains the file-level structures deserialized from the
//! YAML reference files and the aggregated [`ReferenceCatalog`].

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{BalanceCode, PartnerFamily, PaymentTerm, Product, ProductFamily};

/// Structure of `products.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsConfig {
    /// Known products.
    pub products: Vec<Product>,
}

/// Structure of `product_families.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFamiliesConfig {
    /// Known product families.
    pub product_families: Vec<ProductFamily>,
}

/// Structure of `partner_families.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PartnerFamiliesConfig {
    /// Known partner families.
    pub partner_families: Vec<PartnerFamily>,
}

/// Structure of `payment_terms.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentTermsConfig {
    /// Known payment terms.
    pub payment_terms: Vec<PaymentTerm>,
}

/// Structure of `balance_codes.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceCodesConfig {
    /// Balances a burning promotion may consume.
    pub balance_codes: Vec<BalanceCode>,
}

fn index_by_code<T>(items: Vec<T>, code: impl Fn(&T) -> &str) -> HashMap<String, T> {
    items
        .into_iter()
        .map(|item| (code(&item).to_string(), item))
        .collect()
}

/// All reference data, indexed by code.
///
/// When two entries share a code the last one wins.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    products: HashMap<String, Product>,
    product_families: HashMap<String, ProductFamily>,
    partner_families: HashMap<String, PartnerFamily>,
    payment_terms: HashMap<String, PaymentTerm>,
    balance_codes: HashMap<String, BalanceCode>,
}

impl ReferenceCatalog {
    /// Creates a catalog from its component lists.
    pub fn new(
        products: Vec<Product>,
        product_families: Vec<ProductFamily>,
        partner_families: Vec<PartnerFamily>,
        payment_terms: Vec<PaymentTerm>,
        balance_codes: Vec<BalanceCode>,
    ) -> Self {
        Self {
            products: index_by_code(products, |p| p.code.as_str()),
            product_families: index_by_code(product_families, |f| f.code.as_str()),
            partner_families: index_by_code(partner_families, |f| f.code.as_str()),
            payment_terms: index_by_code(payment_terms, |t| t.code.as_str()),
            balance_codes: index_by_code(balance_codes, |b| b.code.as_str()),
        }
    }

    /// Returns all products.
    pub fn products(&self) -> &HashMap<String, Product> {
        &self.products
    }

    /// Returns all product families.
    pub fn product_families(&self) -> &HashMap<String, ProductFamily> {
        &self.product_families
    }

    /// Returns all partner families.
    pub fn partner_families(&self) -> &HashMap<String, PartnerFamily> {
        &self.partner_families
    }

    /// Returns all payment terms.
    pub fn payment_terms(&self) -> &HashMap<String, PaymentTerm> {
        &self.payment_terms
    }

    /// Returns all balance codes.
    pub fn balance_codes(&self) -> &HashMap<String, BalanceCode> {
        &self.balance_codes
    }
}
