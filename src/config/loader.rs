//! Reference-data loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the reference
//! catalog from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EditorError, EditorResult};
use crate::models::{BalanceCode, PartnerFamily, PaymentTerm, Product, ProductFamily};

use super::types::{
    BalanceCodesConfig, PartnerFamiliesConfig, PaymentTermsConfig, ProductFamiliesConfig, ProductsConfig,
    ReferenceCatalog,
};

/// Loads and provides access to reference data.
///
/// # Directory Structure
///
/// ```text
/// config/reference/
/// ├── products.yaml
/// ├── product_families.yaml
/// ├── partner_families.yaml
/// ├── payment_terms.yaml
/// └── balance_codes.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use promotion_editor::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/reference")?;
/// let family = loader.get_product_family("FAM1")?;
/// println!("Family: {}", family.name);
/// # Ok::<(), promotion_editor::error::EditorError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    catalog: ReferenceCatalog,
}

impl ConfigLoader {
    /// Loads every reference file from the specified directory.
    ///
    /// Returns an error if any file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EditorResult<Self> {
        let path = path.as_ref();

        let products = Self::load_yaml::<ProductsConfig>(&path.join("products.yaml"))?;
        let product_families =
            Self::load_yaml::<ProductFamiliesConfig>(&path.join("product_families.yaml"))?;
        let partner_families =
            Self::load_yaml::<PartnerFamiliesConfig>(&path.join("partner_families.yaml"))?;
        let payment_terms =
            Self::load_yaml::<PaymentTermsConfig>(&path.join("payment_terms.yaml"))?;
        let balance_codes =
            Self::load_yaml::<BalanceCodesConfig>(&path.join("balance_codes.yaml"))?;

        debug!(
            products = products.products.len(),
            product_families = product_families.product_families.len(),
            partner_families = partner_families.partner_families.len(),
            payment_terms = payment_terms.payment_terms.len(),
            balance_codes = balance_codes.balance_codes.len(),
            "Loaded reference data"
        );

        Ok(Self::from_catalog(ReferenceCatalog::new(
            products.products,
            product_families.product_families,
            partner_families.partner_families,
            payment_terms.payment_terms,
            balance_codes.balance_codes,
        )))
    }

    /// Wraps an already-built catalog.
    pub fn from_catalog(catalog: ReferenceCatalog) -> Self {
        Self { catalog }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EditorResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EditorError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EditorError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying catalog.
    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Gets a product by its code.
    pub fn get_product(&self, code: &str) -> EditorResult<&Product> {
        self.catalog
            .products()
            .get(code)
            .ok_or_else(|| not_found("product", code))
    }

    /// Gets a product family by its code.
    pub fn get_product_family(&self, code: &str) -> EditorResult<&ProductFamily> {
        self.catalog
            .product_families()
            .get(code)
            .ok_or_else(|| not_found("product family", code))
    }

    /// Gets a partner family by its code.
    pub fn get_partner_family(&self, code: &str) -> EditorResult<&PartnerFamily> {
        self.catalog
            .partner_families()
            .get(code)
            .ok_or_else(|| not_found("partner family", code))
    }

    /// Gets a payment term by its code.
    pub fn get_payment_term(&self, code: &str) -> EditorResult<&PaymentTerm> {
        self.catalog
            .payment_terms()
            .get(code)
            .ok_or_else(|| not_found("payment term", code))
    }

    /// Gets a balance code, ignoring case and surrounding whitespace.
    pub fn get_balance_code(&self, code: &str) -> EditorResult<&BalanceCode> {
        self.catalog
            .balance_codes()
            .get(code.trim().to_uppercase().as_str())
            .ok_or_else(|| not_found("balance code", code))
    }
}

fn not_found(kind: &'static str, code: &str) -> EditorError {
    EditorError::ReferenceNotFound {
        kind,
        code: code.to_string(),
    }
}
