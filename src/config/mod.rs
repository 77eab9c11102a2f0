//! Reference-data loading for the promotion editor.
//!
//! This module loads the products, product families, partner families,
//! payment terms and balance codes the editor validates codes against.
//!
//! # Example
//!
//! ```no_run
//! use promotion_editor::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/reference").unwrap();
//! println!("{} products", config.catalog().products().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BalanceCodesConfig, PartnerFamiliesConfig, PaymentTermsConfig, ProductFamiliesConfig, ProductsConfig,
    ReferenceCatalog,
};
