//! Inbound wire shapes.
//!
//! The backend emits several encodings for the same promotion fields. Each
//! ambiguous field is a tagged union here, resolved into the canonical model
//! by [`inbound`](super::inbound) and never used past that boundary.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EditorError, EditorResult};

/// A promotion as received from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WirePromotion {
    /// Backend identifier.
    pub id: Option<i64>,
    /// Promotion code.
    pub code: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// `YYYY-MM-DD`, possibly followed by a time part.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, possibly followed by a time part.
    pub end_date: Option<String>,
    /// Priority.
    pub sequence: Option<NumberLike>,
    /// Exclusivity barrier.
    pub skip_to_sequence: Option<NumberLike>,
    /// Breakpoint unit tag.
    pub breakpoint_type: Option<String>,
    /// 1, 2, or the enum name.
    pub scale_method: Option<NumberLike>,
    /// Burning flag.
    pub is_burning_promo: Option<BoolLike>,
    /// Balance code.
    pub based_on_burned: Option<String>,
    /// Administrative lock.
    pub is_closed: Option<BoolLike>,
    /// Payment-term dependency flag.
    pub payment_term_dependent: Option<BoolLike>,
    /// Bare codes or `{code}` objects.
    pub payment_terms: Option<Vec<CodeRef>>,
    /// Bare codes or `{code}` objects.
    pub partner_families: Option<Vec<CodeRef>>,
    /// Rules.
    pub lines: Option<Vec<WireLine>>,
}

/// A promotion line as received from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireLine {
    /// Display name.
    pub name: Option<String>,
    /// Boolean (`true` = product) or three-way tag.
    pub paid_based_on_product: Option<PaidBasedOnWire>,
    /// Generic target code kept for backward compatibility.
    pub paid_code: Option<String>,
    /// Target product.
    pub paid_product_code: Option<String>,
    /// Target family.
    pub paid_product_family_code: Option<String>,
    /// Integer index or string tag.
    pub assortment_type: Option<AssortmentTypeWire>,
    /// Minimum cart total.
    pub minimum_cart_amount: Option<NumberLike>,
    /// Product/family minimums.
    pub assortments: Option<Vec<WireAssortment>>,
    /// Breakpoints.
    pub details: Option<Vec<WireDetail>>,
}

/// An assortment entry as received from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireAssortment {
    /// `true` for a product, `false` for a family.
    pub based_on_product: Option<BoolLike>,
    /// Product or family code.
    pub product_code: Option<String>,
    /// Minimum quantity.
    pub minimum: Option<NumberLike>,
}

/// A breakpoint as received from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireDetail {
    /// Discount tag.
    pub promo_type: Option<String>,
    /// Threshold.
    pub minimum_value: Option<NumberLike>,
    /// Discount magnitude.
    pub amount: Option<NumberLike>,
    /// Repeat flag.
    pub repeating: Option<BoolLike>,
}

/// A code given either bare or inside an object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CodeRef {
    /// `"GROS"`
    Bare(String),
    /// `{ "code": "GROS", "name": "Grossistes" }`
    Object {
        /// The code; other members are ignored.
        #[serde(default)]
        code: Option<String>,
    },
}

impl CodeRef {
    /// Returns the trimmed code, or `None` when it is empty.
    pub fn code(&self) -> Option<&str> {
        let code = match self {
            Self::Bare(code) => code.as_str(),
            Self::Object { code } => code.as_deref().unwrap_or_default(),
        };
        let code = code.trim();
        (!code.is_empty()).then_some(code)
    }
}

/// `paid_based_on_product` as a boolean or a tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PaidBasedOnWire {
    /// `true` for a product, `false` for a family or the cart.
    Flag(bool),
    /// `"cart"`, `"family"`, `"product"` or a stringified boolean.
    Tag(String),
}

/// `assortment_type` as an index or a tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AssortmentTypeWire {
    /// Index into `none, multiple, cart_amount, both`; `1.0` counts as `1`.
    Index(serde_json::Number),
    /// Tag, enum name, or stringified index.
    Tag(String),
}

/// A number that may arrive as a JSON number or as text from a form input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    /// A JSON number.
    Number(serde_json::Number),
    /// A string holding a number; blank means absent.
    Text(String),
}

impl NumberLike {
    fn raw(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    /// Coerces to a decimal. Blank text yields `None`.
    pub fn to_decimal(&self, field: &str) -> EditorResult<Option<Decimal>> {
        let raw = self.raw();
        if raw.is_empty() {
            return Ok(None);
        }
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map(Some)
            .map_err(|_| EditorError::InvalidWireValue {
                field: field.to_string(),
                message: format!("'{raw}' is not a number"),
            })
    }

    /// Coerces to an integer. Fractional values are rejected.
    pub fn to_integer(&self, field: &str) -> EditorResult<Option<i64>> {
        let Some(value) = self.to_decimal(field)? else {
            return Ok(None);
        };
        if !value.fract().is_zero() {
            return Err(EditorError::InvalidWireValue {
                field: field.to_string(),
                message: format!("'{value}' is not an integer"),
            });
        }
        i64::try_from(value.trunc())
            .map(Some)
            .map_err(|_| EditorError::InvalidWireValue {
                field: field.to_string(),
                message: format!("'{value}' is out of range"),
            })
    }
}

/// A boolean that may arrive as `true`, `1`, `"true"`, `"0"`...
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoolLike {
    /// A JSON boolean.
    Flag(bool),
    /// A number; non-zero is true.
    Number(serde_json::Number),
    /// Text from a form input.
    Text(String),
}

impl BoolLike {
    /// Coerces to a boolean.
    pub fn to_bool(&self, field: &str) -> EditorResult<bool> {
        match self {
            Self::Flag(flag) => Ok(*flag),
            Self::Number(n) => Ok(NumberLike::Number(n.clone())
                .to_decimal(field)?
                .is_some_and(|value| !value.is_zero())),
            Self::Text(text) => parse_bool_text(text).ok_or_else(|| EditorError::InvalidWireValue {
                field: field.to_string(),
                message: format!("'{text}' is not a boolean"),
            }),
        }
    }
}

pub(super) fn parse_bool_text(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" | "oui" => Some(true),
        "false" | "0" | "off" | "no" | "non" | "" => Some(false),
        _ => None,
    }
}
