//! Canonical enumerations of the promotion model.
//!
//! Each concept has exactly one enum here. The wire encodings (integer
//! indices, lowercase tags, booleans) are adapters on these types and never
//! leak into the rest of the model.

use serde::{Deserialize, Serialize};

/// Sequence value conventionally used to make a promotion fully exclusive.
pub const FULLY_EXCLUSIVE_SEQUENCE: i64 = 999;

/// Unit in which every breakpoint threshold of a promotion is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakpointType {
    /// Thresholds count purchased units.
    #[default]
    #[serde(alias = "quantity")]
    QuantityBased,
    /// Thresholds are amounts of money.
    #[serde(alias = "value")]
    ValueBased,
    /// Thresholds count promotional units.
    #[serde(alias = "promo_unit")]
    PromoUnitBased,
}

impl BreakpointType {
    /// Returns the wire tag of this breakpoint type.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::QuantityBased => "QUANTITY_BASED",
            Self::ValueBased => "VALUE_BASED",
            Self::PromoUnitBased => "PROMO_UNIT_BASED",
        }
    }

    /// Parses a breakpoint type from its canonical or short tag.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "QUANTITY_BASED" | "QUANTITY" => Some(Self::QuantityBased),
            "VALUE_BASED" | "VALUE" => Some(Self::ValueBased),
            "PROMO_UNIT_BASED" | "PROMO_UNIT" => Some(Self::PromoUnitBased),
            _ => None,
        }
    }
}

/// How the matched breakpoints of a line combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMethod {
    /// Every matched breakpoint applies; repeating ones may apply several times.
    #[default]
    Cumulative,
    /// Only the single highest matched breakpoint applies.
    Bracket,
}

impl ScaleMethod {
    /// Returns the integer code used on the wire (1 or 2).
    pub fn as_int(self) -> i64 {
        match self {
            Self::Cumulative => 1,
            Self::Bracket => 2,
        }
    }

    /// Maps a wire integer onto a scale method. Anything but 1 or 2 is rejected.
    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Cumulative),
            2 => Some(Self::Bracket),
            _ => None,
        }
    }

    /// Help text shown next to the scale method selector.
    pub fn help_text(self) -> &'static str {
        match self {
            Self::Cumulative => {
                "Tous les paliers atteints s'additionnent ; un palier répétitif s'applique à chaque fois que son seuil est de nouveau atteint."
            }
            Self::Bracket => "Seul le palier le plus élevé atteint s'applique.",
        }
    }
}

/// What a promotion line discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaidBasedOn {
    /// The whole cart.
    #[default]
    EntireCart,
    /// Every product of one family.
    ProductFamily,
    /// One specific product.
    SpecificProduct,
}

impl PaidBasedOn {
    /// Returns the three-way tag used by the editor and the API.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::EntireCart => "cart",
            Self::ProductFamily => "family",
            Self::SpecificProduct => "product",
        }
    }

    /// Parses the editor tag, also accepting the enum names.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "cart" | "entire_cart" => Some(Self::EntireCart),
            "family" | "product_family" => Some(Self::ProductFamily),
            "product" | "specific_product" => Some(Self::SpecificProduct),
            _ => None,
        }
    }

    /// The boolean encoding: only a specific product maps to `true`.
    pub fn as_flag(self) -> bool {
        self == Self::SpecificProduct
    }
}

/// Precondition gating the breakpoints of a line.
///
/// Preconditions are a logical AND: every listed requirement must hold at
/// the same time before any breakpoint of the line is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssortmentType {
    /// No precondition.
    #[default]
    None,
    /// All listed product/family minimums must be met.
    MultipleAnd,
    /// The cart total must reach the minimum amount.
    CartAmount,
    /// Both the product list and the cart minimum must be met.
    Both,
}

impl AssortmentType {
    /// Index order used by the integer wire encoding.
    pub const ORDER: [AssortmentType; 4] = [
        AssortmentType::None,
        AssortmentType::MultipleAnd,
        AssortmentType::CartAmount,
        AssortmentType::Both,
    ];

    /// Returns the integer index used on the wire.
    pub fn as_index(self) -> i64 {
        match self {
            Self::None => 0,
            Self::MultipleAnd => 1,
            Self::CartAmount => 2,
            Self::Both => 3,
        }
    }

    /// Maps a wire index onto an assortment type.
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ORDER.get(i).copied())
    }

    /// Returns the string tag used by the editor.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::MultipleAnd => "multiple",
            Self::CartAmount => "cart_amount",
            Self::Both => "both",
        }
    }

    /// Parses a tag, an enum name, or a stringified index.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if let Ok(index) = tag.parse::<i64>() {
            return Self::from_index(index);
        }
        match tag.to_ascii_lowercase().as_str() {
            "none" | "" => Some(Self::None),
            "multiple" | "multiple_and" => Some(Self::MultipleAnd),
            "cart_amount" => Some(Self::CartAmount),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    /// Whether the line must list product/family minimums.
    pub fn requires_products(self) -> bool {
        matches!(self, Self::MultipleAnd | Self::Both)
    }

    /// Whether the line must carry a minimum cart amount.
    pub fn requires_cart_amount(self) -> bool {
        matches!(self, Self::CartAmount | Self::Both)
    }

    /// Help text shown next to the assortment selector.
    pub fn help_text(self) -> &'static str {
        match self {
            Self::None => "Aucune condition : les paliers s'appliquent directement.",
            Self::MultipleAnd => {
                "Tous les produits ou familles listés doivent atteindre leur quantité minimale."
            }
            Self::CartAmount => "Le total du panier doit atteindre le montant minimum.",
            Self::Both => {
                "Les produits listés ET le montant minimum du panier sont exigés simultanément."
            }
        }
    }
}

/// Kind of discount a breakpoint grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoType {
    /// Percentage off.
    PercentageDiscount,
    /// Fixed amount off.
    FixedAmountDiscount,
    /// Best available price.
    BestPrice,
    /// Amount off per unit.
    AmountPerUnit,
    /// Free promotional units.
    #[serde(alias = "FREE_UNIT")]
    FreePromoUnit,
    /// Flat amount off the whole target.
    FlatAmountDiscount,
    /// Unit price replaced by the amount.
    ReplacePrice,
}

impl PromoType {
    /// Returns the wire tag.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::PercentageDiscount => "PERCENTAGE_DISCOUNT",
            Self::FixedAmountDiscount => "FIXED_AMOUNT_DISCOUNT",
            Self::BestPrice => "BEST_PRICE",
            Self::AmountPerUnit => "AMOUNT_PER_UNIT",
            Self::FreePromoUnit => "FREE_PROMO_UNIT",
            Self::FlatAmountDiscount => "FLAT_AMOUNT_DISCOUNT",
            Self::ReplacePrice => "REPLACE_PRICE",
        }
    }

    /// Parses a wire tag. `FREE_UNIT` is read as [`PromoType::FreePromoUnit`].
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PERCENTAGE_DISCOUNT" => Some(Self::PercentageDiscount),
            "FIXED_AMOUNT_DISCOUNT" => Some(Self::FixedAmountDiscount),
            "BEST_PRICE" => Some(Self::BestPrice),
            "AMOUNT_PER_UNIT" => Some(Self::AmountPerUnit),
            "FREE_PROMO_UNIT" | "FREE_UNIT" => Some(Self::FreePromoUnit),
            "FLAT_AMOUNT_DISCOUNT" => Some(Self::FlatAmountDiscount),
            "REPLACE_PRICE" => Some(Self::ReplacePrice),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assortment_index_round_trip() {
        for kind in AssortmentType::ORDER {
            assert_eq!(AssortmentType::from_index(kind.as_index()), Some(kind));
        }
        assert_eq!(AssortmentType::from_index(4), None);
        assert_eq!(AssortmentType::from_index(-1), None);
    }

    #[test]
    fn test_assortment_tag_accepts_names_and_indices() {
        assert_eq!(AssortmentType::from_tag("0"), Some(AssortmentType::None));
        assert_eq!(
            AssortmentType::from_tag("CART_AMOUNT"),
            Some(AssortmentType::CartAmount)
        );
        assert_eq!(
            AssortmentType::from_tag("MULTIPLE_AND"),
            Some(AssortmentType::MultipleAnd)
        );
        assert_eq!(AssortmentType::from_tag("multiple"), Some(AssortmentType::MultipleAnd));
        assert_eq!(AssortmentType::from_tag(" 3 "), Some(AssortmentType::Both));
        assert_eq!(AssortmentType::from_tag("seven"), None);
    }

    #[test]
    fn test_assortment_requirements() {
        assert!(!AssortmentType::None.requires_products());
        assert!(!AssortmentType::None.requires_cart_amount());
        assert!(AssortmentType::MultipleAnd.requires_products());
        assert!(!AssortmentType::MultipleAnd.requires_cart_amount());
        assert!(!AssortmentType::CartAmount.requires_products());
        assert!(AssortmentType::CartAmount.requires_cart_amount());
        assert!(AssortmentType::Both.requires_products());
        assert!(AssortmentType::Both.requires_cart_amount());
    }

    #[test]
    fn test_scale_method_only_accepts_one_and_two() {
        assert_eq!(ScaleMethod::from_int(1), Some(ScaleMethod::Cumulative));
        assert_eq!(ScaleMethod::from_int(2), Some(ScaleMethod::Bracket));
        assert_eq!(ScaleMethod::from_int(0), None);
        assert_eq!(ScaleMethod::from_int(3), None);
    }

    #[test]
    fn test_paid_based_on_flag_is_true_only_for_products() {
        assert!(PaidBasedOn::SpecificProduct.as_flag());
        assert!(!PaidBasedOn::ProductFamily.as_flag());
        assert!(!PaidBasedOn::EntireCart.as_flag());
        assert_eq!(
            PaidBasedOn::from_tag("SPECIFIC_PRODUCT"),
            Some(PaidBasedOn::SpecificProduct)
        );
    }

    #[test]
    fn test_free_unit_alias() {
        assert_eq!(PromoType::from_code("FREE_UNIT"), Some(PromoType::FreePromoUnit));
        let parsed: PromoType = serde_json::from_str("\"FREE_UNIT\"").unwrap();
        assert_eq!(parsed, PromoType::FreePromoUnit);
        assert_eq!(
            serde_json::to_string(&PromoType::FreePromoUnit).unwrap(),
            "\"FREE_PROMO_UNIT\""
        );
    }

    #[test]
    fn test_promo_type_codes_round_trip() {
        let all = [
            PromoType::PercentageDiscount,
            PromoType::FixedAmountDiscount,
            PromoType::BestPrice,
            PromoType::AmountPerUnit,
            PromoType::FreePromoUnit,
            PromoType::FlatAmountDiscount,
            PromoType::ReplacePrice,
        ];
        for kind in all {
            assert_eq!(PromoType::from_code(kind.as_code()), Some(kind));
        }
    }

    #[test]
    fn test_breakpoint_type_short_codes() {
        assert_eq!(
            BreakpointType::from_code("value"),
            Some(BreakpointType::ValueBased)
        );
        assert_eq!(
            BreakpointType::from_code("PROMO_UNIT_BASED"),
            Some(BreakpointType::PromoUnitBased)
        );
    }
}
