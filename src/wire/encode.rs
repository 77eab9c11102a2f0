//! Outbound wire shape sent to the backend on save.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AssortmentEntry, Breakpoint, BreakpointType, PaidBasedOn, PromoType, Promotion, PromotionLine,
};

/// A promotion ready for a create or update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundPromotion {
    /// Backend identifier, omitted on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Trimmed, uppercased code.
    pub code: String,
    /// Trimmed name.
    pub name: String,
    /// Trimmed description.
    pub description: String,
    /// First day of validity.
    pub start_date: Option<NaiveDate>,
    /// Last day of validity.
    pub end_date: Option<NaiveDate>,
    /// Priority.
    pub sequence: i64,
    /// Exclusivity barrier.
    pub skip_to_sequence: i64,
    /// Breakpoint unit.
    pub breakpoint_type: BreakpointType,
    /// 1 (cumulative) or 2 (bracket).
    pub scale_method: Option<i64>,
    /// Burning flag.
    pub is_burning_promo: bool,
    /// Balance code, only for burning promotions.
    pub based_on_burned: Option<String>,
    /// Administrative lock.
    pub is_closed: bool,
    /// Payment-term dependency flag.
    pub payment_term_dependent: bool,
    /// Payment-term codes.
    pub payment_terms: Vec<String>,
    /// Partner-family codes.
    pub partner_families: Vec<String>,
    /// Rules.
    pub lines: Vec<OutboundLine>,
}

/// A line ready for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundLine {
    /// Trimmed name.
    pub name: String,
    /// `true` only when a specific product is targeted.
    pub paid_based_on_product: bool,
    /// Target product.
    pub paid_product_code: Option<String>,
    /// Target family.
    pub paid_product_family_code: Option<String>,
    /// Copy of whichever target code is set.
    pub paid_code: Option<String>,
    /// Index into `none, multiple, cart_amount, both`.
    pub assortment_type: i64,
    /// Minimum cart total.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub minimum_cart_amount: Option<Decimal>,
    /// Product/family minimums.
    pub assortments: Vec<OutboundAssortment>,
    /// Breakpoints.
    pub details: Vec<OutboundDetail>,
}

/// An assortment entry ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundAssortment {
    /// `true` for a product, `false` for a family.
    pub based_on_product: bool,
    /// Trimmed code.
    pub product_code: String,
    /// Minimum quantity.
    pub minimum: i64,
}

/// A breakpoint ready for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundDetail {
    /// Discount tag.
    pub promo_type: Option<PromoType>,
    /// Threshold.
    #[serde(with = "rust_decimal::serde::float")]
    pub minimum_value: Decimal,
    /// Discount magnitude.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Repeat flag.
    pub repeating: bool,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn codes(values: &[String]) -> Vec<String> {
    values.iter().filter_map(|v| trimmed(Some(v))).collect()
}

/// Shapes a promotion for the backend.
///
/// Applying it to a promotion re-read from its own output yields the same
/// document again.
///
/// # Example
///
/// ```
/// use promotion_editor::models::{Promotion, PromotionLine};
/// use promotion_editor::wire::outbound;
///
/// let mut promotion = Promotion::new();
/// promotion.code = "  promo-1 ".to_string();
/// let mut line = PromotionLine::new("Remise");
/// line.target_family("FAM1");
/// promotion.add_line(line);
///
/// let wire = outbound(&promotion);
/// assert_eq!(wire.code, "PROMO-1");
/// assert!(!wire.lines[0].paid_based_on_product);
/// assert_eq!(wire.lines[0].paid_code.as_deref(), Some("FAM1"));
/// ```
pub fn outbound(promotion: &Promotion) -> OutboundPromotion {
    let based_on_burned = promotion
        .is_burning_promo
        .then(|| promotion.based_on_burned.trim().to_uppercase());

    OutboundPromotion {
        id: promotion.id,
        code: promotion.code.trim().to_uppercase(),
        name: promotion.name.trim().to_string(),
        description: promotion.description.trim().to_string(),
        start_date: promotion.start_date,
        end_date: promotion.end_date,
        sequence: promotion.sequence,
        skip_to_sequence: promotion.skip_to_sequence,
        breakpoint_type: promotion.breakpoint_type,
        scale_method: promotion.scale_method.map(|method| method.as_int()),
        is_burning_promo: promotion.is_burning_promo,
        based_on_burned,
        is_closed: promotion.is_closed,
        payment_term_dependent: promotion.payment_term_dependent,
        payment_terms: codes(&promotion.payment_terms),
        partner_families: codes(&promotion.partner_families),
        lines: promotion.lines.iter().map(outbound_line).collect(),
    }
}

fn outbound_line(line: &PromotionLine) -> OutboundLine {
    let target = trimmed(line.target_code());
    let (paid_product_code, paid_product_family_code) = match line.paid_based_on_product {
        PaidBasedOn::SpecificProduct => (target.clone(), None),
        PaidBasedOn::ProductFamily => (None, target.clone()),
        PaidBasedOn::EntireCart => (None, None),
    };

    let assortments = if line.assortment_type.requires_products() {
        line.assortments.iter().map(outbound_assortment).collect()
    } else {
        Vec::new()
    };

    OutboundLine {
        name: line.name.trim().to_string(),
        paid_based_on_product: line.paid_based_on_product.as_flag(),
        paid_product_code,
        paid_product_family_code,
        paid_code: target,
        assortment_type: line.assortment_type.as_index(),
        minimum_cart_amount: line
            .minimum_cart_amount
            .filter(|_| line.assortment_type.requires_cart_amount()),
        assortments,
        details: line.details.iter().map(outbound_detail).collect(),
    }
}

fn outbound_assortment(entry: &AssortmentEntry) -> OutboundAssortment {
    OutboundAssortment {
        based_on_product: entry.based_on_product,
        product_code: entry.product_code.trim().to_string(),
        minimum: entry.minimum,
    }
}

fn outbound_detail(detail: &Breakpoint) -> OutboundDetail {
    OutboundDetail {
        promo_type: detail.promo_type,
        minimum_value: detail.minimum_value,
        amount: detail.amount,
        repeating: detail.repeating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssortmentType, ScaleMethod};

    #[test]
    fn test_header_is_trimmed_and_uppercased() {
        let mut promotion = Promotion::new();
        promotion.code = " promo-été ".to_string();
        promotion.name = "  Été  ".to_string();
        promotion.description = "\tpromo\n".to_string();
        promotion.scale_method = Some(ScaleMethod::Bracket);

        let wire = outbound(&promotion);
        assert_eq!(wire.code, "PROMO-ÉTÉ");
        assert_eq!(wire.name, "Été");
        assert_eq!(wire.description, "promo");
        assert_eq!(wire.scale_method, Some(2));
    }

    #[test]
    fn test_balance_code_only_sent_when_burning() {
        let mut promotion = Promotion::new();
        promotion.based_on_burned = "points".to_string();
        assert_eq!(outbound(&promotion).based_on_burned, None);

        promotion.is_burning_promo = true;
        assert_eq!(outbound(&promotion).based_on_burned.as_deref(), Some("POINTS"));
    }

    #[test]
    fn test_targets_are_mirrored_into_paid_code() {
        let mut product = PromotionLine::new("P");
        product.target_product(" SKU-1 ");
        let wire = outbound_line(&product);
        assert!(wire.paid_based_on_product);
        assert_eq!(wire.paid_product_code.as_deref(), Some("SKU-1"));
        assert_eq!(wire.paid_product_family_code, None);
        assert_eq!(wire.paid_code.as_deref(), Some("SKU-1"));

        let cart = PromotionLine::new("C");
        let wire = outbound_line(&cart);
        assert!(!wire.paid_based_on_product);
        assert_eq!(wire.paid_code, None);
    }

    #[test]
    fn test_stale_target_code_is_not_sent() {
        let mut line = PromotionLine::new("F");
        line.paid_based_on_product = PaidBasedOn::ProductFamily;
        line.paid_product_code = Some("SKU-1".to_string());
        line.paid_product_family_code = Some("FAM1".to_string());

        let wire = outbound_line(&line);
        assert_eq!(wire.paid_product_code, None);
        assert_eq!(wire.paid_product_family_code.as_deref(), Some("FAM1"));
    }

    #[test]
    fn test_unused_assortment_data_is_dropped() {
        let mut line = PromotionLine::new("A");
        line.assortment_type = AssortmentType::None;
        line.minimum_cart_amount = Some(Decimal::new(50, 0));
        line.assortments.push(AssortmentEntry::product("SKU-1", 1));

        let wire = outbound_line(&line);
        assert_eq!(wire.assortment_type, 0);
        assert_eq!(wire.minimum_cart_amount, None);
        assert!(wire.assortments.is_empty());
    }

    #[test]
    fn test_numbers_serialize_as_json_numbers() {
        let mut line = PromotionLine::new("A");
        line.set_assortment_type(AssortmentType::CartAmount);
        line.minimum_cart_amount = Some(Decimal::new(2505, 1));
        line.add_detail(Breakpoint::new(
            PromoType::PercentageDiscount,
            Decimal::new(5, 0),
            Decimal::new(10, 0),
        ));

        let json = serde_json::to_value(outbound_line(&line)).unwrap();
        assert_eq!(json["assortment_type"], 2);
        assert_eq!(json["minimum_cart_amount"], 250.5);
        assert_eq!(json["details"][0]["amount"], 10.0);
        assert_eq!(json["details"][0]["promo_type"], "PERCENTAGE_DISCOUNT");
    }
}
