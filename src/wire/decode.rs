//! Resolution of inbound wire shapes into the canonical model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EditorError, EditorResult};
use crate::models::{
    AssortmentEntry, AssortmentType, Breakpoint, BreakpointType, EntryId, PaidBasedOn, PromoType,
    Promotion, PromotionLine, ScaleMethod,
};

use super::shapes::{
    AssortmentTypeWire, BoolLike, CodeRef, NumberLike, PaidBasedOnWire, WireAssortment, WireDetail,
    WireLine, WirePromotion, parse_bool_text,
};

fn invalid(field: &str, message: impl Into<String>) -> EditorError {
    EditorError::InvalidWireValue {
        field: field.to_string(),
        message: message.into(),
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_date(value: Option<&str>, field: &str) -> EditorResult<Option<NaiveDate>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| invalid(field, format!("'{raw}' is not a date")))
}

fn integer(value: Option<&NumberLike>, field: &str) -> EditorResult<Option<i64>> {
    value.map_or(Ok(None), |v| v.to_integer(field))
}

fn decimal(value: Option<&NumberLike>, field: &str) -> EditorResult<Option<Decimal>> {
    value.map_or(Ok(None), |v| v.to_decimal(field))
}

fn scale_method(value: Option<&NumberLike>) -> Option<ScaleMethod> {
    match value? {
        NumberLike::Text(text) => match text.trim().to_ascii_uppercase().as_str() {
            "CUMULATIVE" => Some(ScaleMethod::Cumulative),
            "BRACKET" => Some(ScaleMethod::Bracket),
            other => other.parse().ok().and_then(ScaleMethod::from_int),
        },
        number => number
            .to_integer("scale_method")
            .ok()
            .flatten()
            .and_then(ScaleMethod::from_int),
    }
}

fn codes(refs: Option<Vec<CodeRef>>, field: &str) -> Vec<String> {
    let refs = refs.unwrap_or_default();
    let total = refs.len();
    let codes: Vec<String> = refs
        .iter()
        .filter_map(CodeRef::code)
        .map(str::to_string)
        .collect();
    if codes.len() < total {
        debug!(field, dropped = total - codes.len(), "Dropped empty codes");
    }
    codes
}

/// Resolves a wire promotion into the canonical model.
///
/// Every line, assortment entry and breakpoint receives a fresh
/// [`EntryId`]. Fields that are absent take their neutral value; values that
/// cannot be coerced produce [`EditorError::InvalidWireValue`] naming the
/// dotted field path.
///
/// # Example
///
/// ```
/// use promotion_editor::models::{AssortmentType, PaidBasedOn};
/// use promotion_editor::wire::{WirePromotion, inbound};
///
/// let wire: WirePromotion = serde_json::from_str(r#"{
///     "code": "PROMO",
///     "partner_families": [{"code": "GROS"}, "DETAIL", ""],
///     "lines": [{
///         "name": "Remise",
///         "paid_based_on_product": true,
///         "paid_code": "SKU-1",
///         "assortment_type": 2,
///         "minimum_cart_amount": "150"
///     }]
/// }"#)?;
///
/// let promotion = inbound(wire)?;
/// assert_eq!(promotion.partner_families, vec!["GROS", "DETAIL"]);
/// assert_eq!(promotion.lines[0].paid_based_on_product, PaidBasedOn::SpecificProduct);
/// assert_eq!(promotion.lines[0].paid_product_code.as_deref(), Some("SKU-1"));
/// assert_eq!(promotion.lines[0].assortment_type, AssortmentType::CartAmount);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn inbound(wire: WirePromotion) -> EditorResult<Promotion> {
    let breakpoint_type = match wire.breakpoint_type.as_deref().map(str::trim) {
        None | Some("") => BreakpointType::default(),
        Some(code) => BreakpointType::from_code(code)
            .ok_or_else(|| invalid("breakpoint_type", format!("unknown breakpoint type '{code}'")))?,
    };

    let lines = wire
        .lines
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, line)| inbound_line(index, line))
        .collect::<EditorResult<Vec<_>>>()?;

    let flag = |value: Option<&BoolLike>, field: &str| {
        value.map_or(Ok(false), |v| v.to_bool(field))
    };

    Ok(Promotion {
        id: wire.id,
        code: wire.code.unwrap_or_default(),
        name: wire.name.unwrap_or_default(),
        description: wire.description.unwrap_or_default(),
        start_date: parse_date(wire.start_date.as_deref(), "start_date")?,
        end_date: parse_date(wire.end_date.as_deref(), "end_date")?,
        sequence: integer(wire.sequence.as_ref(), "sequence")?.unwrap_or(0),
        skip_to_sequence: integer(wire.skip_to_sequence.as_ref(), "skip_to_sequence")?
            .unwrap_or(0),
        breakpoint_type,
        scale_method: scale_method(wire.scale_method.as_ref()),
        is_burning_promo: flag(wire.is_burning_promo.as_ref(), "is_burning_promo")?,
        based_on_burned: wire.based_on_burned.unwrap_or_default().trim().to_string(),
        is_closed: flag(wire.is_closed.as_ref(), "is_closed")?,
        payment_term_dependent: flag(
            wire.payment_term_dependent.as_ref(),
            "payment_term_dependent",
        )?,
        payment_terms: codes(wire.payment_terms, "payment_terms"),
        partner_families: codes(wire.partner_families, "partner_families"),
        lines,
    })
}

fn resolve_flag(
    is_product: bool,
    product_code: Option<String>,
    family_code: Option<String>,
    generic: Option<String>,
) -> (PaidBasedOn, Option<String>) {
    if is_product {
        return (PaidBasedOn::SpecificProduct, product_code.or(generic));
    }
    match family_code.or(generic) {
        Some(code) => (PaidBasedOn::ProductFamily, Some(code)),
        None => (PaidBasedOn::EntireCart, None),
    }
}

fn resolve_target(
    field: &str,
    wire: Option<PaidBasedOnWire>,
    product_code: Option<String>,
    family_code: Option<String>,
    generic: Option<String>,
) -> EditorResult<(PaidBasedOn, Option<String>)> {
    let target = match wire {
        Some(PaidBasedOnWire::Flag(is_product)) => {
            return Ok(resolve_flag(is_product, product_code, family_code, generic));
        }
        Some(PaidBasedOnWire::Tag(tag)) => match PaidBasedOn::from_tag(&tag) {
            Some(target) => target,
            None => {
                let is_product = parse_bool_text(&tag)
                    .ok_or_else(|| invalid(field, format!("unknown target '{tag}'")))?;
                return Ok(resolve_flag(is_product, product_code, family_code, generic));
            }
        },
        None if product_code.is_some() => PaidBasedOn::SpecificProduct,
        None if family_code.is_some() => PaidBasedOn::ProductFamily,
        None if generic.is_some() => PaidBasedOn::SpecificProduct,
        None => PaidBasedOn::EntireCart,
    };

    let code = match target {
        PaidBasedOn::SpecificProduct => product_code.or(generic),
        PaidBasedOn::ProductFamily => family_code.or(generic),
        PaidBasedOn::EntireCart => None,
    };
    Ok((target, code))
}

fn inbound_line(index: usize, wire: WireLine) -> EditorResult<PromotionLine> {
    let field = |name: &str| format!("lines.{index}.{name}");

    let (target, code) = resolve_target(
        &field("paid_based_on_product"),
        wire.paid_based_on_product,
        present(wire.paid_product_code.as_deref()),
        present(wire.paid_product_family_code.as_deref()),
        present(wire.paid_code.as_deref()),
    )?;

    let assortment_type = match wire.assortment_type {
        None => AssortmentType::None,
        Some(AssortmentTypeWire::Index(number)) => {
            let name = field("assortment_type");
            NumberLike::Number(number)
                .to_integer(&name)?
                .and_then(AssortmentType::from_index)
                .ok_or_else(|| invalid(&name, "index is out of range"))?
        }
        Some(AssortmentTypeWire::Tag(tag)) => AssortmentType::from_tag(&tag).ok_or_else(|| {
            invalid(
                &field("assortment_type"),
                format!("unknown assortment type '{tag}'"),
            )
        })?,
    };

    let assortments = wire
        .assortments
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(position, entry)| inbound_assortment(&field(&format!("assortments.{position}")), entry))
        .collect::<EditorResult<Vec<_>>>()?;

    let details = wire
        .details
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(position, detail)| inbound_detail(&field(&format!("details.{position}")), detail))
        .collect::<EditorResult<Vec<_>>>()?;

    let mut line = PromotionLine {
        name: wire.name.unwrap_or_default(),
        assortment_type,
        minimum_cart_amount: decimal(
            wire.minimum_cart_amount.as_ref(),
            &field("minimum_cart_amount"),
        )?,
        assortments,
        details,
        ..PromotionLine::default()
    };
    line.set_assortment_type(assortment_type);
    line.set_target(target);
    match target {
        PaidBasedOn::SpecificProduct => line.paid_product_code = code,
        PaidBasedOn::ProductFamily => line.paid_product_family_code = code,
        PaidBasedOn::EntireCart => {}
    }
    Ok(line)
}

fn inbound_assortment(prefix: &str, wire: WireAssortment) -> EditorResult<AssortmentEntry> {
    let based_on_product = match wire.based_on_product {
        Some(value) => value.to_bool(&format!("{prefix}.based_on_product"))?,
        None => true,
    };
    Ok(AssortmentEntry {
        id: EntryId::new(),
        based_on_product,
        product_code: wire.product_code.unwrap_or_default().trim().to_string(),
        minimum: integer(wire.minimum.as_ref(), &format!("{prefix}.minimum"))?.unwrap_or(0),
    })
}

fn inbound_detail(prefix: &str, wire: WireDetail) -> EditorResult<Breakpoint> {
    let promo_type = match wire.promo_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(code) => Some(PromoType::from_code(code).ok_or_else(|| {
            invalid(
                &format!("{prefix}.promo_type"),
                format!("unknown promo type '{code}'"),
            )
        })?),
    };
    let repeating = match wire.repeating {
        Some(value) => value.to_bool(&format!("{prefix}.repeating"))?,
        None => false,
    };
    Ok(Breakpoint {
        id: EntryId::new(),
        promo_type,
        minimum_value: decimal(wire.minimum_value.as_ref(), &format!("{prefix}.minimum_value"))?
            .unwrap_or_default(),
        amount: decimal(wire.amount.as_ref(), &format!("{prefix}.amount"))?.unwrap_or_default(),
        repeating,
    })
}
