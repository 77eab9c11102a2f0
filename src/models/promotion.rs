//! Promotion draft model.
//!
//! This module defines the canonical in-memory shapes edited by the
//! promotion editor: [`Promotion`], [`PromotionLine`], [`AssortmentEntry`]
//! and [`Breakpoint`]. Nested collections are ordered and keyed by a stable
//! [`EntryId`], so removing or moving one entry never shifts the identity of
//! another.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{
    AssortmentType, BreakpointType, FULLY_EXCLUSIVE_SEQUENCE, PaidBasedOn, PromoType, ScaleMethod,
};

/// Stable synthetic identifier of a line, assortment entry or breakpoint.
///
/// Generated client-side; never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Collection entries addressable by [`EntryId`].
pub trait Keyed {
    /// Returns the entry's identifier.
    fn entry_id(&self) -> EntryId;
}

fn position_of<T: Keyed>(items: &[T], id: EntryId) -> Option<usize> {
    items.iter().position(|item| item.entry_id() == id)
}

fn find_mut<T: Keyed>(items: &mut [T], id: EntryId) -> Option<&mut T> {
    items.iter_mut().find(|item| item.entry_id() == id)
}

fn remove_by_id<T: Keyed>(items: &mut Vec<T>, id: EntryId) -> Option<T> {
    position_of(items, id).map(|index| items.remove(index))
}

/// Moves the entry to `to`, clamped to the end of the collection.
fn move_by_id<T: Keyed>(items: &mut Vec<T>, id: EntryId, to: usize) -> bool {
    let Some(from) = position_of(items, id) else {
        return false;
    };
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    true
}

/// One discount tier of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Synthetic identifier.
    #[serde(default)]
    pub id: EntryId,
    /// Kind of discount. `None` while the author has not picked one.
    pub promo_type: Option<PromoType>,
    /// Threshold, in the unit given by the promotion's [`BreakpointType`].
    pub minimum_value: Decimal,
    /// Magnitude of the discount.
    pub amount: Decimal,
    /// Reapply each time the threshold is met again (cumulative scale only).
    #[serde(default)]
    pub repeating: bool,
}

impl Breakpoint {
    /// Creates a breakpoint with a fresh identifier.
    pub fn new(promo_type: PromoType, minimum_value: Decimal, amount: Decimal) -> Self {
        Self {
            id: EntryId::new(),
            promo_type: Some(promo_type),
            minimum_value,
            amount,
            repeating: false,
        }
    }
}

impl Keyed for Breakpoint {
    fn entry_id(&self) -> EntryId {
        self.id
    }
}

/// A product or family minimum required by a line's assortment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssortmentEntry {
    /// Synthetic identifier.
    #[serde(default)]
    pub id: EntryId,
    /// `true` when `product_code` names a product, `false` for a family.
    pub based_on_product: bool,
    /// Product or family code.
    pub product_code: String,
    /// Minimum quantity required.
    pub minimum: i64,
}

impl AssortmentEntry {
    /// Requires `minimum` units of a specific product.
    pub fn product(code: impl Into<String>, minimum: i64) -> Self {
        Self {
            id: EntryId::new(),
            based_on_product: true,
            product_code: code.into(),
            minimum,
        }
    }

    /// Requires `minimum` units taken from a product family.
    pub fn family(code: impl Into<String>, minimum: i64) -> Self {
        Self {
            id: EntryId::new(),
            based_on_product: false,
            product_code: code.into(),
            minimum,
        }
    }
}

impl Keyed for AssortmentEntry {
    fn entry_id(&self) -> EntryId {
        self.id
    }
}

/// One rule of a promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionLine {
    /// Synthetic identifier.
    #[serde(default)]
    pub id: EntryId,
    /// Display name of the rule.
    pub name: String,
    /// Discount target.
    pub paid_based_on_product: PaidBasedOn,
    /// Target product, set only for [`PaidBasedOn::SpecificProduct`].
    pub paid_product_code: Option<String>,
    /// Target family, set only for [`PaidBasedOn::ProductFamily`].
    pub paid_product_family_code: Option<String>,
    /// Precondition gating the breakpoints.
    pub assortment_type: AssortmentType,
    /// Minimum cart total, kept only when the assortment type requires it.
    pub minimum_cart_amount: Option<Decimal>,
    /// Product/family minimums, kept only when the assortment type requires them.
    #[serde(default)]
    pub assortments: Vec<AssortmentEntry>,
    /// Discount tiers, in evaluation order.
    #[serde(default)]
    pub details: Vec<Breakpoint>,
}

impl Default for PromotionLine {
    fn default() -> Self {
        Self {
            id: EntryId::new(),
            name: String::new(),
            paid_based_on_product: PaidBasedOn::EntireCart,
            paid_product_code: None,
            paid_product_family_code: None,
            assortment_type: AssortmentType::None,
            minimum_cart_amount: None,
            assortments: Vec::new(),
            details: Vec::new(),
        }
    }
}

impl PromotionLine {
    /// Creates an empty cart-wide line.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Changes the discount target, clearing whichever code no longer applies.
    pub fn set_target(&mut self, target: PaidBasedOn) {
        self.paid_based_on_product = target;
        match target {
            PaidBasedOn::EntireCart => {
                self.paid_product_code = None;
                self.paid_product_family_code = None;
            }
            PaidBasedOn::ProductFamily => self.paid_product_code = None,
            PaidBasedOn::SpecificProduct => self.paid_product_family_code = None,
        }
    }

    /// Targets one specific product.
    pub fn target_product(&mut self, code: impl Into<String>) {
        self.set_target(PaidBasedOn::SpecificProduct);
        self.paid_product_code = Some(code.into());
    }

    /// Targets a product family.
    pub fn target_family(&mut self, code: impl Into<String>) {
        self.set_target(PaidBasedOn::ProductFamily);
        self.paid_product_family_code = Some(code.into());
    }

    /// Returns the code matching the current target, if any.
    pub fn target_code(&self) -> Option<&str> {
        match self.paid_based_on_product {
            PaidBasedOn::EntireCart => None,
            PaidBasedOn::ProductFamily => self.paid_product_family_code.as_deref(),
            PaidBasedOn::SpecificProduct => self.paid_product_code.as_deref(),
        }
    }

    /// Changes the assortment type, dropping data the new type does not use.
    pub fn set_assortment_type(&mut self, assortment_type: AssortmentType) {
        self.assortment_type = assortment_type;
        if !assortment_type.requires_cart_amount() {
            self.minimum_cart_amount = None;
        }
        if !assortment_type.requires_products() {
            self.assortments.clear();
        }
    }

    /// Appends an assortment entry and returns its identifier.
    pub fn add_assortment(&mut self, entry: AssortmentEntry) -> EntryId {
        let id = entry.id;
        self.assortments.push(entry);
        id
    }

    /// Returns a mutable handle on an assortment entry.
    pub fn assortment_mut(&mut self, id: EntryId) -> Option<&mut AssortmentEntry> {
        find_mut(&mut self.assortments, id)
    }

    /// Removes an assortment entry.
    pub fn remove_assortment(&mut self, id: EntryId) -> Option<AssortmentEntry> {
        remove_by_id(&mut self.assortments, id)
    }

    /// Appends a breakpoint and returns its identifier.
    pub fn add_detail(&mut self, detail: Breakpoint) -> EntryId {
        let id = detail.id;
        self.details.push(detail);
        id
    }

    /// Returns a mutable handle on a breakpoint.
    pub fn detail_mut(&mut self, id: EntryId) -> Option<&mut Breakpoint> {
        find_mut(&mut self.details, id)
    }

    /// Removes a breakpoint.
    pub fn remove_detail(&mut self, id: EntryId) -> Option<Breakpoint> {
        remove_by_id(&mut self.details, id)
    }

    /// Moves a breakpoint to a new position.
    pub fn move_detail(&mut self, id: EntryId, to: usize) -> bool {
        move_by_id(&mut self.details, id, to)
    }
}

impl Keyed for PromotionLine {
    fn entry_id(&self) -> EntryId {
        self.id
    }
}

/// A promotion as held by the editor.
///
/// Fields the author may leave blank are optional or empty here; the
/// [validator](crate::validation::validate_promotion) decides whether the
/// draft can be submitted.
///
/// # Example
///
/// ```
/// use promotion_editor::models::{Promotion, PromotionLine};
///
/// let mut promotion = Promotion::new();
/// let first = promotion.add_line(PromotionLine::new("Remise panier"));
/// let second = promotion.add_line(PromotionLine::new("Remise famille"));
///
/// promotion.move_line(second, 0);
/// assert_eq!(promotion.lines[0].id, second);
/// assert!(promotion.remove_line(first).is_some());
/// assert_eq!(promotion.lines.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// Backend identifier, absent for a draft that was never saved.
    pub id: Option<i64>,
    /// Unique promotion code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// First day of validity.
    pub start_date: Option<NaiveDate>,
    /// Last day of validity.
    pub end_date: Option<NaiveDate>,
    /// Priority: lower values are evaluated first. Ties are left to the engine.
    pub sequence: i64,
    /// 0 for a non-exclusive promotion, otherwise the exclusivity barrier.
    pub skip_to_sequence: i64,
    /// Unit of every breakpoint threshold.
    pub breakpoint_type: BreakpointType,
    /// How matched breakpoints combine. `None` when the wire value was not 1 or 2.
    pub scale_method: Option<ScaleMethod>,
    /// Whether the promotion is redeemed against a balance.
    pub is_burning_promo: bool,
    /// Balance code used when burning.
    #[serde(default)]
    pub based_on_burned: String,
    /// Administrative lock.
    pub is_closed: bool,
    /// Whether eligibility depends on the payment term.
    pub payment_term_dependent: bool,
    /// Eligible payment-term codes.
    #[serde(default)]
    pub payment_terms: Vec<String>,
    /// Eligible partner-family codes; empty means every partner.
    #[serde(default)]
    pub partner_families: Vec<String>,
    /// Rules, in evaluation order.
    #[serde(default)]
    pub lines: Vec<PromotionLine>,
}

impl Default for Promotion {
    fn default() -> Self {
        Self::new()
    }
}

impl Promotion {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self {
            id: None,
            code: String::new(),
            name: String::new(),
            description: String::new(),
            start_date: None,
            end_date: None,
            sequence: 1,
            skip_to_sequence: 0,
            breakpoint_type: BreakpointType::QuantityBased,
            scale_method: Some(ScaleMethod::Cumulative),
            is_burning_promo: false,
            based_on_burned: String::new(),
            is_closed: false,
            payment_term_dependent: false,
            payment_terms: Vec::new(),
            partner_families: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Whether the promotion suppresses lower-priority promotions.
    pub fn is_exclusive(&self) -> bool {
        self.skip_to_sequence > 0
    }

    /// Whether the promotion uses the conventional full-exclusivity sentinel.
    pub fn is_fully_exclusive(&self) -> bool {
        self.skip_to_sequence >= FULLY_EXCLUSIVE_SEQUENCE
    }

    /// Whether the promotion targets every partner.
    pub fn applies_to_all_partners(&self) -> bool {
        self.partner_families.is_empty()
    }

    /// Appends a line and returns its identifier.
    pub fn add_line(&mut self, line: PromotionLine) -> EntryId {
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Returns a line by identifier.
    pub fn line(&self, id: EntryId) -> Option<&PromotionLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Returns a mutable handle on a line.
    pub fn line_mut(&mut self, id: EntryId) -> Option<&mut PromotionLine> {
        find_mut(&mut self.lines, id)
    }

    /// Removes a line.
    pub fn remove_line(&mut self, id: EntryId) -> Option<PromotionLine> {
        remove_by_id(&mut self.lines, id)
    }

    /// Moves a line to a new position; the position is clamped to the end.
    pub fn move_line(&mut self, id: EntryId, to: usize) -> bool {
        move_by_id(&mut self.lines, id, to)
    }
}
