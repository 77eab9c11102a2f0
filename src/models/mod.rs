//! Core data models for the promotion editor.
//!
//! This module contains the canonical promotion draft, its enumerations,
//! and the reference data the editor looks codes up in.

mod enums;
mod promotion;
mod reference;

pub use enums::{
    AssortmentType, BreakpointType, FULLY_EXCLUSIVE_SEQUENCE, PaidBasedOn, PromoType, ScaleMethod,
};
pub use promotion::{AssortmentEntry, Breakpoint, EntryId, Keyed, Promotion, PromotionLine};
pub use reference::{BalanceCode, PartnerFamily, PaymentTerm, Product, ProductFamily};
