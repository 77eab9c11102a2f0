//! Translation between backend JSON documents and the canonical model.
//!
//! Inbound documents are deserialized into [`WirePromotion`], whose
//! ambiguous fields are tagged unions, then resolved by [`inbound`].
//! [`outbound`] produces the single shape sent back on save. The pair is
//! round-trip safe: every inbound encoding of the same logical promotion
//! yields the same outbound document, and re-reading an outbound document
//! reproduces it unchanged.

mod decode;
mod encode;
mod shapes;

pub use decode::inbound;
pub use encode::{OutboundAssortment, OutboundDetail, OutboundLine, OutboundPromotion, outbound};
pub use shapes::{
    AssortmentTypeWire, BoolLike, CodeRef, NumberLike, PaidBasedOnWire, WireAssortment, WireDetail,
    WireLine, WirePromotion,
};

use crate::error::{EditorError, EditorResult};

/// Re-reads an outbound document as an inbound one.
///
/// Used to check that the save transform is idempotent.
pub fn reparse(document: &OutboundPromotion) -> EditorResult<WirePromotion> {
    let json = serde_json::to_value(document).map_err(|e| EditorError::InvalidWireValue {
        field: "promotion".to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_value(json).map_err(|e| EditorError::InvalidWireValue {
        field: "promotion".to_string(),
        message: e.to_string(),
    })
}
