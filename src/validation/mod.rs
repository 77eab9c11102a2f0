//! Validation of promotion drafts.
//!
//! Validation never fails through the error channel: every check returns
//! [`ValidationIssue`] values that callers display, group by section, or
//! merge with issues reported by the backend.

mod promotion;
mod references;
mod sections;

use serde::{Deserialize, Serialize};

pub use promotion::{ValidationContext, validate_promotion};
pub use references::validate_references;
pub use sections::{
    PARTNER_SECTIONS, PROMOTION_SECTIONS, PartnerSection, PromotionSection, SectionTable,
};

/// One problem found in a draft.
///
/// `key` is a dotted field path (`lines.0.details.1.amount`) used for
/// section routing; `message` is the text shown to the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field.
    pub key: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
