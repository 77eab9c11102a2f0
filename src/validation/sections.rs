//! Field-prefix routing of validation issues to form sections.
//!
//! Both the promotion editor and the partner form group their issues by
//! section and open the section holding the first one. The routing is a
//! single generic lookup, [`SectionTable`], fed with one prefix table per
//! form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ValidationIssue;

/// Ordered prefix table mapping issue keys to sections.
///
/// The first prefix the key starts with wins; keys matching no prefix go to
/// the fallback section.
#[derive(Debug, Clone, Copy)]
pub struct SectionTable<S: 'static> {
    routes: &'static [(&'static str, S)],
    fallback: S,
}

impl<S: Copy + Ord + 'static> SectionTable<S> {
    /// Builds a table from its routes and fallback section.
    pub const fn new(routes: &'static [(&'static str, S)], fallback: S) -> Self {
        Self { routes, fallback }
    }

    /// Returns the section a field key belongs to.
    pub fn route(&self, key: &str) -> S {
        self.routes
            .iter()
            .find(|(prefix, _)| key.starts_with(prefix))
            .map(|(_, section)| *section)
            .unwrap_or(self.fallback)
    }

    /// Groups issues by section, keeping their order inside each group.
    pub fn group<'a>(&self, issues: &'a [ValidationIssue]) -> BTreeMap<S, Vec<&'a ValidationIssue>> {
        let mut groups: BTreeMap<S, Vec<&'a ValidationIssue>> = BTreeMap::new();
        for issue in issues {
            groups.entry(self.route(&issue.key)).or_default().push(issue);
        }
        groups
    }

    /// Returns the section of the first issue, the one a form should open.
    pub fn first_section(&self, issues: &[ValidationIssue]) -> Option<S> {
        issues.first().map(|issue| self.route(&issue.key))
    }
}

/// Sections of the promotion editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionSection {
    /// Identity, validity window, priority and calculation settings.
    General,
    /// Lines, assortments and breakpoints.
    Rules,
    /// Partner-family eligibility.
    Partners,
    /// Payment-term eligibility.
    Payment,
}

/// Sections of the partner form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerSection {
    /// Identity, status and type.
    Identity,
    /// Login account.
    Account,
    /// Price list, payment term, credit and discount.
    Commercial,
    /// Address, contact and geolocation.
    Address,
    /// Tax identifiers.
    Fiscal,
    /// Delivery preferences.
    Delivery,
}

/// Routing used by the promotion editor.
pub const PROMOTION_SECTIONS: SectionTable<PromotionSection> = SectionTable::new(
    &[
        ("lines", PromotionSection::Rules),
        ("partner_families", PromotionSection::Partners),
        ("payment_term", PromotionSection::Payment),
    ],
    PromotionSection::General,
);

/// Routing used by the partner form.
pub const PARTNER_SECTIONS: SectionTable<PartnerSection> = SectionTable::new(
    &[
        ("auth.", PartnerSection::Account),
        ("code", PartnerSection::Identity),
        ("name", PartnerSection::Identity),
        ("status", PartnerSection::Identity),
        ("type", PartnerSection::Identity),
        ("price_list", PartnerSection::Commercial),
        ("payment_term", PartnerSection::Commercial),
        ("credit", PartnerSection::Commercial),
        ("discount", PartnerSection::Commercial),
        ("address", PartnerSection::Address),
        ("city", PartnerSection::Address),
        ("postal_code", PartnerSection::Address),
        ("country", PartnerSection::Address),
        ("region", PartnerSection::Address),
        ("phone", PartnerSection::Address),
        ("mobile", PartnerSection::Address),
        ("email", PartnerSection::Address),
        ("contact", PartnerSection::Address),
        ("latitude", PartnerSection::Address),
        ("longitude", PartnerSection::Address),
        ("geo", PartnerSection::Address),
        ("tax", PartnerSection::Fiscal),
        ("vat", PartnerSection::Fiscal),
        ("fiscal", PartnerSection::Fiscal),
        ("ice", PartnerSection::Fiscal),
        ("delivery", PartnerSection::Delivery),
        ("shipping", PartnerSection::Delivery),
    ],
    PartnerSection::Identity,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_keys_route_to_sections() {
        assert_eq!(PROMOTION_SECTIONS.route("code"), PromotionSection::General);
        assert_eq!(PROMOTION_SECTIONS.route("end_date"), PromotionSection::General);
        assert_eq!(PROMOTION_SECTIONS.route("lines"), PromotionSection::Rules);
        assert_eq!(
            PROMOTION_SECTIONS.route("lines.2.details.0.amount"),
            PromotionSection::Rules
        );
        assert_eq!(
            PROMOTION_SECTIONS.route("partner_families.0"),
            PromotionSection::Partners
        );
        assert_eq!(PROMOTION_SECTIONS.route("payment_terms"), PromotionSection::Payment);
        assert_eq!(
            PROMOTION_SECTIONS.route("payment_term_dependent"),
            PromotionSection::Payment
        );
    }

    #[test]
    fn test_partner_keys_route_to_sections() {
        assert_eq!(PARTNER_SECTIONS.route("auth.email"), PartnerSection::Account);
        assert_eq!(PARTNER_SECTIONS.route("status"), PartnerSection::Identity);
        assert_eq!(PARTNER_SECTIONS.route("price_list_id"), PartnerSection::Commercial);
        assert_eq!(PARTNER_SECTIONS.route("payment_term_id"), PartnerSection::Commercial);
        assert_eq!(PARTNER_SECTIONS.route("credit_limit"), PartnerSection::Commercial);
        assert_eq!(PARTNER_SECTIONS.route("address_line_1"), PartnerSection::Address);
        assert_eq!(PARTNER_SECTIONS.route("latitude"), PartnerSection::Address);
        assert_eq!(PARTNER_SECTIONS.route("tax_number"), PartnerSection::Fiscal);
        assert_eq!(PARTNER_SECTIONS.route("delivery_zone"), PartnerSection::Delivery);
    }

    #[test]
    fn test_unknown_keys_use_fallback() {
        assert_eq!(PARTNER_SECTIONS.route("something_else"), PartnerSection::Identity);
        assert_eq!(PROMOTION_SECTIONS.route("mystery"), PromotionSection::General);
    }

    #[test]
    fn test_group_keeps_issue_order() {
        let issues = vec![
            ValidationIssue::new("lines.0.name", "a"),
            ValidationIssue::new("code", "b"),
            ValidationIssue::new("lines.1.details", "c"),
        ];

        let groups = PROMOTION_SECTIONS.group(&issues);
        assert_eq!(groups.len(), 2);
        let rules: Vec<&str> = groups[&PromotionSection::Rules]
            .iter()
            .map(|i| i.message.as_str())
            .collect();
        assert_eq!(rules, vec!["a", "c"]);
        assert_eq!(
            PROMOTION_SECTIONS.first_section(&issues),
            Some(PromotionSection::Rules)
        );
    }

    #[test]
    fn test_first_section_of_no_issues() {
        assert_eq!(PROMOTION_SECTIONS.first_section(&[]), None);
    }
}
