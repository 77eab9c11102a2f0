//! Structural validation of a promotion draft.
//!
//! [`validate_promotion`] runs every check and accumulates the issues in a
//! fixed order: header fields, burning balance, scale method, dates, lines
//! (name, target, assortment, breakpoints) and payment terms. Nothing short
//! circuits except the per-line checks, which only run when lines exist.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{PaidBasedOn, Promotion, PromotionLine};

use super::ValidationIssue;

/// Facts the validator needs beyond the draft itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// The current date.
    pub today: NaiveDate,
    /// Whether the draft has never been saved.
    pub is_new: bool,
}

impl ValidationContext {
    /// Context for a draft being created.
    pub fn for_new(today: NaiveDate) -> Self {
        Self {
            today,
            is_new: true,
        }
    }

    /// Context for an existing promotion being edited.
    pub fn for_existing(today: NaiveDate) -> Self {
        Self {
            today,
            is_new: false,
        }
    }
}

/// Validates a promotion draft.
///
/// Returns an empty list when the promotion can be submitted.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use promotion_editor::models::Promotion;
/// use promotion_editor::validation::{ValidationContext, validate_promotion};
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let issues = validate_promotion(&Promotion::new(), ValidationContext::for_new(today));
///
/// assert!(issues.iter().any(|issue| issue.key == "code"));
/// assert!(issues.iter().any(|issue| issue.key == "lines"));
/// ```
pub fn validate_promotion(promotion: &Promotion, context: ValidationContext) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_header(promotion, &mut issues);
    check_burning(promotion, &mut issues);

    if promotion.scale_method.is_none() {
        issues.push(ValidationIssue::new(
            "scale_method",
            "La méthode de calcul doit être cumulative (1) ou par tranche (2)",
        ));
    }

    check_dates(promotion, context, &mut issues);

    if promotion.lines.is_empty() {
        issues.push(ValidationIssue::new("lines", "Au moins une règle est requise"));
    } else {
        for (index, line) in promotion.lines.iter().enumerate() {
            check_line(index, line, &mut issues);
        }
    }

    if promotion.payment_term_dependent && promotion.payment_terms.is_empty() {
        issues.push(ValidationIssue::new(
            "payment_terms",
            "Au moins une condition de paiement est requise",
        ));
    }

    issues
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_header(promotion: &Promotion, issues: &mut Vec<ValidationIssue>) {
    if is_blank(&promotion.code) {
        issues.push(ValidationIssue::new("code", "Le code est obligatoire"));
    }
    if is_blank(&promotion.name) {
        issues.push(ValidationIssue::new("name", "Le nom est obligatoire"));
    }
    if promotion.start_date.is_none() {
        issues.push(ValidationIssue::new(
            "start_date",
            "La date de début est obligatoire",
        ));
    }
    if promotion.end_date.is_none() {
        issues.push(ValidationIssue::new("end_date", "La date de fin est obligatoire"));
    }
    if promotion.sequence < 1 {
        issues.push(ValidationIssue::new(
            "sequence",
            "La séquence doit être un entier supérieur ou égal à 1",
        ));
    }
    if promotion.skip_to_sequence < 0 {
        issues.push(ValidationIssue::new(
            "skip_to_sequence",
            "La séquence d'exclusivité doit être un entier positif ou nul",
        ));
    }
}

fn check_burning(promotion: &Promotion, issues: &mut Vec<ValidationIssue>) {
    if !promotion.is_burning_promo {
        return;
    }
    if is_blank(&promotion.based_on_burned) {
        issues.push(ValidationIssue::new(
            "based_on_burned",
            "Le code de solde est obligatoire pour une promotion à consommation",
        ));
    }
}

fn check_dates(promotion: &Promotion, context: ValidationContext, issues: &mut Vec<ValidationIssue>) {
    let (Some(start), Some(end)) = (promotion.start_date, promotion.end_date) else {
        return;
    };
    if end <= start {
        issues.push(ValidationIssue::new(
            "end_date",
            "La date de fin doit être postérieure à la date de début",
        ));
    }
    if context.is_new && start < context.today {
        issues.push(ValidationIssue::new(
            "start_date",
            "La date de début ne peut pas être dans le passé",
        ));
    }
}

fn check_line(index: usize, line: &PromotionLine, issues: &mut Vec<ValidationIssue>) {
    let number = index + 1;
    let key = |field: &str| format!("lines.{index}.{field}");

    if is_blank(&line.name) {
        issues.push(ValidationIssue::new(
            key("name"),
            format!("Règle {number} : le nom est obligatoire"),
        ));
    }

    let target_missing = |code: &Option<String>| code.as_deref().is_none_or(is_blank);
    match line.paid_based_on_product {
        PaidBasedOn::SpecificProduct if target_missing(&line.paid_product_code) => {
            issues.push(ValidationIssue::new(
                key("paid_product_code"),
                format!("Règle {number} : le produit ciblé est obligatoire"),
            ));
        }
        PaidBasedOn::ProductFamily if target_missing(&line.paid_product_family_code) => {
            issues.push(ValidationIssue::new(
                key("paid_product_family_code"),
                format!("Règle {number} : la famille ciblée est obligatoire"),
            ));
        }
        _ => {}
    }

    check_assortment(index, line, issues);
    check_details(index, line, issues);
}

fn check_assortment(index: usize, line: &PromotionLine, issues: &mut Vec<ValidationIssue>) {
    let number = index + 1;

    if line.assortment_type.requires_products() {
        if line.assortments.is_empty() {
            issues.push(ValidationIssue::new(
                format!("lines.{index}.assortments"),
                format!(
                    "Règle {number} : l'assortiment exige au moins un produit ou une famille"
                ),
            ));
        }
        for (position, entry) in line.assortments.iter().enumerate() {
            let entry_number = position + 1;
            if is_blank(&entry.product_code) {
                issues.push(ValidationIssue::new(
                    format!("lines.{index}.assortments.{position}.product_code"),
                    format!(
                        "Règle {number}, assortiment {entry_number} : le code produit est obligatoire"
                    ),
                ));
            }
            if entry.minimum < 1 {
                issues.push(ValidationIssue::new(
                    format!("lines.{index}.assortments.{position}.minimum"),
                    format!(
                        "Règle {number}, assortiment {entry_number} : la quantité minimale doit être au moins 1"
                    ),
                ));
            }
        }
    }

    if line.assortment_type.requires_cart_amount()
        && !line.minimum_cart_amount.is_some_and(|amount| amount > Decimal::ZERO)
    {
        issues.push(ValidationIssue::new(
            format!("lines.{index}.minimum_cart_amount"),
            format!("Règle {number} : le montant minimum du panier doit être supérieur à 0"),
        ));
    }
}

fn check_details(index: usize, line: &PromotionLine, issues: &mut Vec<ValidationIssue>) {
    let number = index + 1;

    if line.details.is_empty() {
        issues.push(ValidationIssue::new(
            format!("lines.{index}.details"),
            format!("Règle {number} : au moins un palier est requis"),
        ));
        return;
    }

    for (position, detail) in line.details.iter().enumerate() {
        let tier = position + 1;
        let key = |field: &str| format!("lines.{index}.details.{position}.{field}");

        if detail.promo_type.is_none() {
            issues.push(ValidationIssue::new(
                key("promo_type"),
                format!("Règle {number}, palier {tier} : le type de remise est obligatoire"),
            ));
        }
        if detail.minimum_value < Decimal::ZERO {
            issues.push(ValidationIssue::new(
                key("minimum_value"),
                format!("Règle {number}, palier {tier} : le seuil doit être positif ou nul"),
            ));
        }
        if detail.amount <= Decimal::ZERO {
            issues.push(ValidationIssue::new(
                key("amount"),
                format!("Règle {number}, palier {tier} : le montant doit être supérieur à 0"),
            ));
        }
    }

    let duplicates = duplicate_thresholds(line);
    if !duplicates.is_empty() {
        let listed: Vec<String> = duplicates.iter().map(|v| v.normalize().to_string()).collect();
        issues.push(ValidationIssue::new(
            format!("lines.{index}.details"),
            format!("Règle {number} : seuils en double ({})", listed.join(", ")),
        ));
    }
}

/// Thresholds used by more than one breakpoint, in order of first repetition.
fn duplicate_thresholds(line: &PromotionLine) -> Vec<Decimal> {
    let mut seen: Vec<Decimal> = Vec::with_capacity(line.details.len());
    let mut duplicates: Vec<Decimal> = Vec::new();
    for detail in &line.details {
        let value = detail.minimum_value;
        if seen.contains(&value) {
            if !duplicates.contains(&value) {
                duplicates.push(value);
            }
        } else {
            seen.push(value);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssortmentEntry, AssortmentType, Breakpoint, PromoType};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn context() -> ValidationContext {
        ValidationContext::for_new(date("2024-01-01"))
    }

    fn valid_line() -> PromotionLine {
        let mut line = PromotionLine::new("Remise famille");
        line.target_family("FAM1");
        line.add_detail(Breakpoint::new(
            PromoType::PercentageDiscount,
            Decimal::new(5, 0),
            Decimal::new(10, 0),
        ));
        line
    }

    fn valid_promotion() -> Promotion {
        let mut promotion = Promotion::new();
        promotion.code = "PROMO-1".to_string();
        promotion.name = "Promotion de printemps".to_string();
        promotion.start_date = Some(date("2024-03-01"));
        promotion.end_date = Some(date("2024-03-31"));
        promotion.add_line(valid_line());
        promotion
    }

    fn keys(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn test_valid_promotion_has_no_issues() {
        assert!(validate_promotion(&valid_promotion(), context()).is_empty());
    }

    #[test]
    fn test_empty_draft_reports_header_then_lines() {
        let issues = validate_promotion(&Promotion::new(), context());
        assert_eq!(
            keys(&issues),
            vec!["code", "name", "start_date", "end_date", "lines"]
        );
    }

    #[test]
    fn test_sequence_must_be_positive() {
        let mut promotion = valid_promotion();
        promotion.sequence = 0;
        promotion.skip_to_sequence = -1;
        let issues = validate_promotion(&promotion, context());
        assert_eq!(keys(&issues), vec!["sequence", "skip_to_sequence"]);
    }

    #[test]
    fn test_burning_requires_balance_code() {
        let mut promotion = valid_promotion();
        promotion.is_burning_promo = true;
        promotion.based_on_burned = "   ".to_string();
        let issues = validate_promotion(&promotion, context());
        assert_eq!(keys(&issues), vec!["based_on_burned"]);

        promotion.based_on_burned = "LOYALTY_CREDIT".to_string();
        assert!(validate_promotion(&promotion, context()).is_empty());
    }

    #[test]
    fn test_missing_scale_method() {
        let mut promotion = valid_promotion();
        promotion.scale_method = None;
        assert_eq!(keys(&validate_promotion(&promotion, context())), vec!["scale_method"]);
    }

    #[test]
    fn test_end_date_must_follow_start_date() {
        let mut promotion = valid_promotion();
        promotion.end_date = promotion.start_date;
        assert_eq!(keys(&validate_promotion(&promotion, context())), vec!["end_date"]);
    }

    #[test]
    fn test_past_start_only_rejected_for_new_promotions() {
        let mut promotion = valid_promotion();
        promotion.start_date = Some(date("2023-12-15"));

        let issues = validate_promotion(&promotion, context());
        assert_eq!(keys(&issues), vec!["start_date"]);

        let existing = ValidationContext::for_existing(date("2024-01-01"));
        assert!(validate_promotion(&promotion, existing).is_empty());
    }

    #[test]
    fn test_start_today_is_accepted() {
        let mut promotion = valid_promotion();
        promotion.start_date = Some(date("2024-01-01"));
        assert!(validate_promotion(&promotion, context()).is_empty());
    }

    #[test]
    fn test_line_target_codes() {
        let mut promotion = valid_promotion();
        promotion.lines[0].name = String::new();
        promotion.lines[0].paid_product_family_code = Some(" ".to_string());
        let mut product_line = valid_line();
        product_line.target_product("");
        promotion.add_line(product_line);

        let issues = validate_promotion(&promotion, context());
        assert_eq!(
            keys(&issues),
            vec![
                "lines.0.name",
                "lines.0.paid_product_family_code",
                "lines.1.paid_product_code"
            ]
        );
        assert!(issues[2].message.starts_with("Règle 2"));
    }

    #[test]
    fn test_multiple_and_requires_entries() {
        let mut promotion = valid_promotion();
        promotion.lines[0].set_assortment_type(AssortmentType::MultipleAnd);

        let issues = validate_promotion(&promotion, context());
        assert_eq!(keys(&issues), vec!["lines.0.assortments"]);
        assert!(issues[0].message.contains("Règle 1"));
    }

    #[test]
    fn test_assortment_entries_are_checked() {
        let mut promotion = valid_promotion();
        let line = &mut promotion.lines[0];
        line.set_assortment_type(AssortmentType::MultipleAnd);
        line.add_assortment(AssortmentEntry::product("SKU-1", 2));
        line.add_assortment(AssortmentEntry::family("", 0));

        let issues = validate_promotion(&promotion, context());
        assert_eq!(
            keys(&issues),
            vec![
                "lines.0.assortments.1.product_code",
                "lines.0.assortments.1.minimum"
            ]
        );
        assert!(issues[0].message.contains("assortiment 2"));
    }

    #[test]
    fn test_both_requires_entries_and_cart_amount() {
        let mut promotion = valid_promotion();
        promotion.lines[0].set_assortment_type(AssortmentType::Both);
        promotion.lines[0].minimum_cart_amount = Some(Decimal::ZERO);

        let issues = validate_promotion(&promotion, context());
        assert_eq!(
            keys(&issues),
            vec!["lines.0.assortments", "lines.0.minimum_cart_amount"]
        );
    }

    #[test]
    fn test_details_are_required() {
        let mut promotion = valid_promotion();
        promotion.lines[0].details.clear();
        let issues = validate_promotion(&promotion, context());
        assert_eq!(keys(&issues), vec!["lines.0.details"]);
    }

    #[test]
    fn test_detail_fields_are_checked() {
        let mut promotion = valid_promotion();
        let detail = &mut promotion.lines[0].details[0];
        detail.promo_type = None;
        detail.minimum_value = Decimal::new(-1, 0);
        detail.amount = Decimal::ZERO;

        let issues = validate_promotion(&promotion, context());
        assert_eq!(
            keys(&issues),
            vec![
                "lines.0.details.0.promo_type",
                "lines.0.details.0.minimum_value",
                "lines.0.details.0.amount"
            ]
        );
        assert!(issues[0].message.contains("palier 1"));
    }

    #[test]
    fn test_duplicate_thresholds_are_listed_once() {
        let mut promotion = valid_promotion();
        let line = &mut promotion.lines[0];
        for (threshold, amount) in [(10, 15), (5, 20), (10, 25), (10, 30)] {
            line.add_detail(Breakpoint::new(
                PromoType::FixedAmountDiscount,
                Decimal::new(threshold, 0),
                Decimal::new(amount, 0),
            ));
        }

        let issues = validate_promotion(&promotion, context());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "lines.0.details");
        assert_eq!(issues[0].message, "Règle 1 : seuils en double (5, 10)");
    }

    #[test]
    fn test_duplicate_thresholds_compare_numerically() {
        let mut promotion = valid_promotion();
        promotion.lines[0].add_detail(Breakpoint::new(
            PromoType::PercentageDiscount,
            Decimal::new(500, 2),
            Decimal::new(15, 0),
        ));
        let issues = validate_promotion(&promotion, context());
        assert_eq!(issues[0].message, "Règle 1 : seuils en double (5)");
    }

    #[test]
    fn test_payment_terms_required_when_dependent() {
        let mut promotion = valid_promotion();
        promotion.payment_term_dependent = true;
        assert_eq!(keys(&validate_promotion(&promotion, context())), vec!["payment_terms"]);

        promotion.payment_terms.push("CASH".to_string());
        assert!(validate_promotion(&promotion, context()).is_empty());
    }
}
