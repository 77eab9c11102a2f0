//! Cross-checks between a promotion and the reference catalog.

use crate::config::ConfigLoader;
use crate::models::{PaidBasedOn, Promotion};

use super::ValidationIssue;

/// Reports every code of the promotion that the catalog does not know.
///
/// Blank codes are left to [`validate_promotion`](super::validate_promotion).
pub fn validate_references(promotion: &Promotion, config: &ConfigLoader) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if promotion.is_burning_promo
        && !promotion.based_on_burned.trim().is_empty()
        && config.get_balance_code(&promotion.based_on_burned).is_err()
    {
        issues.push(ValidationIssue::new(
            "based_on_burned",
            format!("Code de solde inconnu : {}", promotion.based_on_burned.trim()),
        ));
    }

    for (index, line) in promotion.lines.iter().enumerate() {
        let number = index + 1;
        match (line.paid_based_on_product, line.target_code()) {
            (PaidBasedOn::SpecificProduct, Some(code))
                if !code.trim().is_empty() && config.get_product(code).is_err() =>
            {
                issues.push(ValidationIssue::new(
                    format!("lines.{index}.paid_product_code"),
                    format!("Règle {number} : produit inconnu {code}"),
                ));
            }
            (PaidBasedOn::ProductFamily, Some(code))
                if !code.trim().is_empty() && config.get_product_family(code).is_err() =>
            {
                issues.push(ValidationIssue::new(
                    format!("lines.{index}.paid_product_family_code"),
                    format!("Règle {number} : famille inconnue {code}"),
                ));
            }
            _ => {}
        }

        if !line.assortment_type.requires_products() {
            continue;
        }
        for (position, entry) in line.assortments.iter().enumerate() {
            let code = entry.product_code.as_str();
            if code.trim().is_empty() {
                continue;
            }
            let known = if entry.based_on_product {
                config.get_product(code).is_ok()
            } else {
                config.get_product_family(code).is_ok()
            };
            if !known {
                issues.push(ValidationIssue::new(
                    format!("lines.{index}.assortments.{position}.product_code"),
                    format!(
                        "Règle {number}, assortiment {} : code inconnu {code}",
                        position + 1
                    ),
                ));
            }
        }
    }

    for (position, code) in promotion.partner_families.iter().enumerate() {
        if config.get_partner_family(code).is_err() {
            issues.push(ValidationIssue::new(
                format!("partner_families.{position}"),
                format!("Famille de partenaires inconnue : {code}"),
            ));
        }
    }

    for (position, code) in promotion.payment_terms.iter().enumerate() {
        if config.get_payment_term(code).is_err() {
            issues.push(ValidationIssue::new(
                format!("payment_terms.{position}"),
                format!("Condition de paiement inconnue : {code}"),
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReferenceCatalog;
    use crate::models::{
        AssortmentEntry, AssortmentType, BalanceCode, PartnerFamily, PaymentTerm, Product, ProductFamily,
        PromotionLine,
    };
    use rust_decimal::Decimal;

    fn loader() -> ConfigLoader {
        ConfigLoader::from_catalog(ReferenceCatalog::new(
            vec![Product {
                code: "SKU-1".to_string(),
                name: "Eau".to_string(),
                price: Decimal::new(450, 2),
                stock: Decimal::new(10, 0),
            }],
            vec![ProductFamily {
                code: "FAM1".to_string(),
                name: "Boissons".to_string(),
                description: String::new(),
                product_count: 1,
            }],
            vec![PartnerFamily {
                code: "GROS".to_string(),
                name: "Grossistes".to_string(),
                condition: None,
                partner_count: 3,
            }],
            vec![PaymentTerm {
                code: "CASH".to_string(),
                name: "Comptant".to_string(),
                description: String::new(),
                is_cash: true,
                is_credit: false,
                is_bank_transfer: false,
            }],
            vec![BalanceCode {
                code: "LOYALTY_CREDIT".to_string(),
                name: "Crédit fidélité".to_string(),
            }],
        ))
    }

    #[test]
    fn test_known_codes_pass() {
        let mut promotion = Promotion::new();
        let mut line = PromotionLine::new("A");
        line.target_product("SKU-1");
        line.set_assortment_type(AssortmentType::MultipleAnd);
        line.add_assortment(AssortmentEntry::family("FAM1", 2));
        promotion.add_line(line);
        promotion.partner_families.push("GROS".to_string());
        promotion.payment_terms.push("CASH".to_string());

        assert!(validate_references(&promotion, &loader()).is_empty());
    }

    #[test]
    fn test_unused_assortments_are_not_looked_up() {
        let mut promotion = Promotion::new();
        for assortment_type in [AssortmentType::None, AssortmentType::CartAmount] {
            let mut line = PromotionLine::new("A");
            line.assortment_type = assortment_type;
            line.assortments.push(AssortmentEntry::product("STALE-SKU", 1));
            promotion.add_line(line);
        }

        assert!(validate_references(&promotion, &loader()).is_empty());
    }

    #[test]
    fn test_balance_codes_come_from_the_catalog() {
        let mut promotion = Promotion::new();
        promotion.is_burning_promo = true;
        promotion.based_on_burned = "loyalty_credit".to_string();
        assert!(validate_references(&promotion, &loader()).is_empty());

        promotion.based_on_burned = "POINTS".to_string();
        let issues = validate_references(&promotion, &loader());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "based_on_burned");
        assert!(issues[0].message.contains("POINTS"));

        promotion.is_burning_promo = false;
        assert!(validate_references(&promotion, &loader()).is_empty());
    }

    #[test]
    fn test_unknown_codes_are_reported() {
        let mut promotion = Promotion::new();
        let mut line = PromotionLine::new("A");
        line.target_family("FAM9");
        line.set_assortment_type(AssortmentType::MultipleAnd);
        line.add_assortment(AssortmentEntry::product("FAM1", 1));
        line.add_assortment(AssortmentEntry::product("", 1));
        promotion.add_line(line);
        promotion.partner_families.push("NOPE".to_string());
        promotion.payment_terms.push("LATER".to_string());

        let issues = validate_references(&promotion, &loader());
        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "lines.0.paid_product_family_code",
                "lines.0.assortments.0.product_code",
                "partner_families.0",
                "payment_terms.0"
            ]
        );
    }
}
