// ==========================================
// Banking Data Loader - product catalog model
// ==========================================
// Product polymorphism: one base record plus a variant payload
// selected by the product type. The variant carries only the
// numeric fields that type may have, so a credit card cannot
// carry a savings withdrawal limit.
// ==========================================

use crate::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductType - catalog type enumeration
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    PersonalCurrentAccount,
    Savings,
    CreditCard,
    Overdraft,
}

impl ProductType {
    /// Canonical storage form, as found in the source dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::PersonalCurrentAccount => "PERSONAL-CURRENT-ACCOUNT",
            ProductType::Savings => "SAVINGS-ACCOUNT",
            ProductType::CreditCard => "CREDIT-CARD",
            ProductType::Overdraft => "OVERDRAFT",
        }
    }

    pub fn parse(value: &str) -> ImportResult<Self> {
        match value.trim().to_uppercase().as_str() {
            "PERSONAL-CURRENT-ACCOUNT" => Ok(ProductType::PersonalCurrentAccount),
            "SAVINGS-ACCOUNT" | "SAVINGS" => Ok(ProductType::Savings),
            "CREDIT-CARD" => Ok(ProductType::CreditCard),
            "OVERDRAFT" => Ok(ProductType::Overdraft),
            other => Err(ImportError::UnknownProductType(other.to_string())),
        }
    }
}

// ==========================================
// ProductDetails - type-specific payload
// ==========================================
// Constructed together with the Product, so an invalid
// field/type pairing cannot be represented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProductDetails {
    PersonalCurrentAccount {
        interest_rate: Option<f64>,
        monthly_fee: Option<f64>,
        min_monthly_deposit: Option<f64>,
        interest_free_overdraft_limit: Option<f64>,
    },
    Savings {
        interest_rate: Option<f64>,
        max_monthly_deposit: Option<f64>,
        max_yearly_withdrawal: Option<f64>,
        max_withdrawal_limit: Option<f64>,
    },
    CreditCard {
        credit_limit: Option<f64>,
        daily_interest_rate: Option<f64>,
        monthly_fee: Option<f64>,
    },
    Overdraft {
        daily_interest_rate: Option<f64>,
        interest_free_buffer: Option<f64>,
    },
}

impl ProductDetails {
    /// The type enumeration value implied by the payload.
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductDetails::PersonalCurrentAccount { .. } => ProductType::PersonalCurrentAccount,
            ProductDetails::Savings { .. } => ProductType::Savings,
            ProductDetails::CreditCard { .. } => ProductType::CreditCard,
            ProductDetails::Overdraft { .. } => ProductType::Overdraft,
        }
    }
}

// ==========================================
// Product - catalog entry
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    // ===== primary key =====
    pub product_id: String,

    // ===== base attributes =====
    pub product_name: String,
    pub product_benefits: Option<String>,

    // ===== type-specific payload =====
    pub details: ProductDetails,
}

impl Product {
    pub fn product_type(&self) -> ProductType {
        self.details.product_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_roundtrip() {
        for ty in [
            ProductType::PersonalCurrentAccount,
            ProductType::Savings,
            ProductType::CreditCard,
            ProductType::Overdraft,
        ] {
            assert_eq!(ProductType::parse(ty.as_str()).unwrap(), ty);
        }
    }

    #[test]
    fn test_product_type_parse_unknown() {
        assert!(matches!(
            ProductType::parse("MORTGAGE"),
            Err(crate::error::ImportError::UnknownProductType(_))
        ));
    }

    #[test]
    fn test_details_imply_type() {
        let details = ProductDetails::CreditCard {
            credit_limit: Some(5000.0),
            daily_interest_rate: Some(0.05),
            monthly_fee: None,
        };
        assert_eq!(details.product_type(), ProductType::CreditCard);
    }
}
