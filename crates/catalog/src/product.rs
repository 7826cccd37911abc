//! Product tree records and the closed choice sets of the catalog feed.
//!
//! Every enumerated feed token is a Rust enum, so an out-of-set value is
//! unrepresentable once normalization has succeeded. `as_str`/`parse` expose
//! the exact upstream token forms for the normalizer.

use serde::{Deserialize, Serialize};

use tradefeed_core::{
    CategoryId, DomainError, DomainResult, Entity, MeatInfoId, ProductId, SessionId,
};

/// Kind of product code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    Gtin,
    WhitelistedPlu,
}

impl CodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            CodeType::Gtin => "gtin",
            CodeType::WhitelistedPlu => "whitelisted_plu",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "gtin" => Some(CodeType::Gtin),
            "whitelisted_plu" => Some(CodeType::WhitelistedPlu),
            _ => None,
        }
    }
}

/// Packaging code (GS1-style short tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Packaging {
    Pug,
    Ct,
    Cu,
    Bo,
    Ne,
    Bx,
    Cr,
    Bj,
    Jr,
    Pu,
}

impl Packaging {
    pub fn as_str(self) -> &'static str {
        match self {
            Packaging::Pug => "PUG",
            Packaging::Ct => "CT",
            Packaging::Cu => "CU",
            Packaging::Bo => "BO",
            Packaging::Ne => "NE",
            Packaging::Bx => "BX",
            Packaging::Cr => "CR",
            Packaging::Bj => "BJ",
            Packaging::Jr => "JR",
            Packaging::Pu => "PU",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "PUG" => Some(Packaging::Pug),
            "CT" => Some(Packaging::Ct),
            "CU" => Some(Packaging::Cu),
            "BO" => Some(Packaging::Bo),
            "NE" => Some(Packaging::Ne),
            "BX" => Some(Packaging::Bx),
            "CR" => Some(Packaging::Cr),
            "BJ" => Some(Packaging::Bj),
            "JR" => Some(Packaging::Jr),
            "PU" => Some(Packaging::Pu),
            _ => None,
        }
    }
}

/// Trade item unit descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeItemUnitDescriptor {
    Case,
    BaseUnitOrEach,
}

impl TradeItemUnitDescriptor {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeItemUnitDescriptor::Case => "CASE",
            TradeItemUnitDescriptor::BaseUnitOrEach => "BASE_UNIT_OR_EACH",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "CASE" => Some(TradeItemUnitDescriptor::Case),
            "BASE_UNIT_OR_EACH" => Some(TradeItemUnitDescriptor::BaseUnitOrEach),
            _ => None,
        }
    }
}

/// Localized descriptor name as sent by the feed (German).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeItemUnitDescriptorName {
    Karton,
    Basiseinheit,
}

impl TradeItemUnitDescriptorName {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeItemUnitDescriptorName::Karton => "Karton",
            TradeItemUnitDescriptorName::Basiseinheit => "Basiseinheit",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Karton" => Some(TradeItemUnitDescriptorName::Karton),
            "Basiseinheit" => Some(TradeItemUnitDescriptorName::Basiseinheit),
            _ => None,
        }
    }
}

/// Whether the record passed upstream validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Validated,
    Unvalidated,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Validated => "validated",
            ValidationStatus::Unvalidated => "unvalidated",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "validated" => Some(ValidationStatus::Validated),
            "unvalidated" => Some(ValidationStatus::Unvalidated),
            _ => None,
        }
    }
}

/// VAT rate tier (separate from the numeric rate code in the VAT block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VatRateTier {
    Standard,
    Low,
}

impl VatRateTier {
    pub fn as_str(self) -> &'static str {
        match self {
            VatRateTier::Standard => "STANDARD",
            VatRateTier::Low => "LOW",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "STANDARD" => Some(VatRateTier::Standard),
            "LOW" => Some(VatRateTier::Low),
            _ => None,
        }
    }
}

/// Payload-settable portion of a product record, produced by the normalizer
/// and turned into a stored [`Product`] via [`Product::from_draft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub parent: Option<ProductId>,
    pub category: Option<CategoryId>,
    pub session: Option<SessionId>,
    pub code: String,
    pub code_type: Option<CodeType>,
    pub comment: Option<String>,
    pub amount_multiplier: i64,
    pub brand: String,
    pub description: String,
    pub edeka_article_number: Option<String>,
    pub net_weight: f64,
    pub gross_weight: Option<f64>,
    pub unit_name: String,
    pub notes: Option<String>,
    pub packaging: Packaging,
    pub trade_item_unit_descriptor: TradeItemUnitDescriptor,
    pub trade_item_unit_descriptor_name: Option<TradeItemUnitDescriptorName>,
    /// Tri-state: the feed distinguishes "no"/"yes"/"did not say".
    pub requires_best_before_date: Option<bool>,
    pub requires_meat_info: bool,
    pub validation_status: ValidationStatus,
    pub vat_country_name: Option<String>,
    pub vat_label: Option<String>,
    pub vat_rate_code: Option<i64>,
    pub vat_rate: Option<VatRateTier>,
    pub regulated_name: Option<String>,
}

/// Stored product record (node of the product tree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub draft: ProductDraft,
    /// One-to-one meat-info link; only legal when
    /// `draft.requires_meat_info` is set.
    pub meat_info: Option<MeatInfoId>,
}

impl Product {
    pub fn from_draft(draft: ProductDraft, meat_info: Option<MeatInfoId>) -> DomainResult<Self> {
        if draft.code.trim().is_empty() {
            return Err(DomainError::validation("product code cannot be empty"));
        }
        if draft.unit_name.trim().is_empty() {
            return Err(DomainError::validation("unit_name cannot be empty"));
        }
        if !draft.net_weight.is_finite() {
            return Err(DomainError::validation("net_weight must be a finite number"));
        }
        if meat_info.is_some() && !draft.requires_meat_info {
            return Err(DomainError::invariant(
                "meat_info link present but requires_meat_info is false",
            ));
        }

        Ok(Self {
            id: ProductId::new(),
            draft,
            meat_info,
        })
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn draft() -> ProductDraft {
        ProductDraft {
            parent: None,
            category: None,
            session: None,
            code: "4311501438306".into(),
            code_type: Some(CodeType::Gtin),
            comment: None,
            amount_multiplier: 1,
            brand: "GUT&GUENSTIG".into(),
            description: "H-Milch 3,5%".into(),
            edeka_article_number: Some("111087".into()),
            net_weight: 1.0,
            gross_weight: Some(1.06),
            unit_name: "l".into(),
            notes: None,
            packaging: Packaging::Ct,
            trade_item_unit_descriptor: TradeItemUnitDescriptor::BaseUnitOrEach,
            trade_item_unit_descriptor_name: Some(TradeItemUnitDescriptorName::Basiseinheit),
            requires_best_before_date: Some(true),
            requires_meat_info: false,
            validation_status: ValidationStatus::Validated,
            vat_country_name: Some("DEU".into()),
            vat_label: Some("DE7".into()),
            vat_rate_code: Some(19),
            vat_rate: Some(VatRateTier::Standard),
            regulated_name: None,
        }
    }

    #[test]
    fn from_draft_accepts_a_complete_record() {
        let product = Product::from_draft(draft(), None).unwrap();
        assert_eq!(product.draft.code, "4311501438306");
        assert!(product.meat_info.is_none());
    }

    #[test]
    fn meat_link_without_flag_violates_invariant() {
        let err = Product::from_draft(draft(), Some(tradefeed_core::MeatInfoId::new()))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn meat_link_with_flag_is_accepted() {
        let mut d = draft();
        d.requires_meat_info = true;
        let product = Product::from_draft(d, Some(tradefeed_core::MeatInfoId::new())).unwrap();
        assert!(product.meat_info.is_some());
    }

    #[test]
    fn empty_code_and_non_finite_weight_are_rejected() {
        let mut d = draft();
        d.code = " ".into();
        assert!(Product::from_draft(d, None).is_err());

        let mut d = draft();
        d.net_weight = f64::NAN;
        assert!(Product::from_draft(d, None).is_err());
    }

    #[test]
    fn enum_tokens_match_the_feed_exactly() {
        assert_eq!(serde_json::to_string(&Packaging::Ne).unwrap(), "\"NE\"");
        assert_eq!(serde_json::to_string(&Packaging::Pug).unwrap(), "\"PUG\"");
        assert_eq!(
            serde_json::to_string(&TradeItemUnitDescriptor::BaseUnitOrEach).unwrap(),
            "\"BASE_UNIT_OR_EACH\""
        );
        assert_eq!(
            serde_json::to_string(&TradeItemUnitDescriptorName::Karton).unwrap(),
            "\"Karton\""
        );
        assert_eq!(
            serde_json::to_string(&ValidationStatus::Unvalidated).unwrap(),
            "\"unvalidated\""
        );
        assert_eq!(serde_json::to_string(&VatRateTier::Low).unwrap(), "\"LOW\"");
        assert_eq!(
            serde_json::to_string(&CodeType::WhitelistedPlu).unwrap(),
            "\"whitelisted_plu\""
        );
    }

    #[test]
    fn parse_and_as_str_agree() {
        for p in [
            Packaging::Pug,
            Packaging::Ct,
            Packaging::Cu,
            Packaging::Bo,
            Packaging::Ne,
            Packaging::Bx,
            Packaging::Cr,
            Packaging::Bj,
            Packaging::Jr,
            Packaging::Pu,
        ] {
            assert_eq!(Packaging::parse(p.as_str()), Some(p));
        }
        assert_eq!(Packaging::parse("XX"), None);
        assert_eq!(
            TradeItemUnitDescriptor::parse("CASE"),
            Some(TradeItemUnitDescriptor::Case)
        );
        assert_eq!(ValidationStatus::parse("VALIDATED"), None);
    }
}
