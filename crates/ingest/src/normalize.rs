//! Strict normalization: canonical item -> typed catalog drafts.
//!
//! Pure and deterministic: one independent call per item, no shared mutable
//! state, no IO. Errors are collected per item, never short-circuited, so a
//! rejection report names every offending field at once.

use serde_json::Value;
use tracing::{debug, warn};

use tradefeed_catalog::meat::MeatInfoFields;
use tradefeed_catalog::product::{
    CodeType, Packaging, Product, ProductDraft, TradeItemUnitDescriptor,
    TradeItemUnitDescriptorName, ValidationStatus, VatRateTier,
};
use tradefeed_catalog::store::CatalogStore;
use tradefeed_catalog::MeatInfo;
use tradefeed_core::{DomainResult, ProductId};
use tradefeed_countries::CountryCode;

use crate::canonical::{canonicalize, CanonicalItem, RawMeatFields};
use crate::error::{FieldError, FieldErrorKind, ValidationFailure};

/// Output of normalizing one item: a product draft plus its meat-origin
/// fields when the item requires them. All-or-nothing — this exists only if
/// every field of the item checked out.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub product: ProductDraft,
    pub meat_info: Option<MeatInfoFields>,
}

impl NormalizedItem {
    /// Hand the drafts to the persistence collaborator: insert the meat row
    /// first (if any), then the product linking to it. An item that requires
    /// meat info but reported none of the fields gets no meat row.
    pub fn insert_into(self, store: &mut impl CatalogStore) -> DomainResult<ProductId> {
        let meat_id = match self.meat_info {
            Some(fields) if !fields.is_empty() => {
                Some(store.insert_meat_info(MeatInfo::create(fields))?)
            }
            _ => None,
        };
        let product = Product::from_draft(self.product, meat_id)?;
        store.insert_product(product)
    }
}

/// Normalize one feed item into typed drafts.
pub fn normalize_item(item: &Value) -> Result<NormalizedItem, ValidationFailure> {
    let mut errors = Vec::new();
    let canonical = canonicalize(item, &mut errors);

    let Some(canonical) = canonical else {
        return Err(ValidationFailure::new(errors));
    };

    let normalized = build_drafts(&canonical, &mut errors);

    match normalized {
        Some(normalized) if errors.is_empty() => Ok(normalized),
        _ => Err(ValidationFailure::new(errors)),
    }
}

/// Normalize a whole batch. Items are independent; a malformed item yields
/// its failure in place and never aborts the neighbors.
pub fn normalize_batch(items: &[Value]) -> Vec<Result<NormalizedItem, ValidationFailure>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match normalize_item(item) {
            Ok(normalized) => {
                debug!(index, code = %normalized.product.code, "item normalized");
                Ok(normalized)
            }
            Err(failure) => {
                warn!(index, error_count = failure.errors.len(), %failure, "item rejected");
                Err(failure)
            }
        })
        .collect()
}

fn build_drafts(
    canonical: &CanonicalItem,
    errors: &mut Vec<FieldError>,
) -> Option<NormalizedItem> {
    let code = required_string(canonical.code.as_deref(), "code", errors);

    let code_type = parse_optional(
        canonical.code_type.as_deref(),
        "type",
        CodeType::parse,
        errors,
    );

    let amount_multiplier = match canonical.amount_multiplier {
        Some(n) => Some(n),
        None => {
            errors.push(FieldError::missing("amount_multiplier"));
            None
        }
    };

    let brand = required_string(canonical.brand.as_deref(), "brand", errors);
    let description = required_string(canonical.description.as_deref(), "description", errors);

    let net_weight = match &canonical.net_weight {
        Some(weight) => Some(weight.amount),
        None => {
            errors.push(FieldError::missing("net_weight"));
            None
        }
    };
    let gross_weight = canonical.gross_weight.as_ref().map(|w| w.amount);

    // Explicit unit_name wins; otherwise the net-weight mapping's unit is
    // the documented fallback source.
    let unit_name = canonical
        .unit_name
        .clone()
        .or_else(|| canonical.net_weight.as_ref().and_then(|w| w.unit.clone()));
    let unit_name = required_string(unit_name.as_deref(), "unit_name", errors);

    let packaging = parse_required(
        canonical.packaging.as_deref(),
        "packaging",
        Packaging::parse,
        errors,
    );

    let trade_item_unit_descriptor = parse_required(
        canonical.trade_item_unit_descriptor.as_deref(),
        "trade_item_unit_descriptor",
        TradeItemUnitDescriptor::parse,
        errors,
    );

    let trade_item_unit_descriptor_name = parse_optional(
        canonical.trade_item_unit_descriptor_name.as_deref(),
        "trade_item_unit_descriptor_name",
        TradeItemUnitDescriptorName::parse,
        errors,
    );

    let validation_status = parse_required(
        canonical.validation_status.as_deref(),
        "validation_status",
        ValidationStatus::parse,
        errors,
    );

    let vat_rate = parse_optional(
        canonical.vat_rate.as_deref(),
        "vat_rate",
        VatRateTier::parse,
        errors,
    );

    // Outer None = a country check failed; inner None = the item simply
    // carries no meat info. Same convention as `parse_optional`.
    let meat_info = match canonical.meat.as_ref() {
        None => Some(None),
        Some(raw) => meat_fields(raw, errors).map(Some),
    };

    let (vat_country_name, vat_label, vat_rate_code) = match &canonical.vat {
        Some(vat) => (
            Some(vat.country.clone()),
            vat.label.clone(),
            vat.rate,
        ),
        None => (None, None, None),
    };

    Some(NormalizedItem {
        product: ProductDraft {
            parent: None,
            category: None,
            session: None,
            code: code?,
            code_type: code_type?,
            comment: canonical.comment.clone(),
            amount_multiplier: amount_multiplier?,
            brand: brand?,
            description: description?,
            edeka_article_number: canonical.edeka_article_number.clone(),
            net_weight: net_weight?,
            gross_weight,
            unit_name: unit_name?,
            notes: canonical.notes.clone(),
            packaging: packaging?,
            trade_item_unit_descriptor: trade_item_unit_descriptor?,
            trade_item_unit_descriptor_name: trade_item_unit_descriptor_name?,
            requires_best_before_date: canonical.requires_best_before_date,
            requires_meat_info: canonical.requires_meat_info,
            validation_status: validation_status?,
            vat_country_name,
            vat_label,
            vat_rate_code,
            vat_rate: vat_rate?,
            regulated_name: canonical.regulated_name.clone(),
        },
        meat_info: meat_info?,
    })
}

fn required_string(
    value: Option<&str>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(s) => Some(s.to_string()),
        None => {
            errors.push(FieldError::missing(field));
            None
        }
    }
}

/// Parse an optional enum token: absent is fine, an out-of-set token is an
/// `InvalidEnumValue`. The outer `Option` is `None` only on error.
fn parse_optional<T>(
    token: Option<&str>,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
    errors: &mut Vec<FieldError>,
) -> Option<Option<T>> {
    match token {
        None => Some(None),
        Some(token) => match parse(token) {
            Some(v) => Some(Some(v)),
            None => {
                errors.push(FieldError::new(
                    field,
                    FieldErrorKind::InvalidEnumValue,
                    Value::String(token.to_string()),
                ));
                None
            }
        },
    }
}

fn parse_required<T>(
    token: Option<&str>,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match token {
        None => {
            errors.push(FieldError::missing(field));
            None
        }
        Some(token) => match parse(token) {
            Some(v) => Some(v),
            None => {
                errors.push(FieldError::new(
                    field,
                    FieldErrorKind::InvalidEnumValue,
                    Value::String(token.to_string()),
                ));
                None
            }
        },
    }
}

fn country(
    code: Option<&str>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<Option<CountryCode>> {
    match code {
        None => Some(None),
        Some(code) => match CountryCode::parse(code) {
            Ok(parsed) => Some(Some(parsed)),
            Err(_) => {
                errors.push(FieldError::new(
                    field,
                    FieldErrorKind::InvalidCountryCode,
                    Value::String(code.to_string()),
                ));
                None
            }
        },
    }
}

fn meat_fields(raw: &RawMeatFields, errors: &mut Vec<FieldError>) -> Option<MeatInfoFields> {
    let country_of_disassembly = country(
        raw.country_of_disassembly.as_deref(),
        "country_of_disassembly",
        errors,
    );
    let country_of_rearing = country(
        raw.country_of_rearing.as_deref(),
        "country_of_rearing",
        errors,
    );
    let country_of_slaughter = country(
        raw.country_of_slaughter.as_deref(),
        "country_of_slaughter",
        errors,
    );

    Some(MeatInfoFields {
        country_of_disassembly: country_of_disassembly?,
        country_of_rearing: country_of_rearing?,
        country_of_slaughter: country_of_slaughter?,
        cutting_plant_registration: raw.cutting_plant_registration.clone(),
        slaughterhouse_registration: raw.slaughterhouse_registration.clone(),
        lot_number: raw.lot_number.clone(),
    })
}
