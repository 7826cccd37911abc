//! Pre-parse canonicalization of one feed item.
//!
//! The upstream feed is inconsistent in shape, not just in content: weights
//! arrive as a bare number or as `{"amount", "unit"}`, two descriptor keys
//! alias each other, boolean `false` stands in for "absent", and the VAT
//! block nests its country as a map key. This pass resolves all of that into
//! a single-shape [`CanonicalItem`] so the strict pass in
//! [`crate::normalize`] never has to sniff shapes. Values stay stringly
//! typed here; enum and country validation happen later.
//!
//! Duplicate keys in the raw JSON text (seen in the wild for `packaging`)
//! are already last-write-wins at parse time: `serde_json` keeps the later
//! occurrence when building an object.

use serde_json::{Map, Value};

use crate::error::{FieldError, FieldErrorKind};

/// A weight in canonical form: extracted amount plus the unit string when
/// the payload carried the mapping shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Weight {
    pub amount: f64,
    pub unit: Option<String>,
}

/// The single-country VAT block, unnested.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalVat {
    pub country: String,
    pub label: Option<String>,
    pub rate: Option<i64>,
}

/// Meat-origin fields, collected only when `requires_meat_info` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMeatFields {
    pub country_of_disassembly: Option<String>,
    pub country_of_rearing: Option<String>,
    pub country_of_slaughter: Option<String>,
    pub cutting_plant_registration: Option<String>,
    pub slaughterhouse_registration: Option<String>,
    pub lot_number: Option<String>,
}

/// One feed item with every shape quirk resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalItem {
    pub code: Option<String>,
    pub code_type: Option<String>,
    pub comment: Option<String>,
    pub amount_multiplier: Option<i64>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub edeka_article_number: Option<String>,
    pub net_weight: Option<Weight>,
    pub gross_weight: Option<Weight>,
    pub unit_name: Option<String>,
    pub notes: Option<String>,
    pub packaging: Option<String>,
    pub trade_item_unit_descriptor: Option<String>,
    pub trade_item_unit_descriptor_name: Option<String>,
    pub requires_best_before_date: Option<bool>,
    pub requires_meat_info: bool,
    pub meat: Option<RawMeatFields>,
    pub validation_status: Option<String>,
    pub vat: Option<CanonicalVat>,
    pub vat_rate: Option<String>,
    pub regulated_name: Option<String>,
}

/// Resolve one raw item into canonical shape, recording shape problems in
/// `errors`. Returns `None` only when the item is not an object at all.
pub fn canonicalize(item: &Value, errors: &mut Vec<FieldError>) -> Option<CanonicalItem> {
    let map = match item {
        Value::Object(map) => map,
        other => {
            errors.push(FieldError::new(
                "item",
                FieldErrorKind::TypeMismatch,
                other.clone(),
            ));
            return None;
        }
    };

    let mut out = CanonicalItem {
        code: opt_string(map, "code", errors),
        code_type: opt_string(map, "type", errors),
        comment: opt_string(map, "comment", errors).filter(|s| !s.is_empty()),
        amount_multiplier: opt_i64(map, "amount_multiplier", errors),
        brand: opt_string(map, "brand", errors),
        description: opt_string(map, "description", errors),
        edeka_article_number: opt_string_false_absent(map, "edeka_article_number", errors),
        net_weight: weight(map, "net_weight", errors),
        gross_weight: weight(map, "gross_weight", errors),
        unit_name: opt_string(map, "unit_name", errors),
        notes: opt_string_false_absent(map, "notes", errors),
        packaging: opt_string_false_absent(map, "packaging", errors),
        trade_item_unit_descriptor: aliased_string(
            map,
            "trade_item_unit_descriptor",
            "trade_item_descriptor",
            errors,
        ),
        trade_item_unit_descriptor_name: opt_string(
            map,
            "trade_item_unit_descriptor_name",
            errors,
        ),
        requires_best_before_date: opt_bool(map, "requires_best_before_date", errors),
        requires_meat_info: opt_bool(map, "requires_meat_info", errors).unwrap_or(false),
        meat: None,
        validation_status: aliased_string(map, "validation_status", "status", errors),
        vat: vat_block(map, errors),
        vat_rate: opt_string(map, "vat_rate", errors),
        regulated_name: opt_string(map, "regulated_name", errors),
    };

    // An explicitly-false presence flag overrides any supplied value.
    if flag_is_false(map, "edeka_article_number_present", errors) {
        out.edeka_article_number = None;
    }
    if flag_is_false(map, "notes_present", errors) {
        out.notes = None;
    }

    // Meat fields are only looked at when the flag is set; stray origin
    // fields on non-meat items are dropped here and never reach the strict
    // pass.
    if out.requires_meat_info {
        out.meat = Some(RawMeatFields {
            country_of_disassembly: opt_string(map, "country_of_disassembly", errors),
            country_of_rearing: opt_string(map, "country_of_rearing", errors),
            country_of_slaughter: opt_string(map, "country_of_slaughter", errors),
            cutting_plant_registration: opt_string(map, "cutting_plant_registration", errors),
            slaughterhouse_registration: opt_string(map, "slaughterhouse_registration", errors),
            lot_number: opt_string(map, "lot_number", errors),
        });
    }

    Some(out)
}

fn opt_string(
    map: &Map<String, Value>,
    key: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::new(
                key,
                FieldErrorKind::TypeMismatch,
                other.clone(),
            ));
            None
        }
    }
}

/// Like [`opt_string`], but a literal `false` in value position means
/// "absent" (feed quirk shared by `packaging`, `edeka_article_number` and
/// `notes`).
fn opt_string_false_absent(
    map: &Map<String, Value>,
    key: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match map.get(key) {
        Some(Value::Bool(false)) => None,
        _ => opt_string(map, key, errors),
    }
}

fn opt_i64(
    map: &Map<String, Value>,
    key: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) if n.as_i64().is_some() => n.as_i64(),
        Some(other) => {
            errors.push(FieldError::new(
                key,
                FieldErrorKind::TypeMismatch,
                other.clone(),
            ));
            None
        }
    }
}

fn opt_bool(
    map: &Map<String, Value>,
    key: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<bool> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => {
            errors.push(FieldError::new(
                key,
                FieldErrorKind::TypeMismatch,
                other.clone(),
            ));
            None
        }
    }
}

/// Whether the given presence flag is explicitly `false`. A flag of any
/// other JSON type is a shape error; an absent flag means "no opinion".
fn flag_is_false(
    map: &Map<String, Value>,
    key: &'static str,
    errors: &mut Vec<FieldError>,
) -> bool {
    match map.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => !*b,
        Some(other) => {
            errors.push(FieldError::new(
                key,
                FieldErrorKind::TypeMismatch,
                other.clone(),
            ));
            false
        }
    }
}

/// Prefer the canonical key; fall back to its legacy alias.
fn aliased_string(
    map: &Map<String, Value>,
    canonical: &'static str,
    alias: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match map.get(canonical) {
        None | Some(Value::Null) => opt_string(map, alias, errors),
        _ => opt_string(map, canonical, errors),
    }
}

/// A weight is either a bare number or `{"amount": n, "unit": u}`, with
/// `unit` itself either a number or a string.
fn weight(
    map: &Map<String, Value>,
    key: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<Weight> {
    let value = match map.get(key) {
        None | Some(Value::Null) => return None,
        Some(v) => v,
    };

    match value {
        Value::Number(n) => n.as_f64().map(|amount| Weight {
            amount,
            unit: None,
        }),
        Value::Object(fields) => {
            let amount = match fields.get("amount") {
                Some(Value::Number(n)) => n.as_f64(),
                _ => None,
            };
            let Some(amount) = amount else {
                errors.push(FieldError::new(
                    key,
                    FieldErrorKind::TypeMismatch,
                    value.clone(),
                ));
                return None;
            };
            let unit = match fields.get("unit") {
                None | Some(Value::Null) => None,
                Some(Value::Number(n)) => Some(n.to_string()),
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    errors.push(FieldError::new(
                        key,
                        FieldErrorKind::TypeMismatch,
                        other.clone(),
                    ));
                    None
                }
            };
            Some(Weight { amount, unit })
        }
        other => {
            errors.push(FieldError::new(
                key,
                FieldErrorKind::TypeMismatch,
                other.clone(),
            ));
            None
        }
    }
}

/// Un-nest the VAT block. Exactly one country key is extractable; more than
/// one is ambiguous and rejected outright (see DESIGN.md).
fn vat_block(map: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<CanonicalVat> {
    let value = match map.get("vat") {
        None | Some(Value::Null) => return None,
        Some(v) => v,
    };

    let Value::Object(countries) = value else {
        errors.push(FieldError::new(
            "vat",
            FieldErrorKind::TypeMismatch,
            value.clone(),
        ));
        return None;
    };

    match countries.len() {
        0 => None,
        1 => {
            let (country, body) = countries.iter().next()?;
            let Value::Object(body) = body else {
                errors.push(FieldError::new(
                    "vat",
                    FieldErrorKind::TypeMismatch,
                    body.clone(),
                ));
                return None;
            };
            let label = match body.get("label") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    errors.push(FieldError::new(
                        "vat",
                        FieldErrorKind::TypeMismatch,
                        other.clone(),
                    ));
                    None
                }
            };
            let rate = match body.get("rate") {
                None | Some(Value::Null) => None,
                Some(Value::Number(n)) if n.as_i64().is_some() => n.as_i64(),
                Some(other) => {
                    errors.push(FieldError::new(
                        "vat",
                        FieldErrorKind::TypeMismatch,
                        other.clone(),
                    ));
                    None
                }
            };
            Some(CanonicalVat {
                country: country.clone(),
                label,
                rate,
            })
        }
        _ => {
            errors.push(FieldError::new(
                "vat",
                FieldErrorKind::AmbiguousVatBlock,
                value.clone(),
            ));
            None
        }
    }
}
