use serde::{Deserialize, Serialize};

use tradefeed_core::{Entity, MeatInfoId};
use tradefeed_countries::CountryCode;

/// Origin and registration data for meat products.
///
/// Exists only for products with `requires_meat_info` set; every field is
/// optional because suppliers report whichever subset they are obliged to.
/// Country fields are [`CountryCode`], so an unvalidated code can never be
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeatInfoFields {
    pub country_of_disassembly: Option<CountryCode>,
    pub country_of_rearing: Option<CountryCode>,
    pub country_of_slaughter: Option<CountryCode>,
    pub cutting_plant_registration: Option<String>,
    pub slaughterhouse_registration: Option<String>,
    pub lot_number: Option<String>,
}

impl MeatInfoFields {
    /// Whether the supplier reported anything at all.
    pub fn is_empty(&self) -> bool {
        self.country_of_disassembly.is_none()
            && self.country_of_rearing.is_none()
            && self.country_of_slaughter.is_none()
            && self.cutting_plant_registration.is_none()
            && self.slaughterhouse_registration.is_none()
            && self.lot_number.is_none()
    }
}

/// Stored meat-info record, one-to-one with a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeatInfo {
    pub id: MeatInfoId,
    #[serde(flatten)]
    pub fields: MeatInfoFields,
}

impl MeatInfo {
    pub fn create(fields: MeatInfoFields) -> Self {
        Self {
            id: MeatInfoId::new(),
            fields,
        }
    }
}

impl Entity for MeatInfo {
    type Id = MeatInfoId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fields_are_empty() {
        assert!(MeatInfoFields::default().is_empty());
    }

    #[test]
    fn any_reported_field_marks_non_empty() {
        let fields = MeatInfoFields {
            lot_number: Some("L-2209".into()),
            ..Default::default()
        };
        assert!(!fields.is_empty());
    }
}
