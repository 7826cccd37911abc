use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tradefeed_core::{DomainError, DomainResult, Entity, SupplierId};

/// A supplier delivering catalog feeds.
///
/// Name uniqueness is enforced by the store, not here (same split as SKU
/// uniqueness in other domain crates: the record can only check local shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    /// When the supplier relationship started (set on creation).
    pub since: DateTime<Utc>,
}

impl Supplier {
    pub fn create(
        name: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }

        Ok(Self {
            id: SupplierId::new(),
            name,
            address: address.into(),
            phone_number: phone_number.into(),
            since: Utc::now(),
        })
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
