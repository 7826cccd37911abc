use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tradefeed_core::{DomainError, DomainResult, Entity, ProductId, StockEntryId};

/// Stock amount of a product for one best-before date.
///
/// `best_before` is optional: non-perishables report stock without a date.
/// Rows are cascade-deleted with their product (store-enforced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockByBestBeforeDate {
    pub id: StockEntryId,
    pub product: ProductId,
    pub best_before: Option<DateTime<Utc>>,
    pub amount: i64,
}

impl StockByBestBeforeDate {
    pub fn create(
        product: ProductId,
        best_before: Option<DateTime<Utc>>,
        amount: i64,
    ) -> DomainResult<Self> {
        if amount < 0 {
            return Err(DomainError::validation("stock amount cannot be negative"));
        }

        Ok(Self {
            id: StockEntryId::new(),
            product,
            best_before,
            amount,
        })
    }
}

impl Entity for StockByBestBeforeDate {
    type Id = StockEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dateless_stock_is_allowed() {
        let entry = StockByBestBeforeDate::create(ProductId::new(), None, 12).unwrap();
        assert!(entry.best_before.is_none());
        assert_eq!(entry.amount, 12);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = StockByBestBeforeDate::create(ProductId::new(), Some(Utc::now()), -1)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
