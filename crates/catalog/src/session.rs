use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tradefeed_core::{DomainError, DomainResult, Entity, SessionId, SupplierId, UserId};

/// One upload session of a supplier feed.
///
/// `external_id` is the numeric session id carried by the upstream system and
/// must be unique per store. The supplier and user references survive record
/// deletion as `None` (SET NULL semantics, enforced by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub external_id: i64,
    pub supplier: Option<SupplierId>,
    pub user: Option<UserId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Session {
    pub fn create(
        external_id: i64,
        supplier: Option<SupplierId>,
        user: Option<UserId>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if end_time < start_time {
            return Err(DomainError::validation(
                "session end_time precedes start_time",
            ));
        }

        Ok(Self {
            id: SessionId::new(),
            external_id,
            supplier,
            user,
            start_time,
            end_time,
        })
    }
}

impl Entity for Session {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn create_accepts_ordered_times() {
        let start = Utc::now();
        let end = start + TimeDelta::minutes(5);
        let session = Session::create(4711, None, None, start, end).unwrap();
        assert_eq!(session.external_id, 4711);
        assert!(session.supplier.is_none());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let start = Utc::now();
        let end = start - TimeDelta::seconds(1);
        let err = Session::create(4711, None, None, start, end).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
