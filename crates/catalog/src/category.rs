use serde::{Deserialize, Serialize};

use tradefeed_core::{CategoryId, DomainError, DomainResult, Entity, ValueObject};

/// Composite external key of a category.
///
/// Both halves are optional because the upstream feed sometimes carries only
/// a numeric id and sometimes only a string id; the pair as a whole is what
/// must be unique (absent halves included).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryKey {
    pub numeric_id: Option<i64>,
    pub string_id: Option<String>,
}

impl ValueObject for CategoryKey {}

/// A product category referenced by products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub key: CategoryKey,
    pub name: String,
}

impl Category {
    pub fn create(
        numeric_id: Option<i64>,
        string_id: Option<String>,
        name: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }

        Ok(Self {
            id: CategoryId::new(),
            key: CategoryKey {
                numeric_id,
                string_id,
            },
            name,
        })
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_with_equal_halves_are_equal() {
        let a = Category::create(Some(7), None, "Obst").unwrap();
        let b = Category::create(Some(7), None, "Obst & Gemuese").unwrap();
        assert_eq!(a.key, b.key);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn absent_halves_participate_in_the_key() {
        let a = Category::create(Some(7), None, "Obst").unwrap();
        let b = Category::create(Some(7), Some("OB".into()), "Obst").unwrap();
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Category::create(None, None, "").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
