//! Persistence seam for normalized records.
//!
//! `CatalogStore` is the `save(record)` collaborator the normalizer hands
//! off to. Only the in-memory implementation ships; a real database backend
//! would implement the same trait. Cross-record rules live here because a
//! single record cannot see its neighbors: uniqueness of supplier names,
//! session external ids and category keys, reference existence, tree
//! acyclicity, and the SET NULL / CASCADE semantics on deletion.

use std::collections::HashMap;

use tradefeed_core::{
    CategoryId, DomainError, DomainResult, MeatInfoId, ProductId, SessionId, StockEntryId,
    SupplierId, UserId,
};

use crate::category::{Category, CategoryKey};
use crate::meat::MeatInfo;
use crate::product::Product;
use crate::session::Session;
use crate::stock::StockByBestBeforeDate;
use crate::supplier::Supplier;
use crate::user::User;

/// Storage collaborator for catalog records.
pub trait CatalogStore {
    fn insert_supplier(&mut self, supplier: Supplier) -> DomainResult<SupplierId>;
    fn insert_user(&mut self, user: User) -> DomainResult<UserId>;
    fn insert_session(&mut self, session: Session) -> DomainResult<SessionId>;
    fn insert_category(&mut self, category: Category) -> DomainResult<CategoryId>;
    fn insert_meat_info(&mut self, info: MeatInfo) -> DomainResult<MeatInfoId>;
    fn insert_product(&mut self, product: Product) -> DomainResult<ProductId>;
    fn insert_stock(&mut self, entry: StockByBestBeforeDate) -> DomainResult<StockEntryId>;

    fn product(&self, id: ProductId) -> Option<&Product>;
    fn meat_info(&self, id: MeatInfoId) -> Option<&MeatInfo>;
    fn stocks_for(&self, product: ProductId) -> Vec<&StockByBestBeforeDate>;

    /// Re-parent a product. Rejects unknown ids and parent chains that would
    /// close a cycle.
    fn set_parent(&mut self, child: ProductId, parent: Option<ProductId>) -> DomainResult<()>;

    fn delete_supplier(&mut self, id: SupplierId) -> DomainResult<()>;
    fn delete_user(&mut self, id: UserId) -> DomainResult<()>;
    fn delete_session(&mut self, id: SessionId) -> DomainResult<()>;
    fn delete_category(&mut self, id: CategoryId) -> DomainResult<()>;
    fn delete_meat_info(&mut self, id: MeatInfoId) -> DomainResult<()>;
    fn delete_product(&mut self, id: ProductId) -> DomainResult<()>;
}

/// HashMap-backed store for tests and small tools.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    suppliers: HashMap<SupplierId, Supplier>,
    users: HashMap<UserId, User>,
    sessions: HashMap<SessionId, Session>,
    categories: HashMap<CategoryId, Category>,
    meat_infos: HashMap<MeatInfoId, MeatInfo>,
    products: HashMap<ProductId, Product>,
    stocks: HashMap<StockEntryId, StockByBestBeforeDate>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.get(&id)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    fn category_key_taken(&self, key: &CategoryKey) -> bool {
        self.categories.values().any(|c| &c.key == key)
    }

    /// Walk the parent chain from `start`; true if it reaches `needle`.
    fn chain_reaches(&self, start: ProductId, needle: ProductId) -> bool {
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if id == needle {
                return true;
            }
            cursor = self.products.get(&id).and_then(|p| p.draft.parent);
        }
        false
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn insert_supplier(&mut self, supplier: Supplier) -> DomainResult<SupplierId> {
        if self.suppliers.values().any(|s| s.name == supplier.name) {
            return Err(DomainError::conflict(format!(
                "supplier name already taken: {}",
                supplier.name
            )));
        }
        let id = supplier.id;
        self.suppliers.insert(id, supplier);
        Ok(id)
    }

    fn insert_user(&mut self, user: User) -> DomainResult<UserId> {
        if self.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict(format!(
                "user email already taken: {}",
                user.email
            )));
        }
        let id = user.id;
        self.users.insert(id, user);
        Ok(id)
    }

    fn insert_session(&mut self, session: Session) -> DomainResult<SessionId> {
        if self
            .sessions
            .values()
            .any(|s| s.external_id == session.external_id)
        {
            return Err(DomainError::conflict(format!(
                "session external id already taken: {}",
                session.external_id
            )));
        }
        if let Some(supplier) = session.supplier {
            if !self.suppliers.contains_key(&supplier) {
                return Err(DomainError::not_found());
            }
        }
        if let Some(user) = session.user {
            if !self.users.contains_key(&user) {
                return Err(DomainError::not_found());
            }
        }
        let id = session.id;
        self.sessions.insert(id, session);
        Ok(id)
    }

    fn insert_category(&mut self, category: Category) -> DomainResult<CategoryId> {
        if self.category_key_taken(&category.key) {
            return Err(DomainError::conflict(format!(
                "category key already taken: {:?}",
                category.key
            )));
        }
        let id = category.id;
        self.categories.insert(id, category);
        Ok(id)
    }

    fn insert_meat_info(&mut self, info: MeatInfo) -> DomainResult<MeatInfoId> {
        let id = info.id;
        self.meat_infos.insert(id, info);
        Ok(id)
    }

    fn insert_product(&mut self, product: Product) -> DomainResult<ProductId> {
        if let Some(parent) = product.draft.parent {
            if !self.products.contains_key(&parent) {
                return Err(DomainError::not_found());
            }
        }
        if let Some(category) = product.draft.category {
            if !self.categories.contains_key(&category) {
                return Err(DomainError::not_found());
            }
        }
        if let Some(session) = product.draft.session {
            if !self.sessions.contains_key(&session) {
                return Err(DomainError::not_found());
            }
        }
        if let Some(meat) = product.meat_info {
            if !self.meat_infos.contains_key(&meat) {
                return Err(DomainError::not_found());
            }
            // One-to-one: a meat-info row belongs to at most one product.
            if self.products.values().any(|p| p.meat_info == Some(meat)) {
                return Err(DomainError::conflict(
                    "meat_info already linked to another product",
                ));
            }
        }
        let id = product.id;
        self.products.insert(id, product);
        Ok(id)
    }

    fn insert_stock(&mut self, entry: StockByBestBeforeDate) -> DomainResult<StockEntryId> {
        if !self.products.contains_key(&entry.product) {
            return Err(DomainError::not_found());
        }
        let id = entry.id;
        self.stocks.insert(id, entry);
        Ok(id)
    }

    fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    fn meat_info(&self, id: MeatInfoId) -> Option<&MeatInfo> {
        self.meat_infos.get(&id)
    }

    fn stocks_for(&self, product: ProductId) -> Vec<&StockByBestBeforeDate> {
        self.stocks
            .values()
            .filter(|s| s.product == product)
            .collect()
    }

    fn set_parent(&mut self, child: ProductId, parent: Option<ProductId>) -> DomainResult<()> {
        if !self.products.contains_key(&child) {
            return Err(DomainError::not_found());
        }
        if let Some(parent) = parent {
            if !self.products.contains_key(&parent) {
                return Err(DomainError::not_found());
            }
            if self.chain_reaches(parent, child) {
                return Err(DomainError::invariant(
                    "re-parenting would create a cycle in the product tree",
                ));
            }
        }
        self.products
            .get_mut(&child)
            .ok_or_else(DomainError::not_found)?
            .draft
            .parent = parent;
        Ok(())
    }

    fn delete_supplier(&mut self, id: SupplierId) -> DomainResult<()> {
        self.suppliers.remove(&id).ok_or_else(DomainError::not_found)?;
        for session in self.sessions.values_mut() {
            if session.supplier == Some(id) {
                session.supplier = None;
            }
        }
        Ok(())
    }

    fn delete_user(&mut self, id: UserId) -> DomainResult<()> {
        self.users.remove(&id).ok_or_else(DomainError::not_found)?;
        for session in self.sessions.values_mut() {
            if session.user == Some(id) {
                session.user = None;
            }
        }
        Ok(())
    }

    fn delete_session(&mut self, id: SessionId) -> DomainResult<()> {
        self.sessions.remove(&id).ok_or_else(DomainError::not_found)?;
        for product in self.products.values_mut() {
            if product.draft.session == Some(id) {
                product.draft.session = None;
            }
        }
        Ok(())
    }

    fn delete_category(&mut self, id: CategoryId) -> DomainResult<()> {
        self.categories.remove(&id).ok_or_else(DomainError::not_found)?;
        for product in self.products.values_mut() {
            if product.draft.category == Some(id) {
                product.draft.category = None;
            }
        }
        Ok(())
    }

    fn delete_meat_info(&mut self, id: MeatInfoId) -> DomainResult<()> {
        self.meat_infos.remove(&id).ok_or_else(DomainError::not_found)?;
        for product in self.products.values_mut() {
            if product.meat_info == Some(id) {
                product.meat_info = None;
            }
        }
        Ok(())
    }

    fn delete_product(&mut self, id: ProductId) -> DomainResult<()> {
        let removed = self.products.remove(&id).ok_or_else(DomainError::not_found)?;
        // Children are re-rooted, never cascaded.
        for product in self.products.values_mut() {
            if product.draft.parent == Some(id) {
                product.draft.parent = None;
            }
        }
        // Stock rows cascade with their product.
        self.stocks.retain(|_, s| s.product != id);
        // The one-to-one meat row has no life of its own.
        if let Some(meat) = removed.meat_info {
            self.meat_infos.remove(&meat);
        }
        Ok(())
    }
}
