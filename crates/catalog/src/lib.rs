//! `tradefeed-catalog` — relational shape of the supplier catalog.
//!
//! Pure data model: suppliers, upload sessions, hierarchical categories and
//! products, meat-origin records, stock-by-expiry rows, and the
//! `CatalogStore` seam a storage backend plugs into. No IO, no HTTP.

pub mod category;
pub mod meat;
pub mod product;
pub mod session;
pub mod stock;
pub mod store;
pub mod supplier;
pub mod user;

pub use category::{Category, CategoryKey};
pub use meat::{MeatInfo, MeatInfoFields};
pub use product::{
    CodeType, Packaging, Product, ProductDraft, TradeItemUnitDescriptor,
    TradeItemUnitDescriptorName, ValidationStatus, VatRateTier,
};
pub use session::Session;
pub use stock::StockByBestBeforeDate;
pub use store::{CatalogStore, InMemoryCatalogStore};
pub use supplier::Supplier;
pub use user::User;
