//! Catalog read side for the quick order table.
//!
//! This crate models the parts of the external product catalog the table needs
//! (products, variations, stock) and decides which variations are shown.
//! It performs no IO itself: lookups go through [`CatalogSource`].

pub mod display;
pub mod memory;
pub mod product;
pub mod source;
pub mod variation;
pub mod view;

pub use display::{MAX_QUANTITY_FALLBACK, MODEL_ATTRIBUTE_KEYS};
pub use memory::InMemoryCatalog;
pub use product::{Product, ProductKind};
pub use source::CatalogSource;
pub use variation::{AttributeSet, PurchaseBlock, StockTracking, Variation};
pub use view::{VariationCatalogView, VariationRow, VariationTable};
