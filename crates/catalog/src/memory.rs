//! In-memory catalog for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use quickorder_core::{ProductId, VariationId};

use crate::{CatalogSource, Product, StockTracking, Variation};

#[derive(Debug, Default)]
struct CatalogState {
    products: HashMap<ProductId, Product>,
    children: HashMap<ProductId, Vec<VariationId>>,
    variations: HashMap<VariationId, Variation>,
}

/// Mutable in-memory catalog.
///
/// Child order is insertion order, mirroring the catalog's menu order.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_product(&self, product: Product) {
        if let Ok(mut state) = self.inner.write() {
            state.products.insert(product.id_typed(), product);
        }
    }

    /// Insert or replace a variation and register it as a child of its parent.
    pub fn upsert_variation(&self, variation: Variation) {
        if let Ok(mut state) = self.inner.write() {
            let id = variation.id_typed();
            let children = state.children.entry(variation.parent_id()).or_default();
            if !children.contains(&id) {
                children.push(id);
            }
            state.variations.insert(id, variation);
        }
    }

    /// Register a child id without a backing variation record.
    ///
    /// Models a catalog whose child list references a variation that has since
    /// disappeared.
    pub fn link_dangling_child(&self, product_id: ProductId, variation_id: VariationId) {
        if let Ok(mut state) = self.inner.write() {
            let children = state.children.entry(product_id).or_default();
            if !children.contains(&variation_id) {
                children.push(variation_id);
            }
        }
    }

    /// Overwrite the stock of an existing variation. Returns `false` if unknown.
    pub fn set_stock(&self, id: VariationId, in_stock: bool, stock: StockTracking) -> bool {
        let Ok(mut state) = self.inner.write() else {
            return false;
        };
        match state.variations.get_mut(&id) {
            Some(v) => {
                *v = v.clone().with_in_stock(in_stock).with_stock(stock);
                true
            }
            None => false,
        }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn product(&self, id: ProductId) -> Option<Product> {
        let state = self.inner.read().ok()?;
        state.products.get(&id).cloned()
    }

    fn child_variations(&self, product_id: ProductId) -> Vec<VariationId> {
        match self.inner.read() {
            Ok(state) => state.children.get(&product_id).cloned().unwrap_or_default(),
            Err(_) => vec![],
        }
    }

    fn variation(&self, id: VariationId) -> Option<Variation> {
        let state = self.inner.read().ok()?;
        state.variations.get(&id).cloned()
    }
}
