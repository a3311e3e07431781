//! Catalog collaborator boundary.

use std::sync::Arc;

use quickorder_core::{ProductId, VariationId};

use crate::{Product, Variation};

/// Read access to the external product catalog.
///
/// Implementations must return live data: callers rely on each call reflecting
/// current stock, and nothing here is cached across requests.
pub trait CatalogSource: Send + Sync {
    fn product(&self, id: ProductId) -> Option<Product>;

    /// Child variation ids of a product, in the catalog's stable order.
    fn child_variations(&self, product_id: ProductId) -> Vec<VariationId>;

    fn variation(&self, id: VariationId) -> Option<Variation>;
}

impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    fn product(&self, id: ProductId) -> Option<Product> {
        (**self).product(id)
    }

    fn child_variations(&self, product_id: ProductId) -> Vec<VariationId> {
        (**self).child_variations(product_id)
    }

    fn variation(&self, id: VariationId) -> Option<Variation> {
        (**self).variation(id)
    }
}

impl<S> CatalogSource for &S
where
    S: CatalogSource + ?Sized,
{
    fn product(&self, id: ProductId) -> Option<Product> {
        (**self).product(id)
    }

    fn child_variations(&self, product_id: ProductId) -> Vec<VariationId> {
        (**self).child_variations(product_id)
    }

    fn variation(&self, id: VariationId) -> Option<Variation> {
        (**self).variation(id)
    }
}
