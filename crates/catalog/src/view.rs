//! Variation table read model.

use serde::Serialize;

use quickorder_core::{ProductId, VariationId};

use crate::display;
use crate::{AttributeSet, CatalogSource, Product, Variation};

/// One row of the quick order table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariationRow {
    pub variation_id: VariationId,
    pub sku: String,
    pub model: String,
    pub name: String,
    /// Parent product name followed by the variation name.
    pub full_name: String,
    pub description: String,
    pub attributes: AttributeSet,
    pub stock_quantity: Option<i64>,
    /// Upper bound for the quantity input.
    pub max_quantity: i64,
}

impl VariationRow {
    fn build(product: &Product, variation: &Variation) -> Self {
        let name = display::display_name(variation);
        Self {
            variation_id: variation.id_typed(),
            sku: display::sku_label(variation),
            model: display::model_label(variation),
            full_name: format!("{} {}", product.name(), name),
            name,
            description: display::description(variation),
            attributes: variation.attributes().clone(),
            stock_quantity: variation.stock().quantity(),
            max_quantity: display::stock_ceiling(variation),
        }
    }
}

/// A product together with its eligible rows. Never built with zero rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariationTable {
    pub product: Product,
    pub rows: Vec<VariationRow>,
}

/// Selects and formats the variations of a product for bulk ordering.
///
/// Stateless apart from the catalog handle; construct once and share.
#[derive(Debug, Clone)]
pub struct VariationCatalogView<C> {
    catalog: C,
}

impl<C> VariationCatalogView<C>
where
    C: CatalogSource,
{
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Eligible variations of `product_id`, in catalog child order.
    ///
    /// Unknown and non-variable products yield an empty list, as do products
    /// whose variations are all unpurchasable or out of stock.
    pub fn list_eligible_variations(&self, product_id: ProductId) -> Vec<VariationRow> {
        self.table(product_id).map(|t| t.rows).unwrap_or_default()
    }

    /// Like [`Self::list_eligible_variations`] but keeps the parent product.
    ///
    /// Returns `None` whenever the table should not be rendered.
    pub fn table(&self, product_id: ProductId) -> Option<VariationTable> {
        let product = self.catalog.product(product_id)?;
        if !product.is_variable() {
            return None;
        }

        let rows: Vec<VariationRow> = self
            .catalog
            .child_variations(product_id)
            .into_iter()
            .filter_map(|id| self.catalog.variation(id))
            .filter(Variation::is_eligible)
            .map(|v| VariationRow::build(&product, &v))
            .collect();

        if rows.is_empty() {
            return None;
        }
        Some(VariationTable { product, rows })
    }
}
