//! Demo catalog used by the dev server and black-box tests.

use quickorder_catalog::{InMemoryCatalog, Product, StockTracking, Variation};
use quickorder_core::{DomainResult, ProductId, VariationId};

/// Variable product with a mix of eligible and ineligible variations.
pub const DEMO_VARIABLE_PRODUCT: u64 = 100;
/// Second variable product, owner of a "foreign" variation.
pub const DEMO_OTHER_PRODUCT: u64 = 200;
/// Simple product (never renders a table).
pub const DEMO_SIMPLE_PRODUCT: u64 = 300;

/// Populate `catalog` with the demo products.
///
/// Variations of [`DEMO_VARIABLE_PRODUCT`]:
/// - 101 eligible, unmanaged stock, model attribute
/// - 102 out of stock
/// - 103 eligible, managed stock of 5, SKU only
/// - 104 not purchasable
pub fn seed_demo_catalog(catalog: &InMemoryCatalog) -> DomainResult<()> {
    let hex = ProductId::new(DEMO_VARIABLE_PRODUCT)?;
    let other = ProductId::new(DEMO_OTHER_PRODUCT)?;

    catalog.upsert_product(Product::variable(hex, "Hex bolt"));
    catalog.upsert_product(Product::variable(other, "Flat washer"));
    catalog.upsert_product(Product::simple(ProductId::new(DEMO_SIMPLE_PRODUCT)?, "Thread locker"));

    catalog.upsert_variation(
        Variation::new(VariationId::new(101)?, hex, "Hex bolt - M8")
            .with_sku("HB-M8")
            .with_attribute("attribute_pa_model", "HB-8")
            .with_attribute("pa_size", "M8")
            .with_description("Zinc plated steel hex bolt for general assembly work."),
    );
    catalog.upsert_variation(
        Variation::new(VariationId::new(102)?, hex, "Hex bolt - M10")
            .with_sku("HB-M10")
            .with_attribute("pa_size", "M10")
            .with_in_stock(false)
            .with_stock(StockTracking::Managed(Some(0))),
    );
    catalog.upsert_variation(
        Variation::new(VariationId::new(103)?, hex, "Hex bolt - M12")
            .with_sku("HB-M12")
            .with_attribute("pa_size", "M12")
            .with_specification("Grade 8.8, 60mm")
            .with_managed_stock(5),
    );
    catalog.upsert_variation(
        Variation::new(VariationId::new(104)?, hex, "Hex bolt - M16")
            .with_attribute("pa_size", "M16")
            .with_purchasable(false),
    );

    catalog.upsert_variation(
        Variation::new(VariationId::new(201)?, other, "Flat washer - 8mm").with_attribute("pa_size", "8mm"),
    );

    Ok(())
}
