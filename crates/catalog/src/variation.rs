use serde::{Deserialize, Serialize};

use quickorder_core::{Entity, ProductId, ValueObject, VariationId};

/// Ordered attribute mapping (attribute name -> value) of a variation.
///
/// Order is the catalog's order and drives display names, so this is a list of
/// pairs rather than a hash map. Names are unique; inserting an existing name
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(Vec<(String, String)>);

impl AttributeSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (k, v) in pairs {
            set.insert(k, v);
        }
        set
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attributes whose value is non-empty, in catalog order.
    pub fn filled(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, v)| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for AttributeSet {}

/// Stock bookkeeping mode of a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "quantity", rename_all = "lowercase")]
pub enum StockTracking {
    /// Stock is not counted; any quantity passes the quantity check.
    Unmanaged,
    /// Stock is counted. The catalog may still report no quantity.
    Managed(Option<i64>),
}

impl StockTracking {
    pub fn is_managed(&self) -> bool {
        matches!(self, StockTracking::Managed(_))
    }

    /// Current stock quantity, only when stock is managed and known.
    pub fn quantity(&self) -> Option<i64> {
        match self {
            StockTracking::Managed(q) => *q,
            StockTracking::Unmanaged => None,
        }
    }
}

/// Why a variation cannot be bought in the requested quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseBlock {
    NotPurchasable,
    OutOfStock,
    InsufficientStock { available: i64 },
}

/// A concrete purchasable configuration of a variable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    id: VariationId,
    parent_id: ProductId,
    name: String,
    sku: Option<String>,
    description: String,
    specification: Option<String>,
    attributes: AttributeSet,
    purchasable: bool,
    in_stock: bool,
    stock: StockTracking,
}

impl Variation {
    /// A purchasable, in-stock variation with unmanaged stock and no attributes.
    pub fn new(id: VariationId, parent_id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            sku: None,
            description: String::new(),
            specification: None,
            attributes: AttributeSet::new(),
            purchasable: true,
            in_stock: true,
            stock: StockTracking::Unmanaged,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_specification(mut self, spec: impl Into<String>) -> Self {
        self.specification = Some(spec.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_purchasable(mut self, purchasable: bool) -> Self {
        self.purchasable = purchasable;
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn with_stock(mut self, stock: StockTracking) -> Self {
        self.stock = stock;
        self
    }

    /// Shorthand for managed stock with a known quantity.
    pub fn with_managed_stock(self, quantity: i64) -> Self {
        self.with_stock(StockTracking::Managed(Some(quantity)))
    }

    pub fn id_typed(&self) -> VariationId {
        self.id
    }

    pub fn parent_id(&self) -> ProductId {
        self.parent_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// SKU, treating an empty string the same as a missing one.
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref().filter(|s| !s.is_empty())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn specification(&self) -> Option<&str> {
        self.specification.as_deref()
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn is_purchasable(&self) -> bool {
        self.purchasable
    }

    pub fn is_in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn stock(&self) -> StockTracking {
        self.stock
    }

    /// Whether the variation belongs in the quick order table.
    pub fn is_eligible(&self) -> bool {
        self.purchasable && self.in_stock
    }

    /// Check whether `quantity` units can be requested right now.
    ///
    /// Checks run in a fixed order: purchasability, stock status, then the
    /// managed stock quantity. Unmanaged stock (or managed stock with no known
    /// quantity) always passes the quantity check.
    pub fn check_purchase(&self, quantity: i64) -> Result<(), PurchaseBlock> {
        if !self.purchasable {
            return Err(PurchaseBlock::NotPurchasable);
        }
        if !self.in_stock {
            return Err(PurchaseBlock::OutOfStock);
        }
        if let Some(available) = self.stock.quantity() {
            if quantity > available {
                return Err(PurchaseBlock::InsufficientStock { available });
            }
        }
        Ok(())
    }
}

impl Entity for Variation {
    type Id = VariationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
