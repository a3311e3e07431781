use serde::{Deserialize, Serialize};

use quickorder_core::{Entity, ProductId};

/// Catalog product type.
///
/// Only `Variable` products have child variations; everything else is shown
/// as "nothing to render" by the quick order table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Simple,
    Variable,
}

/// A catalog product as read at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    kind: ProductKind,
    name: String,
}

impl Product {
    pub fn new(id: ProductId, kind: ProductKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
        }
    }

    pub fn variable(id: ProductId, name: impl Into<String>) -> Self {
        Self::new(id, ProductKind::Variable, name)
    }

    pub fn simple(id: ProductId, name: impl Into<String>) -> Self {
        Self::new(id, ProductKind::Simple, name)
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_variable(&self) -> bool {
        self.kind == ProductKind::Variable
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
