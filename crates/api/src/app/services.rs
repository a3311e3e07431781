use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;

use quickorder_auth::FormTokenService;
use quickorder_cart::BatchCartSubmitter;
use quickorder_catalog::{InMemoryCatalog, VariationCatalogView};
use quickorder_infra::{seed, AppConfig, InMemoryCartStore};

use crate::widget::QuickOrderWidget;

pub type Submitter =
    BatchCartSubmitter<Arc<InMemoryCatalog>, Arc<InMemoryCartStore>, Arc<FormTokenService>>;

/// Collaborators and stateless services shared by all handlers.
///
/// Built once at startup; handlers receive it by reference.
#[derive(Debug)]
pub struct AppServices {
    pub catalog: Arc<InMemoryCatalog>,
    pub carts: Arc<InMemoryCartStore>,
    pub tokens: Arc<FormTokenService>,
    pub widget: QuickOrderWidget<Arc<InMemoryCatalog>>,
    pub submitter: Submitter,
}

impl AppServices {
    pub fn new(catalog: Arc<InMemoryCatalog>, carts: Arc<InMemoryCartStore>, tokens: Arc<FormTokenService>) -> Self {
        let widget = QuickOrderWidget::new(VariationCatalogView::new(catalog.clone()), tokens.clone());
        let submitter = BatchCartSubmitter::new(catalog.clone(), carts.clone(), tokens.clone());
        Self {
            catalog,
            carts,
            tokens,
            widget,
            submitter,
        }
    }
}

pub fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let catalog = Arc::new(InMemoryCatalog::new());
    if config.seed_demo {
        seed::seed_demo_catalog(&catalog).context("failed to seed demo catalog")?;
        tracing::info!("demo catalog loaded");
    }

    let tokens = Arc::new(FormTokenService::new(
        config.token_secret.as_bytes(),
        Duration::seconds(config.token_ttl_secs),
    ));

    Ok(AppServices::new(catalog, Arc::new(InMemoryCartStore::new()), tokens))
}
