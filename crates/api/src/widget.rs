//! Embeddable quick order widget (render surface).
//!
//! Rendering produces a serializable table model plus the client settings the
//! page script needs. Whether the widget was emitted is recorded on the result
//! itself, so asset inclusion is decided per page instead of through shared
//! state.

use std::sync::Arc;

use serde::Serialize;

use quickorder_auth::{FormTokenService, TokenError};
use quickorder_catalog::{CatalogSource, VariationCatalogView, VariationTable};
use quickorder_core::{ProductId, SessionId};

use crate::context::PageContext;

/// Submission endpoint the client posts to.
pub const SUBMIT_ENDPOINT: &str = "/quick-order/add-to-cart";

/// Client assets required by an emitted widget.
pub const WIDGET_ASSETS: [&str; 2] = ["assets/css/quick-order-table.css", "assets/js/quick-order-table.js"];

/// Widget options. `product_id` overrides the page's product.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct WidgetConfig {
    pub product_id: Option<ProductId>,
}

/// Page-assembly facts produced by a render.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    pub widget_emitted: bool,
}

impl RenderContext {
    /// Assets the page must include.
    pub fn assets(&self) -> &'static [&'static str] {
        if self.widget_emitted { &WIDGET_ASSETS[..] } else { &[] }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMessages {
    pub adding: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub no_items: &'static str,
}

impl Default for ClientMessages {
    fn default() -> Self {
        Self {
            adding: "Adding to cart...",
            success: "Items added to cart.",
            error: "Something went wrong. Please try again.",
            no_items: "Please choose at least one item with a quantity greater than 0.",
        }
    }
}

/// Settings handed to the page script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub endpoint: &'static str,
    pub security_token: String,
    pub messages: ClientMessages,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWidget {
    pub table: Option<VariationTable>,
    pub client: Option<ClientConfig>,
    pub context: RenderContext,
}

impl RenderedWidget {
    fn nothing() -> Self {
        Self {
            table: None,
            client: None,
            context: RenderContext::default(),
        }
    }
}

/// Renders the quick order table for a product.
#[derive(Debug, Clone)]
pub struct QuickOrderWidget<C> {
    view: VariationCatalogView<C>,
    tokens: Arc<FormTokenService>,
}

impl<C> QuickOrderWidget<C>
where
    C: CatalogSource,
{
    pub fn new(view: VariationCatalogView<C>, tokens: Arc<FormTokenService>) -> Self {
        Self { view, tokens }
    }

    /// Render for `session_id`. Unresolvable or table-less products render
    /// nothing; only token signing can fail.
    pub fn render(
        &self,
        config: WidgetConfig,
        page: PageContext,
        session_id: SessionId,
    ) -> Result<RenderedWidget, TokenError> {
        let Some(product_id) = config.product_id.or(page.product_id) else {
            tracing::debug!("quick order widget has no product to show");
            return Ok(RenderedWidget::nothing());
        };

        let Some(table) = self.view.table(product_id) else {
            tracing::debug!(product_id = %product_id, "quick order widget: nothing eligible");
            return Ok(RenderedWidget::nothing());
        };

        let client = ClientConfig {
            endpoint: SUBMIT_ENDPOINT,
            security_token: self.tokens.issue(session_id)?,
            messages: ClientMessages::default(),
        };

        Ok(RenderedWidget {
            table: Some(table),
            client: Some(client),
            context: RenderContext {
                widget_emitted: true,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use quickorder_cart::TokenVerifier;
    use quickorder_infra::seed::{DEMO_SIMPLE_PRODUCT, DEMO_VARIABLE_PRODUCT, seed_demo_catalog};
    use quickorder_catalog::InMemoryCatalog;

    fn widget() -> (QuickOrderWidget<Arc<InMemoryCatalog>>, Arc<FormTokenService>) {
        let catalog = InMemoryCatalog::new();
        seed_demo_catalog(&catalog).unwrap();
        let tokens = Arc::new(FormTokenService::new(b"widget-test", Duration::hours(1)));
        (
            QuickOrderWidget::new(VariationCatalogView::new(Arc::new(catalog)), tokens.clone()),
            tokens,
        )
    }

    fn pid(raw: u64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    #[test]
    fn explicit_product_renders_table_with_session_token() {
        let (widget, tokens) = widget();
        let session = SessionId::new();
        let config = WidgetConfig {
            product_id: Some(pid(DEMO_VARIABLE_PRODUCT)),
        };

        let out = widget.render(config, PageContext::default(), session).unwrap();

        assert!(out.context.widget_emitted);
        assert_eq!(out.context.assets(), &WIDGET_ASSETS);
        assert_eq!(out.table.unwrap().rows.len(), 2);
        let client = out.client.unwrap();
        assert_eq!(client.endpoint, SUBMIT_ENDPOINT);
        assert!(tokens.verify(&client.security_token, session));
    }

    #[test]
    fn falls_back_to_page_product() {
        let (widget, _) = widget();
        let page = PageContext::product_page(pid(DEMO_VARIABLE_PRODUCT));

        let out = widget.render(WidgetConfig::default(), page, SessionId::new()).unwrap();
        assert!(out.context.widget_emitted);
    }

    #[test]
    fn explicit_product_wins_over_page_product() {
        let (widget, _) = widget();
        let config = WidgetConfig {
            product_id: Some(pid(DEMO_SIMPLE_PRODUCT)),
        };
        let page = PageContext::product_page(pid(DEMO_VARIABLE_PRODUCT));

        let out = widget.render(config, page, SessionId::new()).unwrap();
        assert!(!out.context.widget_emitted);
    }

    #[test]
    fn renders_nothing_without_resolvable_product() {
        let (widget, _) = widget();

        for config in [
            WidgetConfig::default(),
            WidgetConfig { product_id: Some(pid(DEMO_SIMPLE_PRODUCT)) },
            WidgetConfig { product_id: Some(pid(9_999)) },
        ] {
            let out = widget.render(config, PageContext::default(), SessionId::new()).unwrap();
            assert_eq!(out, RenderedWidget::nothing());
            assert!(out.context.assets().is_empty());
        }
    }
}
