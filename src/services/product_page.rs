use std::sync::Arc;

use crate::{
    models::{display::normalize, ProductPagePayload},
    services::backend::RetailBackend,
    view::{markup, RenderEffect, RenderSink, RenderTarget},
};

/// Related products requested for the single-product view
pub const RELATED_TOP_N: usize = 8;

const DESCRIPTION: &str = "Random product from the Online Retail dataset.";

pub fn render_product_page(payload: &ProductPagePayload) -> Vec<RenderEffect> {
    let product = payload.product.as_ref();
    let title = product
        .and_then(|p| p.description.clone())
        .or_else(|| product.map(|p| p.product_id.clone()))
        .unwrap_or_else(|| "Product".to_string());
    let product_id = product.map(|p| p.product_id.as_str()).unwrap_or_default();

    vec![
        RenderEffect::text(RenderTarget::ProductTitle, title),
        RenderEffect::text(RenderTarget::ProductDescription, DESCRIPTION),
        RenderEffect::text(RenderTarget::ProductId, format!("Product ID: {}", product_id)),
        RenderEffect::html(
            RenderTarget::ProductFbtGrid,
            markup::related_products(&normalize(&payload.frequently_bought_together)),
        ),
    ]
}

/// Loads a random product with its related items. Never cached: every call hits the backend.
#[derive(Clone)]
pub struct ProductPageLoader {
    backend: Arc<dyn RetailBackend>,
}

impl ProductPageLoader {
    pub fn new(backend: Arc<dyn RetailBackend>) -> Self {
        Self { backend }
    }

    /// Returns whether the page was rendered; failures are only logged
    pub async fn load(&self, sink: &dyn RenderSink) -> bool {
        match self.backend.random_product(RELATED_TOP_N).await {
            Ok(payload) => {
                tracing::info!(
                    product = payload.product.as_ref().map(|p| p.product_id.as_str()),
                    related = payload.frequently_bought_together.len(),
                    "Product page loaded"
                );
                sink.apply(render_product_page(&payload));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading product page");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{ProductSummary, RecommendationItem};
    use crate::services::backend::MockRetailBackend;
    use crate::view::SharedPage;

    #[test]
    fn test_title_falls_back_to_id_then_placeholder() {
        let payload = ProductPagePayload {
            product: Some(ProductSummary {
                product_id: "84029E".to_string(),
                description: None,
            }),
            frequently_bought_together: vec![],
        };
        let effects = render_product_page(&payload);
        assert_eq!(effects[0], RenderEffect::text(RenderTarget::ProductTitle, "84029E"));
        assert_eq!(
            effects[2],
            RenderEffect::text(RenderTarget::ProductId, "Product ID: 84029E")
        );

        let effects = render_product_page(&ProductPagePayload::default());
        assert_eq!(effects[0], RenderEffect::text(RenderTarget::ProductTitle, "Product"));
    }

    #[tokio::test]
    async fn test_load_renders_related_grid() {
        let mut backend = MockRetailBackend::new();
        backend
            .expect_random_product()
            .withf(|top_n| *top_n == RELATED_TOP_N)
            .times(1)
            .returning(|_| {
                Ok(ProductPagePayload {
                    product: Some(ProductSummary {
                        product_id: "85123A".to_string(),
                        description: Some("WHITE HANGING HEART T-LIGHT HOLDER".to_string()),
                    }),
                    frequently_bought_together: vec![
                        RecommendationItem::new("71053"),
                        RecommendationItem::new("84406B"),
                    ],
                })
            });

        let loader = ProductPageLoader::new(Arc::new(backend));
        let page = SharedPage::new();
        assert!(loader.load(&page).await);

        let rendered = page.snapshot();
        assert_eq!(
            rendered.text(RenderTarget::ProductTitle),
            Some("WHITE HANGING HEART T-LIGHT HOLDER")
        );
        assert_eq!(
            rendered
                .html(RenderTarget::ProductFbtGrid)
                .unwrap()
                .matches("product-card")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_failure_renders_nothing() {
        let mut backend = MockRetailBackend::new();
        backend
            .expect_random_product()
            .returning(|_| Err(AppError::ExternalApi("Product page HTTP 404".to_string())));

        let loader = ProductPageLoader::new(Arc::new(backend));
        let page = SharedPage::new();
        assert!(!loader.load(&page).await);
        assert_eq!(page.snapshot(), crate::view::Page::new());
    }
}
