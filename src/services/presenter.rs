/// Recommendation presenter
///
/// One backend call per selection; the ranked list is split purely by position into three
/// buckets and fanned out to the home and cart render targets.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::{
    models::{display::normalize, CustomerId, RecommendationItem, RecommendationResponse},
    services::backend::RetailBackend,
    view::{
        markup::{self, FBT_BADGE, PERSONAL_BADGE},
        RenderEffect, RenderSink, RenderTarget, Status,
    },
};

/// Recommendations requested per customer
pub const TOP_N: usize = 12;
/// Size of the frequently-bought-together bucket
pub const FBT_SIZE: usize = 4;
/// Size of the cart-aware bucket
pub const CART_AWARE_SIZE: usize = 4;

const LOAD_ERROR: &str = "Failed to load recommendations. See console for details.";

/// Positional split of one ranked recommendation list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Buckets<'a> {
    pub frequently_bought_together: &'a [RecommendationItem],
    pub cart_aware: &'a [RecommendationItem],
    pub personalized: &'a [RecommendationItem],
}

/// Splits `[0..4)`, `[4..8)`, `[8..)`; short lists give shorter or empty buckets
pub fn partition(recommendations: &[RecommendationItem]) -> Buckets<'_> {
    let len = recommendations.len();
    let fbt_end = len.min(FBT_SIZE);
    let cart_end = len.min(FBT_SIZE + CART_AWARE_SIZE);

    Buckets {
        frequently_bought_together: &recommendations[..fbt_end],
        cart_aware: &recommendations[fbt_end..cart_end],
        personalized: &recommendations[cart_end..],
    }
}

/// Renders one response into the history, home grids and cart view
pub fn render_recommendations(response: &RecommendationResponse) -> Vec<RenderEffect> {
    let buckets = partition(&response.recommendations);
    let bought = &response.bought_descriptions;

    vec![
        RenderEffect::html(RenderTarget::HistoryList, markup::history_list(bought)),
        RenderEffect::html(
            RenderTarget::FbtGrid,
            markup::product_grid(&normalize(buckets.frequently_bought_together), FBT_BADGE),
        ),
        RenderEffect::html(
            RenderTarget::PersonalGrid,
            markup::product_grid(&normalize(buckets.personalized), PERSONAL_BADGE),
        ),
        RenderEffect::html(RenderTarget::CartBoughtItems, markup::cart_bought_items(bought)),
        RenderEffect::html(
            RenderTarget::CartRecs,
            markup::cart_recs(&normalize(buckets.cart_aware)),
        ),
    ]
}

/// What happened to one recommendation load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    /// A newer selection started first; only produced with stale discarding on
    Discarded,
    /// Error status shown, previous content kept
    Failed,
}

#[derive(Clone)]
pub struct RecommendationPresenter {
    backend: Arc<dyn RetailBackend>,
    sequence: Arc<AtomicU64>,
    discard_stale: bool,
}

impl RecommendationPresenter {
    pub fn new(backend: Arc<dyn RetailBackend>, discard_stale: bool) -> Self {
        Self {
            backend,
            sequence: Arc::new(AtomicU64::new(0)),
            discard_stale,
        }
    }

    /// Loads and renders recommendations for one customer.
    ///
    /// Overlapping loads are not cancelled. Unless stale discarding is enabled, whichever
    /// response resolves last is the one left on screen.
    pub async fn load_for_customer(
        &self,
        customer: &CustomerId,
        sink: &dyn RenderSink,
    ) -> LoadOutcome {
        let token = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        sink.apply(vec![RenderEffect::SetStatus(Status::info(format!(
            "Loading recommendations for customer {}…",
            customer
        )))]);

        let result = self.backend.recommendations(customer, TOP_N).await;

        if self.discard_stale && self.sequence.load(Ordering::SeqCst) != token {
            tracing::debug!(customer = %customer, token, "Discarding superseded recommendations");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(response) => {
                let buckets = partition(&response.recommendations);
                tracing::info!(
                    customer = %customer,
                    fbt = buckets.frequently_bought_together.len(),
                    cart_aware = buckets.cart_aware.len(),
                    personalized = buckets.personalized.len(),
                    "Rendering recommendations"
                );

                let mut effects = render_recommendations(&response);
                effects.push(RenderEffect::SetStatus(Status::Hidden));
                sink.apply(effects);
                LoadOutcome::Rendered
            }
            Err(e) => {
                tracing::error!(customer = %customer, error = %e, "Failed to load recommendations");
                sink.apply(vec![RenderEffect::SetStatus(Status::error(LOAD_ERROR))]);
                LoadOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::backend::MockRetailBackend;
    use crate::view::SharedPage;

    fn items(n: usize) -> Vec<RecommendationItem> {
        (0..n)
            .map(|i| RecommendationItem::new(format!("P{}", i)))
            .collect()
    }

    #[test]
    fn test_partition_sizes_for_every_length() {
        for len in 0..=20 {
            let recs = items(len);
            let buckets = partition(&recs);

            assert_eq!(buckets.frequently_bought_together.len(), len.min(4));
            assert_eq!(buckets.cart_aware.len(), len.saturating_sub(4).min(4));
            assert_eq!(buckets.personalized.len(), len.saturating_sub(8));
        }
    }

    #[test]
    fn test_partition_preserves_rank_order() {
        let recs = items(10);
        let buckets = partition(&recs);

        assert_eq!(buckets.frequently_bought_together[0].product_id, "P0");
        assert_eq!(buckets.cart_aware[0].product_id, "P4");
        assert_eq!(buckets.personalized[0].product_id, "P8");
        assert_eq!(buckets.personalized[1].product_id, "P9");
    }

    #[test]
    fn test_render_ten_items_without_history() {
        let response = RecommendationResponse {
            recommendations: items(10),
            ..Default::default()
        };
        let effects = render_recommendations(&response);
        let html = |target: RenderTarget| {
            effects
                .iter()
                .find_map(|e| match e {
                    RenderEffect::SetHtml { target: t, html } if *t == target => Some(html.clone()),
                    _ => None,
                })
                .unwrap()
        };

        assert_eq!(html(RenderTarget::FbtGrid).matches("product-card").count(), 4);
        assert_eq!(html(RenderTarget::CartRecs).matches("rec-card").count(), 4);
        assert_eq!(html(RenderTarget::PersonalGrid).matches("product-card").count(), 2);
        assert!(html(RenderTarget::HistoryList).contains("No purchase history"));
        assert!(html(RenderTarget::CartBoughtItems).contains("No historical purchases"));
    }

    #[test]
    fn test_render_empty_response_uses_placeholders() {
        let effects = render_recommendations(&RecommendationResponse::default());
        assert_eq!(effects.len(), 5);
        for effect in effects {
            match effect {
                RenderEffect::SetHtml { html, .. } => assert!(html.contains("empty-text")),
                other => panic!("unexpected effect {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_load_success_clears_status() {
        let mut backend = MockRetailBackend::new();
        backend
            .expect_recommendations()
            .withf(|customer, top_n| customer.as_str() == "17850" && *top_n == TOP_N)
            .times(1)
            .returning(|_, _| {
                Ok(RecommendationResponse {
                    bought_descriptions: vec!["WHITE METAL LANTERN".to_string()],
                    recommendations: items(3),
                    ..Default::default()
                })
            });

        let presenter = RecommendationPresenter::new(Arc::new(backend), false);
        let page = SharedPage::new();
        let outcome = presenter
            .load_for_customer(&CustomerId::from(17850), &page)
            .await;

        assert_eq!(outcome, LoadOutcome::Rendered);
        let rendered = page.snapshot();
        assert_eq!(rendered.status, Status::Hidden);
        assert!(rendered
            .html(RenderTarget::HistoryList)
            .unwrap()
            .contains("WHITE METAL LANTERN"));
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_content() {
        let mut backend = MockRetailBackend::new();
        backend
            .expect_recommendations()
            .returning(|_, _| Err(AppError::ExternalApi("Recommendations HTTP 500".to_string())));

        let presenter = RecommendationPresenter::new(Arc::new(backend), false);
        let page = SharedPage::new();
        page.apply(vec![RenderEffect::html(RenderTarget::FbtGrid, "<p>stale</p>")]);

        let outcome = presenter.load_for_customer(&CustomerId::from(1), &page).await;

        assert_eq!(outcome, LoadOutcome::Failed);
        let rendered = page.snapshot();
        assert_eq!(rendered.html(RenderTarget::FbtGrid), Some("<p>stale</p>"));
        assert_eq!(rendered.status, Status::error(LOAD_ERROR));
    }
}
