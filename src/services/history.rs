use std::sync::Arc;

use crate::{
    models::CustomerId,
    services::{backend::RetailBackend, presenter::RecommendationPresenter},
    view::{RenderEffect, RenderSink, Status},
};

pub const CONFIRM_MESSAGE: &str = concat!(
    "This will clear the purchase history for this customer in the demo ",
    "and remove their personalized recommendations. Continue?"
);

const CLEARING: &str = "Clearing purchase history...";
const CLEARED: &str = concat!(
    "Purchase history cleared for this customer. ",
    "No personalized recommendations available anymore."
);
const CLEAR_FAILED: &str = "Failed to clear purchase history.";
const CLEARED_META: &str = "history cleared";

/// Deletes a customer's purchase history and reloads their (now cold-start) recommendations
#[derive(Clone)]
pub struct HistoryEraser {
    backend: Arc<dyn RetailBackend>,
    presenter: RecommendationPresenter,
}

impl HistoryEraser {
    pub fn new(backend: Arc<dyn RetailBackend>, presenter: RecommendationPresenter) -> Self {
        Self { backend, presenter }
    }

    /// Runs the confirmed clear. Returns whether the backend accepted the delete.
    pub async fn clear(&self, customer: &CustomerId, sink: &dyn RenderSink) -> bool {
        sink.apply(vec![RenderEffect::SetStatus(Status::info(CLEARING))]);

        if let Err(e) = self.backend.clear_history(customer).await {
            tracing::error!(customer = %customer, error = %e, "Failed to clear purchase history");
            sink.apply(vec![RenderEffect::SetStatus(Status::error(CLEAR_FAILED))]);
            return false;
        }

        self.presenter.load_for_customer(customer, sink).await;

        sink.apply(vec![
            RenderEffect::SetOptionMeta {
                customer: customer.clone(),
                meta: CLEARED_META.to_string(),
            },
            RenderEffect::SetStatus(Status::info(CLEARED)),
        ]);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::RecommendationResponse;
    use crate::services::backend::MockRetailBackend;
    use crate::view::{RenderTarget, SharedPage};

    #[tokio::test]
    async fn test_clear_reloads_cold_start() {
        let mut backend = MockRetailBackend::new();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_clear_history()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        backend
            .expect_recommendations()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(RecommendationResponse::default()));

        let backend: Arc<dyn RetailBackend> = Arc::new(backend);
        let eraser = HistoryEraser::new(
            backend.clone(),
            RecommendationPresenter::new(backend, false),
        );

        let customer = CustomerId::from(13047);
        let page = SharedPage::new();
        page.apply(vec![RenderEffect::AppendOptions(vec![customer.clone()])]);

        assert!(eraser.clear(&customer, &page).await);

        let rendered = page.snapshot();
        assert_eq!(rendered.status, Status::info(CLEARED));
        assert_eq!(rendered.option_meta(&customer), Some(CLEARED_META));
        for target in [
            RenderTarget::HistoryList,
            RenderTarget::FbtGrid,
            RenderTarget::PersonalGrid,
            RenderTarget::CartRecs,
        ] {
            assert!(rendered.html(target).unwrap().contains("empty-text"));
        }
    }

    #[tokio::test]
    async fn test_failed_delete_skips_reload() {
        let mut backend = MockRetailBackend::new();
        backend
            .expect_clear_history()
            .returning(|_| Err(AppError::ExternalApi("History HTTP 500".to_string())));
        backend.expect_recommendations().never();

        let backend: Arc<dyn RetailBackend> = Arc::new(backend);
        let eraser = HistoryEraser::new(
            backend.clone(),
            RecommendationPresenter::new(backend, false),
        );

        let page = SharedPage::new();
        assert!(!eraser.clear(&CustomerId::from(1), &page).await);
        assert_eq!(page.snapshot().status, Status::error(CLEAR_FAILED));
    }
}
