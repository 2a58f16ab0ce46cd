use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::models::CustomerId;
use crate::services::{
    CatalogPager, HistoryEraser, ProductPageLoader, RecommendationPresenter, RetailBackend,
};
use crate::view::{SharedPage, View};

/// Which customer is selected and which view is showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<CustomerId>,
    pub active_view: View,
    /// Customer a clear-history confirmation was requested for
    pub pending_clear: Option<CustomerId>,
}

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub page: SharedPage,
    pub pager: CatalogPager,
    pub presenter: RecommendationPresenter,
    pub product_page: ProductPageLoader,
    pub history: HistoryEraser,
    pub selection: Arc<RwLock<SelectionState>>,
}

impl AppState {
    pub fn new(config: &Config, backend: Arc<dyn RetailBackend>) -> Self {
        let presenter =
            RecommendationPresenter::new(backend.clone(), config.discard_stale_responses);

        Self {
            page: SharedPage::new(),
            pager: CatalogPager::new(backend.clone()),
            history: HistoryEraser::new(backend.clone(), presenter.clone()),
            product_page: ProductPageLoader::new(backend),
            presenter,
            selection: Arc::new(RwLock::new(SelectionState::default())),
        }
    }

    pub async fn selected(&self) -> Option<CustomerId> {
        self.selection.read().await.selected.clone()
    }

    pub async fn has_selection(&self) -> bool {
        self.selection.read().await.selected.is_some()
    }

    /// Back to the state of a freshly loaded page
    pub async fn reset(&self) {
        self.pager.reset();
        *self.selection.write().await = SelectionState::default();
        self.page.reset();
    }
}
