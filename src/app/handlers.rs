use crate::models::CustomerId;
use crate::services::history::CONFIRM_MESSAGE;
use crate::services::pager::{PageFetch, ScrollPosition};
use crate::view::{RenderEffect, RenderSink, RenderTarget, Status, View};

use super::AppState;

const NO_USERS: &str = "No users with purchases found.";

/// Page load: first catalog page, default selection, and the product page preload
pub async fn startup(state: &AppState) {
    state.page.apply(vec![RenderEffect::ShowView(View::Home)]);

    let select_first = async {
        state
            .pager
            .request_next_page(&state.page, move || state.has_selection())
            .await;

        match state.pager.snapshot().first().cloned() {
            Some(first) => option_selected(state, first).await,
            None => state
                .page
                .apply(vec![RenderEffect::SetStatus(Status::error(NO_USERS))]),
        }
    };

    tokio::join!(select_first, state.product_page.load(&state.page));
}

/// Scroll on the customer list; fetches the next page near the bottom edge
pub async fn scroll(state: &AppState, position: ScrollPosition) -> PageFetch {
    state
        .pager
        .on_scroll(position, &state.page, move || state.has_selection())
        .await
}

/// A customer was picked from the list (or defaulted at startup)
pub async fn option_selected(state: &AppState, customer: CustomerId) {
    state.selection.write().await.selected = Some(customer.clone());
    tracing::info!(customer = %customer, "Customer selected");

    state.page.apply(vec![
        RenderEffect::SetOptionsOpen(false),
        RenderEffect::text(RenderTarget::UserToggle, customer.label()),
        RenderEffect::text(RenderTarget::UserLabel, customer.label()),
        RenderEffect::text(RenderTarget::PageUserId, customer.as_str()),
        RenderEffect::text(RenderTarget::UserAvatar, customer.avatar()),
    ]);

    state.presenter.load_for_customer(&customer, &state.page).await;
}

pub async fn tab_selected(state: &AppState, view: View) {
    state.selection.write().await.active_view = view;
    state.page.apply(vec![RenderEffect::ShowView(view)]);

    if view == View::Product {
        state.product_page.load(&state.page).await;
    }
}

pub async fn toggle_options(state: &AppState) {
    let open = state.page.snapshot().options_open;
    state.page.apply(vec![RenderEffect::SetOptionsOpen(!open)]);
}

/// First step of clearing history: ask for confirmation. Ignored without a selection.
pub async fn clear_history_requested(state: &AppState) {
    let mut selection = state.selection.write().await;
    let Some(customer) = selection.selected.clone() else {
        return;
    };
    selection.pending_clear = Some(customer);
    state
        .page
        .apply(vec![RenderEffect::RequestConfirmation(CONFIRM_MESSAGE.to_string())]);
}

/// Confirmation given: delete the history and reload recommendations
pub async fn clear_history_confirmed(state: &AppState) {
    let pending = state.selection.write().await.pending_clear.take();
    state.page.apply(vec![RenderEffect::ResolveConfirmation]);

    match pending {
        Some(customer) => {
            state.history.clear(&customer, &state.page).await;
        }
        None => tracing::warn!("Clear-history confirmation without a pending request"),
    }
}

pub async fn clear_history_cancelled(state: &AppState) {
    state.selection.write().await.pending_clear = None;
    state.page.apply(vec![RenderEffect::ResolveConfirmation]);
}
