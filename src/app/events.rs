use crate::models::CustomerId;
use crate::services::pager::ScrollPosition;
use crate::view::View;

use super::{handlers, AppState};

/// Everything the page can report to the client
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Startup,
    Scroll(ScrollPosition),
    OptionSelected(CustomerId),
    TabSelected(View),
    ToggleOptions,
    ClearHistoryRequested,
    ClearHistoryConfirmed,
    ClearHistoryCancelled,
}

/// Routes one event to its handler
pub async fn dispatch(state: &AppState, event: UiEvent) {
    tracing::debug!(?event, "Dispatching UI event");

    match event {
        UiEvent::Startup => handlers::startup(state).await,
        UiEvent::Scroll(position) => {
            handlers::scroll(state, position).await;
        }
        UiEvent::OptionSelected(customer) => handlers::option_selected(state, customer).await,
        UiEvent::TabSelected(view) => handlers::tab_selected(state, view).await,
        UiEvent::ToggleOptions => handlers::toggle_options(state).await,
        UiEvent::ClearHistoryRequested => handlers::clear_history_requested(state).await,
        UiEvent::ClearHistoryConfirmed => handlers::clear_history_confirmed(state).await,
        UiEvent::ClearHistoryCancelled => handlers::clear_history_cancelled(state).await,
    }
}
