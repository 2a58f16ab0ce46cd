pub mod events;
pub mod handlers;
pub mod state;

pub use events::{dispatch, UiEvent};
pub use state::{AppState, SelectionState};
