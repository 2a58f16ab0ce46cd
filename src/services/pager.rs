/// Catalog pager: incremental loading of the selectable-customer list
///
/// [`PagerState`] is a pure state machine. [`CatalogPager`] drives it against the backend:
/// the in-flight guard is checked and set under the state lock before the request is issued,
/// so redundant triggers from rapid scroll events never put a second page in flight. The lock
/// is never held across an await, and a request dropped mid-flight still releases the guard.
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    error::AppResult,
    models::{CustomerId, UsersPage},
    services::backend::RetailBackend,
    view::{RenderEffect, RenderSink, RenderTarget, Status},
};

/// Customers requested per page
pub const PAGE_SIZE: usize = 50;

/// Distance from the bottom edge of the option list, in pixels, that triggers the next page
pub const SCROLL_THRESHOLD_PX: f64 = 40.0;

const LOADING_LABEL: &str = "Loading users…";
const EMPTY_LABEL: &str = "No users found";
const ERROR_LABEL: &str = "Error loading users";
const ERROR_STATUS: &str = "Failed to load users list.";

/// Scroll geometry of the option list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollPosition {
    pub fn is_near_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - SCROLL_THRESHOLD_PX
    }
}

/// Page request handed out by [`PagerState::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub offset: usize,
    pub limit: usize,
}

/// What a call to [`CatalogPager::request_next_page`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    /// Another page was in flight or the catalog is exhausted; no request was made
    Skipped,
    /// A page arrived; `exhausted` reports whether it was the last one
    Loaded { count: usize, exhausted: bool },
    /// The backend returned no customers
    Empty,
    /// Transport or HTTP failure; state is unchanged and a later trigger may retry
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerState {
    accumulated: Vec<CustomerId>,
    cursor: usize,
    in_flight: bool,
    exhausted: bool,
}

impl PagerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulated(&self) -> &[CustomerId] {
        &self.accumulated
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn first(&self) -> Option<&CustomerId> {
        self.accumulated.first()
    }

    /// Claims the next page. Returns `None` while a page is in flight or once exhausted.
    pub fn begin(&mut self, has_selection: bool) -> Option<(PageCursor, Vec<RenderEffect>)> {
        if self.in_flight || self.exhausted {
            return None;
        }
        self.in_flight = true;

        let mut effects = Vec::new();
        if !has_selection {
            effects.push(RenderEffect::text(RenderTarget::UserToggle, LOADING_LABEL));
        }

        Some((
            PageCursor {
                offset: self.cursor,
                limit: PAGE_SIZE,
            },
            effects,
        ))
    }

    /// Folds the result of a page request into the state. Always releases the in-flight flag.
    pub fn finish(
        &mut self,
        outcome: AppResult<UsersPage>,
        has_selection: bool,
    ) -> (PageFetch, Vec<RenderEffect>) {
        self.in_flight = false;

        let page = match outcome {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(error = %e, offset = self.cursor, "Failed to load users page");
                return (
                    PageFetch::Failed,
                    vec![
                        RenderEffect::text(RenderTarget::UserToggle, ERROR_LABEL),
                        RenderEffect::SetStatus(Status::error(ERROR_STATUS)),
                    ],
                );
            }
        };

        if page.users.is_empty() {
            self.exhausted = true;
            tracing::info!(total = self.cursor, "Customer catalog exhausted");

            let effects = if self.accumulated.is_empty() {
                vec![RenderEffect::text(RenderTarget::UserToggle, EMPTY_LABEL)]
            } else {
                Vec::new()
            };
            return (PageFetch::Empty, effects);
        }

        let count = page.users.len();
        self.accumulated.extend(page.users.iter().cloned());
        self.cursor += count;
        self.exhausted = page.has_more == Some(false) || count < PAGE_SIZE;

        tracing::info!(
            count,
            cursor = self.cursor,
            exhausted = self.exhausted,
            "Users page loaded"
        );

        let mut effects = vec![RenderEffect::AppendOptions(page.users)];
        if !has_selection {
            if let Some(first) = self.accumulated.first() {
                effects.push(RenderEffect::text(RenderTarget::UserToggle, first.label()));
            }
        }

        (
            PageFetch::Loaded {
                count,
                exhausted: self.exhausted,
            },
            effects,
        )
    }
}

/// Shared handle to the pager state and the backend it pages through
#[derive(Clone)]
pub struct CatalogPager {
    backend: Arc<dyn RetailBackend>,
    state: Arc<Mutex<PagerState>>,
}

impl CatalogPager {
    pub fn new(backend: Arc<dyn RetailBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(PagerState::new())),
        }
    }

    /// Fetches the next page of customers unless one is already in flight or the list is
    /// exhausted.
    ///
    /// `has_selection` is consulted when the request starts and again once the page arrives,
    /// so a customer picked while the page was in flight keeps the toggle.
    pub async fn request_next_page<F, Fut>(
        &self,
        sink: &dyn RenderSink,
        has_selection: F,
    ) -> PageFetch
    where
        F: Fn() -> Fut,
        Fut: Future<Output = bool>,
    {
        let selected = has_selection().await;
        let cursor = {
            let mut state = lock(&self.state);
            match state.begin(selected) {
                Some((cursor, effects)) => {
                    sink.apply(effects);
                    cursor
                }
                None => {
                    tracing::trace!(
                        in_flight = state.is_in_flight(),
                        exhausted = state.is_exhausted(),
                        "Users page request skipped"
                    );
                    return PageFetch::Skipped;
                }
            }
        };

        let guard = InFlightGuard::new(&self.state, cursor);
        let outcome = self.backend.list_users(cursor.limit, cursor.offset).await;
        let selected = has_selection().await;

        let (fetch, effects) = guard.finish(outcome, selected);
        sink.apply(effects);
        fetch
    }

    /// Handles a scroll event on the option list
    pub async fn on_scroll<F, Fut>(
        &self,
        position: ScrollPosition,
        sink: &dyn RenderSink,
        has_selection: F,
    ) -> PageFetch
    where
        F: Fn() -> Fut,
        Fut: Future<Output = bool>,
    {
        if !position.is_near_bottom() {
            return PageFetch::Skipped;
        }
        self.request_next_page(sink, has_selection).await
    }

    pub fn snapshot(&self) -> PagerState {
        lock(&self.state).clone()
    }

    pub fn reset(&self) {
        *lock(&self.state) = PagerState::new();
    }
}

fn lock(state: &Mutex<PagerState>) -> MutexGuard<'_, PagerState> {
    // Every mutation completes under the lock, so a poisoned state is still consistent.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds the in-flight flag for one outstanding page request.
///
/// Dropping it without [`InFlightGuard::finish`] (the request future was cancelled) releases
/// the flag and leaves cursor, list and exhaustion untouched, the same as a failed request.
struct InFlightGuard<'a> {
    state: &'a Mutex<PagerState>,
    cursor: PageCursor,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(state: &'a Mutex<PagerState>, cursor: PageCursor) -> Self {
        Self {
            state,
            cursor,
            armed: true,
        }
    }

    fn finish(
        mut self,
        outcome: AppResult<UsersPage>,
        has_selection: bool,
    ) -> (PageFetch, Vec<RenderEffect>) {
        self.armed = false;
        lock(self.state).finish(outcome, has_selection)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(offset = self.cursor.offset, "Users page request dropped in flight");
            lock(self.state).in_flight = false;
        }
    }
}
