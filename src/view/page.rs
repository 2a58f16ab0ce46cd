use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{markup, RenderEffect, RenderSink, RenderTarget, Status, View};
use crate::models::CustomerId;

const DEFAULT_OPTION_META: &str = "has purchases";

/// A selectable entry in the customer list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerOption {
    pub customer: CustomerId,
    pub meta: String,
}

/// In-memory model of the shop page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    texts: HashMap<RenderTarget, String>,
    htmls: HashMap<RenderTarget, String>,
    pub options: Vec<CustomerOption>,
    pub options_open: bool,
    pub status: Status,
    pub active_view: View,
    pub pending_confirmation: Option<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, effect: RenderEffect) {
        match effect {
            RenderEffect::SetText { target, text } => {
                self.texts.insert(target, text);
            }
            RenderEffect::SetHtml { target, html } => {
                self.htmls.insert(target, html);
            }
            RenderEffect::AppendOptions(customers) => {
                self.options
                    .extend(customers.into_iter().map(|customer| CustomerOption {
                        customer,
                        meta: DEFAULT_OPTION_META.to_string(),
                    }));
            }
            RenderEffect::SetOptionMeta { customer, meta } => {
                if let Some(option) = self.options.iter_mut().find(|o| o.customer == customer) {
                    option.meta = meta;
                }
            }
            RenderEffect::SetOptionsOpen(open) => self.options_open = open,
            RenderEffect::SetStatus(status) => self.status = status,
            RenderEffect::ShowView(view) => self.active_view = view,
            RenderEffect::RequestConfirmation(message) => {
                self.pending_confirmation = Some(message)
            }
            RenderEffect::ResolveConfirmation => self.pending_confirmation = None,
        }
    }

    pub fn text(&self, target: RenderTarget) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }

    pub fn html(&self, target: RenderTarget) -> Option<&str> {
        self.htmls.get(&target).map(String::as_str)
    }

    /// Markup of the whole option list
    pub fn options_html(&self) -> String {
        self.options
            .iter()
            .map(|option| markup::user_option(&option.customer, &option.meta))
            .collect()
    }

    pub fn option_meta(&self, customer: &CustomerId) -> Option<&str> {
        self.options
            .iter()
            .find(|o| &o.customer == customer)
            .map(|o| o.meta.as_str())
    }

    /// Whether the given view section is currently displayed
    pub fn is_visible(&self, view: View) -> bool {
        self.active_view == view
    }
}

/// Thread-safe page handle used as the application's render sink
#[derive(Clone, Default)]
pub struct SharedPage {
    inner: Arc<Mutex<Page>>,
}

impl SharedPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current page model
    pub fn snapshot(&self) -> Page {
        self.lock().clone()
    }

    pub fn reset(&self) {
        *self.lock() = Page::new();
    }

    fn lock(&self) -> MutexGuard<'_, Page> {
        // The page holds plain data, so a poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderSink for SharedPage {
    fn apply(&self, effects: Vec<RenderEffect>) {
        let mut page = self.lock();
        for effect in effects {
            tracing::trace!(?effect, "Applying render effect");
            page.apply(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_text_and_html() {
        let mut page = Page::new();
        page.apply(RenderEffect::text(RenderTarget::UserLabel, "Customer #1"));
        page.apply(RenderEffect::html(RenderTarget::FbtGrid, "<p>x</p>"));

        assert_eq!(page.text(RenderTarget::UserLabel), Some("Customer #1"));
        assert_eq!(page.html(RenderTarget::FbtGrid), Some("<p>x</p>"));
        assert_eq!(page.html(RenderTarget::CartRecs), None);
    }

    #[test]
    fn test_options_and_meta() {
        let mut page = Page::new();
        page.apply(RenderEffect::AppendOptions(vec![
            CustomerId::from(1),
            CustomerId::from(2),
        ]));
        page.apply(RenderEffect::SetOptionMeta {
            customer: CustomerId::from(2),
            meta: "history cleared".to_string(),
        });

        assert_eq!(page.options.len(), 2);
        assert_eq!(page.option_meta(&CustomerId::from(1)), Some("has purchases"));
        assert_eq!(page.option_meta(&CustomerId::from(2)), Some("history cleared"));
        assert!(page.options_html().contains("history cleared"));
    }

    #[test]
    fn test_single_active_view() {
        let mut page = Page::new();
        assert!(page.is_visible(View::Home));

        page.apply(RenderEffect::ShowView(View::Cart));
        assert!(page.is_visible(View::Cart));
        assert!(!page.is_visible(View::Home));
        assert!(!page.is_visible(View::Product));
    }

    #[test]
    fn test_shared_page_applies_batches() {
        let shared = SharedPage::new();
        shared.apply(vec![
            RenderEffect::SetStatus(Status::info("Loading")),
            RenderEffect::SetStatus(Status::Hidden),
        ]);
        assert_eq!(shared.snapshot().status, Status::Hidden);

        shared.reset();
        assert_eq!(shared.snapshot(), Page::new());
    }
}
