/// Render targets and the effects that mutate them
///
/// Nothing in the crate touches a UI directly. Operations return batches of [`RenderEffect`]
/// which a [`RenderSink`] applies: the in-memory [`Page`] in this crate, a DOM binding elsewhere.
use std::fmt::Display;
use std::str::FromStr;

use crate::models::CustomerId;

pub mod markup;
pub mod page;
pub mod status;

pub use page::{Page, SharedPage};
pub use status::Status;

/// The three view surfaces; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Product,
    Cart,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Product, View::Cart];

    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Product => "product",
            View::Cart => "cart",
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.name() == s)
            .ok_or_else(|| format!("unknown view: {}", s))
    }
}

/// Named element a render effect writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    UserToggle,
    UserLabel,
    PageUserId,
    UserAvatar,
    HistoryList,
    FbtGrid,
    PersonalGrid,
    CartBoughtItems,
    CartRecs,
    ProductTitle,
    ProductDescription,
    ProductId,
    ProductFbtGrid,
}

impl RenderTarget {
    /// Element id in the shop page markup
    pub fn element_id(&self) -> &'static str {
        match self {
            RenderTarget::UserToggle => "user-select-toggle",
            RenderTarget::UserLabel => "user-label",
            RenderTarget::PageUserId => "page-user-id",
            RenderTarget::UserAvatar => "user-avatar",
            RenderTarget::HistoryList => "history-list",
            RenderTarget::FbtGrid => "fbt-grid",
            RenderTarget::PersonalGrid => "personal-grid",
            RenderTarget::CartBoughtItems => "cart-bought-items",
            RenderTarget::CartRecs => "cart-recs",
            RenderTarget::ProductTitle => "pp-title",
            RenderTarget::ProductDescription => "pp-description",
            RenderTarget::ProductId => "pp-product-id",
            RenderTarget::ProductFbtGrid => "pp-fbt-grid",
        }
    }
}

/// One mutation of the rendered page
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEffect {
    /// Replace the plain text of a target
    SetText { target: RenderTarget, text: String },
    /// Replace the markup of a target; the html is already escaped
    SetHtml { target: RenderTarget, html: String },
    /// Append selectable customers to the option list
    AppendOptions(Vec<CustomerId>),
    /// Change the meta line under one customer option
    SetOptionMeta { customer: CustomerId, meta: String },
    SetOptionsOpen(bool),
    SetStatus(Status),
    ShowView(View),
    /// Ask the operator to confirm a destructive action
    RequestConfirmation(String),
    /// The pending confirmation was answered
    ResolveConfirmation,
}

impl RenderEffect {
    pub fn text(target: RenderTarget, text: impl Into<String>) -> Self {
        RenderEffect::SetText {
            target,
            text: text.into(),
        }
    }

    pub fn html(target: RenderTarget, html: impl Into<String>) -> Self {
        RenderEffect::SetHtml {
            target,
            html: html.into(),
        }
    }
}

/// Destination for render effects
pub trait RenderSink: Send + Sync {
    fn apply(&self, effects: Vec<RenderEffect>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_names_round_trip() {
        for view in View::ALL {
            assert_eq!(view.name().parse::<View>().unwrap(), view);
        }
        assert!("checkout".parse::<View>().is_err());
    }
}
