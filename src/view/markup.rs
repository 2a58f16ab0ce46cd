/// HTML fragments for the render targets
///
/// Descriptions and explanations come from the backend and are untrusted: every interpolated
/// string passes through [`escape_html`].
use crate::models::{CustomerId, DisplayItem};

/// Maximum purchase-history entries on the home view
pub const HISTORY_CAP: usize = 20;
/// Maximum previously bought items in the cart view
pub const CART_CAP: usize = 5;

pub const FBT_BADGE: &str = "Frequently bought together";
pub const PERSONAL_BADGE: &str = "Personalized recommendation";

const EMPTY_HISTORY: &str = "No purchase history for this customer yet.";
const EMPTY_GRID: &str = "No recommendations available yet.";
const EMPTY_CART_BOUGHT: &str = "No historical purchases found for this user.";
const EMPTY_CART_RECS: &str = "No cart-aware recommendations for this user.";
const EMPTY_RELATED: &str = "No related products found.";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn empty_text(message: &str) -> String {
    format!(r#"<p class="empty-text">{}</p>"#, message)
}

fn score_badge(score: Option<&str>) -> String {
    score
        .map(|score| format!(r#"<div class="score-badge">score: {}</div>"#, escape_html(score)))
        .unwrap_or_default()
}

fn tooltip(explanation: &str) -> String {
    format!(
        concat!(
            r#"<div class="tooltip"><span>Why recommended?</span>"#,
            r#"<span class="tooltip-icon">?</span>"#,
            r#"<span class="tooltip-text">{}</span></div>"#
        ),
        escape_html(explanation)
    )
}

/// One selectable customer in the option list
pub fn user_option(customer: &CustomerId, meta: &str) -> String {
    format!(
        concat!(
            r#"<div class="user-option" data-user-id="{id}">"#,
            r#"<span class="user-id">{label}</span>"#,
            r#"<span class="user-meta">{meta}</span></div>"#
        ),
        id = escape_html(customer.as_str()),
        label = escape_html(&customer.label()),
        meta = escape_html(meta),
    )
}

/// Purchase history on the home view, capped at [`HISTORY_CAP`]
pub fn history_list(bought_descriptions: &[String]) -> String {
    if bought_descriptions.is_empty() {
        return empty_text(EMPTY_HISTORY);
    }

    bought_descriptions
        .iter()
        .take(HISTORY_CAP)
        .map(|desc| format!(r#"<div class="history-item">{}</div>"#, escape_html(desc)))
        .collect()
}

/// Labeled product-card grid with explanation tooltip and score badge
pub fn product_grid(items: &[DisplayItem], badge: &str) -> String {
    if items.is_empty() {
        return empty_text(EMPTY_GRID);
    }

    items
        .iter()
        .map(|item| {
            format!(
                concat!(
                    r#"<div class="product-card">"#,
                    r#"<div class="product-image">"#,
                    r#"<div class="recommendation-badge">{badge}</div>{score}</div>"#,
                    r#"<div class="product-info">"#,
                    r#"<div class="product-title">{title}</div>"#,
                    r#"<div class="product-description">Product ID: {id}</div>"#,
                    "{tooltip}</div></div>"
                ),
                badge = escape_html(badge),
                score = score_badge(item.score.as_deref()),
                title = escape_html(&item.title),
                id = escape_html(&item.product_id),
                tooltip = tooltip(&item.explanation),
            )
        })
        .collect()
}

/// Numbered list of previously bought items, capped at [`CART_CAP`]
pub fn cart_bought_items(bought_descriptions: &[String]) -> String {
    if bought_descriptions.is_empty() {
        return empty_text(EMPTY_CART_BOUGHT);
    }

    bought_descriptions
        .iter()
        .take(CART_CAP)
        .enumerate()
        .map(|(idx, desc)| {
            format!(
                concat!(
                    r#"<div class="cart-item"><div class="cart-item-icon">{n}</div>"#,
                    r#"<div><div class="cart-item-title">{title}</div>"#,
                    r#"<div class="cart-item-meta">Previously bought item</div></div></div>"#
                ),
                n = idx + 1,
                title = escape_html(desc),
            )
        })
        .collect()
}

/// Compact cart-aware cards; no score badge
pub fn cart_recs(items: &[DisplayItem]) -> String {
    if items.is_empty() {
        return empty_text(EMPTY_CART_RECS);
    }

    items
        .iter()
        .map(|item| {
            format!(
                r#"<div class="rec-card"><h4>{title}</h4><p>Product ID: {id}</p>{tooltip}</div>"#,
                title = escape_html(&item.title),
                id = escape_html(&item.product_id),
                tooltip = tooltip(&item.explanation),
            )
        })
        .collect()
}

/// Related-product cards on the single-product view; that endpoint has no explanations
pub fn related_products(items: &[DisplayItem]) -> String {
    if items.is_empty() {
        return empty_text(EMPTY_RELATED);
    }

    items
        .iter()
        .map(|item| {
            format!(
                concat!(
                    r#"<div class="product-card">"#,
                    r#"<div class="product-image">"#,
                    r#"<div class="recommendation-badge badge-fbt">{badge}</div>{score}</div>"#,
                    r#"<div class="product-info">"#,
                    r#"<div class="product-title">{title}</div>"#,
                    r#"<div class="product-description">Product ID: {id}</div>"#,
                    "</div></div>"
                ),
                badge = FBT_BADGE,
                score = score_badge(item.score.as_deref()),
                title = escape_html(&item.title),
                id = escape_html(&item.product_id),
            )
        })
        .collect()
}
