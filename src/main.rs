use std::sync::Arc;

use retail_shop_client::{
    app::{dispatch, AppState, UiEvent},
    config::Config,
    models::CustomerId,
    services::HttpBackend,
    view::{RenderTarget, View},
};

/// Headless shop client.
///
/// Loads the page against the configured backend the way a browser would and prints the
/// rendered surfaces. The first argument selects a customer, or `--list` opens the customer list.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    tracing::info!(api_base_url = %config.api_base_url, "Starting shop client");

    let backend = HttpBackend::new(&config.api_base_url)?;
    let state = AppState::new(&config, Arc::new(backend));

    dispatch(&state, UiEvent::Startup).await;

    match std::env::args().nth(1).as_deref() {
        Some("--list") => dispatch(&state, UiEvent::ToggleOptions).await,
        Some(customer) => {
            dispatch(&state, UiEvent::OptionSelected(CustomerId::new(customer))).await
        }
        None => {}
    }

    let page = state.page.snapshot();
    let pager = state.pager.snapshot();

    println!(
        "{} ({} customers loaded{})",
        page.text(RenderTarget::UserToggle).unwrap_or_default(),
        pager.cursor(),
        if pager.is_exhausted() { ", all" } else { "" }
    );
    if let (Some(class), Some(text)) = (page.status.css_class(), page.status.text()) {
        println!("[{}] {}", class, text);
    }
    if page.options_open {
        println!("{}", page.options_html());
    }

    for (view, targets) in [
        (
            View::Home,
            &[
                RenderTarget::HistoryList,
                RenderTarget::FbtGrid,
                RenderTarget::PersonalGrid,
            ][..],
        ),
        (
            View::Cart,
            &[RenderTarget::CartBoughtItems, RenderTarget::CartRecs][..],
        ),
        (View::Product, &[RenderTarget::ProductFbtGrid][..]),
    ] {
        println!("== {}", view);
        for target in targets {
            if let Some(html) = page.html(*target) {
                println!("#{}\n{}", target.element_id(), html);
            }
        }
    }

    Ok(())
}
