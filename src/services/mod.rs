pub mod backend;
pub mod history;
pub mod pager;
pub mod presenter;
pub mod product_page;

pub use backend::{HttpBackend, RetailBackend};
pub use history::HistoryEraser;
pub use pager::CatalogPager;
pub use presenter::RecommendationPresenter;
pub use product_page::ProductPageLoader;
