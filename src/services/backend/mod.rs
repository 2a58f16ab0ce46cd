/// Backend contract consumed by the shop client
///
/// The recommendation service is treated as a fixed HTTP contract. Keeping it behind a trait
/// lets the pager and presenter be driven by mocks in tests and by [`HttpBackend`] in the
/// binary.
use crate::{
    error::AppResult,
    models::{CustomerId, ProductPagePayload, RecommendationResponse, UsersPage},
};

pub mod http;

pub use http::HttpBackend;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RetailBackend: Send + Sync {
    /// `GET /api/users?limit={limit}&offset={offset}`
    ///
    /// Any accepted payload shape is resolved into a [`UsersPage`]; a malformed body yields an
    /// empty page rather than an error.
    async fn list_users(&self, limit: usize, offset: usize) -> AppResult<UsersPage>;

    /// `GET /api/users/{id}/recommendations?top_n={top_n}`
    async fn recommendations(
        &self,
        customer: &CustomerId,
        top_n: usize,
    ) -> AppResult<RecommendationResponse>;

    /// `DELETE /api/users/{id}/history`
    async fn clear_history(&self, customer: &CustomerId) -> AppResult<()>;

    /// `GET /api/products/random?top_n={top_n}`
    async fn random_product(&self, top_n: usize) -> AppResult<ProductPagePayload>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
