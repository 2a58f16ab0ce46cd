/// reqwest implementation of the backend contract
///
/// All requests target the configured origin. Customer ids are pushed as path segments so
/// they are percent-encoded, and every request carries an `x-request-id` header.
use reqwest::{Client as HttpClient, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::Instrument;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::with_request_id,
    models::{CustomerId, ProductPagePayload, RecommendationResponse, UsersPage, UsersPayload},
    services::backend::RetailBackend,
};

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(api_base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(api_base_url).map_err(|e| {
            AppError::InvalidInput(format!("bad API base URL {}: {}", api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidInput(format!(
                "API base URL cannot carry paths: {}",
                api_base_url
            )));
        }

        Ok(Self {
            http_client: HttpClient::new(),
            base_url,
        })
    }

    /// Builds `{origin}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, String)],
        resource: &str,
    ) -> AppResult<Response> {
        let builder = self
            .http_client
            .request(method.clone(), url.clone())
            .query(query);
        let (builder, span) = with_request_id(builder, &method, &url);

        async move {
            let response = builder.send().await?;
            let status = response.status();
            tracing::debug!(status = status.as_u16(), "Backend responded");

            if !status.is_success() {
                return Err(AppError::status(resource, status));
            }
            Ok(response)
        }
        .instrument(span)
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        resource: &str,
    ) -> AppResult<T> {
        let response = self.send(Method::GET, url, query, resource).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl RetailBackend for HttpBackend {
    async fn list_users(&self, limit: usize, offset: usize) -> AppResult<UsersPage> {
        let url = self.endpoint(&["api", "users"]);
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];

        let payload: UsersPayload = self.get_json(url, &query, "Users").await?;
        if let UsersPayload::Malformed(ref body) = payload {
            tracing::warn!(offset, body = %body, "Users payload has no list, treating as empty");
        }
        Ok(payload.into())
    }

    async fn recommendations(
        &self,
        customer: &CustomerId,
        top_n: usize,
    ) -> AppResult<RecommendationResponse> {
        let url = self.endpoint(&["api", "users", customer.as_str(), "recommendations"]);
        let query = [("top_n", top_n.to_string())];

        let response: RecommendationResponse =
            self.get_json(url, &query, "Recommendations").await?;

        tracing::info!(
            customer = %customer,
            recommendations = response.recommendations.len(),
            bought = response.bought_descriptions.len(),
            backend = self.name(),
            "Recommendations fetched"
        );

        Ok(response)
    }

    async fn clear_history(&self, customer: &CustomerId) -> AppResult<()> {
        let url = self.endpoint(&["api", "users", customer.as_str(), "history"]);
        self.send(Method::DELETE, url, &[], "History").await?;

        tracing::info!(customer = %customer, backend = self.name(), "Purchase history cleared");
        Ok(())
    }

    async fn random_product(&self, top_n: usize) -> AppResult<ProductPagePayload> {
        let url = self.endpoint(&["api", "products", "random"]);
        let query = [("top_n", top_n.to_string())];
        self.get_json(url, &query, "Product page").await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
