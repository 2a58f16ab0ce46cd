use reqwest::{Method, RequestBuilder, Url};
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to every outgoing backend request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stamps a request with a fresh request ID.
///
/// Returns the builder with the `x-request-id` header set, plus the tracing span the
/// request should be awaited in.
pub fn with_request_id(
    builder: RequestBuilder,
    method: &Method,
    url: &Url,
) -> (RequestBuilder, tracing::Span) {
    let request_id = RequestId::new();
    let span = make_span_with_request_id(method, url, &request_id);
    (builder.header(REQUEST_ID_HEADER, request_id.as_str()), span)
}

/// Helper function to create a tracing span with request ID
pub fn make_span_with_request_id(
    method: &Method,
    url: &Url,
    request_id: &RequestId,
) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        uri = %url,
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_header_is_attached() {
        let client = reqwest::Client::new();
        let url = Url::parse("http://127.0.0.1:8000/api/users").unwrap();
        let (builder, _span) = with_request_id(client.get(url.clone()), &Method::GET, &url);

        let request = builder.build().unwrap();
        let header = request.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
    }
}
