use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

pub mod display;

pub use display::DisplayItem;

/// Opaque customer identifier
///
/// The backend sends numeric ids in practice but the client never does arithmetic on them,
/// so both JSON strings and numbers are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short badge shown in the avatar circle: the last two characters
    pub fn avatar(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let start = chars.len().saturating_sub(2);
        chars[start..].iter().collect()
    }

    /// Human-facing label, e.g. `Customer #101`
    pub fn label(&self) -> String {
        format!("Customer #{}", self.0)
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for CustomerId {
    fn from(id: u64) -> Self {
        Self::new(id.to_string())
    }
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_or_number(deserializer).map(CustomerId)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToken {
    Text(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawToken::deserialize(deserializer)? {
        RawToken::Text(text) => text,
        RawToken::Number(number) => number.to_string(),
    })
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.is_empty()))
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|score| score.is_finite()))
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

/// Keeps string and numeric ids, skipping any other entry instead of rejecting the list
fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<CustomerId>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let total = values.len();

    let ids: Vec<CustomerId> = values
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(text) => Some(CustomerId(text)),
            serde_json::Value::Number(number) => Some(CustomerId(number.to_string())),
            _ => None,
        })
        .collect();

    if ids.len() < total {
        tracing::warn!(skipped = total - ids.len(), "Skipping users entries that are not ids");
    }
    Ok(ids)
}

// ============================================================================
// Backend payloads
// ============================================================================

/// One ranked recommendation. Position in the enclosing list is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
}

impl RecommendationItem {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            description: None,
            explanation: None,
            score: None,
        }
    }
}

/// Response of `GET /api/users/{id}/recommendations`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub user_id: Option<CustomerId>,
    #[serde(default)]
    pub bought_descriptions: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
}

/// The anchor product of the single-product view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub description: Option<String>,
}

/// Response of `GET /api/products/random`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPagePayload {
    #[serde(default)]
    pub product: Option<ProductSummary>,
    #[serde(default)]
    pub frequently_bought_together: Vec<RecommendationItem>,
}

/// Shapes the users endpoint is known to answer with
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UsersPayload {
    Paged {
        #[serde(deserialize_with = "lenient_ids")]
        users: Vec<CustomerId>,
        #[serde(default, deserialize_with = "lenient_flag")]
        has_more: Option<bool>,
    },
    Bare(#[serde(deserialize_with = "lenient_ids")] Vec<CustomerId>),
    Malformed(serde_json::Value),
}

/// One page of the customer catalog, resolved from whichever payload shape arrived
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersPage {
    pub users: Vec<CustomerId>,
    /// `Some(false)` when the backend explicitly reports the end of the list
    pub has_more: Option<bool>,
}

impl From<UsersPayload> for UsersPage {
    fn from(payload: UsersPayload) -> Self {
        match payload {
            UsersPayload::Paged { users, has_more } => UsersPage { users, has_more },
            UsersPayload::Bare(users) => UsersPage {
                users,
                has_more: None,
            },
            UsersPayload::Malformed(_) => UsersPage::default(),
        }
    }
}
