use super::RecommendationItem;

/// Tooltip text used when the model produced no explanation
pub const NO_EXPLANATION: &str = "No explanation from the model.";

/// A recommendation with every optional field already resolved for display
///
/// Renderers only ever see this record, so fallback rules live in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub product_id: String,
    /// Description, or the product id when there is none
    pub title: String,
    pub explanation: String,
    /// Score with three decimals, absent when the backend sent no usable number
    pub score: Option<String>,
}

impl From<&RecommendationItem> for DisplayItem {
    fn from(item: &RecommendationItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            title: item
                .description
                .clone()
                .unwrap_or_else(|| item.product_id.clone()),
            explanation: item
                .explanation
                .clone()
                .unwrap_or_else(|| NO_EXPLANATION.to_string()),
            score: format_score(item.score),
        }
    }
}

/// Formats a score to 3 decimal places; non-finite or missing scores yield nothing
pub fn format_score(score: Option<f64>) -> Option<String> {
    score
        .filter(|value| value.is_finite())
        .map(|value| format!("{:.3}", value))
}

pub fn normalize(items: &[RecommendationItem]) -> Vec<DisplayItem> {
    items.iter().map(DisplayItem::from).collect()
}
