//! HTTP DTOs for the scheduled publish trigger.

use serde::Serialize;

use crate::application::handlers::PublishRunSummary;

/// Outcome of one publish pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRunResponse {
    pub message: String,
    pub count: usize,
    pub published_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<&PublishRunSummary> for PublishRunResponse {
    fn from(summary: &PublishRunSummary) -> Self {
        Self {
            message: summary.message(),
            count: summary.count(),
            published_ids: summary.published_ids.iter().map(ToString::to_string).collect(),
            errors: summary.errors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ContentItemId;

    #[test]
    fn errors_are_omitted_when_empty() {
        let summary = PublishRunSummary {
            published_ids: vec![ContentItemId::new()],
            errors: Vec::new(),
        };
        let json = serde_json::to_value(PublishRunResponse::from(&summary)).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["publishedIds"].as_array().unwrap().len(), 1);
        assert!(json.get("errors").is_none());
    }
}
