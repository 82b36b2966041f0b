//! AI drafting integration.
//!
//! Builds prompts from the current analysis state, calls the generative
//! service with a declared JSON output schema, and parses the structured
//! response into record-store entries.
//!
//! Three independent operations share the contract:
//!
//! - initial draft: all ten SWOT/PESTLE lists in one call
//! - per-category additions: 2-5 extra bullets for one list
//! - TOWS generation: four strategy lists from a SWOT summary

mod gemini;
mod prompts;

pub use gemini::GeminiProvider;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::{Category, Profile, SwotData, TowsCategory};

/// Trait for structured-output text generation backends.
#[async_trait]
pub trait DraftModel: Send + Sync {
    /// Run one generation call and return the response decoded as the
    /// declared schema.
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<Value, AiError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Drafting error types.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("drafting service call failed: {0}")]
    Service(String),

    #[error("drafting service returned an unexpected response: {0}")]
    Parse(String),

    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,
}

/// An initial draft: texts for all ten lists, in `Category::ALL` order.
///
/// The store assigns ids in this order, so one draft yields strictly
/// increasing ids across all ten categories.
#[derive(Debug, Clone)]
pub struct InitialDraft {
    pub lists: Vec<(Category, Vec<String>)>,
}

/// One TOWS generation batch, in `TowsCategory::ALL` order.
#[derive(Debug, Clone)]
pub struct TowsDraft {
    pub lists: Vec<(TowsCategory, Vec<String>)>,
}

/// Gateway over a drafting backend.
#[derive(Clone)]
pub struct DraftingGateway {
    model: Arc<dyn DraftModel>,
}

impl DraftingGateway {
    pub fn new(model: Arc<dyn DraftModel>) -> Self {
        Self { model }
    }

    /// Draft the full SWOT + PESTLE analysis from the profile.
    ///
    /// One call, one structured response covering all ten lists. On any
    /// failure nothing is produced; the caller keeps its prior state.
    pub async fn draft_initial(&self, profile: &Profile) -> Result<InitialDraft, AiError> {
        let prompt = prompts::initial_draft(profile);
        let schema = prompts::category_lists_schema(Category::ALL.iter().map(|c| c.key()));

        tracing::debug!(model = self.model.name(), "requesting initial draft");
        let value = self.model.generate_json(&prompt, &schema).await?;

        let mut lists = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            lists.push((category, string_list(&value, category.key())?));
        }
        Ok(InitialDraft { lists })
    }

    /// Draft 2-5 additional bullets for one category.
    ///
    /// The prompt instructs the service not to repeat `existing` texts; the
    /// service is trusted to honor that, there is no local duplicate check.
    pub async fn draft_more(
        &self,
        profile: &Profile,
        category: Category,
        existing: &[String],
    ) -> Result<Vec<String>, AiError> {
        let prompt = prompts::more_for_category(profile, category, existing);
        let schema = prompts::string_array_schema();

        tracing::debug!(
            model = self.model.name(),
            category = category.key(),
            "requesting additions"
        );
        let value = self.model.generate_json(&prompt, &schema).await?;

        bare_string_list(&value)
    }

    /// Draft the four TOWS strategy lists from the current SWOT.
    pub async fn draft_tows(
        &self,
        profile: &Profile,
        swot: &SwotData,
    ) -> Result<TowsDraft, AiError> {
        let prompt = prompts::tows(profile, swot);
        let schema = prompts::category_lists_schema(TowsCategory::ALL.iter().map(|c| c.key()));

        tracing::debug!(model = self.model.name(), "requesting TOWS strategies");
        let value = self.model.generate_json(&prompt, &schema).await?;

        let mut lists = Vec::with_capacity(TowsCategory::ALL.len());
        for category in TowsCategory::ALL {
            lists.push((category, string_list(&value, category.key())?));
        }
        Ok(TowsDraft { lists })
    }
}

/// Pull a named string array out of an object response.
fn string_list(value: &Value, key: &str) -> Result<Vec<String>, AiError> {
    let items = value
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| AiError::Parse(format!("missing list '{key}'")))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.trim().to_string())
                .ok_or_else(|| AiError::Parse(format!("non-string entry in '{key}'")))
        })
        .collect()
}

/// Decode a bare string-array response.
fn bare_string_list(value: &Value) -> Result<Vec<String>, AiError> {
    let items =
        value.as_array().ok_or_else(|| AiError::Parse("expected a string array".to_string()))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.trim().to_string())
                .ok_or_else(|| AiError::Parse("non-string entry in array".to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Backend that replays a canned response.
    struct CannedModel {
        response: Value,
    }

    #[async_trait]
    impl DraftModel for CannedModel {
        async fn generate_json(&self, _prompt: &str, _schema: &Value) -> Result<Value, AiError> {
            Ok(self.response.clone())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn gateway_with(response: Value) -> DraftingGateway {
        DraftingGateway::new(Arc::new(CannedModel { response }))
    }

    fn sample_profile() -> Profile {
        Profile {
            analyst_name: "Rina".into(),
            analyst_title: "QMR".into(),
            analysis_date: "2026-08-28".into(),
            company_name: "PT Maju Sejahtera".into(),
            sector: crate::model::Sector::Manufaktur,
            unit_name: "Produksi".into(),
        }
    }

    #[tokio::test]
    async fn test_draft_initial_returns_lists_in_category_order() {
        let mut response = serde_json::Map::new();
        for category in Category::ALL {
            response.insert(category.key().to_string(), json!([format!("{} x", category.key())]));
        }
        let gateway = gateway_with(Value::Object(response));

        let draft = gateway.draft_initial(&sample_profile()).await.unwrap();
        let order: Vec<Category> = draft.lists.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Category::ALL.to_vec());
        assert_eq!(draft.lists[0].1, vec!["strengths x"]);
    }

    #[tokio::test]
    async fn test_draft_initial_missing_category_is_parse_error() {
        // Everything except "legal"
        let mut response = serde_json::Map::new();
        for category in Category::ALL.iter().filter(|c| **c != Category::Legal) {
            response.insert(category.key().to_string(), json!(["x"]));
        }
        let gateway = gateway_with(Value::Object(response));

        let err = gateway.draft_initial(&sample_profile()).await.unwrap_err();
        assert!(matches!(err, AiError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_draft_more_decodes_bare_array_and_trims() {
        let gateway = gateway_with(json!(["  New point A ", "New point B"]));
        let texts = gateway
            .draft_more(&sample_profile(), Category::Strengths, &["old".into()])
            .await
            .unwrap();
        assert_eq!(texts, vec!["New point A", "New point B"]);
    }

    #[tokio::test]
    async fn test_draft_more_rejects_object_response() {
        let gateway = gateway_with(json!({"strengths": ["x"]}));
        let err =
            gateway.draft_more(&sample_profile(), Category::Strengths, &[]).await.unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_draft_tows_returns_four_quadrants() {
        let gateway = gateway_with(json!({
            "so": ["expand exports"],
            "st": ["diversify suppliers"],
            "wo": ["train staff"],
            "wt": ["reduce debt"],
        }));
        let draft = gateway.draft_tows(&sample_profile(), &SwotData::default()).await.unwrap();
        let order: Vec<TowsCategory> = draft.lists.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, TowsCategory::ALL.to_vec());
        assert_eq!(draft.lists[3].1, vec!["reduce debt"]);
    }

    #[tokio::test]
    async fn test_non_string_entry_is_parse_error() {
        let gateway = gateway_with(json!([1, 2, 3]));
        let err = gateway.draft_more(&sample_profile(), Category::Threats, &[]).await.unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }
}
