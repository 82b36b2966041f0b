//! Prompt and response-schema construction for the drafting calls.

use serde_json::{json, Value};

use crate::model::{Category, Profile, SwotData};

/// Schema: an object mapping each given key to an array of strings.
pub fn category_lists_schema<'a>(keys: impl Iterator<Item = &'a str>) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for key in keys {
        properties
            .insert(key.to_string(), json!({ "type": "ARRAY", "items": { "type": "STRING" } }));
        required.push(Value::String(key.to_string()));
    }
    json!({
        "type": "OBJECT",
        "properties": Value::Object(properties),
        "required": Value::Array(required),
    })
}

/// Schema: a bare array of strings.
pub fn string_array_schema() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

fn profile_context(profile: &Profile) -> String {
    format!(
        "Company: {}\nSector: {}\nUnit under analysis: {}\nAnalysis date: {}\nPrepared by: {} ({})",
        profile.company_name,
        profile.sector.resolved_text(),
        profile.unit_name,
        profile.analysis_date,
        profile.analyst_name,
        profile.analyst_title,
    )
}

/// Prompt for the full SWOT + PESTLE initial draft.
pub fn initial_draft(profile: &Profile) -> String {
    format!(
        r"You are a quality management consultant preparing an organizational
context analysis per ISO 9001:2015 clause 4.1.

{}

Draft a SWOT and PESTLE analysis for this organization. For every list
(strengths, weaknesses, opportunities, threats, political, economic, social,
technological, legal, environmental) produce 3 to 5 concise bullet points.

Rules:
1. Each bullet is one plain sentence, no numbering or markdown
2. Be specific to the sector and unit given above
3. Internal lists (strengths, weaknesses) describe the organization itself;
   every other list describes its environment",
        profile_context(profile)
    )
}

/// Prompt for extra bullets in a single category.
pub fn more_for_category(profile: &Profile, category: Category, existing: &[String]) -> String {
    let existing_block = if existing.is_empty() {
        "(none yet)".to_string()
    } else {
        existing.iter().map(|t| format!("- {t}")).collect::<Vec<_>>().join("\n")
    };
    format!(
        r"You are a quality management consultant extending an ISO 9001:2015
context analysis.

{}

The '{}' list currently contains:
{}

Suggest 2 to 5 additional '{}' points for this organization.

Rules:
1. Do NOT repeat or rephrase any point already listed above
2. Each point is one plain sentence, no numbering or markdown",
        profile_context(profile),
        category.key(),
        existing_block,
        category.key(),
    )
}

/// One-line-per-factor summary of the SWOT lists, used by the TOWS prompt.
pub fn swot_summary(swot: &SwotData) -> String {
    let mut out = String::new();
    for (title, list) in [
        ("Strengths", &swot.strengths),
        ("Weaknesses", &swot.weaknesses),
        ("Opportunities", &swot.opportunities),
        ("Threats", &swot.threats),
    ] {
        out.push_str(title);
        out.push_str(":\n");
        if list.is_empty() {
            out.push_str("- (none)\n");
        }
        for factor in list {
            out.push_str(&format!(
                "- {} (impact: {}, priority: {})\n",
                factor.text,
                factor.impact.label(),
                factor.priority
            ));
        }
    }
    out
}

/// Prompt for the TOWS strategy matrix.
pub fn tows(profile: &Profile, swot: &SwotData) -> String {
    format!(
        r"You are a quality management consultant deriving a TOWS strategy
matrix from a finished SWOT analysis.

{}

Current SWOT:
{}

Produce recommended strategies for each quadrant:
- so: use strengths to seize opportunities
- st: use strengths to counter threats
- wo: fix weaknesses by exploiting opportunities
- wt: minimize weaknesses and avoid threats

Rules:
1. 2 to 4 strategies per quadrant
2. Each strategy is one actionable sentence referencing concrete factors
3. No numbering or markdown",
        profile_context(profile),
        swot_summary(swot),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisFactor, ImpactLevel, Sector};

    fn profile() -> Profile {
        Profile {
            analyst_name: "Rina".into(),
            analyst_title: "QMR".into(),
            analysis_date: "2026-08-28".into(),
            company_name: "PT Maju Sejahtera".into(),
            sector: Sector::Manufaktur,
            unit_name: "Produksi".into(),
        }
    }

    #[test]
    fn test_category_lists_schema_requires_every_key() {
        let schema = category_lists_schema(Category::ALL.iter().map(|c| c.key()));
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 10);
        assert_eq!(schema["properties"]["legal"]["type"], "ARRAY");
    }

    #[test]
    fn test_more_prompt_lists_existing_texts() {
        let prompt = more_for_category(
            &profile(),
            Category::Strengths,
            &["ISO-certified production line".into()],
        );
        assert!(prompt.contains("- ISO-certified production line"));
        assert!(prompt.contains("Do NOT repeat"));
    }

    #[test]
    fn test_swot_summary_includes_impact_and_priority() {
        let mut swot = SwotData::default();
        swot.threats.push(AnalysisFactor {
            id: 0,
            text: "price war".into(),
            impact: ImpactLevel::High,
            priority: 5,
            is_external: true,
        });
        let summary = swot_summary(&swot);
        assert!(summary.contains("- price war (impact: High, priority: 5)"));
        assert!(summary.contains("Strengths:\n- (none)"));
    }
}
