//! End-to-end wizard flow tests against the library API, using scripted
//! drafting backends instead of the HTTP provider.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::Notify;

use konteks::{
    AiError, AnalysisStore, Category, DraftModel, DraftingGateway, Profile, Sector, WizardApp,
    WizardStep,
};

/// Builds a schema-conformant response for whatever call it receives: the
/// required keys of an object schema each get one bullet, a bare-array
/// schema gets two.
fn scripted_response(schema: &Value, tag: &str) -> Value {
    if schema["type"] == "ARRAY" {
        return json!([format!("{tag} addition one"), format!("{tag} addition two")]);
    }
    let mut out = serde_json::Map::new();
    for key in schema["required"].as_array().unwrap() {
        let key = key.as_str().unwrap();
        out.insert(key.to_string(), json!([format!("{tag} {key}")]));
    }
    Value::Object(out)
}

/// Immediate, always-successful backend.
struct ScriptedModel {
    tag: &'static str,
}

#[async_trait::async_trait]
impl DraftModel for ScriptedModel {
    async fn generate_json(&self, _prompt: &str, schema: &Value) -> Result<Value, AiError> {
        Ok(scripted_response(schema, self.tag))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Backend that holds per-category addition calls until the gate opens,
/// while answering screen-level calls immediately.
struct GatedModel {
    gate: Arc<Notify>,
}

#[async_trait::async_trait]
impl DraftModel for GatedModel {
    async fn generate_json(&self, _prompt: &str, schema: &Value) -> Result<Value, AiError> {
        if schema["type"] == "ARRAY" {
            self.gate.notified().await;
            return Ok(json!(["late addition one", "late addition two"]));
        }
        Ok(scripted_response(schema, "gated"))
    }

    fn name(&self) -> &str {
        "gated"
    }
}

fn filled_profile() -> Profile {
    Profile {
        analyst_name: "Rina Kusuma".into(),
        analyst_title: "Quality Manager".into(),
        analysis_date: "2026-08-28".into(),
        company_name: "PT Maju   Sejahtera".into(),
        sector: Sector::Manufaktur,
        unit_name: "Produksi".into(),
    }
}

async fn settle(app: &mut WizardApp) {
    tokio::time::sleep(Duration::from_millis(20)).await;
    app.drain_events();
}

#[tokio::test]
async fn test_full_wizard_pass_to_exported_pdf() {
    let gateway = DraftingGateway::new(Arc::new(ScriptedModel { tag: "draft" }));
    let dir = tempfile::tempdir().unwrap();
    let mut app = WizardApp::new(gateway).with_output_dir(dir.path());
    app.profile = filled_profile();

    // 1 -> 2: guarded transition drafts all ten lists
    app.submit_profile();
    assert!(app.is_blocked());
    settle(&mut app).await;
    assert_eq!(app.step, WizardStep::ValidateAnalysis);
    assert_eq!(app.store.factor_count(), 10);

    // Edit pass: add one manual factor, delete one drafted threat
    app.store.add_factor(Category::Weaknesses, "manual gap");
    let threat_id = app.store.list(Category::Threats)[0].id;
    app.store.delete_factor(Category::Threats, threat_id);
    assert_eq!(app.store.factor_count(), 10);

    // 2 -> 4: derive TOWS
    app.submit_analysis();
    settle(&mut app).await;
    assert_eq!(app.step, WizardStep::ValidateTows);
    assert_eq!(app.store.tows.len(), 4);

    // 4 -> 5 and export
    app.submit_tows();
    assert_eq!(app.step, WizardStep::Report);
    app.export_report();
    assert!(app.error.is_none(), "export failed: {:?}", app.error);

    // Whitespace runs in the company name collapse to single separators
    let exported = dir.path().join("PT_Maju_Sejahtera.pdf");
    assert!(exported.exists(), "missing {}", exported.display());
    assert!(app.status_message.as_deref().unwrap().contains("PT_Maju_Sejahtera.pdf"));
}

#[tokio::test]
async fn test_regenerating_tows_replaces_the_batch() {
    let gateway = DraftingGateway::new(Arc::new(ScriptedModel { tag: "draft" }));
    let mut app = WizardApp::new(gateway);
    app.profile = filled_profile();

    app.submit_profile();
    settle(&mut app).await;
    app.submit_analysis();
    settle(&mut app).await;
    let first_batch = app.store.tows.len();

    // Go back and regenerate: the second batch fully replaces the first
    app.go_back();
    app.submit_analysis();
    settle(&mut app).await;
    assert_eq!(app.store.tows.len(), first_batch);
    assert_eq!(app.store.tows[0].id, 0, "batch-local ids restart at zero");
}

/// The documented no-cancellation race: a per-category call that resolves
/// after a full regeneration appends its results to the fresh lists.
#[tokio::test]
async fn test_late_additions_land_after_full_regeneration() {
    let gate = Arc::new(Notify::new());
    let gateway = DraftingGateway::new(Arc::new(GatedModel { gate: gate.clone() }));
    let mut app = WizardApp::new(gateway);
    app.profile = filled_profile();

    app.submit_profile();
    settle(&mut app).await;
    assert_eq!(app.step, WizardStep::ValidateAnalysis);

    // Kick off additions for strengths; the call is now parked on the gate
    app.generate_more(Category::Strengths);
    settle(&mut app).await;
    assert_eq!(app.store.list(Category::Strengths).len(), 1);

    // Navigate back and run a full regeneration while the call is in flight
    app.go_back();
    app.submit_profile();
    settle(&mut app).await;
    assert_eq!(app.step, WizardStep::ValidateAnalysis);
    assert_eq!(app.store.factor_count(), 10, "regeneration overwrote the lists");

    // Now let the old call finish: its results append to the fresh list
    gate.notify_one();
    settle(&mut app).await;
    let strengths = app.store.list(Category::Strengths);
    assert_eq!(strengths.len(), 3);
    assert_eq!(strengths[1].text, "late addition one");
    assert!(strengths[1].is_external);
    // Appended ids continue past the regenerated draft's ids
    assert!(strengths[1].id >= 10);
}

#[tokio::test]
async fn test_export_file_name_fallback_when_company_blank() {
    let store = {
        let mut store = AnalysisStore::new();
        store.add_factor(Category::Strengths, "something to report");
        store
    };
    let profile = Profile { company_name: "   ".into(), ..filled_profile() };
    let report = konteks::ReportDocument::compile(&profile, &store);
    let dir = tempfile::tempdir().unwrap();

    let path = konteks::export::export_pdf(&report, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "Analisis_Konteks.pdf");
}
