//! Wizard state and lifecycle management.
//!
//! `WizardApp` is the central state container: the current step, the profile
//! form, the record store and the busy/error flags all live here, and the
//! TUI reads and mutates it through the methods below.
//!
//! Drafting calls run as spawned tasks and report back over an event channel
//! drained once per UI tick, so all state mutation stays on the event-loop
//! thread. There is no cancellation: a call that outlives a navigation still
//! lands its result in the store (last write wins).

use std::collections::HashSet;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::ai::{AiError, DraftingGateway, InitialDraft, TowsDraft};
use crate::export::{self, ReportDocument};
use crate::model::{Category, Profile, Sector};
use crate::store::{AnalysisStore, FactorUpdate, TowsUpdate};

/// Wizard screens.
///
/// Step numbers are the ones users know from the paper form; 3 was folded
/// into 2 long ago and the numbering keeps the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Profile,
    ValidateAnalysis,
    ValidateTows,
    Report,
}

impl WizardStep {
    /// Displayed step number.
    pub fn number(self) -> u8 {
        match self {
            Self::Profile => 1,
            Self::ValidateAnalysis => 2,
            Self::ValidateTows => 4,
            Self::Report => 5,
        }
    }

    /// Screen heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Profile => "Organization Profile",
            Self::ValidateAnalysis => "Validate SWOT & PESTLE",
            Self::ValidateTows => "Validate TOWS Strategies",
            Self::Report => "Report",
        }
    }
}

/// Profile form rows, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    AnalystName,
    AnalystTitle,
    AnalysisDate,
    CompanyName,
    Sector,
    UnitName,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::AnalystName,
        ProfileField::AnalystTitle,
        ProfileField::AnalysisDate,
        ProfileField::CompanyName,
        ProfileField::Sector,
        ProfileField::UnitName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::AnalystName => "Analyst name",
            Self::AnalystTitle => "Analyst title",
            Self::AnalysisDate => "Analysis date",
            Self::CompanyName => "Company name",
            Self::Sector => "Sector",
            Self::UnitName => "Organizational unit",
        }
    }
}

/// What the inline text editor on the validation screen is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Adding a new factor to the focused category
    NewFactor,
    /// Rewording an existing factor
    FactorText(u32),
}

/// Inline text editor state.
#[derive(Debug, Clone)]
pub struct EditState {
    pub target: EditTarget,
    pub buffer: String,
}

/// Completion events from spawned drafting calls.
#[derive(Debug)]
pub enum AppEvent {
    InitialDraftReady(Result<InitialDraft, AiError>),
    AdditionsReady { category: Category, result: Result<Vec<String>, AiError> },
    TowsReady(Result<TowsDraft, AiError>),
}

/// Main application state.
pub struct WizardApp {
    /// Current wizard screen
    pub step: WizardStep,

    /// Organization profile being filled in on screen 1
    pub profile: Profile,

    /// Editable analysis state
    pub store: AnalysisStore,

    /// Drafting gateway (shared with spawned calls)
    pub gateway: DraftingGateway,

    /// Blocking busy message while a screen-level call is in flight
    pub busy: Option<String>,

    /// Categories with a "generate more" call in flight
    pub busy_categories: HashSet<Category>,

    /// Single shared error slot; retry clears it and returns control
    pub error: Option<String>,

    /// Transient status line (validation hints, export confirmation)
    pub status_message: Option<String>,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Focused row on the profile form
    pub profile_focus: ProfileField,

    /// Focused category tab on the validation screen (index into Category::ALL)
    pub category_index: usize,

    /// Focused item inside the current category list
    pub item_index: usize,

    /// Inline text editor, when open
    pub edit: Option<EditState>,

    /// Focused strategy on the TOWS screen (index into store.tows)
    pub tows_index: usize,

    /// Where exported reports are written; None means the working directory
    pub output_dir: Option<std::path::PathBuf>,

    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl WizardApp {
    pub fn new(gateway: DraftingGateway) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            step: WizardStep::default(),
            profile: Profile::default(),
            store: AnalysisStore::new(),
            gateway,
            busy: None,
            busy_categories: HashSet::new(),
            error: None,
            status_message: None,
            should_quit: false,
            profile_focus: ProfileField::AnalystName,
            category_index: 0,
            item_index: 0,
            edit: None,
            tows_index: 0,
            output_dir: None,
            events_tx,
            events_rx,
        }
    }

    /// Set the export directory.
    pub fn with_output_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Whether the whole screen is blocked by an in-flight call.
    pub fn is_blocked(&self) -> bool {
        self.busy.is_some()
    }

    /// The category tab currently focused on the validation screen.
    pub fn current_category(&self) -> Category {
        Category::ALL[self.category_index]
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Clear the error overlay and hand control back to the user.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // --- Step transitions -------------------------------------------------

    /// Leave the profile screen: guard on completeness, then draft.
    pub fn submit_profile(&mut self) {
        if self.is_blocked() {
            return;
        }
        if !self.profile.is_complete() {
            self.status_message =
                Some(format!("Please fill in: {}", self.profile.missing_fields().join(", ")));
            return;
        }
        self.status_message = None;
        self.error = None;
        self.busy = Some("Drafting SWOT & PESTLE analysis...".to_string());

        let gateway = self.gateway.clone();
        let profile = self.profile.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = gateway.draft_initial(&profile).await;
            let _ = tx.send(AppEvent::InitialDraftReady(result));
        });
    }

    /// Leave the validation screen: derive TOWS from the current SWOT.
    pub fn submit_analysis(&mut self) {
        if self.is_blocked() {
            return;
        }
        self.error = None;
        self.busy = Some("Deriving TOWS strategies...".to_string());

        let gateway = self.gateway.clone();
        let profile = self.profile.clone();
        let swot = self.store.swot.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = gateway.draft_tows(&profile, &swot).await;
            let _ = tx.send(AppEvent::TowsReady(result));
        });
    }

    /// Request 2-5 extra bullets for one category. Non-blocking: only that
    /// category's controls are disabled while the call runs.
    pub fn generate_more(&mut self, category: Category) {
        if self.busy_categories.contains(&category) {
            return;
        }
        self.error = None;
        self.busy_categories.insert(category);

        let existing: Vec<String> =
            self.store.list(category).iter().map(|f| f.text.clone()).collect();
        let gateway = self.gateway.clone();
        let profile = self.profile.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = gateway.draft_more(&profile, category, &existing).await;
            let _ = tx.send(AppEvent::AdditionsReady { category, result });
        });
    }

    /// TOWS validation to report. Unguarded.
    pub fn submit_tows(&mut self) {
        if self.is_blocked() {
            return;
        }
        self.step = WizardStep::Report;
        self.status_message = None;
    }

    /// One screen back. Unguarded; nothing is discarded.
    pub fn go_back(&mut self) {
        if self.is_blocked() {
            return;
        }
        self.step = match self.step {
            WizardStep::Profile => WizardStep::Profile,
            WizardStep::ValidateAnalysis => WizardStep::Profile,
            WizardStep::ValidateTows => WizardStep::ValidateAnalysis,
            WizardStep::Report => WizardStep::ValidateTows,
        };
        self.status_message = None;
    }

    /// Full restart from the report screen: everything back to defaults.
    pub fn restart(&mut self) {
        if self.step != WizardStep::Report || self.is_blocked() {
            return;
        }
        self.profile = Profile::default();
        self.store.reset();
        self.step = WizardStep::Profile;
        self.profile_focus = ProfileField::AnalystName;
        self.category_index = 0;
        self.item_index = 0;
        self.tows_index = 0;
        self.edit = None;
        self.error = None;
        self.status_message = None;
    }

    // --- Event draining ---------------------------------------------------

    /// Apply every completed drafting call. Called once per UI tick.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.on_event(event);
        }
    }

    fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::InitialDraftReady(result) => {
                self.busy = None;
                match result {
                    Ok(draft) => {
                        self.store.load_initial_draft(&draft.lists);
                        self.category_index = 0;
                        self.item_index = 0;
                        self.step = WizardStep::ValidateAnalysis;
                        tracing::info!(factors = self.store.factor_count(), "initial draft loaded");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "initial draft failed");
                        self.error = Some(format!("Could not draft the analysis. {e}"));
                    }
                }
            }
            AppEvent::AdditionsReady { category, result } => {
                self.busy_categories.remove(&category);
                match result {
                    Ok(texts) => {
                        self.store.append_generated(category, &texts);
                        tracing::info!(category = category.key(), added = texts.len(), "additions loaded");
                    }
                    Err(e) => {
                        tracing::warn!(category = category.key(), error = %e, "additions failed");
                        self.error =
                            Some(format!("Could not generate more {} points. {e}", category.key()));
                    }
                }
            }
            AppEvent::TowsReady(result) => {
                self.busy = None;
                match result {
                    Ok(draft) => {
                        self.store.replace_tows(&draft.lists);
                        self.tows_index = 0;
                        self.step = WizardStep::ValidateTows;
                        tracing::info!(strategies = self.store.tows.len(), "TOWS batch loaded");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "TOWS generation failed");
                        self.error = Some(format!("Could not derive TOWS strategies. {e}"));
                    }
                }
            }
        }
    }

    // --- Profile form editing --------------------------------------------

    pub fn profile_focus_next(&mut self) {
        let i = ProfileField::ALL.iter().position(|f| *f == self.profile_focus).unwrap_or(0);
        self.profile_focus = ProfileField::ALL[(i + 1) % ProfileField::ALL.len()];
    }

    pub fn profile_focus_prev(&mut self) {
        let i = ProfileField::ALL.iter().position(|f| *f == self.profile_focus).unwrap_or(0);
        self.profile_focus =
            ProfileField::ALL[(i + ProfileField::ALL.len() - 1) % ProfileField::ALL.len()];
    }

    /// Type into the focused field. On the sector row this only edits the
    /// free-text value of "other".
    pub fn profile_input(&mut self, c: char) {
        self.status_message = None;
        match self.profile_focus {
            ProfileField::AnalystName => self.profile.analyst_name.push(c),
            ProfileField::AnalystTitle => self.profile.analyst_title.push(c),
            ProfileField::AnalysisDate => self.profile.analysis_date.push(c),
            ProfileField::CompanyName => self.profile.company_name.push(c),
            ProfileField::UnitName => self.profile.unit_name.push(c),
            ProfileField::Sector => {
                if let Sector::Lainnya(text) = &mut self.profile.sector {
                    text.push(c);
                }
            }
        }
    }

    pub fn profile_backspace(&mut self) {
        match self.profile_focus {
            ProfileField::AnalystName => {
                self.profile.analyst_name.pop();
            }
            ProfileField::AnalystTitle => {
                self.profile.analyst_title.pop();
            }
            ProfileField::AnalysisDate => {
                self.profile.analysis_date.pop();
            }
            ProfileField::CompanyName => {
                self.profile.company_name.pop();
            }
            ProfileField::UnitName => {
                self.profile.unit_name.pop();
            }
            ProfileField::Sector => {
                if let Sector::Lainnya(text) = &mut self.profile.sector {
                    text.pop();
                }
            }
        }
    }

    /// Cycle the sector selector forward: fixed choices, then "other".
    pub fn sector_next(&mut self) {
        let choices = Sector::CHOICES;
        self.profile.sector = match &self.profile.sector {
            Sector::Lainnya(_) => choices[0].clone(),
            current => {
                let i = choices.iter().position(|s| s == current).unwrap_or(0);
                if i + 1 < choices.len() {
                    choices[i + 1].clone()
                } else {
                    Sector::Lainnya(String::new())
                }
            }
        };
    }

    pub fn sector_prev(&mut self) {
        let choices = Sector::CHOICES;
        self.profile.sector = match &self.profile.sector {
            Sector::Lainnya(_) => choices[choices.len() - 1].clone(),
            current => {
                let i = choices.iter().position(|s| s == current).unwrap_or(0);
                if i == 0 {
                    Sector::Lainnya(String::new())
                } else {
                    choices[i - 1].clone()
                }
            }
        };
    }

    // --- Validation screen editing ---------------------------------------

    pub fn category_next(&mut self) {
        self.category_index = (self.category_index + 1) % Category::ALL.len();
        self.item_index = 0;
    }

    pub fn category_prev(&mut self) {
        self.category_index =
            (self.category_index + Category::ALL.len() - 1) % Category::ALL.len();
        self.item_index = 0;
    }

    pub fn item_next(&mut self) {
        let len = self.store.list(self.current_category()).len();
        if len > 0 {
            self.item_index = (self.item_index + 1).min(len - 1);
        }
    }

    pub fn item_prev(&mut self) {
        self.item_index = self.item_index.saturating_sub(1);
    }

    fn focused_factor_id(&self) -> Option<u32> {
        self.store.list(self.current_category()).get(self.item_index).map(|f| f.id)
    }

    /// Open the inline editor to add a factor to the focused category.
    pub fn begin_add_factor(&mut self) {
        self.edit = Some(EditState { target: EditTarget::NewFactor, buffer: String::new() });
    }

    /// Open the inline editor on the focused factor's text.
    pub fn begin_edit_factor(&mut self) {
        let category = self.current_category();
        if let Some(factor) = self.store.list(category).get(self.item_index) {
            self.edit = Some(EditState {
                target: EditTarget::FactorText(factor.id),
                buffer: factor.text.clone(),
            });
        }
    }

    /// Commit the inline editor. Blank new-factor text is a store no-op.
    pub fn commit_edit(&mut self) {
        let Some(edit) = self.edit.take() else {
            return;
        };
        let category = self.current_category();
        match edit.target {
            EditTarget::NewFactor => self.store.add_factor(category, &edit.buffer),
            EditTarget::FactorText(id) => {
                self.store.update_factor(category, id, FactorUpdate::Text(edit.buffer));
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn delete_focused_factor(&mut self) {
        let category = self.current_category();
        if let Some(id) = self.focused_factor_id() {
            self.store.delete_factor(category, id);
            let len = self.store.list(category).len();
            if len == 0 {
                self.item_index = 0;
            } else {
                self.item_index = self.item_index.min(len - 1);
            }
        }
    }

    pub fn cycle_focused_impact(&mut self) {
        let category = self.current_category();
        if let Some(factor) = self.store.list(category).get(self.item_index) {
            let next = factor.impact.cycled();
            self.store.update_factor(category, factor.id, FactorUpdate::Impact(next));
        }
    }

    pub fn adjust_focused_priority(&mut self, delta: i8) {
        let category = self.current_category();
        if let Some(factor) = self.store.list(category).get(self.item_index) {
            let next = factor.priority.saturating_add_signed(delta);
            self.store.update_factor(category, factor.id, FactorUpdate::Priority(next));
        }
    }

    // --- TOWS screen editing ----------------------------------------------

    pub fn tows_next(&mut self) {
        if !self.store.tows.is_empty() {
            self.tows_index = (self.tows_index + 1).min(self.store.tows.len() - 1);
        }
    }

    pub fn tows_prev(&mut self) {
        self.tows_index = self.tows_index.saturating_sub(1);
    }

    pub fn cycle_focused_tows_impact(&mut self) {
        if let Some(strategy) = self.store.tows.get(self.tows_index) {
            let (id, next) = (strategy.id, strategy.impact.cycled());
            self.store.update_tows_strategy(id, TowsUpdate::Impact(next));
        }
    }

    pub fn adjust_focused_tows_priority(&mut self, delta: i8) {
        if let Some(strategy) = self.store.tows.get(self.tows_index) {
            let (id, next) = (strategy.id, strategy.priority.saturating_add_signed(delta));
            self.store.update_tows_strategy(id, TowsUpdate::Priority(next));
        }
    }

    // --- Export -----------------------------------------------------------

    /// Compile the report and write the PDF next to the current directory.
    pub fn export_report(&mut self) {
        if self.is_blocked() {
            return;
        }
        let report = ReportDocument::compile(&self.profile, &self.store);
        let dir = self.output_dir.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."))
        });
        match export::export_pdf(&report, &dir) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "report exported");
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.error = Some(format!("Could not export the report. {e}"));
            }
        }
    }
}
