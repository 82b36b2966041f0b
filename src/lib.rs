//! # Konteks
//!
//! AI-assisted organizational context analysis (SWOT / PESTLE / TOWS) for
//! ISO 9001:2015 clause 4.1, in your terminal.
//!
//! Konteks walks you through a short wizard: describe the organization, let
//! the drafting service propose SWOT and PESTLE factors, validate and edit
//! them, derive TOWS strategies, and export the compiled report as a PDF.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install
//! cargo install konteks
//!
//! # Set the drafting service key and run the wizard
//! export GEMINI_API_KEY=...
//! konteks
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]

pub mod ai;
pub mod config;
pub mod export;
pub mod model;
pub mod store;
pub mod tui;
pub mod wizard;

pub use ai::{AiError, DraftModel, DraftingGateway, GeminiProvider, InitialDraft, TowsDraft};
pub use config::Config;
pub use export::{ExportError, ReportDocument};
pub use model::{
    AnalysisFactor, Category, ImpactLevel, PestleData, Profile, Sector, SwotData, TowsCategory,
    TowsStrategy,
};
pub use store::{AnalysisStore, FactorUpdate, TowsUpdate};
pub use wizard::{AppEvent, WizardApp, WizardStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "konteks";
