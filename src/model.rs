//! Data model for the context analysis.
//!
//! Everything here is plain session state: the organization profile, the
//! SWOT/PESTLE factor lists and the TOWS strategy list. Nothing is persisted
//! between runs.

use serde::{Deserialize, Serialize};

/// Organization profile filled in on the first wizard screen.
///
/// All six fields (with the sector resolved to non-empty text) must be
/// non-empty before the wizard may leave the profile screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Name of the analyst filling in the form
    pub analyst_name: String,

    /// Analyst's job title
    pub analyst_title: String,

    /// Date of the analysis (free text, defaults to today)
    pub analysis_date: String,

    /// Company name; also drives the export file name
    pub company_name: String,

    /// Business sector
    pub sector: Sector,

    /// Organizational unit being analyzed
    pub unit_name: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            analyst_name: String::new(),
            analyst_title: String::new(),
            analysis_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            company_name: String::new(),
            sector: Sector::default(),
            unit_name: String::new(),
        }
    }
}

impl Profile {
    /// Whether every field holds non-blank text.
    pub fn is_complete(&self) -> bool {
        !self.analyst_name.trim().is_empty()
            && !self.analyst_title.trim().is_empty()
            && !self.analysis_date.trim().is_empty()
            && !self.company_name.trim().is_empty()
            && !self.sector.resolved_text().trim().is_empty()
            && !self.unit_name.trim().is_empty()
    }

    /// Names of the fields still missing, for the validation hint.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.analyst_name.trim().is_empty() {
            missing.push("analyst name");
        }
        if self.analyst_title.trim().is_empty() {
            missing.push("analyst title");
        }
        if self.analysis_date.trim().is_empty() {
            missing.push("analysis date");
        }
        if self.company_name.trim().is_empty() {
            missing.push("company name");
        }
        if self.sector.resolved_text().trim().is_empty() {
            missing.push("sector");
        }
        if self.unit_name.trim().is_empty() {
            missing.push("organizational unit");
        }
        missing
    }
}

/// Business sector: a fixed set plus a free-text escape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Manufaktur,
    Jasa,
    Perdagangan,
    Konstruksi,
    Pendidikan,
    Kesehatan,
    TeknologiInformasi,
    /// Free-text "other" sector
    Lainnya(String),
}

impl Default for Sector {
    fn default() -> Self {
        Self::Manufaktur
    }
}

impl Sector {
    /// The fixed choices shown in the selector, in display order.
    pub const CHOICES: [Sector; 7] = [
        Sector::Manufaktur,
        Sector::Jasa,
        Sector::Perdagangan,
        Sector::Konstruksi,
        Sector::Pendidikan,
        Sector::Kesehatan,
        Sector::TeknologiInformasi,
    ];

    /// Label shown in the selector.
    pub fn label(&self) -> &str {
        match self {
            Self::Manufaktur => "manufaktur",
            Self::Jasa => "jasa",
            Self::Perdagangan => "perdagangan",
            Self::Konstruksi => "konstruksi",
            Self::Pendidikan => "pendidikan",
            Self::Kesehatan => "kesehatan",
            Self::TeknologiInformasi => "teknologi informasi",
            Self::Lainnya(_) => "lainnya",
        }
    }

    /// The sector as text, with `Lainnya` resolved to the typed value.
    ///
    /// Empty exactly when the user picked "other" and typed nothing.
    pub fn resolved_text(&self) -> &str {
        match self {
            Self::Lainnya(text) => text,
            other => other.label(),
        }
    }
}

/// Ordinal impact level of a factor or strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ImpactLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ImpactLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Next level, wrapping, for the 3-way selector.
    pub fn cycled(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Priority scale used by factors and strategies.
pub const PRIORITY_MIN: u8 = 1;
pub const PRIORITY_MAX: u8 = 5;
pub const PRIORITY_DEFAULT: u8 = 3;

/// One of the ten SWOT/PESTLE lists.
///
/// A closed enum instead of a category string, so the mapping from category
/// to owning container is total and checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
    Political,
    Economic,
    Social,
    Technological,
    Legal,
    Environmental,
}

impl Category {
    /// All categories, in the id-assignment order used by the initial draft.
    pub const ALL: [Category; 10] = [
        Category::Strengths,
        Category::Weaknesses,
        Category::Opportunities,
        Category::Threats,
        Category::Political,
        Category::Economic,
        Category::Social,
        Category::Technological,
        Category::Legal,
        Category::Environmental,
    ];

    /// The four SWOT categories, in display order.
    pub const SWOT: [Category; 4] = [
        Category::Strengths,
        Category::Weaknesses,
        Category::Opportunities,
        Category::Threats,
    ];

    /// The six PESTLE categories, in display order.
    pub const PESTLE: [Category; 6] = [
        Category::Political,
        Category::Economic,
        Category::Social,
        Category::Technological,
        Category::Legal,
        Category::Environmental,
    ];

    /// Category name as used in prompts and response schemas.
    pub fn key(self) -> &'static str {
        match self {
            Self::Strengths => "strengths",
            Self::Weaknesses => "weaknesses",
            Self::Opportunities => "opportunities",
            Self::Threats => "threats",
            Self::Political => "political",
            Self::Economic => "economic",
            Self::Social => "social",
            Self::Technological => "technological",
            Self::Legal => "legal",
            Self::Environmental => "environmental",
        }
    }

    /// Human heading for screens and the report.
    pub fn title(self) -> &'static str {
        match self {
            Self::Strengths => "Strengths",
            Self::Weaknesses => "Weaknesses",
            Self::Opportunities => "Opportunities",
            Self::Threats => "Threats",
            Self::Political => "Political",
            Self::Economic => "Economic",
            Self::Social => "Social",
            Self::Technological => "Technological",
            Self::Legal => "Legal",
            Self::Environmental => "Environmental",
        }
    }

    /// Whether factors in this category are sourced from outside the
    /// organization's direct control.
    pub fn is_external(self) -> bool {
        !matches!(self, Self::Strengths | Self::Weaknesses)
    }
}

/// One SWOT or PESTLE bullet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFactor {
    /// Unique within its owning list; assigned from the store's shared counter
    pub id: u32,

    /// Factor text
    pub text: String,

    /// Impact level
    pub impact: ImpactLevel,

    /// Priority, 1-5
    pub priority: u8,

    /// Whether the factor is externally sourced
    pub is_external: bool,
}

/// The four SWOT lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwotData {
    pub strengths: Vec<AnalysisFactor>,
    pub weaknesses: Vec<AnalysisFactor>,
    pub opportunities: Vec<AnalysisFactor>,
    pub threats: Vec<AnalysisFactor>,
}

/// The six PESTLE lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PestleData {
    pub political: Vec<AnalysisFactor>,
    pub economic: Vec<AnalysisFactor>,
    pub social: Vec<AnalysisFactor>,
    pub technological: Vec<AnalysisFactor>,
    pub legal: Vec<AnalysisFactor>,
    pub environmental: Vec<AnalysisFactor>,
}

/// TOWS strategy quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowsCategory {
    /// Strengths-Opportunities
    So,
    /// Strengths-Threats
    St,
    /// Weaknesses-Opportunities
    Wo,
    /// Weaknesses-Threats
    Wt,
}

impl TowsCategory {
    /// All quadrants, in the id-assignment order used by generation.
    pub const ALL: [TowsCategory; 4] =
        [TowsCategory::So, TowsCategory::St, TowsCategory::Wo, TowsCategory::Wt];

    /// Short code as used in prompts and response schemas.
    pub fn key(self) -> &'static str {
        match self {
            Self::So => "so",
            Self::St => "st",
            Self::Wo => "wo",
            Self::Wt => "wt",
        }
    }

    /// Heading for screens and the report.
    pub fn title(self) -> &'static str {
        match self {
            Self::So => "SO (Strengths-Opportunities)",
            Self::St => "ST (Strengths-Threats)",
            Self::Wo => "WO (Weaknesses-Opportunities)",
            Self::Wt => "WT (Weaknesses-Threats)",
        }
    }
}

/// One recommended strategy produced by TOWS generation.
///
/// Ids are only unique within one generation batch; regenerating discards
/// and fully replaces the list, so nothing references them across batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowsStrategy {
    pub id: u32,
    pub category: TowsCategory,
    pub text: String,
    pub impact: ImpactLevel,
    pub priority: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_profile() -> Profile {
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
    fn test_complete_profile_passes_guard() {
        assert!(complete_profile().is_complete());
    }

    #[test]
    fn test_blank_unit_name_blocks_guard() {
        let mut profile = complete_profile();
        profile.unit_name = "   ".into();
        assert!(!profile.is_complete());
        assert_eq!(profile.missing_fields(), vec!["organizational unit"]);
    }

    #[test]
    fn test_other_sector_requires_text() {
        let mut profile = complete_profile();
        profile.sector = Sector::Lainnya(String::new());
        assert!(!profile.is_complete());

        profile.sector = Sector::Lainnya("agribisnis".into());
        assert!(profile.is_complete());
        assert_eq!(profile.sector.resolved_text(), "agribisnis");
    }

    #[test]
    fn test_external_categories() {
        let external: Vec<Category> =
            Category::ALL.into_iter().filter(|c| c.is_external()).collect();
        assert_eq!(external.len(), 8);
        assert!(!Category::Strengths.is_external());
        assert!(!Category::Weaknesses.is_external());
        assert!(Category::Opportunities.is_external());
        assert!(Category::Environmental.is_external());
    }

    #[test]
    fn test_impact_cycle_wraps() {
        assert_eq!(ImpactLevel::High.cycled(), ImpactLevel::Low);
        assert_eq!(ImpactLevel::default(), ImpactLevel::Medium);
    }
}
