//! In-memory record store for the analysis session.
//!
//! Owns the SWOT/PESTLE factor lists and the TOWS strategy list, plus the
//! shared id counter. All mutation goes through the methods here so the
//! wizard screens always see a consistent view.

use crate::model::{
    AnalysisFactor, Category, ImpactLevel, PestleData, SwotData, TowsCategory, TowsStrategy,
    PRIORITY_DEFAULT, PRIORITY_MAX, PRIORITY_MIN,
};

/// An edit to one factor field.
#[derive(Debug, Clone)]
pub enum FactorUpdate {
    Text(String),
    Impact(ImpactLevel),
    Priority(u8),
}

/// An edit to one TOWS strategy field. Strategy text is not editable.
#[derive(Debug, Clone, Copy)]
pub enum TowsUpdate {
    Impact(ImpactLevel),
    Priority(u8),
}

/// The session's editable analysis state.
#[derive(Debug, Default)]
pub struct AnalysisStore {
    pub swot: SwotData,
    pub pestle: PestleData,
    pub tows: Vec<TowsStrategy>,

    /// Monotonically increasing id source shared by all SWOT/PESTLE lists.
    next_id: u32,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list owning a category. Total over all ten categories.
    pub fn list(&self, category: Category) -> &[AnalysisFactor] {
        match category {
            Category::Strengths => &self.swot.strengths,
            Category::Weaknesses => &self.swot.weaknesses,
            Category::Opportunities => &self.swot.opportunities,
            Category::Threats => &self.swot.threats,
            Category::Political => &self.pestle.political,
            Category::Economic => &self.pestle.economic,
            Category::Social => &self.pestle.social,
            Category::Technological => &self.pestle.technological,
            Category::Legal => &self.pestle.legal,
            Category::Environmental => &self.pestle.environmental,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<AnalysisFactor> {
        match category {
            Category::Strengths => &mut self.swot.strengths,
            Category::Weaknesses => &mut self.swot.weaknesses,
            Category::Opportunities => &mut self.swot.opportunities,
            Category::Threats => &mut self.swot.threats,
            Category::Political => &mut self.pestle.political,
            Category::Economic => &mut self.pestle.economic,
            Category::Social => &mut self.pestle.social,
            Category::Technological => &mut self.pestle.technological,
            Category::Legal => &mut self.pestle.legal,
            Category::Environmental => &mut self.pestle.environmental,
        }
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Manually add a factor. Blank or whitespace-only text is a no-op.
    ///
    /// New entries get impact Medium, priority 3, and the external flag
    /// derived from the category.
    pub fn add_factor(&mut self, category: Category, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let factor = AnalysisFactor {
            id: self.take_id(),
            text: text.to_string(),
            impact: ImpactLevel::Medium,
            priority: PRIORITY_DEFAULT,
            is_external: category.is_external(),
        };
        self.list_mut(category).push(factor);
    }

    /// Apply one field edit to a factor. No-op when the id is not in the list.
    pub fn update_factor(&mut self, category: Category, id: u32, update: FactorUpdate) {
        let Some(factor) = self.list_mut(category).iter_mut().find(|f| f.id == id) else {
            return;
        };
        match update {
            FactorUpdate::Text(text) => factor.text = text,
            FactorUpdate::Impact(impact) => factor.impact = impact,
            FactorUpdate::Priority(priority) => {
                factor.priority = priority.clamp(PRIORITY_MIN, PRIORITY_MAX);
            }
        }
    }

    /// Remove a factor. No-op when the id is not in the list.
    pub fn delete_factor(&mut self, category: Category, id: u32) {
        self.list_mut(category).retain(|f| f.id != id);
    }

    /// Apply one field edit to a TOWS strategy. No-op when the id is unknown.
    pub fn update_tows_strategy(&mut self, id: u32, update: TowsUpdate) {
        let Some(strategy) = self.tows.iter_mut().find(|s| s.id == id) else {
            return;
        };
        match update {
            TowsUpdate::Impact(impact) => strategy.impact = impact,
            TowsUpdate::Priority(priority) => {
                strategy.priority = priority.clamp(PRIORITY_MIN, PRIORITY_MAX);
            }
        }
    }

    /// Replace all SWOT and PESTLE lists with a fresh draft.
    ///
    /// Resets the shared counter to 0 and assigns ids in the order the lists
    /// are given (the gateway supplies them in `Category::ALL` order), so ids
    /// from one draft are strictly increasing across all ten categories.
    pub fn load_initial_draft(&mut self, lists: &[(Category, Vec<String>)]) {
        self.next_id = 0;
        self.swot = SwotData::default();
        self.pestle = PestleData::default();
        for (category, texts) in lists {
            for text in texts {
                let factor = AnalysisFactor {
                    id: self.take_id(),
                    text: text.clone(),
                    impact: ImpactLevel::Medium,
                    priority: PRIORITY_DEFAULT,
                    is_external: category.is_external(),
                };
                self.list_mut(*category).push(factor);
            }
        }
    }

    /// Append AI-generated additions to one category.
    ///
    /// Generated additions are always flagged external, even for strengths
    /// and weaknesses. That matches the behavior of previously produced
    /// reports; manual `add_factor` derives the flag from the category.
    pub fn append_generated(&mut self, category: Category, texts: &[String]) {
        for text in texts {
            let factor = AnalysisFactor {
                id: self.take_id(),
                text: text.clone(),
                impact: ImpactLevel::Medium,
                priority: PRIORITY_DEFAULT,
                is_external: true,
            };
            self.list_mut(category).push(factor);
        }
    }

    /// Replace the TOWS list with a fresh generation batch.
    ///
    /// Ids restart at 0 each batch; they are only unique within the batch.
    pub fn replace_tows(&mut self, lists: &[(TowsCategory, Vec<String>)]) {
        self.tows.clear();
        let mut batch_id = 0;
        for (category, texts) in lists {
            for text in texts {
                self.tows.push(TowsStrategy {
                    id: batch_id,
                    category: *category,
                    text: text.clone(),
                    impact: ImpactLevel::Medium,
                    priority: PRIORITY_DEFAULT,
                });
                batch_id += 1;
            }
        }
    }

    /// TOWS strategies ordered for the report: descending priority, ties kept
    /// in generation order (stable sort).
    pub fn tows_by_priority(&self) -> Vec<&TowsStrategy> {
        let mut sorted: Vec<&TowsStrategy> = self.tows.iter().collect();
        sorted.sort_by(|a, b| b.priority.cmp(&a.priority));
        sorted
    }

    /// Total number of SWOT + PESTLE factors.
    pub fn factor_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.list(*c).len()).sum()
    }

    /// Discard everything, including the id counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
