//! The treatment-plan composer for step 3: a plan editor working over the
//! immutable category catalog, plus the filtered category picker.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    CategoryCatalog, CostLine, TreatmentCategory, TreatmentDraft, TreatmentPlan, TreatmentStatus,
};

/// How many category matches the picker shows before "show all".
pub const CATEGORY_DISPLAY_LIMIT: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposerError {
    #[error("unknown treatment category '{0}'")]
    UnknownCategory(String),

    #[error("no open plan editor")]
    EditorClosed,

    #[error("no cost line at index {0}")]
    LineOutOfRange(usize),

    #[error("no treatment plan at index {0}")]
    PlanOutOfRange(usize),

    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// A single field update on a cost line. The line's total is recomputed
/// from the new value and the line's other current values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostUpdate {
    BaseCost(Decimal),
    Quantity(u32),
    MaterialCost(Decimal),
}

/// The plan being edited, distinct from anything saved on the draft until
/// `save_plan` copies it over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanEditor {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: TreatmentStatus,
    pub costs: Vec<CostLine>,
}

impl From<&TreatmentPlan> for PlanEditor {
    fn from(plan: &TreatmentPlan) -> Self {
        Self {
            name: plan.name.clone(),
            start_date: plan.start_date.clone(),
            end_date: plan.end_date.clone(),
            status: plan.status,
            costs: plan.costs.clone(),
        }
    }
}

impl From<PlanEditor> for TreatmentPlan {
    fn from(editor: PlanEditor) -> Self {
        Self {
            name: editor.name,
            start_date: editor.start_date,
            end_date: editor.end_date,
            status: editor.status,
            costs: editor.costs,
        }
    }
}

/// The visible slice of the category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedCategories<'a> {
    pub visible: Vec<&'a TreatmentCategory>,
    /// Total matches for the current filter, before truncation.
    pub total_matches: usize,
    /// Whether matches beyond the display limit were cut off.
    pub truncated: bool,
}

#[derive(Debug)]
pub struct PlanComposer<'a> {
    catalog: &'a CategoryCatalog,
    editor: Option<PlanEditor>,
    /// Draft index being edited, `None` when composing a new plan.
    editing_index: Option<usize>,
    filter: String,
    show_all: bool,
}

impl<'a> PlanComposer<'a> {
    pub fn new(catalog: &'a CategoryCatalog) -> Self {
        Self {
            catalog,
            editor: None,
            editing_index: None,
            filter: String::new(),
            show_all: false,
        }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        self.catalog
    }

    pub fn editor(&self) -> Option<&PlanEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut PlanEditor> {
        self.editor.as_mut()
    }

    /// Opens the editor with a blank plan (append on save).
    pub fn open_blank(&mut self) {
        self.editor = Some(PlanEditor::default());
        self.editing_index = None;
    }

    /// Opens the editor over the draft's plan at `index` (replace on save).
    pub fn open_existing(
        &mut self,
        draft: &TreatmentDraft,
        index: usize,
    ) -> Result<(), ComposerError> {
        let plan = draft
            .treatment_plans
            .get(index)
            .ok_or(ComposerError::PlanOutOfRange(index))?;
        self.editor = Some(PlanEditor::from(plan));
        self.editing_index = Some(index);
        Ok(())
    }

    /// Abandons the open editor without touching the draft.
    pub fn cancel(&mut self) {
        self.editor = None;
        self.editing_index = None;
    }

    /// Appends a new line for the catalog entry: quantity 1, no material
    /// cost, total equal to the base cost. The same category may be added
    /// any number of times; each line is independent.
    pub fn add_cost_line(&mut self, category_id: &str) -> Result<(), ComposerError> {
        let category = self
            .catalog
            .get(category_id)
            .ok_or_else(|| ComposerError::UnknownCategory(category_id.to_string()))?;
        let line = CostLine::from_category(category);
        let editor = self.editor.as_mut().ok_or(ComposerError::EditorClosed)?;
        editor.costs.push(line);
        Ok(())
    }

    pub fn remove_cost_line(&mut self, index: usize) -> Result<(), ComposerError> {
        let editor = self.editor.as_mut().ok_or(ComposerError::EditorClosed)?;
        if index >= editor.costs.len() {
            return Err(ComposerError::LineOutOfRange(index));
        }
        editor.costs.remove(index);
        Ok(())
    }

    /// Applies one field update to the line at `index`, recomputing its
    /// total immediately from the new value plus the line's other current
    /// values (not from catalog defaults).
    pub fn update_cost_line(
        &mut self,
        index: usize,
        update: CostUpdate,
    ) -> Result<(), ComposerError> {
        if matches!(update, CostUpdate::Quantity(0)) {
            return Err(ComposerError::InvalidQuantity);
        }
        let editor = self.editor.as_mut().ok_or(ComposerError::EditorClosed)?;
        let line = editor
            .costs
            .get_mut(index)
            .ok_or(ComposerError::LineOutOfRange(index))?;
        match update {
            CostUpdate::BaseCost(value) => line.set_base_cost(value),
            CostUpdate::Quantity(value) => line.set_quantity(value),
            CostUpdate::MaterialCost(value) => line.set_material_cost(value),
        }
        Ok(())
    }

    /// Saves the open editor back to the draft: replaces the plan it was
    /// opened from, or appends when composing fresh. Empty plans save fine;
    /// the workflow-level "at least one plan" rule lives in the wizard.
    /// Returns the saved plan's position.
    pub fn save_plan(
        &mut self,
        draft: &mut TreatmentDraft,
    ) -> Result<usize, ComposerError> {
        let editor = self.editor.take().ok_or(ComposerError::EditorClosed)?;
        let plan = TreatmentPlan::from(editor);
        let position = match self.editing_index.take() {
            Some(index) => {
                let slot = draft
                    .treatment_plans
                    .get_mut(index)
                    .ok_or(ComposerError::PlanOutOfRange(index))?;
                *slot = plan;
                index
            }
            None => {
                draft.treatment_plans.push(plan);
                draft.treatment_plans.len() - 1
            }
        };
        Ok(position)
    }

    pub fn delete_plan(
        &self,
        draft: &mut TreatmentDraft,
        index: usize,
    ) -> Result<(), ComposerError> {
        if index >= draft.treatment_plans.len() {
            return Err(ComposerError::PlanOutOfRange(index));
        }
        draft.treatment_plans.remove(index);
        Ok(())
    }

    // ── category picker ──────────────────────────────────────────────────

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Updates the picker filter. A new filter collapses a previous
    /// "show all" expansion.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.show_all = false;
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    /// The picker's visible slice: all matches when "show all" is on,
    /// otherwise the first [`CATEGORY_DISPLAY_LIMIT`] of them.
    pub fn displayed_categories(&self) -> DisplayedCategories<'a> {
        let matches = self.catalog.search(&self.filter);
        let total_matches = matches.len();
        let truncated = !self.show_all && total_matches > CATEGORY_DISPLAY_LIMIT;
        let visible = if truncated {
            matches.into_iter().take(CATEGORY_DISPLAY_LIMIT).collect()
        } else {
            matches
        };
        DisplayedCategories {
            visible,
            total_matches,
            truncated,
        }
    }
}
