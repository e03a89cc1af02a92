//! The step state machine gating the intake workflow.
//!
//! Forward movement is validated; backward movement is always free. Data
//! accumulates on the draft as steps complete and never flows backward.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::TreatmentDraft;

/// The four wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Patient,
    Diagnosis,
    Plans,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [Self::Patient, Self::Diagnosis, Self::Plans, Self::Review];

    fn index(self) -> usize {
        match self {
            Self::Patient => 0,
            Self::Diagnosis => 1,
            Self::Plans => 2,
            Self::Review => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Diagnosis => "Diagnosis & Chart",
            Self::Plans => "Treatment Plans",
            Self::Review => "Review & Submit",
        }
    }
}

/// Field-level validation messages, keyed by the form field they attach to.
///
/// These surface inline next to the offending control; they are never
/// thrown and never destroy draft state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn insert(
        &mut self,
        field: &'static str,
        message: impl Into<String>,
    ) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// The workflow state machine: current step plus a completed flag per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    current: WizardStep,
    completed: [bool; 4],
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            current: WizardStep::Patient,
            completed: [false; 4],
        }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn is_completed(&self, step: WizardStep) -> bool {
        self.completed[step.index()]
    }

    /// Step-local validation rules.
    ///
    /// Patient requires a selection; Plans requires at least one plan.
    /// Diagnosis and Review have no rules of their own.
    pub fn validate(
        step: WizardStep,
        draft: &TreatmentDraft,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        match step {
            WizardStep::Patient => {
                if draft.patient.is_none() {
                    errors.insert("patientId", "Please select a patient");
                }
            }
            WizardStep::Plans => {
                if draft.treatment_plans.is_empty() {
                    errors.insert("treatmentPlans", "At least one treatment plan is required");
                }
            }
            WizardStep::Diagnosis | WizardStep::Review => {}
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validates the current step; on success marks it completed and
    /// advances (capped at the last step). On failure nothing moves and
    /// nothing is marked.
    pub fn next(
        &mut self,
        draft: &TreatmentDraft,
    ) -> Result<WizardStep, ValidationErrors> {
        Self::validate(self.current, draft)?;
        self.completed[self.current.index()] = true;
        let next_index = (self.current.index() + 1).min(WizardStep::ALL.len() - 1);
        self.current = WizardStep::ALL[next_index];
        Ok(self.current)
    }

    /// Always succeeds; decrements one step, floored at the first.
    pub fn previous(&mut self) -> WizardStep {
        let prev_index = self.current.index().saturating_sub(1);
        self.current = WizardStep::ALL[prev_index];
        self.current
    }

    /// Jumps directly to `step` if it is at or before the current step, or
    /// already completed. Otherwise a no-op; returns whether the jump
    /// happened.
    pub fn jump_to(&mut self, step: WizardStep) -> bool {
        if step <= self.current || self.is_completed(step) {
            self.current = step;
            true
        } else {
            false
        }
    }

    /// The diagnosis step's "skip this section" affordance: advance without
    /// filling anything in. Equivalent to [`Wizard::next`] there (the step
    /// has no validation rules); a no-op from any other step.
    pub fn skip(&mut self) -> WizardStep {
        if self.current == WizardStep::Diagnosis {
            self.completed[self.current.index()] = true;
            self.current = WizardStep::Plans;
        }
        self.current
    }
}
