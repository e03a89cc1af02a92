use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{PatientRef, ToothIssue, ToothNumber, TreatmentPlan, TreatmentStatus};

/// Top-level naming for a treatment record. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: TreatmentStatus,
}

/// Clinical observation fields captured during the checkup. All optional
/// and independently editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DentalCheckup {
    pub oral_hygiene: Option<String>,
    pub gingival_status: Option<String>,
    pub plaque_index: Option<String>,
    pub bleeding_index: Option<String>,
    pub mobility: Option<String>,
    pub pocket_depth: Option<String>,
    pub notes: Option<String>,
}

/// Addressable checkup field, the closed-record form of a dotted path like
/// `dentalCheckup.oralHygiene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckupField {
    OralHygiene,
    GingivalStatus,
    PlaqueIndex,
    BleedingIndex,
    Mobility,
    PocketDepth,
    Notes,
}

impl DentalCheckup {
    pub fn set(
        &mut self,
        field: CheckupField,
        value: Option<String>,
    ) {
        match field {
            CheckupField::OralHygiene => self.oral_hygiene = value,
            CheckupField::GingivalStatus => self.gingival_status = value,
            CheckupField::PlaqueIndex => self.plaque_index = value,
            CheckupField::BleedingIndex => self.bleeding_index = value,
            CheckupField::Mobility => self.mobility = value,
            CheckupField::PocketDepth => self.pocket_depth = value,
            CheckupField::Notes => self.notes = value,
        }
    }

    pub fn get(&self, field: CheckupField) -> Option<&str> {
        match field {
            CheckupField::OralHygiene => self.oral_hygiene.as_deref(),
            CheckupField::GingivalStatus => self.gingival_status.as_deref(),
            CheckupField::PlaqueIndex => self.plaque_index.as_deref(),
            CheckupField::BleedingIndex => self.bleeding_index.as_deref(),
            CheckupField::Mobility => self.mobility.as_deref(),
            CheckupField::PocketDepth => self.pocket_depth.as_deref(),
            CheckupField::Notes => self.notes.as_deref(),
        }
    }
}

/// Free-text diagnosis narrative. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnosis {
    pub chief_complaint: Option<String>,
    pub clinical_findings: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
}

/// Addressable diagnosis field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisField {
    ChiefComplaint,
    ClinicalFindings,
    Diagnosis,
    TreatmentPlan,
}

impl Diagnosis {
    pub fn set(
        &mut self,
        field: DiagnosisField,
        value: Option<String>,
    ) {
        match field {
            DiagnosisField::ChiefComplaint => self.chief_complaint = value,
            DiagnosisField::ClinicalFindings => self.clinical_findings = value,
            DiagnosisField::Diagnosis => self.diagnosis = value,
            DiagnosisField::TreatmentPlan => self.treatment_plan = value,
        }
    }

    pub fn get(&self, field: DiagnosisField) -> Option<&str> {
        match field {
            DiagnosisField::ChiefComplaint => self.chief_complaint.as_deref(),
            DiagnosisField::ClinicalFindings => self.clinical_findings.as_deref(),
            DiagnosisField::Diagnosis => self.diagnosis.as_deref(),
            DiagnosisField::TreatmentPlan => self.treatment_plan.as_deref(),
        }
    }
}

/// The in-memory form state for one intake session.
///
/// Created fresh when the workflow starts (empty, or converted from a
/// fetched [`Treatment`] in edit mode), mutated only through the workflow
/// components, and discarded after a successful submission or an operator
/// cancellation. Nothing outside the session mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatmentDraft {
    pub patient: Option<PatientRef>,
    pub basic_info: BasicInfo,
    pub dental_checkup: DentalCheckup,
    pub diagnosis: Diagnosis,
    /// Per-tooth issue ledger. Absence of a key means "no recorded issue".
    pub tooth_issues: BTreeMap<ToothNumber, ToothIssue>,
    /// Insertion order is display order; plans carry no precedence.
    pub treatment_plans: Vec<TreatmentPlan>,
}

impl TreatmentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operator cancellation: discard everything, no partial save.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Legacy top-level cost aggregate: the sum over every plan's total.
    pub fn cost(&self) -> Decimal {
        self.treatment_plans.iter().map(TreatmentPlan::total_cost).sum()
    }

    /// Legacy top-level material-cost aggregate.
    pub fn material_cost(&self) -> Decimal {
        self.treatment_plans
            .iter()
            .map(TreatmentPlan::total_material_cost)
            .sum()
    }
}

/// A persisted treatment resource as returned by the practice API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Treatment {
    pub id: String,
    pub patient: PatientRef,
    pub basic_info: BasicInfo,
    pub dental_checkup: DentalCheckup,
    pub diagnosis: Diagnosis,
    pub tooth_issues: BTreeMap<ToothNumber, ToothIssue>,
    pub treatment_plans: Vec<TreatmentPlan>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Treatment> for TreatmentDraft {
    /// Edit mode: reopen a persisted treatment as a mutable draft.
    fn from(treatment: Treatment) -> Self {
        Self {
            patient: Some(treatment.patient),
            basic_info: treatment.basic_info,
            dental_checkup: treatment.dental_checkup,
            diagnosis: treatment.diagnosis,
            tooth_issues: treatment.tooth_issues,
            treatment_plans: treatment.treatment_plans,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{CostLine, TreatmentCategory};

    use super::*;

    #[test]
    fn checkup_fields_set_and_get_by_enum() {
        let mut checkup = DentalCheckup::default();

        checkup.set(CheckupField::OralHygiene, Some("good".to_string()));
        checkup.set(CheckupField::Notes, Some("recall in 6 months".to_string()));

        assert_eq!(checkup.get(CheckupField::OralHygiene), Some("good"));
        assert_eq!(checkup.get(CheckupField::Notes), Some("recall in 6 months"));
        assert_eq!(checkup.get(CheckupField::Mobility), None);
    }

    #[test]
    fn checkup_field_can_be_cleared() {
        let mut checkup = DentalCheckup::default();
        checkup.set(CheckupField::PlaqueIndex, Some("2".to_string()));

        checkup.set(CheckupField::PlaqueIndex, None);

        assert_eq!(checkup.get(CheckupField::PlaqueIndex), None);
    }

    #[test]
    fn diagnosis_fields_set_and_get_by_enum() {
        let mut diagnosis = Diagnosis::default();

        diagnosis.set(
            DiagnosisField::ChiefComplaint,
            Some("toothache upper left".to_string()),
        );

        assert_eq!(
            diagnosis.get(DiagnosisField::ChiefComplaint),
            Some("toothache upper left")
        );
        assert_eq!(diagnosis.get(DiagnosisField::TreatmentPlan), None);
    }

    #[test]
    fn draft_cost_aggregates_sum_over_plans() {
        let category = TreatmentCategory {
            id: "c1".to_string(),
            name: "Filling".to_string(),
            description: None,
            base_cost: dec!(1500),
        };
        let mut draft = TreatmentDraft::new();
        let mut first = TreatmentPlan::default();
        let mut line = CostLine::from_category(&category);
        line.set_quantity(2);
        line.set_material_cost(dec!(200));
        first.costs.push(line);
        let mut second = TreatmentPlan::default();
        second.costs.push(CostLine::from_category(&category));
        draft.treatment_plans.push(first);
        draft.treatment_plans.push(second);

        assert_eq!(draft.cost(), dec!(4700));
        assert_eq!(draft.material_cost(), dec!(200));
    }

    #[test]
    fn clear_discards_all_state() {
        let mut draft = TreatmentDraft::new();
        draft.patient = Some(PatientRef {
            id: "p1".to_string(),
            display_name: "Jane Doe".to_string(),
        });
        draft.basic_info.name = Some("Checkup".to_string());
        draft.treatment_plans.push(TreatmentPlan::default());

        draft.clear();

        assert_eq!(draft, TreatmentDraft::default());
    }
}
