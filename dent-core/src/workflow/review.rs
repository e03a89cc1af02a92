//! The read-only projection shown on the review step.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::{TreatmentDraft, TreatmentStatus};

/// Everything the review screen shows, derived from the draft at render
/// time. Purely a projection: building it never mutates the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSummary {
    pub patient_name: Option<String>,
    pub treatment_name: Option<String>,
    pub status: TreatmentStatus,
    pub chief_complaint: Option<String>,
    pub diagnosis: Option<String>,
    pub plan_count: usize,
    pub total_cost: Decimal,
    pub total_material_cost: Decimal,
    /// Recorded teeth as a joined list, e.g. `"18, 55"`. Empty when the
    /// ledger is empty.
    pub teeth_with_issues: String,
}

impl IntakeSummary {
    pub fn build(draft: &TreatmentDraft) -> Self {
        Self {
            patient_name: draft.patient.as_ref().map(|p| p.display_name.clone()),
            treatment_name: draft.basic_info.name.clone(),
            status: draft.basic_info.status,
            chief_complaint: draft.diagnosis.chief_complaint.clone(),
            diagnosis: draft.diagnosis.diagnosis.clone(),
            plan_count: draft.treatment_plans.len(),
            total_cost: draft.cost(),
            total_material_cost: draft.material_cost(),
            teeth_with_issues: draft
                .tooth_issues
                .keys()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn opt_display(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("—")
}

impl fmt::Display for IntakeSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Patient:         {}", opt_display(&self.patient_name))?;
        writeln!(f, "Treatment:       {}", opt_display(&self.treatment_name))?;
        writeln!(f, "Status:          {}", self.status)?;
        writeln!(f, "Chief complaint: {}", opt_display(&self.chief_complaint))?;
        writeln!(f, "Diagnosis:       {}", opt_display(&self.diagnosis))?;
        writeln!(f, "Plans:           {}", self.plan_count)?;
        writeln!(f, "Total cost:      {}", self.total_cost)?;
        writeln!(f, "Material cost:   {}", self.total_material_cost)?;
        if self.teeth_with_issues.is_empty() {
            write!(f, "Teeth:           —")
        } else {
            write!(f, "Teeth:           {}", self.teeth_with_issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{
        CostLine, PatientRef, ToothIssue, ToothNumber, TreatmentCategory, TreatmentPlan,
    };

    use super::*;

    #[test]
    fn summary_of_empty_draft_is_all_blanks() {
        let summary = IntakeSummary::build(&TreatmentDraft::new());

        assert_eq!(summary.patient_name, None);
        assert_eq!(summary.plan_count, 0);
        assert_eq!(summary.total_cost, Decimal::ZERO);
        assert_eq!(summary.teeth_with_issues, "");
    }

    #[test]
    fn summary_projects_patient_plans_and_teeth() {
        let mut draft = TreatmentDraft::new();
        draft.patient = Some(PatientRef {
            id: "p1".to_string(),
            display_name: "Jane Doe".to_string(),
        });
        draft.diagnosis.chief_complaint = Some("toothache".to_string());
        let category = TreatmentCategory {
            id: "c1".to_string(),
            name: "Filling".to_string(),
            description: None,
            base_cost: dec!(1500),
        };
        let mut plan = TreatmentPlan::default();
        let mut line = CostLine::from_category(&category);
        line.set_quantity(2);
        line.set_material_cost(dec!(200));
        plan.costs.push(line);
        draft.treatment_plans.push(plan);
        for n in [55u8, 18] {
            draft.tooth_issues.insert(
                ToothNumber::new(n).unwrap(),
                ToothIssue {
                    issue: "Cavity".to_string(),
                    comment: None,
                },
            );
        }

        let summary = IntakeSummary::build(&draft);

        assert_eq!(summary.patient_name.as_deref(), Some("Jane Doe"));
        assert_eq!(summary.chief_complaint.as_deref(), Some("toothache"));
        assert_eq!(summary.plan_count, 1);
        assert_eq!(summary.total_cost, dec!(3200));
        assert_eq!(summary.total_material_cost, dec!(200));
        // Ledger keys come out in ascending tooth order.
        assert_eq!(summary.teeth_with_issues, "18, 55");
    }

    #[test]
    fn building_a_summary_does_not_mutate_the_draft() {
        let mut draft = TreatmentDraft::new();
        draft.basic_info.name = Some("Checkup".to_string());
        let before = draft.clone();

        let _ = IntakeSummary::build(&draft);

        assert_eq!(draft, before);
    }
}
