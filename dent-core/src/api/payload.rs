//! Wire shapes for the practice API.
//!
//! The payload layer is deliberately separate from the domain models: it
//! owns the camelCase field names, the string-keyed tooth ledger, and the
//! legacy tolerance for money fields arriving as either JSON numbers or
//! strings. Converting wire data back into domain types re-derives every
//! cost-line total, so a stale stored total never survives the trip in.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    BasicInfo, CostLine, DentalCheckup, Diagnosis, PatientRef, ToothIssue, ToothNumber, Treatment,
    TreatmentDraft, TreatmentPlan, TreatmentStatus,
};

/// Serde adapter for money fields: emitted as JSON numbers, accepted as
/// numbers or legacy string representations.
mod money {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        value: &Decimal,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.to_f64().unwrap_or(0.0))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Decimal::try_from(n)
                .map_err(|e| D::Error::custom(format!("invalid money value {n}: {e}"))),
            NumberOrString::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(Decimal::ZERO);
                }
                trimmed
                    .parse()
                    .map_err(|e| D::Error::custom(format!("invalid money value '{s}': {e}")))
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("invalid tooth-issue key '{0}'")]
    InvalidToothKey(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckupPayload {
    pub oral_hygiene: Option<String>,
    pub gingival_status: Option<String>,
    pub plaque_index: Option<String>,
    pub bleeding_index: Option<String>,
    pub mobility: Option<String>,
    pub pocket_depth: Option<String>,
    pub notes: Option<String>,
}

impl From<&DentalCheckup> for CheckupPayload {
    fn from(checkup: &DentalCheckup) -> Self {
        Self {
            oral_hygiene: checkup.oral_hygiene.clone(),
            gingival_status: checkup.gingival_status.clone(),
            plaque_index: checkup.plaque_index.clone(),
            bleeding_index: checkup.bleeding_index.clone(),
            mobility: checkup.mobility.clone(),
            pocket_depth: checkup.pocket_depth.clone(),
            notes: checkup.notes.clone(),
        }
    }
}

impl From<CheckupPayload> for DentalCheckup {
    fn from(payload: CheckupPayload) -> Self {
        Self {
            oral_hygiene: payload.oral_hygiene,
            gingival_status: payload.gingival_status,
            plaque_index: payload.plaque_index,
            bleeding_index: payload.bleeding_index,
            mobility: payload.mobility,
            pocket_depth: payload.pocket_depth,
            notes: payload.notes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisPayload {
    pub chief_complaint: Option<String>,
    pub clinical_findings: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
}

impl From<&Diagnosis> for DiagnosisPayload {
    fn from(diagnosis: &Diagnosis) -> Self {
        Self {
            chief_complaint: diagnosis.chief_complaint.clone(),
            clinical_findings: diagnosis.clinical_findings.clone(),
            diagnosis: diagnosis.diagnosis.clone(),
            treatment_plan: diagnosis.treatment_plan.clone(),
        }
    }
}

impl From<DiagnosisPayload> for Diagnosis {
    fn from(payload: DiagnosisPayload) -> Self {
        Self {
            chief_complaint: payload.chief_complaint,
            clinical_findings: payload.clinical_findings,
            diagnosis: payload.diagnosis,
            treatment_plan: payload.treatment_plan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLinePayload {
    pub category_id: String,
    pub category_name: String,
    #[serde(with = "money")]
    pub base_cost: Decimal,
    pub quantity: u32,
    #[serde(with = "money")]
    pub material_cost: Decimal,
    #[serde(with = "money")]
    pub total_cost: Decimal,
}

impl From<&CostLine> for CostLinePayload {
    fn from(line: &CostLine) -> Self {
        Self {
            category_id: line.category_id.clone(),
            category_name: line.category_name.clone(),
            base_cost: line.base_cost(),
            quantity: line.quantity(),
            material_cost: line.material_cost(),
            total_cost: line.total_cost(),
        }
    }
}

impl From<CostLinePayload> for CostLine {
    /// Rebuilds the line from its parts; the wire `totalCost` is dropped
    /// and re-derived.
    fn from(payload: CostLinePayload) -> Self {
        CostLine::with_values(
            payload.category_id,
            payload.category_name,
            payload.base_cost,
            payload.quantity,
            payload.material_cost,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: TreatmentStatus,
    pub costs: Vec<CostLinePayload>,
    #[serde(with = "money")]
    pub total_cost: Decimal,
    #[serde(with = "money")]
    pub total_material_cost: Decimal,
}

impl From<&TreatmentPlan> for PlanPayload {
    fn from(plan: &TreatmentPlan) -> Self {
        Self {
            name: plan.name.clone(),
            start_date: plan.start_date.clone(),
            end_date: plan.end_date.clone(),
            status: plan.status,
            costs: plan.costs.iter().map(CostLinePayload::from).collect(),
            total_cost: plan.total_cost(),
            total_material_cost: plan.total_material_cost(),
        }
    }
}

impl From<PlanPayload> for TreatmentPlan {
    fn from(payload: PlanPayload) -> Self {
        Self {
            name: payload.name,
            start_date: payload.start_date,
            end_date: payload.end_date,
            status: payload.status,
            costs: payload.costs.into_iter().map(CostLine::from).collect(),
        }
    }
}

/// The create/update submission body: the full wire shape of a treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPayload {
    pub patient_id: String,
    pub patient_name: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TreatmentStatus,
    pub dental_checkup: CheckupPayload,
    pub diagnosis: DiagnosisPayload,
    pub treatment_plans: Vec<PlanPayload>,
    /// Keyed by the tooth number's two-digit string form.
    #[serde(default)]
    pub tooth_issues: BTreeMap<String, ToothIssue>,
    /// Legacy top-level aggregate, numeric-coerced.
    #[serde(with = "money")]
    pub cost: Decimal,
    /// Legacy top-level aggregate, numeric-coerced.
    #[serde(with = "money")]
    pub material_cost: Decimal,
}

impl TreatmentPayload {
    /// Snapshots a draft into its submission body.
    ///
    /// Returns `None` when no patient has been selected; the wizard gates
    /// that long before submission, and `submit` re-checks.
    pub fn from_draft(draft: &TreatmentDraft) -> Option<Self> {
        let patient = draft.patient.as_ref()?;
        Some(Self {
            patient_id: patient.id.clone(),
            patient_name: patient.display_name.clone(),
            name: draft.basic_info.name.clone(),
            description: draft.basic_info.description.clone(),
            status: draft.basic_info.status,
            dental_checkup: CheckupPayload::from(&draft.dental_checkup),
            diagnosis: DiagnosisPayload::from(&draft.diagnosis),
            treatment_plans: draft.treatment_plans.iter().map(PlanPayload::from).collect(),
            tooth_issues: draft
                .tooth_issues
                .iter()
                .map(|(tooth, issue)| (tooth.to_string(), issue.clone()))
                .collect(),
            cost: draft.cost(),
            material_cost: draft.material_cost(),
        })
    }
}

/// A persisted treatment as the API returns it: the payload shape plus the
/// server-assigned id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecord {
    pub id: String,
    #[serde(flatten)]
    pub body: TreatmentPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TreatmentRecord {
    /// Converts the wire record into the domain model, validating tooth
    /// keys and re-deriving cost-line totals.
    pub fn into_treatment(self) -> Result<Treatment, PayloadError> {
        let mut tooth_issues = BTreeMap::new();
        for (key, issue) in self.body.tooth_issues {
            let tooth: ToothNumber = key
                .parse()
                .map_err(|_| PayloadError::InvalidToothKey(key.clone()))?;
            tooth_issues.insert(tooth, issue);
        }
        Ok(Treatment {
            id: self.id,
            patient: PatientRef {
                id: self.body.patient_id,
                display_name: self.body.patient_name,
            },
            basic_info: BasicInfo {
                name: self.body.name,
                description: self.body.description,
                status: self.body.status,
            },
            dental_checkup: self.body.dental_checkup.into(),
            diagnosis: self.body.diagnosis.into(),
            tooth_issues,
            treatment_plans: self
                .body
                .treatment_plans
                .into_iter()
                .map(TreatmentPlan::from)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
