//! The intake session: one workflow invocation owning the draft, the step
//! machine, and the collaborator handoff.
//!
//! All mutation happens synchronously on the UI event loop; the only
//! suspension points are the two mount-time fetches and the final submit,
//! each a single outstanding request.

use thiserror::Error;

use crate::api::client::{ApiError, PracticeApi};
use crate::api::payload::TreatmentPayload;
use crate::models::{Patient, Treatment, TreatmentDraft};
use crate::workflow::chart::ChartEditor;
use crate::workflow::review::IntakeSummary;
use crate::workflow::selector::PatientSelector;
use crate::workflow::wizard::{ValidationErrors, Wizard, WizardStep};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The defensive re-validation failed; nothing was sent.
    #[error("submission blocked by validation: {0}")]
    Validation(ValidationErrors),

    /// A submission is already outstanding; the triggering control should
    /// have been disabled.
    #[error("a submission is already in flight")]
    InFlight,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One workflow invocation. Dropped on operator cancellation; consumed by
/// a successful submit (the caller ends the workflow with the returned
/// treatment).
#[derive(Debug)]
pub struct IntakeSession {
    pub draft: TreatmentDraft,
    pub wizard: Wizard,
    pub chart: ChartEditor,
    pub selector: PatientSelector,
    /// Present in edit mode; selects create vs. update on submit.
    treatment_id: Option<String>,
    submitting: bool,
}

impl IntakeSession {
    /// Starts a fresh intake. The patient-list fetch failing degrades to an
    /// empty candidate list rather than failing the mount.
    pub async fn start(api: &dyn PracticeApi) -> Self {
        Self {
            draft: TreatmentDraft::new(),
            wizard: Wizard::new(),
            chart: ChartEditor::new(),
            selector: PatientSelector::new(Self::fetch_candidates(api).await),
            treatment_id: None,
            submitting: false,
        }
    }

    /// Starts an edit session over an existing treatment. Unlike the
    /// patient list, the treatment fetch failing is fatal to the mount:
    /// there is nothing to edit.
    pub async fn start_edit(
        api: &dyn PracticeApi,
        treatment_id: &str,
    ) -> Result<Self, ApiError> {
        let record = api.fetch_treatment(treatment_id).await?;
        let treatment = record
            .into_treatment()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self {
            draft: TreatmentDraft::from(treatment),
            wizard: Wizard::new(),
            chart: ChartEditor::new(),
            selector: PatientSelector::new(Self::fetch_candidates(api).await),
            treatment_id: Some(treatment_id.to_string()),
            submitting: false,
        })
    }

    async fn fetch_candidates(api: &dyn PracticeApi) -> Vec<Patient> {
        match api.fetch_patients().await {
            Ok(patients) => patients,
            Err(error) => {
                tracing::warn!(%error, "patient list fetch failed; starting with no candidates");
                Vec::new()
            }
        }
    }

    pub fn is_edit(&self) -> bool {
        self.treatment_id.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Step 1's selection: stores the denormalized ref on the draft.
    pub fn select_patient(&mut self, patient: &Patient) {
        self.draft.patient = Some(self.selector.select(patient));
    }

    pub fn summary(&self) -> IntakeSummary {
        IntakeSummary::build(&self.draft)
    }

    /// Final gate: re-validates, snapshots the payload, and hands off to
    /// the collaborator.
    ///
    /// The payload is serialized *before* the await, so edits made while
    /// the request is outstanding belong to the next attempt only. On any
    /// failure the draft is left fully intact for retry. If this future is
    /// dropped mid-flight the request completes (or fails) in the
    /// background and its result is discarded with the session.
    pub async fn submit(
        &mut self,
        api: &dyn PracticeApi,
    ) -> Result<Treatment, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }

        // Defensive re-run of the forward-navigation rules; the wizard
        // should have gated both long before this point.
        let mut errors = ValidationErrors::default();
        for step in [WizardStep::Patient, WizardStep::Plans] {
            if let Err(step_errors) = Wizard::validate(step, &self.draft) {
                for (field, message) in step_errors.iter() {
                    errors.insert(field, message);
                }
            }
        }
        if !errors.is_empty() {
            return Err(SubmitError::Validation(errors));
        }

        // Snapshot now; patient presence was just validated.
        let payload = TreatmentPayload::from_draft(&self.draft)
            .ok_or_else(|| SubmitError::Validation(errors))?;

        self.submitting = true;
        let result = match &self.treatment_id {
            Some(id) => api.update_treatment(id, &payload).await,
            None => api.create_treatment(&payload).await,
        };
        self.submitting = false;

        match result {
            Ok(record) => record.into_treatment().map_err(|e| {
                tracing::error!(error = %e, "treatment response could not be decoded");
                SubmitError::Api(ApiError::Decode(e.to_string()))
            }),
            Err(error) => {
                tracing::error!(%error, "treatment submission failed");
                Err(error.into())
            }
        }
    }
}
