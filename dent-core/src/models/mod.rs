mod catalog;
mod patient;
mod plan;
mod status;
mod tooth;
mod treatment;

pub use catalog::{CategoryCatalog, TreatmentCategory};
pub use patient::{Patient, PatientRef};
pub use plan::{CostLine, TreatmentPlan};
pub use status::TreatmentStatus;
pub use tooth::{NumberingScheme, ToothIssue, ToothNumber};
pub use treatment::{
    BasicInfo, CheckupField, DentalCheckup, Diagnosis, DiagnosisField, Treatment, TreatmentDraft,
};
