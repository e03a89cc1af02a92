pub mod chart;
pub mod composer;
pub mod review;
pub mod selector;
pub mod session;
pub mod wizard;

pub use chart::{ChartEditor, ChartError, IssueEditor};
pub use composer::{
    CATEGORY_DISPLAY_LIMIT, ComposerError, CostUpdate, DisplayedCategories, PlanComposer,
    PlanEditor,
};
pub use review::IntakeSummary;
pub use selector::PatientSelector;
pub use session::{IntakeSession, SubmitError};
pub use wizard::{ValidationErrors, Wizard, WizardStep};
