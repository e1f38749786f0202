// Application layer - Use case interactors

pub mod container;
pub mod naming_interactor;
pub mod plan_interactor;
pub mod settings_interactor;

// Re-export interactors
pub use naming_interactor::BatchNamer;
pub use plan_interactor::{PlanInteractor, PlanRequest, PlannedSegment, SplitPlan};
pub use settings_interactor::SettingsInteractor;
