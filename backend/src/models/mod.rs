//! Domain models for the treasury engine

pub mod event;
pub mod milestone;
pub mod project;
pub mod setup;

// Re-exports
pub use event::{Event, EventLog};
pub use milestone::{Milestone, MilestoneError, MilestoneStatus};
pub use project::{Project, ProjectPolicy, LARGE_PROJECT_THRESHOLD_DAYS};
pub use setup::{ProjectSetup, SetupError};
