//! Calendar and money primitives shared by the scheduler and the ledger

pub mod calendar;
pub mod money;

pub use calendar::{due_date, phase_count, ScheduleCalendar, PHASE_LENGTH_DAYS};
pub use money::format_dollars;
