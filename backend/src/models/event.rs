//! Settlement history for auditing and replay.
//!
//! This module defines the Event enum which captures every state change a
//! ledger goes through. Events enable:
//! - Auditing (which tranche was released, for how much, in what order)
//! - Testing (assert on the history instead of poking at internal state)
//! - Checkpoint round trips (the history travels with the snapshot)
//!
//! # Sequence numbers
//!
//! Every event carries a `sequence`: the 1-based count of release actions
//! applied to the ledger so far. Scheduling happens before any release and
//! is logged at sequence 0. A rejected release still consumes a sequence
//! number so that the log reflects every action the user took.
//!
//! # Example
//!
//! ```rust
//! use milestone_treasury_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::TrancheReleased {
//!     sequence: 1,
//!     milestone_id: 1,
//!     amount: 300_000,
//!     promoted: Some(2),
//! });
//!
//! assert_eq!(log.events_for_milestone(1).len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Ledger event capturing a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Initial schedule produced for a project
    ProjectScheduled {
        sequence: u64,
        project_id: String,
        milestone_count: usize,
        budget: i64,
    },

    /// A milestone moved to completed and its tranche was released
    TrancheReleased {
        sequence: u64,
        milestone_id: u32,
        amount: i64,
        /// Milestone promoted to current, `None` when this was the last one
        promoted: Option<u32>,
    },

    /// Every milestone is completed
    ProjectCompleted { sequence: u64, total_paid: i64 },

    /// Release requested with no current milestone
    ReleaseRejected { sequence: u64, reason: String },
}

impl Event {
    /// Get the sequence number for this event
    pub fn sequence(&self) -> u64 {
        match self {
            Event::ProjectScheduled { sequence, .. } => *sequence,
            Event::TrancheReleased { sequence, .. } => *sequence,
            Event::ProjectCompleted { sequence, .. } => *sequence,
            Event::ReleaseRejected { sequence, .. } => *sequence,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ProjectScheduled { .. } => "ProjectScheduled",
            Event::TrancheReleased { .. } => "TrancheReleased",
            Event::ProjectCompleted { .. } => "ProjectCompleted",
            Event::ReleaseRejected { .. } => "ReleaseRejected",
        }
    }

    /// Get milestone id if event relates to a specific milestone
    pub fn milestone_id(&self) -> Option<u32> {
        match self {
            Event::TrancheReleased { milestone_id, .. } => Some(*milestone_id),
            _ => None,
        }
    }
}

/// Append-only event log.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Rebuild a log from previously recorded events
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific sequence number
    pub fn events_at_sequence(&self, sequence: u64) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.sequence() == sequence)
            .collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific milestone
    pub fn events_for_milestone(&self, milestone_id: u32) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.milestone_id() == Some(milestone_id))
            .collect()
    }

    /// Sum of all released tranche amounts
    ///
    /// Returns `None` if the sum overflows i64 (only possible for a log
    /// restored from a forged checkpoint).
    pub fn total_released(&self) -> Option<i64> {
        self.events.iter().try_fold(0i64, |total, e| match e {
            Event::TrancheReleased { amount, .. } => total.checked_add(*amount),
            _ => Some(total),
        })
    }
}
