//! Status Vocabulary
//!
//! Server-defined statuses for notification schedules and the mapping
//! between them and a two-position switch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A multi-valued status that a binary switch can drive.
pub trait ToggleStatus: Copy + Eq + fmt::Debug {
    /// Whether a click on the switch is allowed at all
    fn is_toggle_eligible(&self) -> bool;

    /// Switch position for this status
    fn is_on(&self) -> bool;

    /// Concrete status the client expects after asking for `on`
    fn for_desired(on: bool) -> Self;
}

/// Badge colour family for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Warning,
    Info,
    Danger,
    Neutral,
}

impl BadgeTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeTone::Success => "badge badge-success",
            BadgeTone::Warning => "badge badge-warning",
            BadgeTone::Info => "badge badge-info",
            BadgeTone::Danger => "badge badge-danger",
            BadgeTone::Neutral => "badge badge-neutral",
        }
    }
}

/// Notification schedule status as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Active,
    Paused,
    Pending,
    Sent,
    Failed,
    Cancelled,
    PartialSuccess,
}

impl ScheduleStatus {
    pub const ALL: [ScheduleStatus; 7] = [
        ScheduleStatus::Active,
        ScheduleStatus::Paused,
        ScheduleStatus::Pending,
        ScheduleStatus::Sent,
        ScheduleStatus::Failed,
        ScheduleStatus::Cancelled,
        ScheduleStatus::PartialSuccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Active => "active",
            ScheduleStatus::Paused => "paused",
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::Sent => "sent",
            ScheduleStatus::Failed => "failed",
            ScheduleStatus::Cancelled => "cancelled",
            ScheduleStatus::PartialSuccess => "partial_success",
        }
    }

    /// Human-readable badge label
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleStatus::Active => "Active",
            ScheduleStatus::Paused => "Paused",
            ScheduleStatus::Pending => "Pending",
            ScheduleStatus::Sent => "Sent",
            ScheduleStatus::Failed => "Failed",
            ScheduleStatus::Cancelled => "Cancelled",
            ScheduleStatus::PartialSuccess => "Partially sent",
        }
    }

    pub fn tone(&self) -> BadgeTone {
        match self {
            ScheduleStatus::Active => BadgeTone::Success,
            ScheduleStatus::Paused => BadgeTone::Warning,
            ScheduleStatus::Pending => BadgeTone::Info,
            ScheduleStatus::Sent => BadgeTone::Neutral,
            ScheduleStatus::Failed => BadgeTone::Danger,
            ScheduleStatus::Cancelled => BadgeTone::Neutral,
            ScheduleStatus::PartialSuccess => BadgeTone::Warning,
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToggleStatus for ScheduleStatus {
    fn is_toggle_eligible(&self) -> bool {
        match self {
            ScheduleStatus::Active | ScheduleStatus::Pending | ScheduleStatus::Paused => true,
            ScheduleStatus::Sent
            | ScheduleStatus::Failed
            | ScheduleStatus::Cancelled
            | ScheduleStatus::PartialSuccess => false,
        }
    }

    fn is_on(&self) -> bool {
        matches!(self, ScheduleStatus::Active | ScheduleStatus::Pending)
    }

    fn for_desired(on: bool) -> Self {
        if on {
            ScheduleStatus::Active
        } else {
            ScheduleStatus::Paused
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_pending_paused_are_eligible() {
        let eligible: Vec<_> = ScheduleStatus::ALL
            .iter()
            .filter(|s| s.is_toggle_eligible())
            .copied()
            .collect();
        assert_eq!(
            eligible,
            vec![ScheduleStatus::Active, ScheduleStatus::Paused, ScheduleStatus::Pending]
        );
    }

    #[test]
    fn test_pending_counts_as_on() {
        assert!(ScheduleStatus::Active.is_on());
        assert!(ScheduleStatus::Pending.is_on());
        assert!(!ScheduleStatus::Paused.is_on());
    }

    #[test]
    fn test_desired_maps_to_active_or_paused() {
        assert_eq!(ScheduleStatus::for_desired(true), ScheduleStatus::Active);
        assert_eq!(ScheduleStatus::for_desired(false), ScheduleStatus::Paused);
    }

    #[test]
    fn test_wire_names() {
        let parsed: ScheduleStatus = serde_json::from_str("\"partial_success\"").unwrap();
        assert_eq!(parsed, ScheduleStatus::PartialSuccess);
        for status in ScheduleStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
