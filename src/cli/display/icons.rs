//! Status icons for CLI output

use crate::domain::status::Outcome;

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Remote operation finished successfully
    pub const SUCCESS: &'static str = "✓";

    /// Remote operation failed
    pub const ERROR: &'static str = "✗";

    /// Remote operation was aborted
    pub const ABORTED: &'static str = "⊘";

    /// Waiting for the remote side
    pub const PENDING: &'static str = "⏳";

    pub const BUILD: &'static str = "⛏";
    pub const DEPLOY: &'static str = "🚀";
    pub const RUNNING: &'static str = "▶";

    /// Get icon for the end of a followed session
    pub fn get_outcome_icon(outcome: Outcome) -> &'static str {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Failure => Self::ERROR,
            Outcome::Aborted => Self::ABORTED,
        }
    }

    pub fn get_outcome_text(outcome: Outcome) -> &'static str {
        match outcome {
            Outcome::Success => "Succeeded",
            Outcome::Failure => "Failed",
            Outcome::Aborted => "Aborted",
        }
    }
}
