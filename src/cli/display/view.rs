//! Status notices and summary lines for followed sessions

use super::colors::table_color_to_colored_str;
use super::{ColorTheme, StatusIcon};
use crate::domain::poll::SessionView;
use crate::domain::status::{DeploymentStatus, JobStatus, Outcome, Status};
use colored::Colorize;

/// Renders session text for a terminal, labelled with the project path
pub struct TerminalView {
    label: String,
    theme: ColorTheme,
}

impl TerminalView {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            theme: ColorTheme::default(),
        }
    }

    fn paint(&self, text: String, outcome: Outcome) -> String {
        let color = table_color_to_colored_str(self.theme.get_outcome_color(outcome));
        text.color(color).to_string()
    }
}

impl SessionView for TerminalView {
    fn notice(&self, status: Status) -> Option<String> {
        let line = match status {
            Status::Deployment(DeploymentStatus::BuildInProgress) => {
                format!("{} Building {}...", StatusIcon::BUILD, self.label)
            }
            Status::Deployment(DeploymentStatus::BuildSucceeded) => {
                self.paint(format!("{} Build complete", StatusIcon::BUILD), Outcome::Success)
            }
            Status::Deployment(DeploymentStatus::DeployStopped) => {
                self.paint("Build stopped".to_string(), Outcome::Failure)
            }
            Status::Deployment(DeploymentStatus::DeployInProgress) => {
                format!("Deploying {}...", self.label)
            }
            Status::Job(JobStatus::Running) => format!("{} Job running...", StatusIcon::RUNNING),
            Status::Job(JobStatus::Starting) => {
                format!("{} Waiting for job to start...", StatusIcon::PENDING)
            }
            _ => return None,
        };
        Some(line)
    }

    fn summary(&self, status: Status, outcome: Outcome) -> String {
        let text = match status {
            Status::Deployment(DeploymentStatus::BuildFailed) => {
                format!("{} Build failed", StatusIcon::ERROR)
            }
            Status::Deployment(DeploymentStatus::BuildAborted) => {
                format!("{} Build aborted", StatusIcon::ABORTED)
            }
            Status::Deployment(DeploymentStatus::DeploySucceeded) => {
                format!("{} Deployed {}", StatusIcon::DEPLOY, self.label)
            }
            Status::Deployment(DeploymentStatus::DeployFailed) => {
                format!("{} Deploy failed", StatusIcon::ERROR)
            }
            Status::Job(JobStatus::Succeeded) => {
                format!("{} Job ran successfully", StatusIcon::SUCCESS)
            }
            Status::Job(JobStatus::Failed) => format!("{} Job failed", StatusIcon::ERROR),
            _ => format!(
                "{} {}",
                StatusIcon::get_outcome_icon(outcome),
                StatusIcon::get_outcome_text(outcome)
            ),
        };
        self.paint(text, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_for_build() {
        let view = TerminalView::new("acme/api");
        let line = view
            .notice(Status::Deployment(DeploymentStatus::BuildInProgress))
            .unwrap();
        assert!(line.contains("Building acme/api..."));
    }

    #[test]
    fn test_no_notice_for_terminal() {
        let view = TerminalView::new("acme/api");
        assert!(view
            .notice(Status::Deployment(DeploymentStatus::DeployFailed))
            .is_none());
        assert!(view.notice(Status::Job(JobStatus::Succeeded)).is_none());
        assert!(view.notice(Status::Job(JobStatus::Starting)).is_some());
    }

    #[test]
    fn test_summary_lines() {
        let view = TerminalView::new("acme/api");
        let deployed = view.summary(
            Status::Deployment(DeploymentStatus::DeploySucceeded),
            Outcome::Success,
        );
        assert!(deployed.contains("Deployed acme/api"));

        let aborted = view.summary(
            Status::Deployment(DeploymentStatus::BuildAborted),
            Outcome::Aborted,
        );
        assert!(aborted.contains("Build aborted"));

        let job = view.summary(Status::Job(JobStatus::Failed), Outcome::Failure);
        assert!(job.contains("Job failed"));
    }
}
