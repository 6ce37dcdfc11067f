//! Table rendering for CLI output

use super::colors::table_color_to_colored_str;
use super::{ColorTheme, StatusIcon};
use crate::domain::model::Deployment;
use crate::domain::status::Outcome;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the endpoints of a finished deployment
    pub fn render_deployment_summary(&self, project: &str, deployment: &Deployment) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("ENDPOINT").set_alignment(CellAlignment::Left),
                Cell::new("VISIBILITY").set_alignment(CellAlignment::Center),
            ]);

        for endpoint in &deployment.endpoints {
            table.add_row(vec![
                Cell::new(endpoint).fg(self.theme.success),
                Cell::new("public").set_alignment(CellAlignment::Center),
            ]);
        }

        if let Some(private) = &deployment.private_endpoint {
            table.add_row(vec![
                Cell::new(private).fg(self.theme.info),
                Cell::new("private").set_alignment(CellAlignment::Center),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ {} {} ─╮\n",
            project,
            format!(
                "[{} {}]",
                StatusIcon::get_outcome_icon(Outcome::Success),
                StatusIcon::get_outcome_text(Outcome::Success)
            )
            .color(table_color_to_colored_str(self.theme.muted))
        ));

        if deployment.endpoints.is_empty() && deployment.private_endpoint.is_none() {
            output.push_str("No endpoints exposed\n");
            return output;
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::DeploymentStatus;
    use uuid::Uuid;

    fn deployment(endpoints: &[&str], private: Option<&str>) -> Deployment {
        Deployment {
            id: Uuid::new_v4(),
            status: DeploymentStatus::DeploySucceeded,
            endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
            private_endpoint: private.map(|p| p.to_string()),
        }
    }

    #[test]
    fn test_render_no_endpoints() {
        let renderer = TableRenderer::new();
        let output = renderer.render_deployment_summary("acme/api", &deployment(&[], None));
        assert!(output.contains("acme/api"));
        assert!(output.contains("No endpoints exposed"));
    }

    #[test]
    fn test_render_public_and_private() {
        let renderer = TableRenderer::new();
        let output = renderer.render_deployment_summary(
            "acme/api",
            &deployment(&["https://api.acme.dev"], Some("api.internal:8080")),
        );
        assert!(output.contains("https://api.acme.dev"));
        assert!(output.contains("api.internal:8080"));
        assert!(output.contains("public"));
        assert!(output.contains("private"));
    }
}
