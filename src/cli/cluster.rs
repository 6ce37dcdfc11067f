//! Cluster commands

use super::CommandContext;
use crate::domain::model::ResourceId;
use crate::infrastructure::api::{ZeetClient, ZeetClientImpl};
use crate::shared::error::ZeetError;
use clap::Parser;
use colored::Colorize;
use kube::config::Kubeconfig;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug, Clone)]
pub struct ClusterCommand {
    #[command(subcommand)]
    pub command: ClusterSubcommand,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum ClusterSubcommand {
    /// Upload a kubeconfig for a cluster
    #[command(name = "kubeconfig:set")]
    KubeconfigSet(KubeconfigSetCommand),
}

impl ClusterCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<ExitCode> {
        match &self.command {
            ClusterSubcommand::KubeconfigSet(cmd) => cmd.execute(ctx).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct KubeconfigSetCommand {
    /// Cluster ID
    pub cluster_id: String,

    /// Path to the kubeconfig file
    pub file: PathBuf,
}

impl KubeconfigSetCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<ExitCode> {
        let (cluster_id, kubeconfig) = self.load()?;
        let client = ZeetClientImpl::new(&ctx.config)?;
        let mut stdout = std::io::stdout();
        self.upload(&client, &cluster_id, &kubeconfig, &mut stdout)
            .await
    }

    /// Check the arguments and read the kubeconfig before anything is sent
    pub fn load(&self) -> crate::Result<(ResourceId, String)> {
        let cluster_id = ResourceId::parse_str(self.cluster_id.trim()).map_err(|e| {
            ZeetError::ValidationError(format!(
                "Invalid cluster ID '{}': {}",
                self.cluster_id, e
            ))
        })?;

        let content = std::fs::read_to_string(&self.file).map_err(|e| {
            ZeetError::config_error(format!(
                "Failed to read kubeconfig {}: {}",
                self.file.display(),
                e
            ))
        })?;

        let parsed = Kubeconfig::from_yaml(&content)?;
        if parsed.clusters.is_empty() {
            return Err(ZeetError::Kubeconfig(format!(
                "{} does not define any clusters",
                self.file.display()
            )));
        }
        tracing::debug!(
            clusters = parsed.clusters.len(),
            contexts = parsed.contexts.len(),
            "Parsed kubeconfig"
        );

        Ok((cluster_id, content))
    }

    pub async fn upload<W: Write + ?Sized>(
        &self,
        client: &dyn ZeetClient,
        cluster_id: &ResourceId,
        kubeconfig: &str,
        out: &mut W,
    ) -> anyhow::Result<ExitCode> {
        let cluster = client
            .update_cluster_kubeconfig(cluster_id, kubeconfig)
            .await?;
        tracing::info!(cluster = %cluster.id, name = ?cluster.name, "Kubeconfig uploaded");
        writeln!(out, "{}", "Cluster updated".green())?;
        Ok(ExitCode::SUCCESS)
    }
}
