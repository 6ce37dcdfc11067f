// CLI command definitions

use super::cluster::ClusterCommand;
use super::project::{DeployCommand, JobRunCommand};
use super::CommandContext;
use crate::domain::config::{default_config_path, CliConfig, ConfigOverrides};
use crate::infrastructure::constants::{ENV_ACCESS_TOKEN, ENV_CONFIG, ENV_DEBUG, ENV_SERVER};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "zeet",
    version,
    about = "Deploy and run projects on Zeet",
    long_about = "Command line client for the Zeet platform: trigger deploys, run jobs and follow their logs"
)]
pub struct CliArgs {
    /// Config file (defaults to <config dir>/zeet/config.yaml)
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API server URL
    #[arg(long, global = true, hide = true, env = ENV_SERVER)]
    pub server: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// API access token
    #[arg(long, global = true, hide = true, env = ENV_ACCESS_TOKEN)]
    pub access_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    /// Resolve settings: flags and environment over the config file over defaults
    pub fn load_config(&self) -> crate::Result<CliConfig> {
        let path = self.config.clone().or_else(default_config_path);
        CliConfig::resolve(
            path.as_deref(),
            ConfigOverrides {
                server: self.server.clone(),
                access_token: self.access_token.clone(),
                debug: self.debug,
            },
        )
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build and deploy a project, or redeploy it with a new image
    Deploy(DeployCommand),

    /// Run a one-off command in a project's container
    #[command(name = "job:run")]
    JobRun(JobRunCommand),

    /// Manage clusters
    Cluster(ClusterCommand),
}

impl Commands {
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<ExitCode> {
        match self {
            Commands::Deploy(cmd) => cmd.execute(ctx).await,
            Commands::JobRun(cmd) => cmd.execute(ctx).await,
            Commands::Cluster(cmd) => cmd.execute(ctx).await,
        }
    }
}
