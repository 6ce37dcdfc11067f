//! Project commands: deploy and job:run

use super::display::{TableRenderer, TerminalView};
use super::{outcome_exit_code, CommandContext};
use crate::domain::config::{ProjectPath, ProjectRef};
use crate::domain::model::{Deployment, Project};
use crate::domain::poll::PollDriver;
use crate::domain::session::PollSession;
use crate::domain::status::Outcome;
use crate::infrastructure::api::{
    DeploymentStatusProvider, JobStatusProvider, ZeetClient, ZeetClientImpl,
};
use crate::infrastructure::constants::DASHBOARD_URL;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

/// Qualify a project argument and look the project up
pub async fn resolve_project(
    client: &dyn ZeetClient,
    input: &str,
) -> crate::Result<(ProjectPath, Project)> {
    let path = match ProjectRef::parse(input)? {
        ProjectRef::Qualified(path) => path,
        bare => {
            let user = client.current_user().await?;
            tracing::debug!(login = %user.login, "Qualifying bare project name");
            bare.qualify(&user.login)
        }
    };
    let project = client.get_project_by_path(&path).await?;
    Ok((path, project))
}

fn connect(ctx: &CommandContext) -> anyhow::Result<Arc<dyn ZeetClient>> {
    Ok(Arc::new(ZeetClientImpl::new(&ctx.config)?))
}

#[derive(Parser, Debug, Clone)]
pub struct DeployCommand {
    /// Project as `owner/project`, or `project` for your own
    pub project: String,

    /// Branch to deploy (defaults to the production branch)
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Deploy this container image instead of building
    #[arg(long, short = 'i')]
    pub image: Option<String>,

    /// Reuse the build cache
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = clap::ArgAction::Set
    )]
    pub use_cache: bool,

    /// Redeploy without building
    #[arg(long)]
    pub restart: bool,

    /// Follow logs until the deploy finishes
    #[arg(long, short = 'f')]
    pub follow: bool,

    /// Prefix log lines with their timestamp
    #[arg(long)]
    pub timestamps: bool,
}

impl DeployCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<ExitCode> {
        let client = connect(ctx)?;
        let mut stdout = std::io::stdout();
        self.run(client, ctx, &mut stdout).await
    }

    pub async fn run<W: Write + Send + ?Sized>(
        &self,
        client: Arc<dyn ZeetClient>,
        ctx: &CommandContext,
        out: &mut W,
    ) -> anyhow::Result<ExitCode> {
        let (path, project) = resolve_project(client.as_ref(), &self.project).await?;
        let deployment = self.trigger(client.as_ref(), &path, &project).await?;
        tracing::info!(project = %path, deployment = %deployment.id, "Deploy triggered");

        if !self.follow {
            writeln!(out, "Deploy started...")?;
            return Ok(ExitCode::SUCCESS);
        }

        let driver = PollDriver::new(
            Box::new(DeploymentStatusProvider::new(client.clone())),
            Box::new(TerminalView::new(path.to_string())),
            ctx.config.poll_options(),
        )
        .with_cancellation(ctx.cancel.clone());
        let mut session = PollSession::deployment(deployment.id).with_timestamps(self.timestamps);
        let outcome = driver.run(&mut session, out).await?;

        if outcome == Outcome::Success {
            let finished = client.get_deployment(&deployment.id).await?;
            let table = TableRenderer::new().render_deployment_summary(&path.to_string(), &finished);
            write!(out, "{}", table)?;
        }
        Ok(outcome_exit_code(outcome))
    }

    async fn trigger(
        &self,
        client: &dyn ZeetClient,
        path: &ProjectPath,
        project: &Project,
    ) -> anyhow::Result<Deployment> {
        if self.restart {
            let branch = match &self.branch {
                Some(branch) => branch.clone(),
                None => client.get_production_branch(&project.id).await?,
            };
            tracing::debug!(%branch, "Redeploying without build");
            return Ok(client
                .deploy_project_branch(&project.id, &branch, self.use_cache)
                .await?);
        }

        if let Some(image) = &self.image {
            let deployment = match &self.branch {
                Some(branch) => {
                    client.update_branch_image(&project.id, branch, image).await?;
                    client.get_latest_deployment(path, branch).await?
                }
                None => {
                    client.update_project_image(&project.id, image).await?;
                    client.get_production_deployment(path).await?
                }
            };
            return Ok(deployment);
        }

        Ok(client
            .build_project(&project.id, self.branch.as_deref(), self.use_cache)
            .await?)
    }
}

#[derive(Parser, Debug, Clone)]
pub struct JobRunCommand {
    /// Project as `owner/project`, or `project` for your own
    pub project: String,

    /// Command to run
    #[arg(long, required = true)]
    pub cmd: String,

    /// Build a fresh image first instead of using the latest one
    #[arg(long, short = 'b')]
    pub build: bool,

    /// Follow logs until the job finishes
    #[arg(long, short = 'f')]
    pub follow: bool,

    /// Prefix log lines with their timestamp
    #[arg(long)]
    pub timestamps: bool,
}

impl JobRunCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<ExitCode> {
        let client = connect(ctx)?;
        let mut stdout = std::io::stdout();
        self.run(client, ctx, &mut stdout).await
    }

    pub async fn run<W: Write + Send + ?Sized>(
        &self,
        client: Arc<dyn ZeetClient>,
        ctx: &CommandContext,
        out: &mut W,
    ) -> anyhow::Result<ExitCode> {
        let (path, project) = resolve_project(client.as_ref(), &self.project).await?;

        let job = client.run_job(&project.id, &self.cmd, self.build).await?;
        writeln!(out, "Starting job...")?;
        writeln!(
            out,
            "Dashboard: {}/repo/{}/jobs/{}",
            DASHBOARD_URL, project.id, job.id
        )?;
        out.flush()?;

        if !self.follow {
            return Ok(ExitCode::SUCCESS);
        }

        let driver = PollDriver::new(
            Box::new(JobStatusProvider::new(client.clone(), project.id)),
            Box::new(TerminalView::new(path.to_string())),
            ctx.config.poll_options(),
        )
        .with_cancellation(ctx.cancel.clone());
        let mut session = PollSession::job(job.id).with_timestamps(self.timestamps);
        let outcome = driver.run(&mut session, out).await?;
        Ok(outcome_exit_code(outcome))
    }
}
