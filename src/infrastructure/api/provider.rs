// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Status and log providers backed by the platform API

use crate::domain::logs::LogEntry;
use crate::domain::model::ResourceId;
use crate::domain::provider::StatusProvider;
use crate::domain::status::{LogSource, Status};
use crate::infrastructure::api::client::ZeetClient;
use crate::shared::error::ZeetError;
use std::sync::Arc;

fn unsupported(kind: &str, source: LogSource) -> ZeetError {
    ZeetError::ValidationError(format!("{} has no {} log stream", kind, source))
}

pub struct DeploymentStatusProvider {
    client: Arc<dyn ZeetClient>,
}

impl DeploymentStatusProvider {
    pub fn new(client: Arc<dyn ZeetClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl StatusProvider for DeploymentStatusProvider {
    async fn fetch_status(&self, resource: &ResourceId) -> Result<Status, ZeetError> {
        let deployment = self.client.get_deployment(resource).await?;
        Ok(Status::Deployment(deployment.status))
    }

    async fn fetch_logs(
        &self,
        resource: &ResourceId,
        source: LogSource,
    ) -> Result<Vec<LogEntry>, ZeetError> {
        match source {
            LogSource::Build => self.client.get_build_logs(resource).await,
            LogSource::Deploy => self.client.get_deployment_logs(resource).await,
            LogSource::Job => Err(unsupported("Deployment", source)),
        }
    }
}

/// Job queries are scoped by project
pub struct JobStatusProvider {
    client: Arc<dyn ZeetClient>,
    project_id: ResourceId,
}

impl JobStatusProvider {
    pub fn new(client: Arc<dyn ZeetClient>, project_id: ResourceId) -> Self {
        Self { client, project_id }
    }
}

#[async_trait::async_trait]
impl StatusProvider for JobStatusProvider {
    async fn fetch_status(&self, resource: &ResourceId) -> Result<Status, ZeetError> {
        let job = self.client.get_job(&self.project_id, resource).await?;
        Ok(Status::Job(job.state))
    }

    async fn fetch_logs(
        &self,
        resource: &ResourceId,
        source: LogSource,
    ) -> Result<Vec<LogEntry>, ZeetError> {
        match source {
            LogSource::Job => self.client.get_job_logs(&self.project_id, resource).await,
            other => Err(unsupported("Job", other)),
        }
    }
}
