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

use crate::domain::config::{CliConfig, ProjectPath};
use crate::domain::logs::LogEntry;
use crate::domain::model::{Cluster, Deployment, Job, Project, ResourceId, User};
use crate::infrastructure::api::graphql::GraphqlClient;
use crate::infrastructure::api::queries::{self, Operation};
use crate::shared::error::ZeetError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

#[async_trait::async_trait]
pub trait ZeetClient: Send + Sync {
    async fn current_user(&self) -> Result<User, ZeetError>;

    async fn get_project_by_path(&self, path: &ProjectPath) -> Result<Project, ZeetError>;

    async fn get_production_branch(&self, project_id: &ResourceId) -> Result<String, ZeetError>;

    async fn build_project(
        &self,
        project_id: &ResourceId,
        branch: Option<&str>,
        use_cache: bool,
    ) -> Result<Deployment, ZeetError>;

    async fn deploy_project_branch(
        &self,
        project_id: &ResourceId,
        branch: &str,
        use_cache: bool,
    ) -> Result<Deployment, ZeetError>;

    async fn update_project_image(&self, project_id: &ResourceId, image: &str)
        -> Result<(), ZeetError>;

    async fn update_branch_image(
        &self,
        project_id: &ResourceId,
        branch: &str,
        image: &str,
    ) -> Result<(), ZeetError>;

    async fn get_production_deployment(&self, path: &ProjectPath)
        -> Result<Deployment, ZeetError>;

    async fn get_latest_deployment(
        &self,
        path: &ProjectPath,
        branch: &str,
    ) -> Result<Deployment, ZeetError>;

    async fn get_deployment(&self, id: &ResourceId) -> Result<Deployment, ZeetError>;

    async fn get_build_logs(&self, id: &ResourceId) -> Result<Vec<LogEntry>, ZeetError>;

    async fn get_deployment_logs(&self, id: &ResourceId) -> Result<Vec<LogEntry>, ZeetError>;

    async fn run_job(
        &self,
        project_id: &ResourceId,
        command: &str,
        build: bool,
    ) -> Result<Job, ZeetError>;

    async fn get_job(&self, project_id: &ResourceId, job_id: &ResourceId)
        -> Result<Job, ZeetError>;

    async fn get_job_logs(
        &self,
        project_id: &ResourceId,
        job_id: &ResourceId,
    ) -> Result<Vec<LogEntry>, ZeetError>;

    async fn update_cluster_kubeconfig(
        &self,
        cluster_id: &ResourceId,
        kubeconfig: &str,
    ) -> Result<Cluster, ZeetError>;
}

// Response shapes, one level per GraphQL selection

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentUserData {
    current_user: User,
}

#[derive(Deserialize)]
struct ProjectData<T> {
    project: Option<T>,
}

#[derive(Deserialize)]
struct RepoData<T> {
    repo: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductionBranch {
    production_branch: Option<BranchName>,
}

#[derive(Deserialize)]
struct BranchName {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildRepoData {
    build_repo: Deployment,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeployRepoBranchData {
    deploy_repo_branch: Deployment,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductionDeployment {
    production_deployment: Option<Deployment>,
}

#[derive(Deserialize)]
struct BranchSelection {
    branch: Option<LatestDeployment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestDeployment {
    latest_deployment: Option<Deployment>,
}

#[derive(Deserialize)]
struct DeploymentData<T> {
    deployment: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentLogSelection {
    #[serde(default)]
    build_logs: Option<LogList>,
    #[serde(default)]
    deploy_logs: Option<LogList>,
}

#[derive(Deserialize, Default)]
struct LogList {
    #[serde(default)]
    entries: Vec<LogEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunJobData {
    run_job: Job,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobRunSelection<T> {
    job_run: Option<T>,
}

#[derive(Deserialize)]
struct JobLogSelection {
    #[serde(default)]
    logs: Option<LogList>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateClusterData {
    update_cluster: Cluster,
}

pub struct ZeetClientImpl {
    graphql: GraphqlClient,
}

impl ZeetClientImpl {
    /// Build a client from explicit settings; nothing is read from the environment here
    pub fn new(config: &CliConfig) -> Result<Self, ZeetError> {
        let graphql = GraphqlClient::new(config)?;
        tracing::debug!("Using API endpoint {}", graphql.endpoint());
        Ok(Self { graphql })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        operation: Operation,
        variables: serde_json::Value,
    ) -> Result<T, ZeetError> {
        self.graphql.execute(&operation, variables).await
    }
}

#[async_trait::async_trait]
impl ZeetClient for ZeetClientImpl {
    async fn current_user(&self) -> Result<User, ZeetError> {
        let data: CurrentUserData = self.query(queries::CURRENT_USER, json!({})).await?;
        Ok(data.current_user)
    }

    async fn get_project_by_path(&self, path: &ProjectPath) -> Result<Project, ZeetError> {
        let data: ProjectData<Project> = self
            .query(
                queries::PROJECT_BY_PATH,
                json!({ "path": path.to_string() }),
            )
            .await?;
        data.project
            .ok_or_else(|| ZeetError::not_found("Project", path.to_string()))
    }

    async fn get_production_branch(&self, project_id: &ResourceId) -> Result<String, ZeetError> {
        let data: RepoData<ProductionBranch> = self
            .query(queries::PRODUCTION_BRANCH, json!({ "id": project_id }))
            .await?;
        data.repo
            .and_then(|r| r.production_branch)
            .map(|b| b.name)
            .ok_or_else(|| ZeetError::not_found("Production branch", project_id.to_string()))
    }

    async fn build_project(
        &self,
        project_id: &ResourceId,
        branch: Option<&str>,
        use_cache: bool,
    ) -> Result<Deployment, ZeetError> {
        let data: BuildRepoData = self
            .query(
                queries::BUILD_PROJECT,
                json!({ "id": project_id, "branch": branch, "noCache": !use_cache }),
            )
            .await?;
        Ok(data.build_repo)
    }

    async fn deploy_project_branch(
        &self,
        project_id: &ResourceId,
        branch: &str,
        use_cache: bool,
    ) -> Result<Deployment, ZeetError> {
        let data: DeployRepoBranchData = self
            .query(
                queries::DEPLOY_PROJECT_BRANCH,
                json!({ "id": project_id, "branch": branch, "noCache": !use_cache }),
            )
            .await?;
        Ok(data.deploy_repo_branch)
    }

    async fn update_project_image(
        &self,
        project_id: &ResourceId,
        image: &str,
    ) -> Result<(), ZeetError> {
        let _: serde_json::Value = self
            .query(
                queries::UPDATE_PROJECT,
                json!({ "input": { "id": project_id, "dockerImage": image } }),
            )
            .await?;
        Ok(())
    }

    async fn update_branch_image(
        &self,
        project_id: &ResourceId,
        branch: &str,
        image: &str,
    ) -> Result<(), ZeetError> {
        let _: serde_json::Value = self
            .query(
                queries::UPDATE_BRANCH,
                json!({ "input": {
                    "repoID": project_id,
                    "branch": branch,
                    "image": image,
                    "deploy": true,
                } }),
            )
            .await?;
        Ok(())
    }

    async fn get_production_deployment(
        &self,
        path: &ProjectPath,
    ) -> Result<Deployment, ZeetError> {
        let data: ProjectData<ProductionDeployment> = self
            .query(
                queries::PRODUCTION_DEPLOYMENT,
                json!({ "path": path.to_string() }),
            )
            .await?;
        data.project
            .and_then(|p| p.production_deployment)
            .ok_or_else(|| ZeetError::not_found("Production deployment", path.to_string()))
    }

    async fn get_latest_deployment(
        &self,
        path: &ProjectPath,
        branch: &str,
    ) -> Result<Deployment, ZeetError> {
        let data: ProjectData<BranchSelection> = self
            .query(
                queries::LATEST_DEPLOYMENT,
                json!({ "path": path.to_string(), "branch": branch }),
            )
            .await?;
        data.project
            .and_then(|p| p.branch)
            .and_then(|b| b.latest_deployment)
            .ok_or_else(|| ZeetError::not_found("Deployment", format!("{}@{}", path, branch)))
    }

    async fn get_deployment(&self, id: &ResourceId) -> Result<Deployment, ZeetError> {
        let data: DeploymentData<Deployment> = self
            .query(queries::DEPLOYMENT, json!({ "id": id }))
            .await?;
        data.deployment
            .ok_or_else(|| ZeetError::not_found("Deployment", id.to_string()))
    }

    async fn get_build_logs(&self, id: &ResourceId) -> Result<Vec<LogEntry>, ZeetError> {
        let data: DeploymentData<DeploymentLogSelection> = self
            .query(queries::BUILD_LOGS, json!({ "id": id }))
            .await?;
        let deployment = data
            .deployment
            .ok_or_else(|| ZeetError::not_found("Deployment", id.to_string()))?;
        Ok(deployment.build_logs.unwrap_or_default().entries)
    }

    async fn get_deployment_logs(&self, id: &ResourceId) -> Result<Vec<LogEntry>, ZeetError> {
        let data: DeploymentData<DeploymentLogSelection> = self
            .query(queries::DEPLOYMENT_LOGS, json!({ "id": id }))
            .await?;
        let deployment = data
            .deployment
            .ok_or_else(|| ZeetError::not_found("Deployment", id.to_string()))?;
        Ok(deployment.deploy_logs.unwrap_or_default().entries)
    }

    async fn run_job(
        &self,
        project_id: &ResourceId,
        command: &str,
        build: bool,
    ) -> Result<Job, ZeetError> {
        let data: RunJobData = self
            .query(
                queries::RUN_JOB,
                json!({ "input": { "id": project_id, "runCommand": command, "build": build } }),
            )
            .await?;
        Ok(data.run_job)
    }

    async fn get_job(
        &self,
        project_id: &ResourceId,
        job_id: &ResourceId,
    ) -> Result<Job, ZeetError> {
        let data: RepoData<JobRunSelection<Job>> = self
            .query(
                queries::JOB,
                json!({ "projectId": project_id, "jobId": job_id }),
            )
            .await?;
        data.repo
            .and_then(|r| r.job_run)
            .ok_or_else(|| ZeetError::not_found("Job", job_id.to_string()))
    }

    async fn get_job_logs(
        &self,
        project_id: &ResourceId,
        job_id: &ResourceId,
    ) -> Result<Vec<LogEntry>, ZeetError> {
        let data: RepoData<JobRunSelection<JobLogSelection>> = self
            .query(
                queries::JOB_LOGS,
                json!({ "projectId": project_id, "jobId": job_id }),
            )
            .await?;
        let job = data
            .repo
            .and_then(|r| r.job_run)
            .ok_or_else(|| ZeetError::not_found("Job", job_id.to_string()))?;
        Ok(job.logs.unwrap_or_default().entries)
    }

    async fn update_cluster_kubeconfig(
        &self,
        cluster_id: &ResourceId,
        kubeconfig: &str,
    ) -> Result<Cluster, ZeetError> {
        let data: UpdateClusterData = self
            .query(
                queries::UPDATE_CLUSTER_KUBECONFIG,
                json!({ "input": { "id": cluster_id, "kubeconfig": kubeconfig } }),
            )
            .await?;
        Ok(data.update_cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nested_job_logs() {
        let body = r#"{"repo":{"jobRun":{"logs":{"entries":[
            {"text":"hello","timestamp":"2024-01-01T00:00:00Z"},
            {"text":"world"}
        ]}}}}"#;
        let data: RepoData<JobRunSelection<JobLogSelection>> = serde_json::from_str(body).unwrap();
        let entries = data.repo.unwrap().job_run.unwrap().logs.unwrap().entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], LogEntry::new("world"));
    }

    #[test]
    fn test_decode_deployment() {
        let body = r#"{"deployment":{
            "id":"6f1c0a52-3d61-4a8e-9f7f-0d3c1d1a2b3c",
            "status":"DEPLOY_SUCCEEDED",
            "endpoints":["https://api.example.com"],
            "privateEndpoint":"api.svc.cluster.local"
        }}"#;
        let data: DeploymentData<Deployment> = serde_json::from_str(body).unwrap();
        let deployment = data.deployment.unwrap();
        assert_eq!(deployment.endpoints, vec!["https://api.example.com"]);
        assert_eq!(
            deployment.private_endpoint.as_deref(),
            Some("api.svc.cluster.local")
        );
    }

    #[test]
    fn test_missing_log_list_is_empty() {
        let data: DeploymentData<DeploymentLogSelection> =
            serde_json::from_str(r#"{"deployment":{"buildLogs":null}}"#).unwrap();
        let logs = data.deployment.unwrap().build_logs.unwrap_or_default();
        assert!(logs.entries.is_empty());
    }
}
