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

//! In-memory fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use zeet_cli::domain::model::{Cluster, Deployment, Job, Project, ResourceId, User};
use zeet_cli::{
    DeploymentStatus, JobStatus, LogEntry, LogSource, Outcome, ProjectPath, SessionView,
    Status, StatusProvider, ZeetClient, ZeetError,
};

/// One scripted answer to a status fetch
#[derive(Debug, Clone)]
pub enum Step {
    Status(Status),
    Fail(String),
}

impl From<DeploymentStatus> for Step {
    fn from(status: DeploymentStatus) -> Self {
        Step::Status(Status::Deployment(status))
    }
}

impl From<JobStatus> for Step {
    fn from(status: JobStatus) -> Self {
        Step::Status(Status::Job(status))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Status,
    Logs(LogSource),
}

pub fn entries(lines: &[&str]) -> Vec<LogEntry> {
    lines.iter().map(|l| LogEntry::new(*l)).collect()
}

/// Pops answers in order; the last one repeats once the script runs out
fn next<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

/// Provider that replays a fixed script and records every fetch
pub struct ScriptedProvider {
    statuses: Mutex<VecDeque<Step>>,
    logs: Mutex<HashMap<LogSource, VecDeque<Vec<LogEntry>>>>,
    /// 1-based log fetch, per stream, that fails with a transport error
    log_failures: Mutex<HashMap<LogSource, usize>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedProvider {
    pub fn new<S: Into<Step>>(steps: impl IntoIterator<Item = S>) -> Self {
        Self {
            statuses: Mutex::new(steps.into_iter().map(Into::into).collect()),
            logs: Mutex::new(HashMap::new()),
            log_failures: Mutex::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_logs(self, source: LogSource, snapshots: &[&[&str]]) -> Self {
        self.logs
            .lock()
            .unwrap()
            .insert(source, snapshots.iter().map(|s| entries(s)).collect());
        self
    }

    pub fn with_entries(self, source: LogSource, snapshots: Vec<Vec<LogEntry>>) -> Self {
        self.logs
            .lock()
            .unwrap()
            .insert(source, snapshots.into_iter().collect());
        self
    }

    pub fn fail_logs_on(self, source: LogSource, nth_fetch: usize) -> Self {
        self.log_failures.lock().unwrap().insert(source, nth_fetch);
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        self.calls.clone()
    }
}

#[async_trait::async_trait]
impl StatusProvider for ScriptedProvider {
    async fn fetch_status(&self, _resource: &ResourceId) -> Result<Status, ZeetError> {
        self.calls.lock().unwrap().push(Call::Status);
        let step = next(&mut *self.statuses.lock().unwrap());
        match step {
            Some(Step::Status(status)) => Ok(status),
            Some(Step::Fail(message)) => Err(ZeetError::transport(message)),
            None => Err(ZeetError::transport("script is empty")),
        }
    }

    async fn fetch_logs(
        &self,
        _resource: &ResourceId,
        source: LogSource,
    ) -> Result<Vec<LogEntry>, ZeetError> {
        let fetches = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call::Logs(source));
            calls.iter().filter(|c| **c == Call::Logs(source)).count()
        };
        if self.log_failures.lock().unwrap().get(&source) == Some(&fetches) {
            return Err(ZeetError::transport(format!("{} logs unavailable", source)));
        }
        let mut logs = self.logs.lock().unwrap();
        Ok(logs.get_mut(&source).and_then(next).unwrap_or_default())
    }
}

/// Plain-text view so tests can match output exactly
pub struct PlainView;

impl SessionView for PlainView {
    fn notice(&self, status: Status) -> Option<String> {
        Some(format!("notice:{}", status))
    }

    fn summary(&self, status: Status, outcome: Outcome) -> String {
        format!("summary:{}:{:?}", status, outcome)
    }
}

pub fn deployment(id: ResourceId, status: DeploymentStatus) -> Deployment {
    Deployment {
        id,
        status,
        endpoints: vec!["https://api.acme.dev".to_string()],
        private_endpoint: None,
    }
}

/// Platform API fake with a scripted deployment or job lifecycle
pub struct FakeClient {
    pub user: User,
    pub project: Project,
    pub deployment_id: ResourceId,
    pub job_id: ResourceId,
    deployment_statuses: Mutex<VecDeque<DeploymentStatus>>,
    job_statuses: Mutex<VecDeque<JobStatus>>,
    build_logs: Mutex<VecDeque<Vec<LogEntry>>>,
    deploy_logs: Mutex<VecDeque<Vec<LogEntry>>>,
    job_logs: Mutex<VecDeque<Vec<LogEntry>>>,
    reject_jobs: bool,
    pub requests: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self {
            user: User {
                id: Uuid::new_v4(),
                login: "jane".to_string(),
            },
            project: Project {
                id: Uuid::new_v4(),
                name: "api".to_string(),
            },
            deployment_id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            deployment_statuses: Mutex::new(VecDeque::from([DeploymentStatus::BuildInProgress])),
            job_statuses: Mutex::new(VecDeque::from([JobStatus::Starting])),
            build_logs: Mutex::new(VecDeque::new()),
            deploy_logs: Mutex::new(VecDeque::new()),
            job_logs: Mutex::new(VecDeque::new()),
            reject_jobs: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_deployment_statuses(self, statuses: &[DeploymentStatus]) -> Self {
        *self.deployment_statuses.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    pub fn with_job_statuses(self, statuses: &[JobStatus]) -> Self {
        *self.job_statuses.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    pub fn with_build_logs(self, snapshots: &[&[&str]]) -> Self {
        *self.build_logs.lock().unwrap() = snapshots.iter().map(|s| entries(s)).collect();
        self
    }

    pub fn with_deploy_logs(self, snapshots: &[&[&str]]) -> Self {
        *self.deploy_logs.lock().unwrap() = snapshots.iter().map(|s| entries(s)).collect();
        self
    }

    pub fn with_job_logs(self, snapshots: &[&[&str]]) -> Self {
        *self.job_logs.lock().unwrap() = snapshots.iter().map(|s| entries(s)).collect();
        self
    }

    pub fn rejecting_jobs(mut self) -> Self {
        self.reject_jobs = true;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: impl Into<String>) {
        self.requests.lock().unwrap().push(request.into());
    }

    fn current_deployment(&self) -> Deployment {
        let status = next(&mut *self.deployment_statuses.lock().unwrap())
            .unwrap_or(DeploymentStatus::BuildInProgress);
        deployment(self.deployment_id, status)
    }
}

#[async_trait::async_trait]
impl ZeetClient for FakeClient {
    async fn current_user(&self) -> Result<User, ZeetError> {
        self.record("current_user");
        Ok(self.user.clone())
    }

    async fn get_project_by_path(&self, path: &ProjectPath) -> Result<Project, ZeetError> {
        self.record(format!("project:{}", path));
        if path.project == self.project.name {
            Ok(self.project.clone())
        } else {
            Err(ZeetError::not_found("Project", path.to_string()))
        }
    }

    async fn get_production_branch(&self, _project_id: &ResourceId) -> Result<String, ZeetError> {
        self.record("production_branch");
        Ok("main".to_string())
    }

    async fn build_project(
        &self,
        _project_id: &ResourceId,
        branch: Option<&str>,
        use_cache: bool,
    ) -> Result<Deployment, ZeetError> {
        self.record(format!("build:{}:{}", branch.unwrap_or("-"), use_cache));
        Ok(deployment(self.deployment_id, DeploymentStatus::BuildInProgress))
    }

    async fn deploy_project_branch(
        &self,
        _project_id: &ResourceId,
        branch: &str,
        use_cache: bool,
    ) -> Result<Deployment, ZeetError> {
        self.record(format!("deploy_branch:{}:{}", branch, use_cache));
        Ok(deployment(self.deployment_id, DeploymentStatus::DeployInProgress))
    }

    async fn update_project_image(
        &self,
        _project_id: &ResourceId,
        image: &str,
    ) -> Result<(), ZeetError> {
        self.record(format!("update_project_image:{}", image));
        Ok(())
    }

    async fn update_branch_image(
        &self,
        _project_id: &ResourceId,
        branch: &str,
        image: &str,
    ) -> Result<(), ZeetError> {
        self.record(format!("update_branch_image:{}:{}", branch, image));
        Ok(())
    }

    async fn get_production_deployment(
        &self,
        _path: &ProjectPath,
    ) -> Result<Deployment, ZeetError> {
        self.record("production_deployment");
        Ok(deployment(self.deployment_id, DeploymentStatus::DeployInProgress))
    }

    async fn get_latest_deployment(
        &self,
        _path: &ProjectPath,
        branch: &str,
    ) -> Result<Deployment, ZeetError> {
        self.record(format!("latest_deployment:{}", branch));
        Ok(deployment(self.deployment_id, DeploymentStatus::DeployInProgress))
    }

    async fn get_deployment(&self, _id: &ResourceId) -> Result<Deployment, ZeetError> {
        Ok(self.current_deployment())
    }

    async fn get_build_logs(&self, _id: &ResourceId) -> Result<Vec<LogEntry>, ZeetError> {
        Ok(next(&mut *self.build_logs.lock().unwrap()).unwrap_or_default())
    }

    async fn get_deployment_logs(&self, _id: &ResourceId) -> Result<Vec<LogEntry>, ZeetError> {
        Ok(next(&mut *self.deploy_logs.lock().unwrap()).unwrap_or_default())
    }

    async fn run_job(
        &self,
        _project_id: &ResourceId,
        command: &str,
        build: bool,
    ) -> Result<Job, ZeetError> {
        self.record(format!("run_job:{}:{}", command, build));
        if self.reject_jobs {
            return Err(ZeetError::GraphQl("project has no image to run".to_string()));
        }
        Ok(Job {
            id: self.job_id,
            state: JobStatus::Starting,
        })
    }

    async fn get_job(
        &self,
        _project_id: &ResourceId,
        job_id: &ResourceId,
    ) -> Result<Job, ZeetError> {
        let state = next(&mut *self.job_statuses.lock().unwrap()).unwrap_or(JobStatus::Starting);
        Ok(Job { id: *job_id, state })
    }

    async fn get_job_logs(
        &self,
        _project_id: &ResourceId,
        _job_id: &ResourceId,
    ) -> Result<Vec<LogEntry>, ZeetError> {
        Ok(next(&mut *self.job_logs.lock().unwrap()).unwrap_or_default())
    }

    async fn update_cluster_kubeconfig(
        &self,
        cluster_id: &ResourceId,
        _kubeconfig: &str,
    ) -> Result<Cluster, ZeetError> {
        self.record(format!("update_cluster:{}", cluster_id));
        Ok(Cluster {
            id: *cluster_id,
            name: Some("prod".to_string()),
        })
    }
}
