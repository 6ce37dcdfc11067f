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

/// A named GraphQL document
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub query: &'static str,
}

pub const CURRENT_USER: Operation = Operation {
    name: "currentUser",
    query: "query currentUser { currentUser { id login } }",
};

pub const PROJECT_BY_PATH: Operation = Operation {
    name: "projectByPath",
    query: "query projectByPath($path: String!) { project(path: $path) { id name } }",
};

pub const PRODUCTION_BRANCH: Operation = Operation {
    name: "productionBranch",
    query: "query productionBranch($id: UUID!) { repo(id: $id) { productionBranch { name } } }",
};

pub const BUILD_PROJECT: Operation = Operation {
    name: "buildRepo",
    query: "mutation buildRepo($id: UUID!, $branch: String, $noCache: Boolean) { \
            buildRepo(id: $id, branch: $branch, noCache: $noCache) { \
            id status endpoints privateEndpoint } }",
};

pub const DEPLOY_PROJECT_BRANCH: Operation = Operation {
    name: "deployRepoBranch",
    query: "mutation deployRepoBranch($id: UUID!, $branch: String!, $noCache: Boolean) { \
            deployRepoBranch(id: $id, branch: $branch, noCache: $noCache) { \
            id status endpoints privateEndpoint } }",
};

pub const UPDATE_PROJECT: Operation = Operation {
    name: "updateProject",
    query: "mutation updateProject($input: UpdateProjectInput!) { updateProject(input: $input) { id } }",
};

pub const UPDATE_BRANCH: Operation = Operation {
    name: "updateBranch",
    query: "mutation updateBranch($input: UpdateBranchInput!) { updateBranch(input: $input) { id } }",
};

pub const PRODUCTION_DEPLOYMENT: Operation = Operation {
    name: "productionDeployment",
    query: "query productionDeployment($path: String!) { project(path: $path) { \
            productionDeployment { id status endpoints privateEndpoint } } }",
};

pub const LATEST_DEPLOYMENT: Operation = Operation {
    name: "latestDeployment",
    query: "query latestDeployment($path: String!, $branch: String!) { project(path: $path) { \
            branch(name: $branch) { latestDeployment { id status endpoints privateEndpoint } } } }",
};

pub const DEPLOYMENT: Operation = Operation {
    name: "deployment",
    query: "query deployment($id: UUID!) { deployment(id: $id) { \
            id status endpoints privateEndpoint } }",
};

pub const BUILD_LOGS: Operation = Operation {
    name: "buildLogs",
    query: "query buildLogs($id: UUID!) { deployment(id: $id) { \
            buildLogs { entries { text timestamp } } } }",
};

pub const DEPLOYMENT_LOGS: Operation = Operation {
    name: "deploymentLogs",
    query: "query deploymentLogs($id: UUID!) { deployment(id: $id) { \
            deployLogs { entries { text timestamp } } } }",
};

pub const RUN_JOB: Operation = Operation {
    name: "runJob",
    query: "mutation runJob($input: RunJobInput!) { runJob(input: $input) { id state } }",
};

pub const JOB: Operation = Operation {
    name: "jobRun",
    query: "query jobRun($projectId: UUID!, $jobId: UUID!) { repo(id: $projectId) { \
            jobRun(id: $jobId) { id state } } }",
};

pub const JOB_LOGS: Operation = Operation {
    name: "jobRunLogs",
    query: "query jobRunLogs($projectId: UUID!, $jobId: UUID!) { repo(id: $projectId) { \
            jobRun(id: $jobId) { logs { entries { text timestamp } } } } }",
};

pub const UPDATE_CLUSTER_KUBECONFIG: Operation = Operation {
    name: "updateClusterKubeconfig",
    query: "mutation updateClusterKubeconfig($input: UpdateClusterInput!) { \
            updateCluster(input: $input) { id name } }",
};
