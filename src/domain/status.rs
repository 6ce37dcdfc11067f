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

//! Remote lifecycle statuses and the table that maps them to local phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a deployment, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    BuildInProgress,
    BuildSucceeded,
    BuildFailed,
    BuildAborted,
    DeployStopped,
    DeployInProgress,
    DeploySucceeded,
    DeployFailed,
}

/// Lifecycle state of a job run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[serde(rename = "JOB_RUN_STARTING")]
    Starting,
    #[serde(rename = "JOB_RUN_RUNNING")]
    Running,
    #[serde(rename = "JOB_RUN_SUCCEEDED")]
    Succeeded,
    #[serde(rename = "JOB_RUN_FAILED")]
    Failed,
}

/// Kind of resource a poll session follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    Job,
}

/// Current status of a followed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Deployment(DeploymentStatus),
    Job(JobStatus),
}

/// Which remote log stream to pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogSource {
    Build,
    Deploy,
    Job,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
    Aborted,
}

/// Local phase of a poll session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pending,
    Active(LogSource),
    Terminal(Outcome),
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub phase: Phase,
    /// Log stream read while in this status. Terminal rows still name the
    /// stream that receives the final flush.
    pub source: LogSource,
}

const fn row(phase: Phase, source: LogSource) -> Transition {
    Transition { phase, source }
}

impl DeploymentStatus {
    pub const ALL: [DeploymentStatus; 8] = [
        Self::BuildInProgress,
        Self::BuildSucceeded,
        Self::BuildFailed,
        Self::BuildAborted,
        Self::DeployStopped,
        Self::DeployInProgress,
        Self::DeploySucceeded,
        Self::DeployFailed,
    ];

    pub const fn transition(self) -> Transition {
        use LogSource::{Build, Deploy};
        use Phase::{Active, Terminal};
        match self {
            Self::BuildInProgress => row(Active(Build), Build),
            Self::BuildSucceeded => row(Active(Build), Build),
            Self::BuildFailed => row(Terminal(Outcome::Failure), Build),
            Self::BuildAborted => row(Terminal(Outcome::Aborted), Build),
            // Informational only; whether the server can leave this state is unconfirmed
            Self::DeployStopped => row(Active(Build), Build),
            Self::DeployInProgress => row(Active(Deploy), Deploy),
            Self::DeploySucceeded => row(Terminal(Outcome::Success), Deploy),
            Self::DeployFailed => row(Terminal(Outcome::Failure), Deploy),
        }
    }
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [Self::Starting, Self::Running, Self::Succeeded, Self::Failed];

    pub const fn transition(self) -> Transition {
        use LogSource::Job;
        use Phase::{Active, Pending, Terminal};
        match self {
            Self::Starting => row(Pending, Job),
            Self::Running => row(Active(Job), Job),
            Self::Succeeded => row(Terminal(Outcome::Success), Job),
            Self::Failed => row(Terminal(Outcome::Failure), Job),
        }
    }
}

impl Status {
    pub const fn transition(self) -> Transition {
        match self {
            Self::Deployment(status) => status.transition(),
            Self::Job(status) => status.transition(),
        }
    }

    pub const fn kind(self) -> ResourceKind {
        match self {
            Self::Deployment(_) => ResourceKind::Deployment,
            Self::Job(_) => ResourceKind::Job,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self.transition().phase, Phase::Terminal(_))
    }
}

impl ResourceKind {
    /// Log stream a new session starts on
    pub const fn initial_source(self) -> LogSource {
        match self {
            Self::Deployment => LogSource::Build,
            Self::Job => LogSource::Job,
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build => write!(f, "build"),
            Self::Deploy => write!(f, "deploy"),
            Self::Job => write!(f, "job"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deployment(s) => write!(f, "{:?}", s),
            Self::Job(s) => write!(f, "{:?}", s),
        }
    }
}
