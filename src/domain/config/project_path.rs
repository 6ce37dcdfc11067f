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

use crate::shared::error::{Result, ZeetError};
use regex::Regex;
use std::fmt;

/// `owner/project` path as used by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPath {
    pub owner: String,
    pub project: String,
}

/// Project argument before the owner is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    Qualified(ProjectPath),
    /// Bare name, owned by the logged-in user
    Bare(String),
}

impl ProjectRef {
    pub fn parse(input: &str) -> Result<Self> {
        let re = Regex::new(r"^([A-Za-z0-9._-]+)(?:/([A-Za-z0-9._-]+))?$")
            .map_err(|e| ZeetError::ValidationError(e.to_string()))?;

        let caps = re.captures(input.trim()).ok_or_else(|| {
            ZeetError::ValidationError(format!(
                "Invalid project '{}'. Expected 'owner/project' or 'project'",
                input
            ))
        })?;

        let first = caps.get(1).map_or("", |m| m.as_str()).to_string();
        Ok(match caps.get(2) {
            Some(project) => ProjectRef::Qualified(ProjectPath {
                owner: first,
                project: project.as_str().to_string(),
            }),
            None => ProjectRef::Bare(first),
        })
    }

    /// Qualify a bare name with `login`
    pub fn qualify(self, login: &str) -> ProjectPath {
        match self {
            ProjectRef::Qualified(path) => path,
            ProjectRef::Bare(project) => ProjectPath {
                owner: login.to_string(),
                project,
            },
        }
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.project)
    }
}
