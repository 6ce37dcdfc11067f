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

pub mod cluster;
pub mod commands;
pub mod display;
pub mod project;

pub use commands::{CliArgs, Commands};

use crate::domain::config::CliConfig;
use crate::domain::status::Outcome;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

/// Resolved settings and the shutdown signal shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: CliConfig,
    pub cancel: CancellationToken,
}

impl CommandContext {
    pub fn new(config: CliConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Exit code for a finished session
pub fn outcome_exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Success => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
