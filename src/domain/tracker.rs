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

use crate::domain::status::{LogSource, Outcome, Phase, ResourceKind, Status};
use crate::shared::error::ZeetError;

/// What the driver should do after one status observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub status: Status,
    pub phase: Phase,
    /// Status differs from the previously observed one
    pub changed: bool,
    /// Log stream to pull in this tick, if any
    pub fetch: Option<LogSource>,
    /// The selected log stream moved forward on this observation
    pub switched: bool,
    /// Stream left behind by a switch, to be read once more before `fetch`
    pub flush: Option<LogSource>,
}

/// Maps observed remote statuses onto the local phase of one poll session.
///
/// Once terminal the tracker ignores later observations. The selected log
/// stream only moves forward (build, then deploy), so a stale status cannot
/// send the session back to a stream it already left.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    kind: ResourceKind,
    phase: Phase,
    source: LogSource,
    last_status: Option<Status>,
    switches: u32,
    active_seen: bool,
    summary_taken: bool,
}

impl StatusTracker {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            phase: Phase::Pending,
            source: kind.initial_source(),
            last_status: None,
            switches: 0,
            active_seen: false,
            summary_taken: false,
        }
    }

    pub fn observe(&mut self, status: Status) -> Result<Observation, ZeetError> {
        if status.kind() != self.kind {
            return Err(ZeetError::ValidationError(format!(
                "{:?} session received a {:?} status ({})",
                self.kind,
                status.kind(),
                status
            )));
        }

        let changed = self.last_status != Some(status);

        if let Phase::Terminal(_) = self.phase {
            return Ok(Observation {
                status,
                phase: self.phase,
                changed,
                fetch: None,
                switched: false,
                flush: None,
            });
        }

        let row = status.transition();
        let switched = row.source > self.source;
        // unread tail of the old stream when an intermediate status was missed
        let flush = match self.phase {
            Phase::Active(previous) if switched => Some(previous),
            _ => None,
        };
        if switched {
            self.source = row.source;
            self.switches += 1;
        }

        self.phase = match row.phase {
            Phase::Active(_) => {
                self.active_seen = true;
                Phase::Active(self.source)
            }
            other => other,
        };
        self.last_status = Some(status);

        let fetch = match self.phase {
            Phase::Pending => None,
            Phase::Active(source) => Some(source),
            // final flush before the session ends
            Phase::Terminal(_) => Some(self.source),
        };

        Ok(Observation {
            status,
            phase: self.phase,
            changed,
            fetch,
            switched,
            flush,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn source(&self) -> LogSource {
        self.source
    }

    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal(_))
    }

    /// Number of times the log stream moved forward
    pub fn switches(&self) -> u32 {
        self.switches
    }

    /// Whether any non-terminal, log-producing status was ever observed
    pub fn active_seen(&self) -> bool {
        self.active_seen
    }

    /// The terminal outcome, handed out only once per session
    pub fn take_outcome(&mut self) -> Option<Outcome> {
        match self.phase {
            Phase::Terminal(outcome) if !self.summary_taken => {
                self.summary_taken = true;
                Some(outcome)
            }
            _ => None,
        }
    }
}
