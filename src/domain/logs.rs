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

//! Log snapshots and suffix rendering
//!
//! The platform returns the full log listing on every call. Rendering keeps a
//! count of entries already shown and emits only the suffix past it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single remote log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl LogEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: None,
        }
    }

    /// Text as printed, optionally prefixed by its UTC timestamp
    pub fn display_line(&self, with_timestamp: bool) -> String {
        match (with_timestamp, self.timestamp) {
            (true, Some(ts)) => format!("{} {}", ts.format("%Y-%m-%dT%H:%M:%SZ"), self.text),
            _ => self.text.clone(),
        }
    }
}

/// A snapshot that is shorter than what was already rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotAnomaly {
    pub rendered: usize,
    pub snapshot_len: usize,
}

/// Result of rendering one snapshot against a previous count
#[derive(Debug, PartialEq, Eq)]
pub struct Rendered<'a> {
    pub lines: &'a [LogEntry],
    pub new_count: usize,
    pub anomaly: Option<SnapshotAnomaly>,
}

/// Return the part of `snapshot` not yet shown.
///
/// A snapshot shorter than `previous_count` yields no lines and keeps the
/// count where it was.
pub fn render(previous_count: usize, snapshot: &[LogEntry]) -> Rendered<'_> {
    if snapshot.len() < previous_count {
        return Rendered {
            lines: &[],
            new_count: previous_count,
            anomaly: Some(SnapshotAnomaly {
                rendered: previous_count,
                snapshot_len: snapshot.len(),
            }),
        };
    }

    Rendered {
        lines: &snapshot[previous_count..],
        new_count: snapshot.len(),
        anomaly: None,
    }
}

/// Number of entries of one log stream already written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollCursor {
    rendered: usize,
}

impl PollCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.rendered
    }

    /// Record that entries up to `count` have been written. Never moves back.
    pub fn commit(&mut self, count: usize) {
        self.rendered = self.rendered.max(count);
    }
}
