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

use crate::domain::logs::{render, LogEntry, PollCursor};
use crate::domain::model::ResourceId;
use crate::domain::status::{LogSource, ResourceKind};
use crate::domain::tracker::StatusTracker;
use std::collections::BTreeMap;
use std::io::Write;

/// Local bookkeeping for following one resource until it ends
#[derive(Debug)]
pub struct PollSession {
    resource: ResourceId,
    tracker: StatusTracker,
    cursors: BTreeMap<LogSource, PollCursor>,
    timestamps: bool,
}

impl PollSession {
    pub fn new(resource: ResourceId, kind: ResourceKind) -> Self {
        Self {
            resource,
            tracker: StatusTracker::new(kind),
            cursors: BTreeMap::new(),
            timestamps: false,
        }
    }

    pub fn deployment(resource: ResourceId) -> Self {
        Self::new(resource, ResourceKind::Deployment)
    }

    pub fn job(resource: ResourceId) -> Self {
        Self::new(resource, ResourceKind::Job)
    }

    /// Prefix each written line with its timestamp when the entry carries one
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut StatusTracker {
        &mut self.tracker
    }

    pub fn cursor(&self, source: LogSource) -> PollCursor {
        self.cursors.get(&source).copied().unwrap_or_default()
    }

    /// Write the unseen part of `snapshot` and advance that stream's cursor.
    ///
    /// The cursor is committed only after every line has been written and
    /// the sink flushed. Returns the number of lines written.
    pub fn write_logs<W: Write + ?Sized>(
        &mut self,
        source: LogSource,
        snapshot: &[LogEntry],
        out: &mut W,
    ) -> std::io::Result<usize> {
        let previous = self.cursor(source).position();
        let rendered = render(previous, snapshot);

        if let Some(anomaly) = rendered.anomaly {
            tracing::warn!(
                resource = %self.resource,
                %source,
                rendered = anomaly.rendered,
                snapshot_len = anomaly.snapshot_len,
                "Log snapshot shorter than already rendered, holding cursor"
            );
        }

        for entry in rendered.lines {
            writeln!(out, "{}", entry.display_line(self.timestamps))?;
        }
        out.flush()?;

        self.cursors
            .entry(source)
            .or_default()
            .commit(rendered.new_count);
        Ok(rendered.lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entries(lines: &[&str]) -> Vec<LogEntry> {
        lines.iter().map(|l| LogEntry::new(*l)).collect()
    }

    #[test]
    fn test_write_logs_only_new_lines() {
        let mut session = PollSession::deployment(Uuid::new_v4());
        let mut out = Vec::new();

        session
            .write_logs(LogSource::Build, &entries(&["one", "two"]), &mut out)
            .unwrap();
        let written = session
            .write_logs(LogSource::Build, &entries(&["one", "two", "three"]), &mut out)
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "one\ntwo\nthree\n");
        assert_eq!(session.cursor(LogSource::Build).position(), 3);
    }

    #[test]
    fn test_streams_have_separate_cursors() {
        let mut session = PollSession::deployment(Uuid::new_v4());
        let mut out = Vec::new();

        session
            .write_logs(LogSource::Build, &entries(&["b1", "b2"]), &mut out)
            .unwrap();
        session
            .write_logs(LogSource::Deploy, &entries(&["d1"]), &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "b1\nb2\nd1\n");
        assert_eq!(session.cursor(LogSource::Build).position(), 2);
        assert_eq!(session.cursor(LogSource::Deploy).position(), 1);
    }

    #[test]
    fn test_failed_write_keeps_cursor() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut session = PollSession::job(Uuid::new_v4());
        let result = session.write_logs(LogSource::Job, &entries(&["x"]), &mut Broken);
        assert!(result.is_err());
        assert_eq!(session.cursor(LogSource::Job).position(), 0);
    }
}
