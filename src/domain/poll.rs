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

//! Poll loop that follows a resource until it reaches a terminal status

use crate::domain::provider::StatusProvider;
use crate::domain::session::PollSession;
use crate::domain::status::{Outcome, Status};
use crate::infrastructure::constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_POLL_JITTER_MS};
use crate::shared::error::ZeetError;
use rand::Rng;
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Text written around the log output of a session
pub trait SessionView: Send + Sync {
    /// Line printed when a new non-terminal status is first observed
    fn notice(&self, status: Status) -> Option<String>;

    /// Line printed once when the session ends
    fn summary(&self, status: Status, outcome: Outcome) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    /// Upper bound of the random delay added to each interval
    pub max_jitter: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_jitter: Duration::from_millis(DEFAULT_POLL_JITTER_MS),
        }
    }
}

impl PollOptions {
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_jitter: Duration::ZERO,
        }
    }

    fn next_delay(&self) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.interval;
        }
        self.interval + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

pub struct PollDriver {
    provider: Box<dyn StatusProvider>,
    view: Box<dyn SessionView>,
    options: PollOptions,
    cancel: CancellationToken,
}

impl PollDriver {
    pub fn new(
        provider: Box<dyn StatusProvider>,
        view: Box<dyn SessionView>,
        options: PollOptions,
    ) -> Self {
        Self {
            provider,
            view,
            options,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Poll until the session reaches a terminal phase.
    ///
    /// Remote failures come back as `Ok(Outcome::Failure)` or
    /// `Ok(Outcome::Aborted)`. Errors from the provider end the session
    /// as-is, without a summary line.
    pub async fn run<W: Write + Send + ?Sized>(
        &self,
        session: &mut PollSession,
        out: &mut W,
    ) -> Result<Outcome, ZeetError> {
        tracing::info!(resource = %session.resource(), "Following resource");
        let mut ticks = 0u64;

        loop {
            if self.cancel.is_cancelled() {
                return Err(ZeetError::Cancelled);
            }

            ticks += 1;
            if let Some(outcome) = self.tick(session, out).await? {
                tracing::info!(
                    resource = %session.resource(),
                    ?outcome,
                    ticks,
                    "Session finished"
                );
                return Ok(outcome);
            }

            let delay = self.options.next_delay();
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(ZeetError::Cancelled),
                _ = sleep(delay) => {}
            }
        }
    }

    /// Fetch status, then the tail of a stream being left, then logs for the
    /// selected stream. Reports the end of the session if the status was
    /// terminal.
    async fn tick<W: Write + Send + ?Sized>(
        &self,
        session: &mut PollSession,
        out: &mut W,
    ) -> Result<Option<Outcome>, ZeetError> {
        let resource = *session.resource();

        let status = self.cancellable(self.provider.fetch_status(&resource)).await?;
        let observation = session.tracker_mut().observe(status)?;
        tracing::debug!(
            %resource,
            %status,
            phase = ?observation.phase,
            fetch = ?observation.fetch,
            "Observed status"
        );

        if let Some(previous) = observation.flush {
            tracing::debug!(%resource, source = %previous, "Flushing log stream before switch");
            let snapshot = self
                .cancellable(self.provider.fetch_logs(&resource, previous))
                .await?;
            session.write_logs(previous, &snapshot, out)?;
        }

        if observation.changed && !status.is_terminal() {
            if let Some(line) = self.view.notice(status) {
                writeln!(out, "{}", line)?;
            }
        }

        if let Some(source) = observation.fetch {
            if observation.switched {
                tracing::debug!(%resource, %source, "Switched log stream");
            }
            let snapshot = self
                .cancellable(self.provider.fetch_logs(&resource, source))
                .await?;
            session.write_logs(source, &snapshot, out)?;
        }

        let Some(outcome) = session.tracker_mut().take_outcome() else {
            return Ok(None);
        };

        if !session.tracker().active_seen() {
            tracing::debug!(%resource, "Resource finished before any running status was seen");
        }
        writeln!(out, "{}", self.view.summary(status, outcome))?;
        out.flush()?;
        Ok(Some(outcome))
    }

    async fn cancellable<T>(
        &self,
        fut: impl Future<Output = Result<T, ZeetError>>,
    ) -> Result<T, ZeetError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ZeetError::Cancelled),
            result = fut => result,
        }
    }
}
