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

use crate::domain::logs::LogEntry;
use crate::domain::model::ResourceId;
use crate::domain::status::{LogSource, Status};
use crate::shared::error::ZeetError;

/// Read side of the platform used by the poll driver.
///
/// Every call returns a full snapshot. Errors are transport failures and end
/// the session.
#[async_trait::async_trait]
pub trait StatusProvider: Send + Sync {
    async fn fetch_status(&self, resource: &ResourceId) -> Result<Status, ZeetError>;

    async fn fetch_logs(
        &self,
        resource: &ResourceId,
        source: LogSource,
    ) -> Result<Vec<LogEntry>, ZeetError>;
}
