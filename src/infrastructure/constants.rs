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

/// Platform endpoints
pub const DEFAULT_SERVER: &str = "https://anchor.zeet.co";
pub const GRAPHQL_PATH: &str = "graphql";
pub const DASHBOARD_URL: &str = "https://zeet.co";

/// Config file location
pub const CONFIG_DIR_NAME: &str = "zeet";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Environment variables
pub const ENV_CONFIG: &str = "ZEET_CONFIG";
pub const ENV_SERVER: &str = "ZEET_SERVER";
pub const ENV_ACCESS_TOKEN: &str = "ZEET_ACCESS_TOKEN";
pub const ENV_DEBUG: &str = "ZEET_DEBUG";

/// Status polling
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_POLL_JITTER_MS: u64 = 250;

/// HTTP transport
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const RETRY_MAX_TIMES: usize = 3;
pub const RETRY_MIN_DELAY_MS: u64 = 200;
