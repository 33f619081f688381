// Copyright 2025 Fernando Borretti
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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use studyhub_core::MAX_FORECAST_DAYS;

use crate::error::Fallible;
use crate::error::fail;

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "studyhub.toml";

const DEFAULT_DATABASE: &str = "studyhub.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_FORECAST_DAYS: u32 = 7;

/// The contents of `studyhub.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    due_limit: Option<usize>,
    forecast_days: Option<u32>,
}

/// Resolved settings, after applying the file over the defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database: PathBuf,
    pub host: String,
    pub port: u16,
    /// Cap on the number of due cards listed. `None` lists all of them.
    pub due_limit: Option<usize>,
    pub forecast_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            due_limit: None,
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

impl Config {
    /// Load the configuration. An explicitly named file must exist; the
    /// default file is used only if present.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let path: PathBuf = match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!(
                        "configuration file {} does not exist.",
                        path.display()
                    ));
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Config::default());
                }
                path
            }
        };
        log::debug!("Loading configuration from {}", path.display());
        let text = read_to_string(&path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let defaults = Config::default();
        if let Some(days) = file.forecast_days {
            if days > MAX_FORECAST_DAYS {
                return fail(format!(
                    "forecast_days must be at most {MAX_FORECAST_DAYS}, got {days}."
                ));
            }
        }
        Ok(Config {
            database: file.database.unwrap_or(defaults.database),
            host: file.host.unwrap_or(defaults.host),
            port: file.port.unwrap_or(defaults.port),
            due_limit: file.due_limit.or(defaults.due_limit),
            forecast_days: file.forecast_days.unwrap_or(defaults.forecast_days),
        })
    }
}
