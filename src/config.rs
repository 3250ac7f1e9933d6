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
use vocab_core::error::ErrorReport;
use vocab_core::error::Fallible;
use vocab_core::session::DEFAULT_SESSION_SIZE;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "vocab.toml";

/// Environment variable overriding the database path.
pub const DB_ENV_VAR: &str = "VOCAB_DB";

const DEFAULT_DB_PATH: &str = "data/vocab.db";

/// Contents of `vocab.toml`. Every key is optional.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub database: Option<PathBuf>,
    pub session_size: Option<usize>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Fallible<Self> {
        toml::from_str(content).map_err(|e| ErrorReport::new(format!("invalid config file: {e}")))
    }

    /// Load an explicitly named file, which must exist, or else the default
    /// file if there is one.
    pub fn load(explicit: Option<&Path>) -> Fallible<Self> {
        match explicit {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::parse(&read_to_string(path)?)
            }
            None => {
                let path = Path::new(CONFIG_FILE_NAME);
                if path.is_file() {
                    log::debug!("Loading config from {CONFIG_FILE_NAME}");
                    Self::parse(&read_to_string(path)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Resolved settings. Flags win over the environment, which wins over the
/// file, which wins over the defaults.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub database: PathBuf,
    pub session_size: usize,
}

impl Config {
    pub fn resolve(db_flag: Option<PathBuf>, db_env: Option<String>, file: ConfigFile) -> Self {
        let database = db_flag
            .or_else(|| db_env.filter(|s| !s.is_empty()).map(PathBuf::from))
            .or(file.database)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        Self {
            database,
            session_size: file.session_size.unwrap_or(DEFAULT_SESSION_SIZE),
        }
    }

    pub fn from_env(db_flag: Option<PathBuf>, config_flag: Option<&Path>) -> Fallible<Self> {
        let file = ConfigFile::load(config_flag)?;
        let env = std::env::var(DB_ENV_VAR).ok();
        Ok(Self::resolve(db_flag, env, file))
    }
}
