// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;
use sigma_wallet::currency::Unit;
use sigma_wallet::Error;
use tracing::warn;
use url::Url;

const DEFAULT_CONFIG: &str = include_str!("../../default.config.toml");

/// Lifetime of a link encoded without explicit timeout, one day
const DEFAULT_LINK_LIFETIME: u64 = 24 * 60 * 60;

/// Config holds the settings for the CLI wallet
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    /// Base URL of the wallet service
    pub(crate) api: Url,
    /// Seconds a newly encoded link stays valid
    #[serde(default = "default_link_lifetime")]
    pub(crate) link_lifetime: u64,
    /// Unit amounts are displayed in
    #[serde(default)]
    pub(crate) unit: Unit,
}

fn default_link_lifetime() -> u64 {
    DEFAULT_LINK_LIFETIME
}

fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<Option<String>> {
    fs::read_to_string(&path)
        .map(Some)
        .or_else(|e| match e.kind() {
            io::ErrorKind::NotFound => Ok(None),
            _ => Err(e),
        })
}

impl Config {
    /// Attempt to load configuration from file
    pub fn load(profile: &Path) -> Result<Config, Error> {
        let mut global_config =
            dirs::home_dir().ok_or(Error::OsNotSupported)?;
        global_config.push(".config");
        global_config.push(env!("CARGO_BIN_NAME"));
        global_config.push("config.toml");

        Self::load_from(profile, global_config)
    }

    /// Reads the profile config first, then the global one. If none exists
    /// the default config is written to the global location.
    fn load_from(profile: &Path, global: PathBuf) -> Result<Config, Error> {
        let profile = profile.join("config.toml");

        let contents = match read_to_string(&profile)? {
            Some(contents) => contents,
            None => match read_to_string(&global)? {
                Some(contents) => contents,
                None => {
                    if let Err(err) = write_default(&global) {
                        warn!(
                            %err,
                            path = %global.display(),
                            "Cannot write the default config"
                        );
                    }
                    DEFAULT_CONFIG.to_string()
                }
            },
        };

        Ok(toml::from_str(&contents)?)
    }
}

fn write_default(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)
}
