// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;
use std::path::PathBuf;

use sigma_wallet::currency::Unit;
use sigma_wallet::stream::{
    stream_url, ADDRESS_STREAM, BALANCE_STREAM, HISTORY_STREAM, SEND_STREAM,
};
use sigma_wallet::Error;
use tracing::Level;
use url::Url;

use crate::config::Config;
use crate::io::WalletArgs;

#[derive(clap::ValueEnum, Debug, Clone)]
pub(crate) enum LogFormat {
    Json,
    Plain,
    Coloured,
}

#[derive(clap::ValueEnum, Debug, Clone)]
pub(crate) enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,
    /// Designates lower priority information.
    Debug,
    /// Designates useful information.
    Info,
    /// Designates hazardous situations.
    Warn,
    /// Designates very serious errors.
    Error,
}

#[derive(Debug)]
pub(crate) struct Logging {
    /// Max log level
    pub level: LogLevel,
    /// Log format
    pub format: LogFormat,
}

#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) api: Url,
    pub(crate) link_lifetime: u64,
    pub(crate) unit: Unit,

    pub(crate) logging: Logging,

    pub(crate) profile: PathBuf,
}

pub(crate) struct SettingsBuilder {
    profile: PathBuf,
    pub(crate) args: WalletArgs,
}

impl SettingsBuilder {
    pub fn profile(&self) -> &PathBuf {
        &self.profile
    }

    /// Logging only depends on the arguments, so it is known before the
    /// configuration is read
    pub fn logging(&self) -> Logging {
        Logging {
            level: self.args.log_level.clone(),
            format: self.args.log_type.clone(),
        }
    }

    /// Completes the settings, values given as arguments take precedence
    /// over the configuration
    pub fn config(self, config: Config) -> Settings {
        let logging = self.logging();
        let args = self.args;

        let api = args.api.unwrap_or(config.api);
        let link_lifetime = args.link_lifetime.unwrap_or(config.link_lifetime);
        let unit = args.unit.unwrap_or(config.unit);

        Settings {
            api,
            link_lifetime,
            unit,
            logging,
            profile: self.profile,
        }
    }
}

impl Settings {
    pub fn args(args: WalletArgs) -> Result<SettingsBuilder, Error> {
        let profile = if let Some(path) = &args.profile {
            path.clone()
        } else {
            let mut path = dirs::home_dir().ok_or(Error::OsNotSupported)?;
            path.push(".sigma");
            path.push(env!("CARGO_BIN_NAME"));
            path
        };

        Ok(SettingsBuilder { profile, args })
    }
}

impl From<&LogLevel> for Level {
    fn from(level: &LogLevel) -> Level {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Json => "json",
                Self::Plain => "plain",
                Self::Coloured => "coloured",
            }
        )
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Trace => "trace",
                Self::Debug => "debug",
                Self::Info => "info",
                Self::Warn => "warn",
                Self::Error => "error",
            }
        )
    }
}

impl fmt::Display for Logging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Logging: [{}] ({})", self.level, self.format)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "─".repeat(14);
        writeln!(f, "{separator}")?;
        writeln!(f, "Settings")?;
        writeln!(f, "{separator}")?;
        writeln!(f, "Profile directory: {}", self.profile.display())?;
        writeln!(f, "Link lifetime: {}s", self.link_lifetime)?;
        writeln!(f, "Unit: {}", self.unit.name())?;
        writeln!(f, "{separator}")?;
        writeln!(f, "api: {}", self.api)?;

        for endpoint in
            [SEND_STREAM, ADDRESS_STREAM, BALANCE_STREAM, HISTORY_STREAM]
        {
            match stream_url(&self.api, endpoint) {
                Ok(url) => writeln!(f, "stream: {url}")?,
                Err(err) => writeln!(f, "stream: {endpoint} ({err})")?,
            }
        }

        writeln!(f, "{separator}")?;
        writeln!(f, "{}", self.logging)
    }
}
