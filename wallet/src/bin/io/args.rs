// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;
use sigma_wallet::currency::Unit;
use url::Url;

use crate::settings::{LogFormat, LogLevel};
use crate::Command;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Encode and validate conditional deposit addresses of the Sigma wallet."
)]
pub(crate) struct WalletArgs {
    /// Directory to store user data [default: `$HOME/.sigma/sigma-wallet`]
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// The wallet service fully qualified URL
    #[arg(long)]
    pub api: Option<Url>,

    /// Seconds a newly encoded link stays valid
    #[arg(long)]
    pub link_lifetime: Option<u64>,

    /// Unit amounts are displayed in
    #[arg(short, long)]
    pub unit: Option<Unit>,

    /// Output log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Logging output type
    #[arg(long, value_enum, default_value_t = LogFormat::Coloured)]
    pub log_type: LogFormat,

    /// Command
    #[command(subcommand)]
    pub command: Command,
}
