// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

mod command;
mod config;
mod io;
mod settings;

pub(crate) use command::{Command, RunResult};

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use sigma_wallet::MagnetLinkCodec;

use config::Config;
use io::WalletArgs;
use settings::{LogFormat, Logging, Settings};

fn main() -> anyhow::Result<ExitCode> {
    match exec() {
        Ok(result) if result.is_rejection() => Ok(ExitCode::FAILURE),
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            // display the error message
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn exec() -> anyhow::Result<RunResult> {
    // parse user args
    let args = WalletArgs::parse();
    let cmd = args.command.clone();

    // Get the initial settings from the args
    let settings_builder = Settings::args(args)?;

    // generate a subscriber before touching the profile, so that warnings
    // raised while loading the configuration are reported
    init_logging(&settings_builder.logging())?;

    // Obtain the profile dir from the settings
    let profile_folder = settings_builder.profile().clone();

    fs::create_dir_all(profile_folder.as_path())?;

    // load configuration (or use default)
    let cfg = Config::load(&profile_folder)?;

    // Finally complete the settings with the configuration
    let settings = settings_builder.config(cfg);

    if let Command::Settings = cmd {
        println!("{}", &settings);
        return Ok(RunResult::Settings());
    };

    let codec = MagnetLinkCodec::new();
    let result = cmd.run(&settings, &codec)?;

    match &result {
        RunResult::Rejected(_) => eprintln!("{result}"),
        _ => println!("{result}"),
    }

    Ok(result)
}

fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    let level: Level = (&logging.level).into();
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    // set the subscriber as global
    match logging.format {
        LogFormat::Json => {
            let subscriber = subscriber.json().flatten_event(true).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Plain => {
            let subscriber = subscriber.with_ansi(false).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Coloured => {
            let subscriber = subscriber.finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    };
    Ok(())
}
