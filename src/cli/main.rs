// SPDX-License-Identifier: Apache-2.0

mod convert;
mod error;
mod read;
mod routes;
mod show;

pub(crate) use self::error::CliError;
use self::{convert::CommandConvert, routes::CommandRoutes, show::CommandShow};

fn main() -> Result<(), CliError> {
    let mut cli_cmd = clap::Command::new("ncfg")
        .about("Host network configuration tool")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            clap::Arg::new("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue)
                .help("Disable logging")
                .global(true),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .action(clap::ArgAction::Count)
                .help("Increase verbose level")
                .global(true),
        )
        .subcommand(CommandShow::new_cmd())
        .subcommand(CommandConvert::new_cmd())
        .subcommand(CommandRoutes::new_cmd());

    let matches = cli_cmd.get_matches_mut();

    let (log_groups, log_level) = match matches.get_count("verbose") {
        0 => (vec!["nicfg", "ncfg"], log::LevelFilter::Info),
        1 => (vec!["nicfg", "ncfg"], log::LevelFilter::Debug),
        2 => (vec!["nicfg", "ncfg"], log::LevelFilter::Trace),
        _ => (vec![], log::LevelFilter::Trace),
    };

    if !matches.get_flag("quiet") {
        let mut log_builder = env_logger::Builder::new();
        if log_groups.is_empty() {
            log_builder.filter(None, log_level);
        } else {
            for log_group in log_groups {
                log_builder.filter(Some(log_group), log_level);
            }
        }
        log_builder.init();
    }

    log::info!("ncfg version: {}", clap::crate_version!());

    if let Err(e) = call_subcommand(&matches) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

fn call_subcommand(matches: &clap::ArgMatches) -> Result<(), CliError> {
    if let Some(matches) = matches.subcommand_matches(CommandShow::CMD) {
        CommandShow::handle(matches)
    } else if let Some(matches) =
        matches.subcommand_matches(CommandConvert::CMD)
    {
        CommandConvert::handle(matches)
    } else if let Some(matches) = matches.subcommand_matches(CommandRoutes::CMD)
    {
        CommandRoutes::handle(matches)
    } else {
        Err(CliError::from("Unknown command"))
    }
}
