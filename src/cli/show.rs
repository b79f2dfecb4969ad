// SPDX-License-Identifier: Apache-2.0

use super::read::{
    ARG_BACKEND, ARG_ROOT, backend_arg, backend_of, read_config, root_arg,
    sysroot_of,
};
use crate::CliError;

pub(crate) struct CommandShow;

impl CommandShow {
    pub(crate) const CMD: &str = "show";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("show")
            .alias("s")
            .about("Show network configuration of a backend")
            .arg(backend_arg())
            .arg(root_arg())
            .arg(
                clap::Arg::new("SHOW_SECRETS")
                    .long("show-secrets")
                    .short('s')
                    .action(clap::ArgAction::SetTrue)
                    .help("Show passwords and keys"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let backend = backend_of(matches, ARG_BACKEND)?;
        let sysroot = sysroot_of(matches, ARG_ROOT);
        let mut config = read_config(backend, &sysroot)?;
        if !matches.get_flag("SHOW_SECRETS") {
            config.hide_secrets();
        }
        println!("{}", serde_yaml::to_string(&config)?);
        Ok(())
    }
}
