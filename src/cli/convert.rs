// SPDX-License-Identifier: Apache-2.0

use super::read::{ARG_ROOT, backend_of, read_config, root_arg, sysroot_of};
use crate::CliError;

const ARG_FROM: &str = "FROM";
const ARG_TO: &str = "TO";
const ARG_TARGET_ROOT: &str = "TARGET_ROOT";

pub(crate) struct CommandConvert;

impl CommandConvert {
    pub(crate) const CMD: &str = "convert";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("convert")
            .alias("c")
            .about("Convert configuration of one backend into another")
            .arg(
                clap::Arg::new(ARG_FROM)
                    .long("from")
                    .short('f')
                    .required(true)
                    .help("Backend to read"),
            )
            .arg(
                clap::Arg::new(ARG_TO)
                    .long("to")
                    .short('t')
                    .required(true)
                    .help("Backend to write"),
            )
            .arg(root_arg())
            .arg(
                clap::Arg::new(ARG_TARGET_ROOT)
                    .long("target-root")
                    .short('T')
                    .help("Directory to write to, default to the read root"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let from = backend_of(matches, ARG_FROM)?;
        let to = backend_of(matches, ARG_TO)?;
        let sysroot = sysroot_of(matches, ARG_ROOT);
        let target = if matches.contains_id(ARG_TARGET_ROOT) {
            sysroot_of(matches, ARG_TARGET_ROOT)
        } else {
            sysroot_of(matches, ARG_ROOT)
        };

        let mut config = read_config(from, &sysroot)?;
        // Files of connections the target holds but the source does not
        // get removed
        let old = read_config(to, &target)?;
        config.backend = Some(to);
        config.write(&target, Some(&old))?;
        log::info!(
            "Converted {} connections from {from} to {to} at {}",
            config.connections.len(),
            target.root().display()
        );
        Ok(())
    }
}
