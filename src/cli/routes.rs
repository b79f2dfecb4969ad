// SPDX-License-Identifier: Apache-2.0

use super::read::{
    ARG_BACKEND, ARG_ROOT, backend_arg, backend_of, read_config, root_arg,
    sysroot_of,
};
use crate::CliError;

pub(crate) struct CommandRoutes;

impl CommandRoutes {
    pub(crate) const CMD: &str = "routes";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("routes")
            .alias("r")
            .about(
                "Show routes a backend stores for an interface, or the \
                 global routes",
            )
            .arg(backend_arg())
            .arg(root_arg())
            .arg(
                clap::Arg::new("IFACE")
                    .long("iface")
                    .short('i')
                    .help("Interface name"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let backend = backend_of(matches, ARG_BACKEND)?;
        let sysroot = sysroot_of(matches, ARG_ROOT);
        let config = read_config(backend, &sysroot)?;
        let iface = matches.get_one::<String>("IFACE").map(|s| s.as_str());
        let routes = config.routes_for(iface)?;
        println!("{}", serde_yaml::to_string(&routes)?);
        Ok(())
    }
}
