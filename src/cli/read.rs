// SPDX-License-Identifier: Apache-2.0

use nicfg::{Backend, Config, Issues, Sysroot};

use crate::CliError;

pub(crate) const ARG_BACKEND: &str = "BACKEND";
pub(crate) const ARG_ROOT: &str = "ROOT";

pub(crate) fn backend_arg() -> clap::Arg {
    clap::Arg::new(ARG_BACKEND)
        .long("backend")
        .short('b')
        .required(true)
        .help("Backend to read: sysconfig, keyfile or none")
}

pub(crate) fn root_arg() -> clap::Arg {
    clap::Arg::new(ARG_ROOT)
        .long("root")
        .short('r')
        .default_value("/")
        .help("Directory holding the configuration files")
}

/// Parse the backend identifier stored in argument `id`.
pub(crate) fn backend_of(
    matches: &clap::ArgMatches,
    id: &str,
) -> Result<Backend, CliError> {
    let name = matches
        .get_one::<String>(id)
        .ok_or_else(|| CliError::from(format!("Missing argument {id}")))?;
    Ok(Backend::from_id(name)?)
}

pub(crate) fn sysroot_of(matches: &clap::ArgMatches, id: &str) -> Sysroot {
    match matches.get_one::<String>(id) {
        Some(path) => Sysroot::new(path),
        None => Sysroot::default(),
    }
}

/// Read configuration, problems found are logged.
pub(crate) fn read_config(
    backend: Backend,
    sysroot: &Sysroot,
) -> Result<Config, CliError> {
    let mut issues = Issues::new();
    let config = Config::read(backend, sysroot, &mut issues)?;
    if !issues.is_empty() {
        log::info!(
            "Found {} issues in {backend} configuration under {}",
            issues.len(),
            sysroot.root().display()
        );
    }
    Ok(config)
}
