// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{
    Config, ConnectionConfigs, Dns, ErrorKind, Hostname, Interfaces, Issues,
    NicfgError, Routing, Sysroot, keyfile::KeyfileBackend,
    sysconfig::SysconfigBackend, unmanaged::UnmanagedBackend,
};

/// Network backend consuming the configuration files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[non_exhaustive]
pub enum Backend {
    /// `KEY=value` files under `/etc/sysconfig/network`.
    #[serde(rename = "sysconfig")]
    Sysconfig,
    /// Connection keyfiles under `/etc/NetworkManager/system-connections`.
    #[serde(rename = "keyfile")]
    Keyfile,
    /// Network not managed by any service.
    #[serde(rename = "none")]
    Unmanaged,
}

impl Backend {
    pub const ALL: [Self; 3] = [Self::Sysconfig, Self::Keyfile, Self::Unmanaged];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Sysconfig => "sysconfig",
            Self::Keyfile => "keyfile",
            Self::Unmanaged => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sysconfig => "Interface files (sysconfig)",
            Self::Keyfile => "Connection manager keyfiles",
            Self::Unmanaged => "Network services disabled",
        }
    }

    pub fn from_id(id: &str) -> Result<Self, NicfgError> {
        Self::ALL
            .iter()
            .find(|b| b.id() == id.trim())
            .copied()
            .ok_or_else(|| {
                NicfgError::new(
                    ErrorKind::InvalidBackend,
                    format!(
                        "Unknown backend '{id}', valid backends are: {}",
                        Self::ALL
                            .iter()
                            .map(|b| b.id())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })
    }

    pub fn reader(&self) -> Box<dyn ConfigReader> {
        match self {
            Self::Sysconfig => Box::new(SysconfigBackend::new()),
            Self::Keyfile => Box::new(KeyfileBackend::new()),
            Self::Unmanaged => Box::new(UnmanagedBackend),
        }
    }

    pub fn writer(&self) -> Box<dyn ConfigWriter> {
        match self {
            Self::Sysconfig => Box::new(SysconfigBackend::new()),
            Self::Keyfile => Box::new(KeyfileBackend::new()),
            Self::Unmanaged => Box::new(UnmanagedBackend),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Backend {
    type Err = NicfgError;

    fn from_str(s: &str) -> Result<Self, NicfgError> {
        Self::from_id(s)
    }
}

/// Load a backend's on-disk state.
///
/// Implementors provide the individual parts, [ConfigReader::read()]
/// assembles them into one [Config].
pub trait ConfigReader {
    fn backend(&self) -> Backend;

    /// Devices visible to the backend: hardware plus configured devices.
    fn interfaces(
        &self,
        sysroot: &Sysroot,
        issues: &mut Issues,
    ) -> Result<Interfaces, NicfgError>;

    /// One connection config per configured device of supported type.
    /// Interfaces missing from `ifaces` are added as not present.
    fn connections(
        &self,
        sysroot: &Sysroot,
        ifaces: &mut Interfaces,
        issues: &mut Issues,
    ) -> Result<ConnectionConfigs, NicfgError>;

    /// Routes bind to interfaces of `ifaces`, unknown ones are added as
    /// not present.
    fn routes(
        &self,
        sysroot: &Sysroot,
        ifaces: &mut Interfaces,
        issues: &mut Issues,
    ) -> Result<Routing, NicfgError>;

    fn dns(
        &self,
        sysroot: &Sysroot,
        issues: &mut Issues,
    ) -> Result<Dns, NicfgError>;

    fn hostname(
        &self,
        sysroot: &Sysroot,
        issues: &mut Issues,
    ) -> Result<Hostname, NicfgError>;

    fn read(
        &self,
        sysroot: &Sysroot,
        issues: &mut Issues,
    ) -> Result<Config, NicfgError> {
        log::debug!(
            "Reading {} configuration from {}",
            self.backend(),
            sysroot.root().display()
        );
        let mut interfaces = self.interfaces(sysroot, issues)?;
        let connections =
            self.connections(sysroot, &mut interfaces, issues)?;
        let routing = self.routes(sysroot, &mut interfaces, issues)?;
        let dns = self.dns(sysroot, issues)?;
        let hostname = self.hostname(sysroot, issues)?;
        Ok(Config {
            interfaces,
            connections,
            routing,
            dns,
            hostname,
            backend: Some(self.backend()),
            source: Some(self.backend()),
        })
    }
}

/// Store a [Config] in a backend's native files.
///
/// Settings the backend cannot express are silently omitted.
pub trait ConfigWriter {
    fn backend(&self) -> Backend;

    /// `old` is the configuration previously read from the same target,
    /// used to remove files of deleted connections.
    fn write(
        &self,
        config: &Config,
        old: Option<&Config>,
        sysroot: &Sysroot,
    ) -> Result<(), NicfgError>;
}
