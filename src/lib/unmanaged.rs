// SPDX-License-Identifier: Apache-2.0

use crate::{
    Backend, Config, ConfigReader, ConfigWriter, ConnectionConfigs, Dns,
    Hostname, Interface, Interfaces, Issues, NicfgError, Routing, Sysroot,
    forwarding::{read_forwarding, write_forwarding},
    hostname_file::{read_static_hostname, write_static_hostname},
    resolv::{read_resolv_conf, write_resolv_conf},
};

/// Host without network service: only the resolver configuration,
/// hostname and forwarding flags are handled.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct UnmanagedBackend;

impl ConfigReader for UnmanagedBackend {
    fn backend(&self) -> Backend {
        Backend::Unmanaged
    }

    fn interfaces(
        &self,
        sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> Result<Interfaces, NicfgError> {
        let mut ifaces = Interfaces::new();
        for hwinfo in sysroot.hardware.read(sysroot.root())? {
            ifaces.push(Interface::from_hwinfo(hwinfo));
        }
        Ok(ifaces)
    }

    fn connections(
        &self,
        _sysroot: &Sysroot,
        _ifaces: &mut Interfaces,
        _issues: &mut Issues,
    ) -> Result<ConnectionConfigs, NicfgError> {
        Ok(ConnectionConfigs::new())
    }

    fn routes(
        &self,
        sysroot: &Sysroot,
        _ifaces: &mut Interfaces,
        _issues: &mut Issues,
    ) -> Result<Routing, NicfgError> {
        let mut routing = Routing::default();
        read_forwarding(sysroot, &mut routing)?;
        Ok(routing)
    }

    fn dns(
        &self,
        sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> Result<Dns, NicfgError> {
        read_resolv_conf(sysroot)
    }

    fn hostname(
        &self,
        sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> Result<Hostname, NicfgError> {
        Ok(Hostname::new(&read_static_hostname(sysroot)?))
    }
}

impl ConfigWriter for UnmanagedBackend {
    fn backend(&self) -> Backend {
        Backend::Unmanaged
    }

    fn write(
        &self,
        config: &Config,
        _old: Option<&Config>,
        sysroot: &Sysroot,
    ) -> Result<(), NicfgError> {
        if !config.connections.is_empty() {
            log::debug!(
                "Ignoring {} connection configs for unmanaged network",
                config.connections.len()
            );
        }
        write_static_hostname(sysroot, &config.hostname.static_name)?;
        write_resolv_conf(sysroot, &config.dns)?;
        write_forwarding(sysroot, &config.routing)
    }
}
