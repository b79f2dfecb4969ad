// SPDX-License-Identifier: Apache-2.0

use super::{
    SysconfigBackend,
    base::read_base,
    ifcfg::{IfcfgFile, list_ifcfg_names},
    netconfig::{KEY_SET_HOSTNAME, read_dhcp_hostname, read_dns},
    route_file::read_routes,
};
use crate::{
    Backend, ConfigReader, ConnectionConfigs, DhcpHostnamePolicy, Dns,
    Hostname, HostsTable, Hwinfo, Interface, Interfaces, Issues, NicfgError,
    Routing, Sysroot, forwarding::read_forwarding,
    hostname_file::read_static_hostname,
};

impl ConfigReader for SysconfigBackend {
    fn backend(&self) -> Backend {
        Backend::Sysconfig
    }

    fn interfaces(
        &self,
        sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> Result<Interfaces, NicfgError> {
        let hwinfos = sysroot.hardware.read(sysroot.root())?;
        let mut ifaces = Interfaces::new();
        for hwinfo in hwinfos.iter() {
            ifaces.push(Interface::from_hwinfo(hwinfo.clone()));
        }
        for name in list_ifcfg_names(sysroot)? {
            if ifaces.by_name(&name).is_some() {
                continue;
            }
            if let Some(ifcfg) = IfcfgFile::read(sysroot, &name)? {
                ifaces.push(Interface::new(&name, ifcfg.iface_type(&hwinfos)));
            }
        }
        Ok(ifaces)
    }

    fn connections(
        &self,
        sysroot: &Sysroot,
        ifaces: &mut Interfaces,
        issues: &mut Issues,
    ) -> Result<ConnectionConfigs, NicfgError> {
        let hosts = HostsTable::read(sysroot)?;
        let hwinfos: Vec<Hwinfo> = ifaces
            .iter()
            .filter(|i| i.present)
            .map(|i| Hwinfo::new(i.name(), i.iface_type().clone()))
            .collect();
        let mut conns = ConnectionConfigs::new();
        for name in list_ifcfg_names(sysroot)? {
            let Some(ifcfg) = IfcfgFile::read(sysroot, &name)? else {
                continue;
            };
            let conn_type = ifcfg.iface_type(&hwinfos);
            let Some(handler) = self.registry.lookup(&conn_type) else {
                log::warn!(
                    "Skipping {}: unsupported interface type {conn_type}",
                    ifcfg.path(sysroot).display()
                );
                continue;
            };
            let base =
                read_base(&ifcfg, conn_type.clone(), &hosts, sysroot, issues);
            ifaces.find_or_create(&name, conn_type);
            conns.add_or_update(handler.read(&ifcfg, base, sysroot, issues));
        }
        Ok(conns)
    }

    fn routes(
        &self,
        sysroot: &Sysroot,
        ifaces: &mut Interfaces,
        issues: &mut Issues,
    ) -> Result<Routing, NicfgError> {
        let mut routing = read_routes(sysroot, ifaces, issues)?;
        read_forwarding(sysroot, &mut routing)?;
        Ok(routing)
    }

    fn dns(
        &self,
        sysroot: &Sysroot,
        issues: &mut Issues,
    ) -> Result<Dns, NicfgError> {
        read_dns(sysroot, issues)
    }

    /// `DHCLIENT_SET_HOSTNAME=yes` of an interface file wins over the global
    /// flag of the `dhcp` file.
    fn hostname(
        &self,
        sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> Result<Hostname, NicfgError> {
        let mut hostname = Hostname::new(&read_static_hostname(sysroot)?);
        for name in list_ifcfg_names(sysroot)? {
            if let Some(ifcfg) = IfcfgFile::read(sysroot, &name)?
                && ifcfg.vars.get_bool(KEY_SET_HOSTNAME) == Some(true)
            {
                hostname.dhcp_hostname = DhcpHostnamePolicy::Interface(name);
                return Ok(hostname);
            }
        }
        hostname.dhcp_hostname = read_dhcp_hostname(sysroot)?;
        Ok(hostname)
    }
}
