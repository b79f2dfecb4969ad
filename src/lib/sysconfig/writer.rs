// SPDX-License-Identifier: Apache-2.0

use super::{
    SysconfigBackend,
    base::write_base,
    ifcfg::{IfcfgFile, ifcfg_rel_path},
    netconfig::{KEY_SET_HOSTNAME, write_dhcp, write_dns},
    route_file::write_routes,
};
use crate::{
    Backend, Config, ConfigWriter, DhcpHostnamePolicy, NicfgConnection,
    NicfgError, Sysroot, forwarding::write_forwarding,
    hostname_file::write_static_hostname, hosts::write_hosts,
};

impl ConfigWriter for SysconfigBackend {
    fn backend(&self) -> Backend {
        Backend::Sysconfig
    }

    fn write(
        &self,
        config: &Config,
        old: Option<&Config>,
        sysroot: &Sysroot,
    ) -> Result<(), NicfgError> {
        let dhcp_iface = match &config.hostname.dhcp_hostname {
            DhcpHostnamePolicy::Interface(name) => Some(name.as_str()),
            _ => None,
        };
        for conn in config.connections.iter() {
            let Some(handler) = self.registry.lookup(conn.conn_type()) else {
                log::warn!(
                    "Not writing connection {}: unsupported interface type \
                     {}",
                    conn.name(),
                    conn.conn_type()
                );
                continue;
            };
            let name = conn.interface_name();
            let mut ifcfg = IfcfgFile::read(sysroot, name)?
                .unwrap_or_else(|| IfcfgFile::new(name));
            let orig = ifcfg.clone();
            write_base(conn.base_conn(), &mut ifcfg);
            handler.write(conn, &mut ifcfg);
            if dhcp_iface == Some(name) {
                ifcfg.vars.set_bool(KEY_SET_HOSTNAME, true);
            } else {
                ifcfg.vars.remove(KEY_SET_HOSTNAME);
            }
            if ifcfg != orig {
                ifcfg.write(sysroot)?;
            }
        }

        if let Some(old) = old {
            for old_conn in old.connections.iter() {
                let name = old_conn.interface_name();
                if config.connections.by_interface(name).is_none() {
                    sysroot.remove_file(ifcfg_rel_path(name))?;
                }
            }
        }

        write_routes(sysroot, config)?;
        write_forwarding(sysroot, &config.routing)?;
        write_dns(sysroot, &config.dns)?;
        write_dhcp(
            sysroot,
            &config.hostname.dhcp_hostname,
            config.dns.hostname_to_hosts,
        )?;
        write_static_hostname(sysroot, &config.hostname.static_name)?;
        write_hosts(sysroot, config, old)
    }
}
