// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use super::{
    KeyfileBackend, LoadedKeyfile,
    handlers::{KeyfileHandler, SECTION_CONNECTION, link_section},
    ip::{SECTION_IPV4, SECTION_IPV6, write_ip},
    key_file::KeyFile,
    keyfile_rel_path, load_keyfiles,
};
use crate::{
    Backend, Config, ConfigWriter, ConnectionConfig, InterfaceType,
    NicfgConnection, NicfgError, Startmode, Sysroot,
    forwarding::write_forwarding, hostname_file::write_static_hostname,
    hosts::write_hosts,
};

const PORT_KEYS: [&str; 4] =
    ["master", "slave-type", "controller", "port-type"];

/// Existing file holding the connection of same uuid, or same id when
/// `uuid` is unknown.
fn find_existing<'a>(
    loaded: &'a [LoadedKeyfile],
    id: &str,
    uuid: Option<&str>,
) -> Option<&'a LoadedKeyfile> {
    match uuid {
        Some(uuid) => loaded
            .iter()
            .find(|l| l.uuid() == Some(uuid))
            .or_else(|| loaded.iter().find(|l| l.id() == id)),
        None => loaded.iter().find(|l| l.id() == id),
    }
}

impl KeyfileBackend {
    fn write_conn(
        &self,
        conn: &ConnectionConfig,
        handler: &dyn KeyfileHandler,
        config: &Config,
        loaded: &[LoadedKeyfile],
        sysroot: &Sysroot,
    ) -> Result<(), NicfgError> {
        let base = conn.base_conn();
        let existing = find_existing(loaded, &base.name, base.uuid.as_deref());
        let (rel_path, mut kf): (PathBuf, KeyFile) = match existing {
            Some(l) => (l.rel_path.clone(), l.kf.clone()),
            None => (keyfile_rel_path(&base.name), KeyFile::default()),
        };

        let uuid = kf
            .get_non_empty(SECTION_CONNECTION, "uuid")
            .map(str::to_string)
            .or_else(|| base.uuid.clone())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let iface_name = base.interface_name();
        kf.set(SECTION_CONNECTION, "id", &base.name);
        kf.set(SECTION_CONNECTION, "uuid", &uuid);
        kf.set(SECTION_CONNECTION, "type", handler.nm_type());
        kf.set(SECTION_CONNECTION, "interface-name", iface_name);
        match base.startmode {
            Startmode::Manual | Startmode::Off => {
                kf.set_bool(SECTION_CONNECTION, "autoconnect", false)
            }
            _ => kf.remove(SECTION_CONNECTION, "autoconnect"),
        }
        kf.set_opt(SECTION_CONNECTION, "zone", base.firewall_zone.as_deref());

        for key in PORT_KEYS {
            kf.remove(SECTION_CONNECTION, key);
        }
        let controller = config.controller_of(iface_name);
        if let Some(controller) = controller {
            kf.set(SECTION_CONNECTION, "master", controller.interface_name());
            kf.set(
                SECTION_CONNECTION,
                "slave-type",
                if controller.conn_type() == &InterfaceType::Bridge {
                    "bridge"
                } else {
                    "bond"
                },
            );
            kf.remove_section(SECTION_IPV4);
            kf.remove_section(SECTION_IPV6);
        } else {
            let routes = match config.interfaces.by_name(iface_name) {
                Some(iface) => {
                    config.routing.routes_for(Some(iface.id()), Some(base))
                }
                None => Vec::new(),
            };
            write_ip(&mut kf, base, &routes, &config.dns);
        }

        let link = link_section(conn.conn_type());
        kf.set_opt(link, "mtu", base.mtu.map(|m| m.to_string()).as_deref());
        if link != "infiniband" && link != "loopback" {
            kf.set_opt(link, "cloned-mac-address", base.lladdress.as_deref());
        }

        handler.write(conn, &mut kf);
        sysroot.write_secret_file(&rel_path, &kf.to_string())
    }

    /// Connections for bond and bridge ports lacking one.
    fn missing_ports(&self, config: &Config) -> Vec<ConnectionConfig> {
        let mut ret: Vec<ConnectionConfig> = Vec::new();
        for port in config
            .connections
            .iter()
            .filter_map(|c| c.ports())
            .flatten()
        {
            if config.connections.by_interface(port).is_some()
                || ret.iter().any(|c| c.interface_name() == port)
            {
                continue;
            }
            let port_type = config
                .interfaces
                .by_name(port)
                .map(|i| i.iface_type().clone())
                .filter(|t| self.registry.contains(t))
                .unwrap_or(InterfaceType::Ethernet);
            if let Some(mut conn) = ConnectionConfig::new(port, &port_type) {
                conn.base_conn_mut().startmode = Startmode::Auto;
                ret.push(conn);
            }
        }
        ret
    }
}

impl ConfigWriter for KeyfileBackend {
    fn backend(&self) -> Backend {
        Backend::Keyfile
    }

    fn write(
        &self,
        config: &Config,
        old: Option<&Config>,
        sysroot: &Sysroot,
    ) -> Result<(), NicfgError> {
        let loaded = load_keyfiles(sysroot)?;
        if let Some(old) = old {
            for old_conn in old.connections.iter() {
                let old_uuid = old_conn.base_conn().uuid.as_deref();
                let kept = config.connections.iter().any(|c| {
                    c.name() == old_conn.name()
                        || (old_uuid.is_some()
                            && c.base_conn().uuid.as_deref() == old_uuid)
                });
                if !kept
                    && let Some(l) =
                        find_existing(&loaded, old_conn.name(), old_uuid)
                {
                    sysroot.remove_file(&l.rel_path)?;
                }
            }
        }
        // Removed files are not reused
        let loaded = load_keyfiles(sysroot)?;

        let ports = self.missing_ports(config);
        for conn in config.connections.iter().chain(ports.iter()) {
            let Some(handler) = self.registry.lookup(conn.conn_type()) else {
                log::warn!(
                    "Not writing connection {}: unsupported interface type \
                     {}",
                    conn.name(),
                    conn.conn_type()
                );
                continue;
            };
            self.write_conn(conn, handler, config, &loaded, sysroot)?;
        }

        write_forwarding(sysroot, &config.routing)?;
        write_static_hostname(sysroot, &config.hostname.static_name)?;
        write_hosts(sysroot, config, old)
    }
}
