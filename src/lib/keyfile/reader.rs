// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use super::{
    KeyfileBackend, LoadedKeyfile,
    handlers::{SECTION_CONNECTION, conn_type_of, link_section},
    ip::KeyfileIp,
    key_file::KeyFile,
    load_keyfiles,
};
use crate::{
    Backend, BaseConnection, ConfigReader, ConnectionConfig,
    ConnectionConfigs, Dns, Hostname, HostsTable, Interface, InterfaceType,
    Interfaces, Issue, IssueLocation, Issues, NicfgConnection, NicfgError,
    Route, RouteDestination, RouteInterface, Routing, RoutingTable, Startmode,
    Sysroot, forwarding::read_forwarding, hostname_file::read_static_hostname,
};

const KEY_AUTOCONNECT: &str = "autoconnect";

fn read_startmode(kf: &KeyFile, path: &Path, issues: &mut Issues) -> Startmode {
    match kf
        .get_non_empty(SECTION_CONNECTION, KEY_AUTOCONNECT)
        .map(str::to_lowercase)
        .as_deref()
    {
        None | Some("true") | Some("yes") | Some("1") => Startmode::Auto,
        Some("false") | Some("no") | Some("0") => Startmode::Off,
        Some(value) => {
            issues.push(Issue::new(
                IssueLocation::new(path, "connection.autoconnect"),
                value,
                Startmode::Auto.name(),
                "Invalid boolean value".to_string(),
            ));
            Startmode::Auto
        }
    }
}

fn read_base(
    loaded: &LoadedKeyfile,
    conn_type: InterfaceType,
    hosts: &HostsTable,
    path: &Path,
    issues: &mut Issues,
) -> BaseConnection {
    let kf = &loaded.kf;
    let mut base = BaseConnection::new(loaded.id(), conn_type);
    if loaded.interface_name() != loaded.id() {
        base.interface = Some(loaded.interface_name().to_string());
    }
    base.uuid = loaded.uuid().map(str::to_string);
    base.firewall_zone = kf
        .get_non_empty(SECTION_CONNECTION, "zone")
        .map(str::to_string);
    base.startmode = read_startmode(kf, path, issues);
    KeyfileIp::read(kf, path, issues).apply_to(&mut base);
    let link = link_section(&base.conn_type);
    base.mtu = kf.get_u32(link, "mtu");
    base.lladdress = kf
        .get_non_empty(link, "cloned-mac-address")
        .map(str::to_string);
    if let Some(ip) = base.primary_address() {
        base.hostnames = hosts.names_of(&ip.address.to_string());
    }
    base
}

/// Controller named by a port connection, `None` for non-port.
fn controller_of(kf: &KeyFile) -> Option<&str> {
    let port_type = kf
        .get_non_empty(SECTION_CONNECTION, "port-type")
        .or_else(|| kf.get_non_empty(SECTION_CONNECTION, "slave-type"))?;
    if port_type != "bond" && port_type != "bridge" {
        log::debug!("Ignoring unsupported port type {port_type}");
        return None;
    }
    kf.get_non_empty(SECTION_CONNECTION, "controller")
        .or_else(|| kf.get_non_empty(SECTION_CONNECTION, "master"))
}

/// Append `port` to the connection referred by uuid, id or interface name.
fn add_port(conns: &mut ConnectionConfigs, controller: &str, port: &str) {
    let Some(conn) = conns.iter_mut().find(|c| {
        c.base_conn().uuid.as_deref() == Some(controller)
            || c.name() == controller
            || c.interface_name() == controller
    }) else {
        log::warn!("Controller {controller} of port {port} not found");
        return;
    };
    let ports = match conn {
        ConnectionConfig::Bond(c) => &mut c.bond.ports,
        ConnectionConfig::Bridge(c) => &mut c.bridge.ports,
        _ => {
            log::warn!(
                "Connection {controller} of port {port} is not a bond or \
                 bridge"
            );
            return;
        }
    };
    if !ports.iter().any(|p| p == port) {
        ports.push(port.to_string());
    }
}

impl KeyfileBackend {
    fn supported<'a>(
        &self,
        loaded: &'a [LoadedKeyfile],
    ) -> impl Iterator<Item = (&'a LoadedKeyfile, InterfaceType)> {
        loaded.iter().filter_map(|l| {
            let conn_type = conn_type_of(&l.kf);
            if self.registry.contains(&conn_type) {
                Some((l, conn_type))
            } else {
                None
            }
        })
    }
}

impl ConfigReader for KeyfileBackend {
    fn backend(&self) -> Backend {
        Backend::Keyfile
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
        let loaded = load_keyfiles(sysroot)?;
        for (l, conn_type) in self.supported(&loaded) {
            ifaces.find_or_create(l.interface_name(), conn_type);
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
        let loaded = load_keyfiles(sysroot)?;
        let mut conns = ConnectionConfigs::new();
        let mut ports: Vec<(&str, String)> = Vec::new();
        for l in loaded.iter() {
            let path = sysroot.path(&l.rel_path);
            let conn_type = conn_type_of(&l.kf);
            let Some(handler) = self.registry.lookup(&conn_type) else {
                log::warn!(
                    "Skipping {}: unsupported connection type {conn_type}",
                    path.display()
                );
                continue;
            };
            let base = read_base(l, conn_type.clone(), &hosts, &path, issues);
            ifaces.find_or_create(base.interface_name(), conn_type);
            if let Some(controller) = controller_of(&l.kf) {
                ports.push((controller, base.interface_name().to_string()));
            }
            conns.add_or_update(handler.read(&l.kf, base, &path, issues));
        }
        for (controller, port) in ports {
            add_port(&mut conns, controller, &port);
        }
        Ok(conns)
    }

    /// Gateways and routes of each connection bound to its interface.
    fn routes(
        &self,
        sysroot: &Sysroot,
        ifaces: &mut Interfaces,
        _issues: &mut Issues,
    ) -> Result<Routing, NicfgError> {
        let loaded = load_keyfiles(sysroot)?;
        let mut routes = Vec::new();
        for (l, conn_type) in self.supported(&loaded) {
            // Already reported by connections()
            let mut ignored = Issues::new();
            let ip = KeyfileIp::read(
                &l.kf,
                &sysroot.path(&l.rel_path),
                &mut ignored,
            );
            if ip.gateways.is_empty() && ip.routes.is_empty() {
                continue;
            }
            let id = ifaces.find_or_create(l.interface_name(), conn_type);
            for gw in ip.gateways {
                routes.push(Route::new(
                    RouteDestination::Default,
                    Some(gw),
                    RouteInterface::Bound(id),
                ));
            }
            for mut route in ip.routes {
                route.interface = RouteInterface::Bound(id);
                routes.push(route);
            }
        }
        let mut routing = Routing::new(vec![RoutingTable::new(routes)]);
        read_forwarding(sysroot, &mut routing)?;
        Ok(routing)
    }

    /// Union of the name servers and search domains of all connections.
    fn dns(
        &self,
        sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> Result<Dns, NicfgError> {
        let loaded = load_keyfiles(sysroot)?;
        let mut dns = Dns::default();
        for (l, _) in self.supported(&loaded) {
            let mut ignored = Issues::new();
            let ip = KeyfileIp::read(
                &l.kf,
                &sysroot.path(&l.rel_path),
                &mut ignored,
            );
            for ns in ip.nameservers {
                if !dns.nameservers.contains(&ns) {
                    dns.nameservers.push(ns);
                }
            }
            for domain in ip.searchlist {
                if !dns.searchlist.contains(&domain) {
                    dns.searchlist.push(domain);
                }
            }
        }
        Ok(dns)
    }

    fn hostname(
        &self,
        sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> Result<Hostname, NicfgError> {
        Ok(Hostname::new(&read_static_hostname(sysroot)?))
    }
}
