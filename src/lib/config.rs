// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{
    Backend, ConnectionConfig, ConnectionConfigs, DhcpHostnamePolicy, Dns,
    ErrorKind, Hostname, Interfaces, Issues, JsonDisplayHideSecrets,
    NicfgConnection, NicfgError, Route, Routing, Sysroot,
};

/// Whole network configuration of a host.
///
/// Created by a [crate::ConfigReader], mutated by the caller and handed to
/// one [crate::ConfigWriter]. Use [Config::copy()] to keep the original
/// for comparison.
///
/// Example yaml:
/// ```yml
/// interfaces:
/// - id: 0
///   name: eth0
///   type: ethernet
///   present: true
/// connections:
/// - name: eth0
///   type: ethernet
///   bootproto: static
///   startmode:
///     name: auto
///   ip:
///     address: 192.0.2.2/24
/// routing:
///   tables:
///   - routes:
///     - destination: default
///       gateway: 192.0.2.1
///       interface: unbound
///   forward-ipv4: false
///   forward-ipv6: false
/// backend: sysconfig
/// source: sysconfig
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonDisplayHideSecrets,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct Config {
    #[serde(default)]
    pub interfaces: Interfaces,
    #[serde(default)]
    pub connections: ConnectionConfigs,
    #[serde(default)]
    pub routing: Routing,
    #[serde(default)]
    pub dns: Dns,
    #[serde(default)]
    pub hostname: Hostname,
    /// Backend to write to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
    /// Backend this configuration was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Backend>,
}

impl Config {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend: Some(backend),
            ..Default::default()
        }
    }

    /// Read the configuration of `backend` stored below `sysroot`.
    pub fn read(
        backend: Backend,
        sysroot: &Sysroot,
        issues: &mut Issues,
    ) -> Result<Self, NicfgError> {
        backend.reader().read(sysroot, issues)
    }

    /// Write to [Config::backend]. `old` is the configuration read from
    /// the same target before.
    pub fn write(
        &self,
        sysroot: &Sysroot,
        old: Option<&Config>,
    ) -> Result<(), NicfgError> {
        let backend = self.backend.ok_or_else(|| {
            NicfgError::new(
                ErrorKind::InvalidBackend,
                "No backend defined for writing the configuration".into(),
            )
        })?;
        log::debug!(
            "Writing configuration to {backend} at {}",
            sysroot.root().display()
        );
        backend.writer().write(self, old, sysroot)
    }

    /// Independent snapshot for mutating without touching `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Rename interface and every reference to it: connections, ports,
    /// VLAN parents and DHCP hostname policy. Routes refer to the interface
    /// by ID hence follow automatically.
    pub fn rename_interface(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), NicfgError> {
        self.interfaces.rename(old_name, new_name)?;
        self.connections.rename_interface(old_name, new_name);
        if self.hostname.dhcp_hostname
            == DhcpHostnamePolicy::Interface(old_name.to_string())
        {
            self.hostname.dhcp_hostname =
                DhcpHostnamePolicy::Interface(new_name.to_string());
        }
        Ok(())
    }

    /// Add or replace connection config, creating a not present interface
    /// when the connection refers to an unknown one.
    pub fn add_or_update_connection_config(&mut self, conn: ConnectionConfig) {
        self.interfaces
            .find_or_create(conn.interface_name(), conn.conn_type().clone());
        self.connections.add_or_update(conn);
    }

    /// Remove interface, its connections and the routes bound to it.
    pub fn delete_interface(&mut self, name: &str) -> Result<(), NicfgError> {
        let iface = self.interfaces.remove(name).ok_or_else(|| {
            NicfgError::new(
                ErrorKind::NotFound,
                format!("Interface {name} not found"),
            )
        })?;
        self.connections.remove_by_interface(name);
        self.routing.remove_routes_for(iface.id());
        if self.hostname.dhcp_hostname
            == DhcpHostnamePolicy::Interface(name.to_string())
        {
            self.hostname.dhcp_hostname = DhcpHostnamePolicy::None;
        }
        Ok(())
    }

    /// Ports of a bond or bridge, taken from its connection config.
    pub fn ports_of(&self, name: &str) -> Vec<&str> {
        self.connections
            .by_interface(name)
            .and_then(|c| c.ports())
            .unwrap_or_default()
    }

    /// Connection holding `name` in its ports.
    pub fn controller_of(&self, name: &str) -> Option<&ConnectionConfig> {
        self.connections.iter().find(|c| {
            c.ports().map(|p| p.contains(&name)).unwrap_or_default()
        })
    }

    /// Routes a backend stores for interface `name`, or global routes when
    /// `name` is `None`. See [Routing::routes_for()].
    pub fn routes_for(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<&Route>, NicfgError> {
        let Some(name) = name else {
            return Ok(self.routing.routes_for(None, None));
        };
        let iface = self.interfaces.by_name(name).ok_or_else(|| {
            NicfgError::new(
                ErrorKind::NotFound,
                format!("Interface {name} not found"),
            )
        })?;
        Ok(self.routing.routes_for(
            Some(iface.id()),
            self.connections.by_interface(name).map(|c| c.base_conn()),
        ))
    }

    pub fn hide_secrets(&mut self) {
        self.connections.hide_secrets();
    }
}
