// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{
    CollectionDiff, ConnectionConfig, JsonDisplayHideSecrets, NicfgConnection,
};

/// Ordered list of [ConnectionConfig] keyed by connection name.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonDisplayHideSecrets,
)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ConnectionConfigs {
    conns: Vec<ConnectionConfig>,
}

impl ConnectionConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConnectionConfig> {
        self.conns.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ConnectionConfig> {
        self.conns.iter_mut()
    }

    pub fn by_name(&self, name: &str) -> Option<&ConnectionConfig> {
        self.conns.iter().find(|c| c.name() == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut ConnectionConfig> {
        self.conns.iter_mut().find(|c| c.name() == name)
    }

    /// First connection applying to interface `iface_name`.
    pub fn by_interface(&self, iface_name: &str) -> Option<&ConnectionConfig> {
        self.conns.iter().find(|c| c.interface_name() == iface_name)
    }

    /// Replace the connection holding the same name in place or append it.
    pub fn add_or_update(&mut self, conn: ConnectionConfig) {
        match self.conns.iter_mut().find(|c| c.name() == conn.name()) {
            Some(existing) => *existing = conn,
            None => self.conns.push(conn),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ConnectionConfig> {
        let pos = self.conns.iter().position(|c| c.name() == name)?;
        Some(self.conns.remove(pos))
    }

    /// Remove every connection applying to interface `iface_name`.
    pub fn remove_by_interface(
        &mut self,
        iface_name: &str,
    ) -> Vec<ConnectionConfig> {
        let (removed, kept) = std::mem::take(&mut self.conns)
            .into_iter()
            .partition(|c| c.interface_name() == iface_name);
        self.conns = kept;
        removed
    }

    /// Follow interface rename: connection interface, connection name when
    /// equal to the interface name, ports and parent references.
    pub fn rename_interface(&mut self, old_name: &str, new_name: &str) {
        for conn in self.conns.iter_mut() {
            if conn.interface_name() == old_name {
                let base = conn.base_conn_mut();
                if base.name == old_name {
                    base.name = new_name.to_string();
                }
                if base.interface.is_some() || base.name != new_name {
                    base.interface = Some(new_name.to_string());
                }
            }
            conn.rename_iface_refs(old_name, new_name);
        }
    }

    pub(crate) fn hide_secrets(&mut self) {
        for conn in self.conns.iter_mut() {
            conn.hide_secrets();
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.conns.iter().map(|c| c.name()).collect()
    }

    /// Difference of `self`(new) against `old` by connection name.
    pub fn diff(&self, old: &Self) -> CollectionDiff {
        CollectionDiff::compute(
            self.conns.iter().map(|c| (c.name(), c)),
            old.conns.iter().map(|c| (c.name(), c)),
            |a, b| a == b,
        )
    }
}

impl<'a> IntoIterator for &'a ConnectionConfigs {
    type Item = &'a ConnectionConfig;
    type IntoIter = std::slice::Iter<'a, ConnectionConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.conns.iter()
    }
}

impl FromIterator<ConnectionConfig> for ConnectionConfigs {
    fn from_iter<I: IntoIterator<Item = ConnectionConfig>>(iter: I) -> Self {
        let mut ret = Self::new();
        for conn in iter {
            ret.add_or_update(conn);
        }
        ret
    }
}
