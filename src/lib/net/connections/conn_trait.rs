// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{BaseConnection, BootProtocol, InterfaceType, Startmode};

/// Trait implemented by all type of connection configs.
pub trait NicfgConnection:
    std::fmt::Debug + for<'a> Deserialize<'a> + Serialize + Default + Clone
{
    fn base_conn(&self) -> &BaseConnection;

    fn base_conn_mut(&mut self) -> &mut BaseConnection;

    /// Whether the interface is created by the configuration instead of
    /// backed by hardware.
    fn is_virtual(&self) -> bool {
        self.conn_type().is_virtual()
    }

    fn name(&self) -> &str {
        self.base_conn().name.as_str()
    }

    fn conn_type(&self) -> &InterfaceType {
        &self.base_conn().conn_type
    }

    fn interface_name(&self) -> &str {
        self.base_conn().interface_name()
    }

    fn bootproto(&self) -> BootProtocol {
        self.base_conn().bootproto
    }

    fn startmode(&self) -> &Startmode {
        &self.base_conn().startmode
    }

    /// Port interface names for bonding and bridge, `None` for types unable
    /// to hold ports.
    fn ports(&self) -> Option<Vec<&str>> {
        None
    }

    /// Interface this one is stacked on, like the VLAN parent.
    fn parent(&self) -> Option<&str> {
        None
    }

    /// Mask secrets for Display and Debug.
    /// Please do not override this but implement
    /// `hide_secrets_conn_specific()` instead.
    fn hide_secrets(&mut self) {
        self.hide_secrets_conn_specific();
    }

    fn hide_secrets_conn_specific(&mut self) {}

    /// Update references to other interfaces (ports, parent) after
    /// interface `old_name` been renamed to `new_name`.
    fn rename_iface_refs(&mut self, _old_name: &str, _new_name: &str) {}
}
