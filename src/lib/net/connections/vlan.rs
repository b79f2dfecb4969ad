// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{BaseConnection, InterfaceType, JsonDisplay, NicfgConnection};

#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// VLAN connection on top of a parent interface.
///
/// Example yaml:
/// ```yml
/// name: eth1.101
/// type: vlan
/// vlan:
///   parent: eth1
///   id: 101
/// ```
pub struct VlanConnection {
    #[serde(flatten)]
    pub base: BaseConnection,
    #[serde(default)]
    pub vlan: VlanConfig,
}

impl Default for VlanConnection {
    fn default() -> Self {
        Self {
            base: BaseConnection {
                conn_type: InterfaceType::Vlan,
                ..Default::default()
            },
            vlan: VlanConfig::default(),
        }
    }
}

impl VlanConnection {
    pub fn new(name: &str, parent: &str, id: u16) -> Self {
        Self {
            base: BaseConnection::new(name, InterfaceType::Vlan),
            vlan: VlanConfig {
                parent: parent.to_string(),
                id: Some(id),
            },
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct VlanConfig {
    #[serde(default)]
    pub parent: String,
    /// VLAN ID. Undefined means the ID is taken from the interface name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u16>,
}

impl NicfgConnection for VlanConnection {
    fn base_conn(&self) -> &BaseConnection {
        &self.base
    }

    fn base_conn_mut(&mut self) -> &mut BaseConnection {
        &mut self.base
    }

    fn is_virtual(&self) -> bool {
        true
    }

    fn parent(&self) -> Option<&str> {
        if self.vlan.parent.is_empty() {
            None
        } else {
            Some(self.vlan.parent.as_str())
        }
    }

    fn rename_iface_refs(&mut self, old_name: &str, new_name: &str) {
        if self.vlan.parent == old_name {
            self.vlan.parent = new_name.to_string();
        }
    }
}

/// VLAN ID from interface names like `vlan101` or `eth0.101`.
pub(crate) fn vlan_id_from_name(name: &str) -> Option<u16> {
    let digits: String = name
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<char>>()
        .into_iter()
        .rev()
        .collect();
    if digits.is_empty() || digits.len() == name.len() {
        None
    } else {
        digits.parse().ok()
    }
}
