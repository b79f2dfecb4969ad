// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{BaseConnection, InterfaceType, JsonDisplay, NicfgConnection};

/// Bonding connection.
///
/// Example yaml:
/// ```yml
/// name: bond0
/// type: bond
/// bootproto: dhcp
/// startmode:
///   name: auto
/// bond:
///   ports:
///   - eth1
///   - eth2
///   options: mode=active-backup miimon=100
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct BondConnection {
    #[serde(flatten)]
    pub base: BaseConnection,
    #[serde(default)]
    pub bond: BondConfig,
}

impl Default for BondConnection {
    fn default() -> Self {
        Self {
            base: BaseConnection {
                conn_type: InterfaceType::Bond,
                ..Default::default()
            },
            bond: BondConfig::default(),
        }
    }
}

impl BondConnection {
    pub fn new(name: &str) -> Self {
        Self {
            base: BaseConnection::new(name, InterfaceType::Bond),
            bond: BondConfig::default(),
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct BondConfig {
    /// Port interface names in configured order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    /// Kernel bonding module options, space separated `key=value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl BondConfig {
    /// Options as `(key, value)` pairs.
    pub fn option_pairs(&self) -> Vec<(&str, &str)> {
        self.options
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|o| o.split_once('='))
            .collect()
    }
}

impl NicfgConnection for BondConnection {
    fn base_conn(&self) -> &BaseConnection {
        &self.base
    }

    fn base_conn_mut(&mut self) -> &mut BaseConnection {
        &mut self.base
    }

    fn is_virtual(&self) -> bool {
        true
    }

    fn ports(&self) -> Option<Vec<&str>> {
        Some(self.bond.ports.iter().map(String::as_str).collect())
    }

    fn rename_iface_refs(&mut self, old_name: &str, new_name: &str) {
        for port in self.bond.ports.iter_mut().filter(|p| *p == old_name) {
            *port = new_name.to_string();
        }
    }
}
