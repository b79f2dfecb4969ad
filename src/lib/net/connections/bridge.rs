// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{BaseConnection, InterfaceType, JsonDisplay, NicfgConnection};

/// Linux bridge connection
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct BridgeConnection {
    #[serde(flatten)]
    pub base: BaseConnection,
    #[serde(default)]
    pub bridge: BridgeConfig,
}

impl Default for BridgeConnection {
    fn default() -> Self {
        Self {
            base: BaseConnection {
                conn_type: InterfaceType::Bridge,
                ..Default::default()
            },
            bridge: BridgeConfig::default(),
        }
    }
}

impl BridgeConnection {
    pub fn new(name: &str) -> Self {
        Self {
            base: BaseConnection::new(name, InterfaceType::Bridge),
            bridge: BridgeConfig::default(),
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct BridgeConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    /// Spanning tree protocol enabled.
    #[serde(default)]
    pub stp: bool,
    /// Forward delay in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_delay: Option<u32>,
}

impl NicfgConnection for BridgeConnection {
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
        Some(self.bridge.ports.iter().map(String::as_str).collect())
    }

    fn rename_iface_refs(&mut self, old_name: &str, new_name: &str) {
        for port in self.bridge.ports.iter_mut().filter(|p| *p == old_name) {
            *port = new_name.to_string();
        }
    }
}
