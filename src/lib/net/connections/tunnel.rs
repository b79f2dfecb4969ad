// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{BaseConnection, InterfaceType, JsonDisplay, NicfgConnection};

/// TUN or TAP connection, distinguished by the connection type.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct TunnelConnection {
    #[serde(flatten)]
    pub base: BaseConnection,
    /// User owning the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Group owning the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Default for TunnelConnection {
    fn default() -> Self {
        Self {
            base: BaseConnection {
                conn_type: InterfaceType::Tun,
                ..Default::default()
            },
            owner: None,
            group: None,
        }
    }
}

impl TunnelConnection {
    /// `tap` selects TAP mode, otherwise TUN.
    pub fn new(name: &str, tap: bool) -> Self {
        Self {
            base: BaseConnection::new(
                name,
                if tap {
                    InterfaceType::Tap
                } else {
                    InterfaceType::Tun
                },
            ),
            owner: None,
            group: None,
        }
    }

    pub fn is_tap(&self) -> bool {
        self.base.conn_type == InterfaceType::Tap
    }
}

impl NicfgConnection for TunnelConnection {
    fn base_conn(&self) -> &BaseConnection {
        &self.base
    }

    fn base_conn_mut(&mut self) -> &mut BaseConnection {
        &mut self.base
    }

    fn is_virtual(&self) -> bool {
        true
    }
}
