// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{BaseConnection, InterfaceType, JsonDisplay, NicfgConnection};

#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// IP over InfiniBand connection
pub struct InfiniBandConnection {
    #[serde(flatten)]
    pub base: BaseConnection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipoib_mode: Option<IpoibMode>,
}

impl Default for InfiniBandConnection {
    fn default() -> Self {
        Self {
            base: BaseConnection {
                conn_type: InterfaceType::InfiniBand,
                ..Default::default()
            },
            ipoib_mode: None,
        }
    }
}

impl InfiniBandConnection {
    pub fn new(name: &str) -> Self {
        Self {
            base: BaseConnection::new(name, InterfaceType::InfiniBand),
            ipoib_mode: None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum IpoibMode {
    Datagram,
    Connected,
}

impl IpoibMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Datagram => "datagram",
            Self::Connected => "connected",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "datagram" => Some(Self::Datagram),
            "connected" => Some(Self::Connected),
            _ => None,
        }
    }
}

impl NicfgConnection for InfiniBandConnection {
    fn base_conn(&self) -> &BaseConnection {
        &self.base
    }

    fn base_conn_mut(&mut self) -> &mut BaseConnection {
        &mut self.base
    }
}
