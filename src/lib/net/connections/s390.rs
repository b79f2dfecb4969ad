// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{BaseConnection, InterfaceType, JsonDisplay, NicfgConnection};

/// S390 channel device connection: qeth, ctc, lcs or hsi, distinguished
/// by the connection type.
///
/// Example yaml:
/// ```yml
/// name: eth0
/// type: qeth
/// s390:
///   read-channel: 0.0.0700
///   write-channel: 0.0.0701
///   data-channel: 0.0.0702
///   layer2: true
///   port-number: 0
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct S390Connection {
    #[serde(flatten)]
    pub base: BaseConnection,
    #[serde(default)]
    pub s390: S390Config,
}

impl Default for S390Connection {
    fn default() -> Self {
        Self {
            base: BaseConnection {
                conn_type: InterfaceType::Qeth,
                ..Default::default()
            },
            s390: S390Config::default(),
        }
    }
}

impl S390Connection {
    pub fn new(name: &str, conn_type: InterfaceType) -> Self {
        Self {
            base: BaseConnection::new(name, conn_type),
            s390: S390Config::default(),
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct S390Config {
    #[serde(default)]
    pub read_channel: String,
    #[serde(default)]
    pub write_channel: String,
    /// Only used by qeth and hsi.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_channel: Option<String>,
    #[serde(default)]
    pub layer2: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_number: Option<u32>,
    /// CTC protocol number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<u32>,
    /// LCS LAN command timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lancmd_timeout: Option<u32>,
}

impl S390Config {
    /// Channel IDs joined by space, the way they are stored on disk.
    pub fn channel_ids(&self) -> String {
        let mut ids = vec![self.read_channel.as_str(), self.write_channel.as_str()];
        if let Some(data) = self.data_channel.as_deref() {
            ids.push(data);
        }
        ids.retain(|i| !i.is_empty());
        ids.join(" ")
    }

    /// Load channel IDs from a space, comma or colon separated list.
    pub fn set_channel_ids(&mut self, ids: &str) {
        let mut ids = ids
            .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
            .filter(|i| !i.is_empty())
            .map(str::to_string);
        self.read_channel = ids.next().unwrap_or_default();
        self.write_channel = ids.next().unwrap_or_default();
        self.data_channel = ids.next();
    }
}

impl NicfgConnection for S390Connection {
    fn base_conn(&self) -> &BaseConnection {
        &self.base
    }

    fn base_conn_mut(&mut self) -> &mut BaseConnection {
        &mut self.base
    }
}
